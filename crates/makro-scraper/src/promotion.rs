//! Offer price evaluation.
//!
//! `basePrice` repeats the shelf price on most articles. It only counts as an
//! offer when it differs from the shelf price, or when the document carries
//! promotion labels or tiered-discount levels.

use makro_core::CanonicalProductRecord;
use serde_json::Value;

use crate::fields::secondary;
use crate::path::{as_number, is_truthy, resolve};
use crate::unit_price::round_cents;

/// Offer price and the two values derived from it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OfferEvaluation {
    pub offer_price: Option<f64>,
    pub percent_promotion: Option<f64>,
    pub unit_price_with_offer: Option<f64>,
}

/// Evaluates the raw `basePrice` against the shelf price already on `record`.
///
/// When the offer equals the shelf price and a promotion label or level is
/// present, the offer is kept but no discount is computed.
#[must_use]
pub fn evaluate_offer(
    raw: &Value,
    record: &CanonicalProductRecord,
    document: &Value,
) -> OfferEvaluation {
    let Some(offer) = as_number(raw) else {
        return OfferEvaluation::default();
    };

    if record.price == Some(offer) {
        let labels = resolve(document, secondary::PROMOTION_LABELS);
        let levels = resolve(document, secondary::PROMOTION_LEVELS);
        if !is_truthy(labels) && !is_truthy(levels) {
            return OfferEvaluation::default();
        }

        tracing::debug!(offer, "offer equals shelf price but promotion data is present");
        return OfferEvaluation {
            offer_price: Some(offer),
            ..OfferEvaluation::default()
        };
    }

    let percent_promotion = record
        .price
        .filter(|shelf| *shelf != 0.0)
        .map(|shelf| round_cents(1.0 - offer / shelf))
        .filter(|p| p.is_finite());

    let unit_count = record
        .measuring_unit
        .as_ref()
        .map_or(1.0, |m| m.value * record.units.unwrap_or(1.0));
    let unit_price_with_offer = Some(unit_count)
        .filter(|count| *count != 0.0)
        .map(|count| round_cents(offer / count))
        .filter(|p| p.is_finite());

    OfferEvaluation {
        offer_price: Some(offer),
        percent_promotion,
        unit_price_with_offer,
    }
}
