//! Per-kilogram / per-litre price reconstruction.
//!
//! The storefront usually sends `kgGross`, which already is the unit price.
//! When it is missing the price is taken from `basePriceData.pricePerUnit`,
//! and failing that it is computed from the price with tax, the pack count
//! and the weight written in the product name.

use makro_core::CanonicalProductRecord;
use serde_json::Value;

use crate::fields::secondary;
use crate::measure::grams_in_name;
use crate::path::{as_number, resolve};

/// Where a unit price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitPriceSource {
    KgGross,
    NetPricePerUnit,
    /// Computed from price with tax, pack count and weight in the name.
    Reconstructed,
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitPrice {
    pub value: Option<f64>,
    pub source: UnitPriceSource,
}

impl UnitPrice {
    const UNAVAILABLE: UnitPrice = UnitPrice {
        value: None,
        source: UnitPriceSource::Unavailable,
    };

    /// `true` when the value had to be computed rather than read.
    #[must_use]
    pub fn is_reconstructed(&self) -> bool {
        self.source == UnitPriceSource::Reconstructed
    }
}

/// Rounds to two decimals. Exact ties go to the even cent.
pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Resolves the unit price for `record`.
///
/// `kg_gross` is the raw `kgGross` value. `record` must already carry price
/// with tax, measuring unit, pack count and denomination. A non-numeric
/// `kgGross` is treated like a missing one.
#[must_use]
pub fn reconstruct_unit_price(
    kg_gross: &Value,
    record: &CanonicalProductRecord,
    document: &Value,
) -> UnitPrice {
    if let Some(price) = as_number(kg_gross) {
        return UnitPrice {
            value: Some(price),
            source: UnitPriceSource::KgGross,
        };
    }

    if let Some(price) = as_number(resolve(document, secondary::NET_PRICE_PER_UNIT)) {
        return UnitPrice {
            value: Some(price),
            source: UnitPriceSource::NetPricePerUnit,
        };
    }

    let Some(price_with_tax) = record.price_with_tax else {
        tracing::debug!("no kgGross, pricePerUnit or finalPrice; unit price unavailable");
        return UnitPrice::UNAVAILABLE;
    };

    let grams = grams_in_name(record.denomination.as_deref().unwrap_or_default());
    let divisor = grams * record.unit_count();
    if divisor == 0.0 || !divisor.is_finite() {
        tracing::debug!(grams, unit_count = record.unit_count(), "unit price divisor is zero");
        return UnitPrice::UNAVAILABLE;
    }

    let value = round_cents(price_with_tax * 1000.0 / divisor);
    if !value.is_finite() {
        return UnitPrice::UNAVAILABLE;
    }

    UnitPrice {
        value: Some(value),
        source: UnitPriceSource::Reconstructed,
    }
}
