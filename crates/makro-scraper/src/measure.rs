//! Net-content normalization and pack-size parsing.
//!
//! Upstream content data arrives as `{"value": .., "uom": ..}` with unit codes
//! such as `GRAM`, `ML`, `KG` or `L`. Grams and millilitres are scaled to
//! kilograms and litres; anything else is passed through unchanged.

use std::sync::LazyLock;

use makro_core::MeasurementValue;
use regex::Regex;
use serde_json::Value;

use crate::fields::secondary;
use crate::path::{is_truthy, parse_number, resolve};

/// `"85x20g"` (pack count × weight) or `"800g"` / `"2kg"`.
static PACK_SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)x(\d+(?:\.\d+)?)([kK]?[gG])|(\d+(?:\.\d+)?)([kK]?[gG])")
        .expect("valid pack size regex")
});

/// Grams assumed when a product name carries no recognizable weight.
pub const DEFAULT_GRAMS: f64 = 1000.0;

pub const KILOGRAM: &str = "KG";
pub const LITRE: &str = "L";

/// Normalizes a `{value, uom}` pair into a [`MeasurementValue`].
///
/// A non-empty `netContentVolume` in `document` takes precedence over `pair`.
/// The format token comes from the bundle selector with digits removed.
#[must_use]
pub fn normalize_measurement(pair: &Value, document: &Value) -> MeasurementValue {
    let format = match resolve(document, secondary::BUNDLE_SELECTOR) {
        Value::String(selector) => selector
            .chars()
            .filter(|c| !c.is_ascii_digit())
            .collect::<String>()
            .trim()
            .to_owned(),
        _ => String::new(),
    };

    let net_content = resolve(document, secondary::NET_CONTENT_VOLUME);
    let pair = if is_truthy(net_content) {
        net_content
    } else {
        pair
    };

    let raw = pair
        .get("value")
        .and_then(parse_number)
        .filter(|v| *v != 0.0);
    let unit = pair.get("uom").and_then(Value::as_str);

    let (unit, value) = match unit {
        Some("GRAM") => (KILOGRAM, raw.map_or(0.0, |v| v / 1000.0)),
        Some("ML") => (LITRE, raw.map_or(0.0, |v| v / 1000.0)),
        Some(other) => (other, raw.unwrap_or(0.0)),
        None => ("", raw.unwrap_or(0.0)),
    };

    MeasurementValue {
        format,
        value,
        unit: unit.to_owned(),
    }
}

/// Measuring-unit extractor: content weight per piece, else net piece weight.
///
/// Returns `None` when neither path holds data.
#[must_use]
pub fn extract_measuring_unit(raw: &Value, document: &Value) -> Option<MeasurementValue> {
    if is_truthy(raw) {
        return Some(normalize_measurement(raw, document));
    }

    let fallback = resolve(document, secondary::NET_PIECE_WEIGHT);
    if is_truthy(fallback) {
        tracing::debug!("weightPerPiece empty; using netPieceWeight");
        return Some(normalize_measurement(fallback, document));
    }

    None
}

/// Total grams named in a product title.
///
/// `"Atún 85x20g"` yields `1700.0`, `"Arroz 2Kg"` yields `2000.0`. The first
/// match wins; titles without a weight yield [`DEFAULT_GRAMS`].
#[must_use]
pub fn grams_in_name(name: &str) -> f64 {
    let Some(caps) = PACK_SIZE_RE.captures(name) else {
        return DEFAULT_GRAMS;
    };

    let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<f64>().ok());
    let multiplier = |i: usize| {
        caps.get(i)
            .map_or(1.0, |m| if m.as_str().eq_ignore_ascii_case("kg") { 1000.0 } else { 1.0 })
    };

    if let (Some(count), Some(weight)) = (number(1), number(2)) {
        return count * weight * multiplier(3);
    }
    if let Some(weight) = number(4) {
        return weight * multiplier(5);
    }
    DEFAULT_GRAMS
}
