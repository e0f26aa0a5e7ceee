//! Builds one [`CanonicalProductRecord`] from a product detail document.
//!
//! Fields are resolved through [`FIELD_MAP`] one [`Phase`] at a time, so the
//! offer-price and unit-price extractors always read a record on which their
//! inputs are already set. Assembly cannot fail: every unresolvable field is
//! left as `None`.

use makro_core::CanonicalProductRecord;
use serde_json::Value;

use crate::extract::{
    extract_brand, extract_category, extract_characteristics, extract_ingredients,
    extract_manufacturer, extract_nutrition, extract_weight_article,
};
use crate::fields::{Field, Phase, FIELD_MAP};
use crate::measure::extract_measuring_unit;
use crate::path::{as_number, as_text, parse_number, resolve};
use crate::promotion::evaluate_offer;
use crate::unit_price::reconstruct_unit_price;

/// Result of assembling one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub record: CanonicalProductRecord,
    /// `true` when the unit price was computed from price, pack count and the
    /// weight in the product name instead of being read from the document.
    pub used_fallback: bool,
}

impl Extraction {
    /// Emits the audit warning for records whose unit price was reconstructed.
    pub fn log_fallback(&self) {
        if self.used_fallback {
            tracing::warn!(
                link = self.record.link.as_deref().unwrap_or_default(),
                unit_price = ?self.record.unit_price,
                denomination = self.record.denomination.as_deref().unwrap_or_default(),
                "unit price reconstructed from price with tax and product name"
            );
        }
    }
}

/// Assembles the canonical record for `product_id` from its detail document.
///
/// `base_url` is the storefront root used to build the product link.
#[must_use]
pub fn assemble_record(document: &Value, product_id: &str, base_url: &str) -> Extraction {
    let mut record = CanonicalProductRecord::default();
    let mut used_fallback = false;

    for phase in Phase::ALL {
        for (field, path) in FIELD_MAP.iter().filter(|(f, _)| f.phase() == phase) {
            let raw = resolve(document, path);
            used_fallback |= apply_field(*field, raw, document, &mut record);
        }
    }

    record.link = Some(product_link(
        base_url,
        product_id,
        record.denomination.as_deref().unwrap_or_default(),
    ));

    Extraction {
        record,
        used_fallback,
    }
}

/// Writes one field onto `record`. Returns `true` if the unit price had to be
/// reconstructed.
fn apply_field(
    field: Field,
    raw: &Value,
    document: &Value,
    record: &mut CanonicalProductRecord,
) -> bool {
    match field {
        Field::ProductIdInSupermarket => record.product_id_in_supermarket = as_text(raw),
        Field::Denomination => record.denomination = as_text(raw),
        Field::CategoryInSupermarket => record.category_in_supermarket = extract_category(raw),
        Field::Brand => record.brand = Some(extract_brand(raw)),
        Field::Manufacturer => record.manufacturer = extract_manufacturer(raw),
        Field::Description => record.description = as_text(raw),
        Field::MeasuringUnit => record.measuring_unit = extract_measuring_unit(raw, document),
        Field::Units => record.units = parse_number(raw),
        Field::PriceWithTax => record.price_with_tax = as_number(raw),
        Field::Price => record.price = as_number(raw),
        Field::OfferPrice => {
            let offer = evaluate_offer(raw, record, document);
            record.offer_price = offer.offer_price;
            record.percent_promotion = offer.percent_promotion;
            record.unit_price_with_offer = offer.unit_price_with_offer;
        }
        Field::KgGross => {
            let unit_price = reconstruct_unit_price(raw, record, document);
            record.kg_gross = as_number(raw);
            record.unit_price = unit_price.value;
            return unit_price.is_reconstructed();
        }
        Field::IsWeightArticle => record.is_weight_article = extract_weight_article(raw),
        Field::RawIngredients => record.raw_ingredients = extract_ingredients(raw),
        Field::NutritionInformation => {
            record.nutrition_information = extract_nutrition(raw);
        }
        Field::Characteristics => record.characteristics = extract_characteristics(raw),
        Field::Promotion => record.promotion = as_text(raw),
    }
    false
}

/// Storefront URL of a product page.
///
/// Spaces and slashes in the denomination become dashes.
#[must_use]
pub fn product_link(base_url: &str, product_id: &str, denomination: &str) -> String {
    let slug = denomination.replace([' ', '/'], "-");
    format!(
        "{}/shop/pv/{product_id}/0032/0021/{slug}",
        base_url.trim_end_matches('/')
    )
}

#[cfg(test)]
#[path = "assemble_test.rs"]
mod tests;
