use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::StoreInfo;

/// Output keys of a [`CanonicalProductRecord`], in storage order.
///
/// Every serialized record carries all of these keys; unresolvable values are
/// written as `null`, never omitted.
pub const RECORD_KEYS: [&str; 21] = [
    "productIdInSupermarket",
    "denomination",
    "categoryInSupermarket",
    "brand",
    "manufacturer",
    "description",
    "measuringUnit",
    "units",
    "priceWithTax",
    "price",
    "offerPrice",
    "kgGross",
    "isWeightArticle",
    "rawIngredients",
    "nutritionInformation",
    "characteristics",
    "promotion",
    "unitPrice",
    "percentPromotion",
    "unitPriceWithOffer",
    "link",
];

/// Store metadata keys appended to every [`ProductRow`].
pub const STORE_KEYS: [&str; 4] = ["supermarket", "supermarketPostalCode", "currency", "country"];

/// A product detail document flattened into one comparable record.
///
/// Prices are `f64` at this layer; they are rounded to two decimals only
/// where a value is derived (unit price, offer unit price, percent promotion).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalProductRecord {
    /// Customer-facing article number shown on the storefront.
    pub product_id_in_supermarket: Option<String>,
    /// Display name, e.g. `"Atún claro en aceite de oliva 85x20g"`.
    pub denomination: Option<String>,
    /// First category path with `" / "` collapsed to `"/"`.
    pub category_in_supermarket: Option<String>,
    /// Brand name, or the store brand when upstream leaves it empty.
    pub brand: Option<String>,
    pub manufacturer: Option<Manufacturer>,
    pub description: Option<String>,
    pub measuring_unit: Option<MeasurementValue>,
    /// Pack count (`selector.contentSize`).
    pub units: Option<f64>,
    pub price_with_tax: Option<f64>,
    /// Shelf price.
    pub price: Option<f64>,
    /// Offer price; `None` when it merely repeats the shelf price.
    pub offer_price: Option<f64>,
    /// Raw per-kilogram gross price as returned upstream.
    pub kg_gross: Option<f64>,
    pub is_weight_article: Option<ArticleKind>,
    pub raw_ingredients: Option<String>,
    pub nutrition_information: Option<NutritionTable>,
    pub characteristics: Option<String>,
    /// Promotion label text.
    pub promotion: Option<String>,
    /// Price per kilogram or litre.
    pub unit_price: Option<f64>,
    /// Fractional discount, e.g. `0.25` for 25% off.
    pub percent_promotion: Option<f64>,
    pub unit_price_with_offer: Option<f64>,
    pub link: Option<String>,
}

impl CanonicalProductRecord {
    /// Returns `true` when the offer price differs from the shelf price and a
    /// discount could be computed.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.percent_promotion.is_some()
    }

    /// Returns `true` for articles sold by weight.
    #[must_use]
    pub fn is_weight_article(&self) -> bool {
        self.is_weight_article == Some(ArticleKind::Weight)
    }

    /// Measuring-unit magnitude times pack count, defaulting each factor to 1.
    #[must_use]
    pub fn unit_count(&self) -> f64 {
        let measure = self.measuring_unit.as_ref().map_or(1.0, |m| m.value);
        measure * self.units.unwrap_or(1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub name: String,
    /// Never populated by the storefront API.
    pub address: Option<String>,
}

/// Net content of one pack, normalized to kilograms or litres where the
/// upstream unit is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementValue {
    /// Bundle descriptor with digits stripped, e.g. `"unidad"`.
    pub format: String,
    pub value: f64,
    /// `"KG"`, `"L"`, or the upstream unit code passed through.
    pub unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArticleKind {
    #[serde(rename = "WEIGHT")]
    Weight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Nutrient {
    Calories,
    Protein,
    Fat,
    Carbohydrates,
    Sugars,
    Salt,
    SaturatedFattyAcids,
    Fiber,
}

/// One nutrition table cell. `value` is kept exactly as upstream sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientAmount {
    pub value: serde_json::Value,
    pub unit: Option<String>,
}

/// Nutrients found in the source table. Missing nutrients are absent, not zero.
pub type NutritionTable = BTreeMap<Nutrient, NutrientAmount>;

/// A canonical record plus the store it was scraped from; the unit written to
/// line-delimited output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    #[serde(flatten)]
    pub record: CanonicalProductRecord,
    pub supermarket: String,
    pub supermarket_postal_code: String,
    pub currency: String,
    pub country: String,
}

impl ProductRow {
    #[must_use]
    pub fn new(record: CanonicalProductRecord, store: &StoreInfo) -> Self {
        Self {
            record,
            supermarket: store.name.clone(),
            supermarket_postal_code: store.postal_code.clone(),
            currency: store.currency.clone(),
            country: store.country.clone(),
        }
    }
}
