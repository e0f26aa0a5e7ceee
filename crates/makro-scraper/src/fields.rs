//! Static field map of the storefront detail document.
//!
//! Each path-bound output field is listed with the key chain that reaches its
//! raw value. Extraction runs phase by phase (see [`Phase`]) so that
//! price-derived fields always see the shelf price, pack count and measuring
//! unit they depend on.

use makro_core::Nutrient;

use crate::path::FieldPath;

/// Fields whose raw value is reached through [`FIELD_MAP`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ProductIdInSupermarket,
    Denomination,
    CategoryInSupermarket,
    Brand,
    Manufacturer,
    Description,
    MeasuringUnit,
    Units,
    PriceWithTax,
    Price,
    OfferPrice,
    KgGross,
    IsWeightArticle,
    RawIngredients,
    NutritionInformation,
    Characteristics,
    Promotion,
}

/// Extraction phases, run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Fields that read nothing but the document.
    Base,
    /// Offer price; reads shelf price, measuring unit and pack count.
    Price,
    /// Unit price; reads price with tax, measuring unit, pack count and name.
    DerivedPrice,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Base, Phase::Price, Phase::DerivedPrice];
}

impl Field {
    #[must_use]
    pub fn phase(self) -> Phase {
        match self {
            Field::OfferPrice => Phase::Price,
            Field::KgGross => Phase::DerivedPrice,
            _ => Phase::Base,
        }
    }
}

const VARIANT: &str = "0032";
const BUNDLE: &str = "0021";
const STORE: &str = "00057";

/// Every path-bound field with its key chain, in record order.
pub const FIELD_MAP: [(Field, FieldPath); 17] = [
    (
        Field::ProductIdInSupermarket,
        &["variants", VARIANT, "bundles", BUNDLE, "customerDisplayId"],
    ),
    (Field::Denomination, &["variants", VARIANT, "description"]),
    (
        Field::CategoryInSupermarket,
        &["variants", VARIANT, "categories"],
    ),
    (Field::Brand, &["brandName"]),
    (
        Field::Manufacturer,
        &[
            "variants", VARIANT, "bundles", BUNDLE, "stores", STORE, "supplier", "supplierName",
        ],
    ),
    (
        Field::Description,
        &["variants", VARIANT, "bundles", BUNDLE, "details", "longDescription"],
    ),
    (
        Field::MeasuringUnit,
        &["variants", VARIANT, "bundles", BUNDLE, "contentData", "weightPerPiece"],
    ),
    (
        Field::Units,
        &["variants", VARIANT, "bundles", BUNDLE, "selector", "contentSize"],
    ),
    (
        Field::PriceWithTax,
        &[
            "variants", VARIANT, "bundles", BUNDLE, "stores", STORE, "sellingPriceInfo", "finalPrice",
        ],
    ),
    (
        Field::Price,
        &[
            "variants", VARIANT, "bundles", BUNDLE, "stores", STORE, "sellingPriceInfo", "shelfPrice",
        ],
    ),
    (
        Field::OfferPrice,
        &[
            "variants", VARIANT, "bundles", BUNDLE, "stores", STORE, "sellingPriceInfo", "basePrice",
        ],
    ),
    (
        Field::KgGross,
        &[
            "variants", VARIANT, "bundles", BUNDLE, "stores", STORE, "sellingPriceInfo", "kgGross",
        ],
    ),
    (
        Field::IsWeightArticle,
        &["variants", VARIANT, "bundles", BUNDLE, "isWeightArticle"],
    ),
    (
        Field::RawIngredients,
        &["variants", VARIANT, "bundles", BUNDLE, "details", "features"],
    ),
    (
        Field::NutritionInformation,
        &["variants", VARIANT, "bundles", BUNDLE, "details", "nutritionalTable"],
    ),
    (
        Field::Characteristics,
        &["variants", VARIANT, "bundles", BUNDLE, "details", "characteristicsTable"],
    ),
    (
        Field::Promotion,
        &[
            "variants", VARIANT, "bundles", BUNDLE, "stores", STORE, "sellingPriceInfo",
            "summaryDnrInfo", "name",
        ],
    ),
];

/// Secondary lookups made by extractors that need more than their own field.
pub mod secondary {
    use super::{BUNDLE, STORE, VARIANT};
    use crate::path::FieldPath;

    pub const NET_PIECE_WEIGHT: FieldPath =
        &["variants", VARIANT, "bundles", BUNDLE, "contentData", "netPieceWeight"];

    pub const NET_CONTENT_VOLUME: FieldPath =
        &["variants", VARIANT, "bundles", BUNDLE, "contentData", "netContentVolume"];

    pub const BUNDLE_SELECTOR: FieldPath = &["variants", VARIANT, "bundleSelector", BUNDLE];

    pub const PROMOTION_LABELS: FieldPath = &[
        "variants", VARIANT, "bundles", BUNDLE, "stores", STORE, "sellingPriceInfo",
        "promotionLabels",
    ];

    pub const PROMOTION_LEVELS: FieldPath = &[
        "variants", VARIANT, "bundles", BUNDLE, "stores", STORE, "sellingPriceInfo",
        "summaryDnrInfo", "levels",
    ];

    pub const NET_PRICE_PER_UNIT: FieldPath = &[
        "variants", VARIANT, "bundles", BUNDLE, "stores", STORE, "sellingPriceInfo",
        "basePriceData", "pricePerUnit", "netPrice",
    ];
}

/// Brand recorded when the storefront leaves `brandName` empty.
pub const STORE_BRAND: &str = "MAKRO";

/// Label of the feature block that lists ingredients.
pub const INGREDIENTS_LABEL: &str = "Listado de ingredientes";

/// Nutrition table row labels and the nutrient each one maps to.
pub const NUTRITION_LABELS: [(&str, Nutrient); 8] = [
    ("Valor energético kcal", Nutrient::Calories),
    ("Proteínas", Nutrient::Protein),
    ("Grasas", Nutrient::Fat),
    ("de los cuales azúcares", Nutrient::Sugars),
    ("Hidratos de carbono", Nutrient::Carbohydrates),
    ("Fibra alimentaria", Nutrient::Fiber),
    ("de las cuales saturadas", Nutrient::SaturatedFattyAcids),
    ("Sal", Nutrient::Salt),
];

/// Looks up the nutrient for a table row label (exact match).
#[must_use]
pub fn nutrient_for_label(label: &str) -> Option<Nutrient> {
    NUTRITION_LABELS
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, nutrient)| *nutrient)
}
