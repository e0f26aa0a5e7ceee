use makro_core::Nutrient;
use serde_json::json;

use super::*;
use crate::path::MISSING;

// -----------------------------------------------------------------------
// category
// -----------------------------------------------------------------------

#[test]
fn category_collapses_separators() {
    let raw = json!([{"name": "Dairy / Cheese"}]);
    assert_eq!(extract_category(&raw).as_deref(), Some("Dairy/Cheese"));
}

#[test]
fn category_uses_first_node_only() {
    let raw = json!([{"name": "Bebidas / Agua"}, {"name": "Ofertas"}]);
    assert_eq!(extract_category(&raw).as_deref(), Some("Bebidas/Agua"));
}

#[test]
fn category_absent_for_empty_or_non_list() {
    assert!(extract_category(&json!([])).is_none());
    assert!(extract_category(&MISSING).is_none());
    assert!(extract_category(&json!({"name": "Dairy"})).is_none());
}

#[test]
fn category_absent_when_first_node_has_no_name() {
    assert!(extract_category(&json!([{"id": 3}])).is_none());
}

// -----------------------------------------------------------------------
// brand / manufacturer / weight article
// -----------------------------------------------------------------------

#[test]
fn brand_passes_through_when_present() {
    assert_eq!(extract_brand(&json!("Aro")), "Aro");
}

#[test]
fn brand_falls_back_to_store_brand() {
    assert_eq!(extract_brand(&MISSING), "MAKRO");
    assert_eq!(extract_brand(&json!(null)), "MAKRO");
}

#[test]
fn manufacturer_is_trimmed_with_null_address() {
    let m = extract_manufacturer(&json!("  Conservas Garavilla S.A. ")).unwrap();
    assert_eq!(m.name, "Conservas Garavilla S.A.");
    assert!(m.address.is_none());
}

#[test]
fn manufacturer_absent_without_name() {
    assert!(extract_manufacturer(&MISSING).is_none());
}

#[test]
fn weight_article_matches_case_insensitively() {
    assert_eq!(
        extract_weight_article(&json!(" Weight ")),
        Some(ArticleKind::Weight)
    );
    assert!(extract_weight_article(&json!("piece")).is_none());
    assert!(extract_weight_article(&json!(true)).is_none());
}

// -----------------------------------------------------------------------
// ingredients
// -----------------------------------------------------------------------

#[test]
fn ingredients_join_leaf_labels_of_ingredient_block() {
    let raw = json!([
        {"label": "Alérgenos", "leafs": [{"label": "Pescado"}]},
        {"label": "Listado de ingredientes", "leafs": [
            {"label": "Atún,"},
            {"label": ""},
            {"label": "aceite de oliva,"},
            {"label": "sal."}
        ]}
    ]);
    assert_eq!(
        extract_ingredients(&raw).as_deref(),
        Some("Atún, aceite de oliva, sal.")
    );
}

#[test]
fn ingredients_absent_without_matching_block() {
    let raw = json!([{"label": "Alérgenos", "leafs": [{"label": "Pescado"}]}]);
    assert!(extract_ingredients(&raw).is_none());
    assert!(extract_ingredients(&MISSING).is_none());
}

// -----------------------------------------------------------------------
// nutrition
// -----------------------------------------------------------------------

#[test]
fn nutrition_maps_known_labels_and_drops_others() {
    let raw = json!({"rows": [
        {"rowLabel": "Valor energético kcal", "cells": [{"value": 198, "unitOfMeasure": "KCAL"}]},
        {"rowLabel": "Sal", "cells": [{"value": 1.1, "unitOfMeasure": "GRAM"}, {"value": 9}]},
        {"rowLabel": "Vitamina D", "cells": [{"value": 2, "unitOfMeasure": "MCG"}]}
    ]});
    let table = extract_nutrition(&raw).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table[&Nutrient::Calories].value, json!(198));
    assert_eq!(table[&Nutrient::Calories].unit.as_deref(), Some("KCAL"));
    assert_eq!(table[&Nutrient::Salt].value, json!(1.1));
}

#[test]
fn nutrition_skips_rows_without_cells() {
    let raw = json!({"rows": [{"rowLabel": "Grasas", "cells": []}]});
    assert!(extract_nutrition(&raw).unwrap().is_empty());
}

#[test]
fn nutrition_absent_for_non_object() {
    assert!(extract_nutrition(&MISSING).is_none());
    assert!(extract_nutrition(&json!([])).is_none());
}

// -----------------------------------------------------------------------
// characteristics
// -----------------------------------------------------------------------

#[test]
fn characteristics_join_rows_and_collapse_whitespace() {
    let raw = json!({"rows": [
        {"rowLabel": "Conservación", "cells": [{"value": " Lugar fresco   y seco ", "unit": ""}]},
        {"rowLabel": " Origen ", "cells": [{"value": "España", "unit": null}]},
        {"rowLabel": "", "cells": [{"value": "ignored"}]}
    ]});
    assert_eq!(
        extract_characteristics(&raw).as_deref(),
        Some("Conservación: Lugar fresco y seco. Origen: España")
    );
}

#[test]
fn characteristics_concatenate_cell_values_in_order() {
    let raw = json!({"rows": [
        {"rowLabel": "Peso", "cells": [{"value": "500", "unitOfMeasure": "g"}]}
    ]});
    assert_eq!(
        extract_characteristics(&raw).as_deref(),
        Some("Peso: 500 g")
    );
}

#[test]
fn characteristics_absent_when_no_rows_yield_text() {
    assert!(extract_characteristics(&json!({"rows": []})).is_none());
    assert!(extract_characteristics(&json!({"rows": [{"rowLabel": "A", "cells": [{"v": ""}]}]})).is_none());
    assert!(extract_characteristics(&MISSING).is_none());
}
