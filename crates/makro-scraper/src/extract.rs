//! Per-field extractors for descriptive (non-price) fields.
//!
//! Each extractor takes the raw value resolved from the field map and never
//! fails: an unexpected shape degrades to `None` for that field only.

use makro_core::{ArticleKind, Manufacturer, NutrientAmount, NutritionTable};
use serde_json::Value;

use crate::fields::{nutrient_for_label, INGREDIENTS_LABEL, STORE_BRAND};
use crate::path::is_truthy;

/// Name of the first category node, with `" / "` collapsed to `"/"`.
/// `None` when that node has no name.
#[must_use]
pub fn extract_category(raw: &Value) -> Option<String> {
    let first = raw.as_array()?.first()?;
    let name = first.get("name")?.as_str()?;
    Some(name.replace(" / ", "/"))
}

/// Brand name, or [`STORE_BRAND`] when upstream leaves it empty.
#[must_use]
pub fn extract_brand(raw: &Value) -> String {
    match raw {
        Value::String(name) if !name.is_empty() => name.clone(),
        _ => STORE_BRAND.to_owned(),
    }
}

#[must_use]
pub fn extract_manufacturer(raw: &Value) -> Option<Manufacturer> {
    match raw {
        Value::String(name) if !name.is_empty() => Some(Manufacturer {
            name: name.trim().to_owned(),
            address: None,
        }),
        _ => None,
    }
}

#[must_use]
pub fn extract_weight_article(raw: &Value) -> Option<ArticleKind> {
    raw.as_str()
        .filter(|flag| flag.trim().eq_ignore_ascii_case("weight"))
        .map(|_| ArticleKind::Weight)
}

/// Leaf labels of the ingredient-list feature block, space-joined.
#[must_use]
pub fn extract_ingredients(raw: &Value) -> Option<String> {
    let ingredients: Vec<&str> = raw
        .as_array()
        .into_iter()
        .flatten()
        .filter(|block| block.get("label").and_then(Value::as_str) == Some(INGREDIENTS_LABEL))
        .flat_map(|block| block.get("leafs").and_then(Value::as_array).into_iter().flatten())
        .filter_map(|leaf| leaf.get("label").and_then(Value::as_str))
        .filter(|label| !label.is_empty())
        .collect();

    if ingredients.is_empty() {
        None
    } else {
        Some(ingredients.join(" "))
    }
}

/// Nutrition rows whose label is a known nutrient; other rows are dropped.
///
/// Returns `None` only when the table itself is not an object. A table with
/// no recognized rows yields an empty map.
#[must_use]
pub fn extract_nutrition(raw: &Value) -> Option<NutritionTable> {
    let table = raw.as_object()?;
    let mut nutrition = NutritionTable::new();

    let rows = table.get("rows").and_then(Value::as_array);
    for row in rows.into_iter().flatten() {
        let Some(nutrient) = row
            .get("rowLabel")
            .and_then(Value::as_str)
            .and_then(nutrient_for_label)
        else {
            continue;
        };

        let first_cell = row
            .get("cells")
            .and_then(Value::as_array)
            .and_then(|cells| cells.first())
            .and_then(Value::as_object);

        if let Some(cell) = first_cell {
            nutrition.insert(
                nutrient,
                NutrientAmount {
                    value: cell.get("value").cloned().unwrap_or(Value::Null),
                    unit: cell
                        .get("unitOfMeasure")
                        .and_then(Value::as_str)
                        .map(str::to_owned),
                },
            );
        }
    }

    Some(nutrition)
}

/// `"<label>: <cell values>"` entries joined with `". "`, whitespace collapsed.
#[must_use]
pub fn extract_characteristics(raw: &Value) -> Option<String> {
    let rows = raw.as_object()?.get("rows")?.as_array()?;
    let mut entries = Vec::new();

    for row in rows {
        let label = row
            .get("rowLabel")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim();
        if label.is_empty() {
            continue;
        }

        let cells = row.get("cells").and_then(Value::as_array);
        for cell in cells.into_iter().flatten().filter_map(Value::as_object) {
            let value = cell
                .values()
                .filter(|v| is_truthy(v))
                .filter_map(Value::as_str)
                .map(str::trim)
                .collect::<Vec<_>>()
                .join(" ");
            let value = value.trim();
            if !value.is_empty() {
                entries.push(format!("{label}: {value}"));
            }
        }
    }

    if entries.is_empty() {
        return None;
    }
    let joined = entries.join(". ");
    Some(joined.split_whitespace().collect::<Vec<_>>().join(" "))
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
