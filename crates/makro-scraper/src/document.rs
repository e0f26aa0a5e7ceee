//! Product identifiers and the `result.<id>` envelope of the detail endpoint.

use serde_json::Value;

use crate::error::ScraperError;

/// Variant suffix that listing pages append to article identifiers.
const VARIANT_SUFFIX: &str = "0032";

/// Trims `raw` and strips one trailing variant suffix.
///
/// Listing pages report `BTY-X1234560032`; the detail endpoint expects
/// `BTY-X123456`.
#[must_use]
pub fn normalize_product_id(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_suffix(VARIANT_SUFFIX)
        .unwrap_or(trimmed)
        .to_owned()
}

/// Takes the detail document for `product_id` out of a parsed response.
///
/// # Errors
///
/// Returns [`ScraperError::MissingProduct`] when `result.<product_id>` is
/// absent, `null`, or an empty object.
pub fn product_document(mut response: Value, product_id: &str) -> Result<Value, ScraperError> {
    let document = response
        .get_mut("result")
        .and_then(|result| result.get_mut(product_id))
        .map(Value::take)
        .unwrap_or_default();

    let empty = match &document {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if empty {
        return Err(ScraperError::MissingProduct {
            product_id: product_id.to_owned(),
        });
    }
    Ok(document)
}

/// Parses a raw detail response body and selects the document for `product_id`.
///
/// # Errors
///
/// - [`ScraperError::Deserialize`] if `body` is not JSON.
/// - [`ScraperError::MissingProduct`] if the product is not in the response.
pub fn parse_detail_response(body: &str, product_id: &str) -> Result<Value, ScraperError> {
    let response: Value =
        serde_json::from_str(body).map_err(|source| ScraperError::Deserialize {
            context: format!("detail response for {product_id}"),
            source,
        })?;
    product_document(response, product_id)
}
