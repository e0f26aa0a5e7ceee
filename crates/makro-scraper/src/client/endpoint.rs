//! Detail endpoint URL construction.

use makro_core::AppConfig;
use reqwest::Url;

use crate::error::ScraperError;

const DETAIL_PATH: &str = "evaluate.article.v1/betty-articles";

/// Storefront selection sent with every detail request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogParams {
    pub country: String,
    pub locale: String,
    pub store_id: String,
}

impl Default for CatalogParams {
    fn default() -> Self {
        Self {
            country: "ES".to_owned(),
            locale: "es-ES".to_owned(),
            store_id: "00057".to_owned(),
        }
    }
}

impl From<&AppConfig> for CatalogParams {
    fn from(config: &AppConfig) -> Self {
        Self {
            country: config.country.clone(),
            locale: config.locale.clone(),
            store_id: config.store_id.clone(),
        }
    }
}

/// Builds the detail URL for `product_id`, cache-busted with the current time.
pub(crate) fn product_url(
    base_url: &str,
    product_id: &str,
    params: &CatalogParams,
) -> Result<Url, ScraperError> {
    product_url_at(
        base_url,
        product_id,
        params,
        chrono::Utc::now().timestamp_millis(),
    )
}

/// Builds the detail URL with an explicit `__t` value (Unix milliseconds).
///
/// The path is resolved against `base_url` like a relative link, so a base
/// ending in `/` keeps its path and one without drops the last segment.
pub(crate) fn product_url_at(
    base_url: &str,
    product_id: &str,
    params: &CatalogParams,
    timestamp_ms: i64,
) -> Result<Url, ScraperError> {
    let invalid = |reason: String| ScraperError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason,
    };

    let base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_owned()));
    }
    let mut url = base.join(DETAIL_PATH).map_err(|e| invalid(e.to_string()))?;

    url.query_pairs_mut()
        .append_pair("ids", product_id)
        .append_pair("country", &params.country)
        .append_pair("locale", &params.locale)
        .append_pair("storeIds", &params.store_id)
        .append_pair("details", "true")
        .append_pair("__t", &timestamp_ms.to_string());

    Ok(url)
}
