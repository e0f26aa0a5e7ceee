use crate::app_config::{AppConfig, StoreInfo};
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so the only failure mode is a present but
/// malformed numeric value.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;
    use std::str::FromStr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_num = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        u64::from_str(raw.trim()).map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let narrow = |var: &str, value: u64| -> Result<u32, ConfigError> {
        u32::try_from(value).map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let base_url = or_default("MAKRO_BASE_URL", "https://tienda.makro.es/");
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "MAKRO_BASE_URL".to_string(),
            reason: format!("\"{base_url}\" is not an http(s) URL"),
        });
    }

    let store = StoreInfo {
        name: or_default("MAKRO_SUPERMARKET_NAME", "MAKRO"),
        postal_code: or_default("MAKRO_SUPERMARKET_POSTAL_CODE", "28001"),
        currency: or_default("MAKRO_CURRENCY", "EUR"),
        country: or_default("MAKRO_SUPERMARKET_COUNTRY", "ES"),
    };

    let scraper_request_timeout_secs = parse_num("MAKRO_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default("MAKRO_SCRAPER_USER_AGENT", DEFAULT_USER_AGENT);
    let scraper_max_retries = narrow(
        "MAKRO_SCRAPER_MAX_RETRIES",
        parse_num("MAKRO_SCRAPER_MAX_RETRIES", "3")?,
    )?;
    let scraper_retry_backoff_base_secs =
        parse_num("MAKRO_SCRAPER_RETRY_BACKOFF_BASE_SECS", "3")?;
    let scraper_max_concurrent_products =
        parse_num("MAKRO_SCRAPER_MAX_CONCURRENT_PRODUCTS", "4")?;
    let scraper_inter_request_delay_ms = parse_num("MAKRO_SCRAPER_INTER_REQUEST_DELAY_MS", "250")?;

    if scraper_max_concurrent_products == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MAKRO_SCRAPER_MAX_CONCURRENT_PRODUCTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        base_url,
        country: or_default("MAKRO_COUNTRY", "ES"),
        locale: or_default("MAKRO_LOCALE", "es-ES"),
        store_id: or_default("MAKRO_STORE_ID", "00057"),
        output_dir: PathBuf::from(or_default("MAKRO_OUTPUT_DIR", "jsonl_output")),
        results_dir: PathBuf::from(or_default("MAKRO_RESULTS_DIR", "results")),
        log_level: or_default("MAKRO_LOG_LEVEL", "info"),
        store,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_max_retries,
        scraper_retry_backoff_base_secs,
        scraper_max_concurrent_products: usize::try_from(scraper_max_concurrent_products)
            .unwrap_or(usize::MAX),
        scraper_inter_request_delay_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
