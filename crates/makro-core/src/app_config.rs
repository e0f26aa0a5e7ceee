use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub country: String,
    pub locale: String,
    pub store_id: String,
    pub output_dir: PathBuf,
    pub results_dir: PathBuf,
    pub log_level: String,
    pub store: StoreInfo,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_max_retries: u32,
    pub scraper_retry_backoff_base_secs: u64,
    pub scraper_max_concurrent_products: usize,
    pub scraper_inter_request_delay_ms: u64,
}

/// Store metadata attached to every output row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreInfo {
    pub name: String,
    pub postal_code: String,
    pub currency: String,
    pub country: String,
}
