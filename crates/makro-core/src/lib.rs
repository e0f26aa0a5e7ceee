mod app_config;
mod config;
pub mod products;

pub use app_config::{AppConfig, StoreInfo};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{
    ArticleKind, CanonicalProductRecord, Manufacturer, MeasurementValue, Nutrient,
    NutrientAmount, NutritionTable, ProductRow, RECORD_KEYS, STORE_KEYS,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
