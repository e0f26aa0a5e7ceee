//! Commands that work on files already on disk: `extract`, `merge` and
//! `convert`.

use std::path::{Path, PathBuf};

use makro_core::{AppConfig, ProductRow};

/// Assembles the output row for `product_id` from a saved detail response.
pub(crate) fn extract_file(
    config: &AppConfig,
    file: &Path,
    product_id: &str,
) -> anyhow::Result<ProductRow> {
    let body = std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", file.display()))?;
    extract_body(config, &body, product_id)
}

pub(crate) fn extract_body(
    config: &AppConfig,
    body: &str,
    product_id: &str,
) -> anyhow::Result<ProductRow> {
    let product_id = makro_scraper::normalize_product_id(product_id);
    let document = makro_scraper::parse_detail_response(body, &product_id)?;

    let extraction = makro_scraper::assemble_record(&document, &product_id, &config.base_url);
    extraction.log_fallback();
    Ok(ProductRow::new(extraction.record, &config.store))
}

/// `<results dir>/results.json`.
pub(crate) fn default_merge_output(config: &AppConfig) -> PathBuf {
    config.results_dir.join("results.json")
}

/// `<results dir>/output.csv`.
pub(crate) fn default_csv_output(config: &AppConfig) -> PathBuf {
    config.results_dir.join("output.csv")
}
