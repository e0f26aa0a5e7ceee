//! `scrape` command: fetch, assemble and write products concurrently.
//!
//! A failure for one product is logged and counted; it never aborts the
//! rest of the batch.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::stream::{self, StreamExt};
use makro_core::{AppConfig, ProductRow};
use makro_scraper::{CatalogClient, CatalogParams};

/// Counts reported at the end of a scrape run.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ScrapeTotals {
    pub written: usize,
    pub failed: usize,
    /// Written records whose unit price was reconstructed.
    pub fallbacks: usize,
}

/// Result of one product: the file written and whether the unit price was
/// reconstructed.
struct ProductOutcome {
    path: PathBuf,
    used_fallback: bool,
}

pub(crate) fn build_catalog_client(config: &AppConfig) -> anyhow::Result<CatalogClient> {
    CatalogClient::new(
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
        config.scraper_max_retries,
        config.scraper_retry_backoff_base_secs,
    )
    .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))
}

/// Reads product identifiers, one per line. Blank lines and `#` comments are
/// skipped.
pub(crate) fn read_ids_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read ids file {}: {e}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect())
}

/// Normalizes identifiers and drops empties and duplicates, keeping first-seen
/// order.
pub(crate) fn collect_ids<I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut ids: Vec<String> = Vec::new();
    for id in raw {
        let id = makro_scraper::normalize_product_id(&id);
        if !id.is_empty() && !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

/// Scrapes every product in `ids` with at most
/// `scraper_max_concurrent_products` requests in flight. Consecutive request
/// starts are at least `scraper_inter_request_delay_ms` apart.
///
/// # Errors
///
/// Returns an error if `ids` is empty, the client cannot be built, or every
/// product failed.
pub(crate) async fn run_scrape(config: &AppConfig, ids: &[String]) -> anyhow::Result<ScrapeTotals> {
    if ids.is_empty() {
        anyhow::bail!("no product ids given; pass --id or --ids-file");
    }

    let client = build_catalog_client(config)?;
    let params = CatalogParams::from(config);
    let max_concurrent = config.scraper_max_concurrent_products.max(1);
    let delay = Duration::from_millis(config.scraper_inter_request_delay_ms);

    tracing::info!(products = ids.len(), max_concurrent, "starting scrape");

    // The delay spaces request starts, whichever slot they land in.
    let results: Vec<(&String, anyhow::Result<ProductOutcome>)> =
        stream::iter(ids.iter().enumerate())
            .then(|(index, id)| async move {
                if index > 0 && !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                id
            })
            .map(|id| {
                let client = &client;
                let params = &params;
                async move { (id, scrape_product(client, config, params, id).await) }
            })
            .buffer_unordered(max_concurrent)
            .collect()
            .await;

    let mut totals = ScrapeTotals::default();
    for (id, outcome) in results {
        match outcome {
            Ok(outcome) => {
                tracing::debug!(product_id = %id, path = %outcome.path.display(), "product done");
                totals.written += 1;
                if outcome.used_fallback {
                    totals.fallbacks += 1;
                }
            }
            Err(e) => {
                let error = format!("{e:#}");
                tracing::error!(product_id = %id, error = %error, "product failed");
                totals.failed += 1;
            }
        }
    }

    if totals.failed > 0 {
        tracing::warn!(
            failed = totals.failed,
            total = ids.len(),
            "some products failed during scrape"
        );
    }
    if totals.written == 0 {
        anyhow::bail!("all {} products failed", totals.failed);
    }

    Ok(totals)
}

async fn scrape_product(
    client: &CatalogClient,
    config: &AppConfig,
    params: &CatalogParams,
    product_id: &str,
) -> anyhow::Result<ProductOutcome> {
    let document = client
        .fetch_product_document(&config.base_url, product_id, params)
        .await?;

    let extraction = makro_scraper::assemble_record(&document, product_id, &config.base_url);
    extraction.log_fallback();
    let used_fallback = extraction.used_fallback;

    let row = ProductRow::new(extraction.record, &config.store);
    let path = makro_scraper::write_product_jsonl(&config.output_dir, &row, product_id)?;
    Ok(ProductOutcome {
        path,
        used_fallback,
    })
}
