mod offline;
mod scrape;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "makro-cli")]
#[command(about = "Makro storefront product extraction")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch products from the storefront and write one JSONL file each
    Scrape {
        /// Product identifier; repeatable. A trailing `0032` is stripped.
        #[arg(long = "id", value_name = "ID")]
        ids: Vec<String>,
        /// File with one product identifier per line
        #[arg(long, value_name = "PATH")]
        ids_file: Option<PathBuf>,
    },
    /// Extract one record from a saved detail response and print it
    Extract {
        /// Saved `betty-articles` response body
        file: PathBuf,
        /// Product identifier the response was requested for
        #[arg(long)]
        id: String,
    },
    /// Merge per-product JSONL files into one JSON array
    Merge {
        /// Directory of JSONL files [default: configured output dir]
        #[arg(long, value_name = "DIR")]
        input: Option<PathBuf>,
        /// Merged file [default: <results dir>/results.json]
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Convert a merged JSON array into a `;`-delimited CSV file
    Convert {
        /// Merged JSON file [default: <results dir>/results.json]
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// CSV file [default: <results dir>/output.csv]
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = makro_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape { ids, ids_file } => {
            let mut raw = ids;
            if let Some(path) = ids_file {
                raw.extend(scrape::read_ids_file(&path)?);
            }
            let totals = scrape::run_scrape(&config, &scrape::collect_ids(raw)).await?;
            println!(
                "scraped {} products ({} written, {} failed, {} reconstructed unit prices)",
                totals.written + totals.failed,
                totals.written,
                totals.failed,
                totals.fallbacks
            );
        }
        Commands::Extract { file, id } => {
            let row = offline::extract_file(&config, &file, &id)?;
            println!("{}", serde_json::to_string(&row)?);
        }
        Commands::Merge { input, output } => {
            let input = input.unwrap_or_else(|| config.output_dir.clone());
            let output = output.unwrap_or_else(|| offline::default_merge_output(&config));
            let count = makro_scraper::merge_jsonl(&input, &output)?;
            println!("merged {count} records into {}", output.display());
        }
        Commands::Convert { input, output } => {
            let input = input.unwrap_or_else(|| offline::default_merge_output(&config));
            let output = output.unwrap_or_else(|| offline::default_csv_output(&config));
            let count = makro_scraper::convert_to_csv(&input, &output)?;
            println!("wrote {count} rows to {}", output.display());
        }
    }

    Ok(())
}
