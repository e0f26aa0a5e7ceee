//! Product extraction for the Makro storefront.
//!
//! A raw article detail document goes in, a [`CanonicalProductRecord`] comes
//! out. Around that pipeline sit the HTTP [`CatalogClient`] and the
//! line-delimited [`output`] writer.
//!
//! [`CanonicalProductRecord`]: makro_core::CanonicalProductRecord

pub mod assemble;
pub mod client;
pub mod document;
pub mod error;
pub mod extract;
pub mod fields;
pub mod measure;
pub mod output;
pub mod path;
pub mod promotion;
pub(crate) mod rate_limit;
pub mod unit_price;

pub use assemble::{assemble_record, product_link, Extraction};
pub use client::{CatalogClient, CatalogParams};
pub use document::{normalize_product_id, parse_detail_response, product_document};
pub use error::ScraperError;
pub use measure::{grams_in_name, normalize_measurement};
pub use output::{convert_to_csv, merge_jsonl, write_product_jsonl};
pub use path::{resolve, MISSING};
pub use unit_price::{reconstruct_unit_price, UnitPrice, UnitPriceSource};
