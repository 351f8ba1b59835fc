//! Source adapters for external market signals
//!
//! One adapter per source category:
//! - feed: news feed articles (rss2json-style endpoint)
//! - social: community posts (Reddit listing)
//! - quotes: stock quotes for solar tickers
//! - environment: weather-driven solar conditions
//! - scrape: headings from public industry pages
//!
//! Every adapter returns within bounded time and never panics past its
//! boundary: failures come back as `Err` for whole-adapter fallback, or
//! are substituted per item inside the adapter (quotes, environment).

pub mod environment;
pub mod feed;
pub mod quotes;
pub mod scrape;
pub mod social;


use crate::error::Result;
use crate::types::{Category, Region};
use async_trait::async_trait;

/// Parameters resolved from an analysis request.
#[derive(Debug, Clone, Default)]
pub struct FetchParams {
    pub category: Category,
    pub region: Region,
    pub timeframe: String,
}

impl FetchParams {
    pub fn new(category: &str, timeframe: &str, region: &str) -> Self {
        Self {
            category: Category::parse(category),
            region: Region::parse(region),
            timeframe: timeframe.to_string(),
        }
    }
}

/// Capability shared by all source adapters.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Source-specific intermediate record.
    type Item;

    /// Source name for logs.
    fn name(&self) -> &'static str;

    /// Fetch and shape raw data from the external source.
    async fn fetch(&self, params: &FetchParams) -> Result<Vec<Self::Item>>;
}
