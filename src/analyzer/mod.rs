//! Market analysis orchestration
//!
//! Fans out to all five source adapters concurrently, settles every
//! branch independently, normalizes the survivors into the canonical
//! sorted set and derives the trend report. No state is kept between
//! calls; every field of the response is recomputed per request.

pub mod normalize;
pub mod summary;
pub mod trends;

use crate::adapters::environment::{cities_for, EnvironmentalAdapter};
use crate::adapters::feed::FeedAdapter;
use crate::adapters::quotes::{QuoteAdapter, QuoteSnapshot};
use crate::adapters::scrape::ScrapeAdapter;
use crate::adapters::social::SocialAdapter;
use crate::adapters::{FetchParams, SourceAdapter};
use crate::config::Config;
use crate::error::Result;
use crate::fallback;
use crate::types::{AnalysisResult, Region, SolarReading};
use std::time::Duration;
use tokio::time::error::Elapsed;
use tokio::time::timeout;
use tracing::{error, info, warn};

pub struct MarketAnalyzer {
    feed: FeedAdapter,
    social: SocialAdapter,
    quotes: QuoteAdapter,
    environment: EnvironmentalAdapter,
    scrape: ScrapeAdapter,
    /// Per-adapter deadline at the join; a hung adapter is cut off
    /// instead of stalling the whole aggregation.
    deadline: Duration,
}

impl MarketAnalyzer {
    pub fn new(config: &Config) -> Result<Self> {
        let request_timeout = Duration::from_secs(config.analyzer.request_timeout_secs);

        Ok(Self {
            feed: FeedAdapter::new(config.feed.clone(), request_timeout)?,
            social: SocialAdapter::new(config.social.clone(), request_timeout)?,
            quotes: QuoteAdapter::new(config.quotes.clone(), request_timeout)?,
            environment: EnvironmentalAdapter::new(config.weather.clone(), request_timeout)?,
            scrape: ScrapeAdapter::new(config.scrape.clone())?,
            deadline: Duration::from_secs(config.analyzer.adapter_deadline_secs),
        })
    }

    /// Run a full analysis. Individual source outages degrade to fallback
    /// data and still report success; only a failure of orchestration
    /// itself produces `success: false`, and even that carries mock rows
    /// rather than a hard error.
    pub async fn analyze_market(
        &self,
        category: &str,
        timeframe: &str,
        region: &str,
    ) -> AnalysisResult {
        match self.run(category, timeframe, region).await {
            Ok(result) => result,
            Err(e) => {
                error!("Market analysis failed: {}", e);
                AnalysisResult::degraded(e.to_string(), fallback::market_data())
            }
        }
    }

    async fn run(
        &self,
        category: &str,
        timeframe: &str,
        region: &str,
    ) -> Result<AnalysisResult> {
        let params = FetchParams::new(category, timeframe, region);
        info!(
            "Starting market analysis for {} in {} ({})",
            category, region, timeframe
        );

        // every branch runs to completion (or its deadline) regardless
        // of the others' outcomes; no branch aborts another
        let (feed, social, quotes, environment, scraped) = tokio::join!(
            timeout(self.deadline, self.feed.fetch(&params)),
            timeout(self.deadline, self.social.fetch(&params)),
            timeout(self.deadline, self.quotes.fetch(&params)),
            timeout(self.deadline, self.environment.fetch(&params)),
            timeout(self.deadline, self.scrape.fetch(&params)),
        );

        let feed_items = settle("feed", feed, fallback::feed_items);
        let posts = settle("social", social, fallback::social_posts);
        let quote_list = settle("quotes", quotes, || self.synthetic_quotes());
        let readings = settle("environment", environment, || {
            synthetic_readings(params.region)
        });
        let scraped_items = settle("scrape", scraped, fallback::scraped_items);

        log_conditions(&readings);

        // readings are efficiency context only, never market data points
        let mut data = Vec::new();
        data.extend(feed_items.iter().map(normalize::from_feed_item));
        data.extend(posts.iter().map(normalize::from_social_post));
        data.extend(quote_list.iter().map(normalize::from_quote));
        data.extend(scraped_items.iter().map(normalize::from_scraped_item));

        info!("Processed {} total data points", data.len());
        data.sort_by(|a, b| b.date.cmp(&a.date));

        let report = trends::synthesize(&data);
        let digest = summary::build(&data, Some(&report));
        Ok(AnalysisResult::ok(data, report, digest))
    }

    fn synthetic_quotes(&self) -> Vec<QuoteSnapshot> {
        self.quotes
            .symbols()
            .iter()
            .map(|s| fallback::synthetic_quote(s))
            .collect()
    }
}

/// Unwrap one settled branch, substituting fallback records on failure or
/// deadline expiry.
fn settle<T>(
    name: &str,
    outcome: std::result::Result<Result<Vec<T>>, Elapsed>,
    fallback: impl FnOnce() -> Vec<T>,
) -> Vec<T> {
    match outcome {
        Ok(Ok(items)) => items,
        Ok(Err(e)) => {
            warn!("{} adapter failed, substituting fallback data: {}", name, e);
            fallback()
        }
        Err(_) => {
            warn!(
                "{} adapter exceeded the deadline, substituting fallback data",
                name
            );
            fallback()
        }
    }
}

fn synthetic_readings(region: Region) -> Vec<SolarReading> {
    cities_for(region)
        .iter()
        .map(|city| fallback::synthetic_reading(city))
        .collect()
}

fn log_conditions(readings: &[SolarReading]) {
    if readings.is_empty() {
        return;
    }
    let avg =
        readings.iter().map(|r| r.solar_efficiency).sum::<f64>() / readings.len() as f64;
    info!(
        "Solar conditions across {} locations, average efficiency {:.1}%",
        readings.len(),
        avg
    );
}
