//! Stock quote adapter
//!
//! Iterates a fixed list of solar tickers and fetches each previous-day
//! aggregate independently. Failure isolation is per symbol: a bad fetch
//! substitutes a synthetic quote for that symbol only, so the adapter as
//! a whole cannot fail.

use super::{FetchParams, SourceAdapter};
use crate::config::QuotesConfig;
use crate::error::{AnalyzerError, Result};
use crate::fallback;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

/// One ticker's previous-day quote, live or synthetic.
#[derive(Debug, Clone)]
pub struct QuoteSnapshot {
    pub symbol: String,
    pub price: f64,
    /// Close minus open, in absolute currency units.
    pub change: f64,
    pub volume: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PrevDayResponse {
    results: Option<Vec<PrevDayBar>>,
}

#[derive(Debug, Deserialize)]
struct PrevDayBar {
    /// Close
    c: f64,
    /// Open
    o: f64,
    /// Volume
    #[serde(default)]
    v: f64,
}

pub struct QuoteAdapter {
    http: Client,
    config: QuotesConfig,
}

impl QuoteAdapter {
    pub fn new(config: QuotesConfig, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn symbols(&self) -> &[String] {
        &self.config.symbols
    }

    async fn fetch_symbol(&self, symbol: &str) -> Result<QuoteSnapshot> {
        let url = format!("{}/{}/prev", self.config.endpoint, symbol);
        let mut req = self.http.get(&url);
        if let Some(key) = &self.config.api_key {
            req = req.query(&[("apikey", key)]);
        }

        let body = req.send().await?.text().await?;
        let resp: PrevDayResponse = serde_json::from_str(&body)?;
        let bar = resp
            .results
            .as_ref()
            .and_then(|r| r.first())
            .ok_or_else(|| {
                AnalyzerError::Malformed(format!("no previous-day bar for {symbol}"))
            })?;

        Ok(QuoteSnapshot {
            symbol: symbol.to_string(),
            price: bar.c,
            change: bar.c - bar.o,
            volume: Some(bar.v as u64),
        })
    }
}

#[async_trait]
impl SourceAdapter for QuoteAdapter {
    type Item = QuoteSnapshot;

    fn name(&self) -> &'static str {
        "quotes"
    }

    async fn fetch(&self, _params: &FetchParams) -> Result<Vec<QuoteSnapshot>> {
        let mut quotes = Vec::with_capacity(self.config.symbols.len());

        for symbol in &self.config.symbols {
            match self.fetch_symbol(symbol).await {
                Ok(quote) => quotes.push(quote),
                Err(e) => {
                    warn!("Quote fetch failed for {}: {}", symbol, e);
                    quotes.push(fallback::synthetic_quote(symbol));
                }
            }
        }

        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prev_day_response_deserializes() {
        let body = r#"{
            "ticker": "ENPH",
            "resultsCount": 1,
            "results": [{"c": 112.4, "o": 108.9, "v": 3521000, "h": 113.0, "l": 108.1}]
        }"#;

        let resp: PrevDayResponse = serde_json::from_str(body).unwrap();
        let bar = &resp.results.unwrap()[0];
        assert_eq!(bar.c, 112.4);
        assert!((bar.c - bar.o - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_missing_results_is_malformed() {
        let resp: PrevDayResponse = serde_json::from_str(r#"{"status": "NOT_AUTHORIZED"}"#).unwrap();
        assert!(resp.results.is_none());
    }
}
