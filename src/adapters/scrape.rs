//! Page-scrape adapter
//!
//! Fetches a fixed list of public industry pages with a short timeout and
//! a browser-like identification header, pulls out heading-like element
//! text and keeps only domain-relevant lines. A failing page is logged
//! and skipped; it never takes the other pages down with it.

use super::{FetchParams, SourceAdapter};
use crate::classify;
use crate::config::ScrapeConfig;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Relevant headline scraped from one page.
#[derive(Debug, Clone)]
pub struct ScrapedItem {
    pub title: String,
    /// Hostname of the page the headline came from.
    pub source: String,
    pub url: String,
    pub scraped: DateTime<Utc>,
}

pub struct ScrapeAdapter {
    http: Client,
    config: ScrapeConfig,
}

impl ScrapeAdapter {
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(BROWSER_USER_AGENT)
            .build()?;
        Ok(Self { http, config })
    }

    async fn scrape_page(&self, url: &str) -> Result<Vec<ScrapedItem>> {
        let body = self.http.get(url).send().await?.text().await?;
        let host = hostname(url);
        let scraped = Utc::now();

        Ok(extract_headings(&body)
            .into_iter()
            .filter(|title| classify::contains_domain_keyword(title))
            .map(|title| ScrapedItem {
                title,
                source: host.clone(),
                url: url.to_string(),
                scraped,
            })
            .collect())
    }
}

fn hostname(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}

/// Pull the inner text of h1/h2/h3 elements out of an HTML body.
///
/// Minimal tag-delimited extraction, stripped of nested markup and the
/// common entities; headline text needs nothing more.
fn extract_headings(html: &str) -> Vec<String> {
    // ASCII-lowercased copy preserves byte offsets into the original
    let lower: String = html.chars().map(|c| c.to_ascii_lowercase()).collect();
    let mut headings = Vec::new();

    for tag in ["h1", "h2", "h3"] {
        let open = format!("<{tag}");
        let close = format!("</{tag}>");
        let mut pos = 0;

        while let Some(found) = lower[pos..].find(&open) {
            let start = pos + found;
            let Some(gt) = lower[start..].find('>') else {
                break;
            };
            let content_start = start + gt + 1;
            let Some(end) = lower[content_start..].find(&close) else {
                break;
            };
            let content_end = content_start + end;

            let text = decode_entities(&strip_tags(&html[content_start..content_end]));
            let text = text.trim();
            if !text.is_empty() {
                headings.push(text.to_string());
            }

            pos = content_end + close.len();
        }
    }

    headings
}

fn strip_tags(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for c in fragment.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
}

#[async_trait]
impl SourceAdapter for ScrapeAdapter {
    type Item = ScrapedItem;

    fn name(&self) -> &'static str {
        "scrape"
    }

    async fn fetch(&self, _params: &FetchParams) -> Result<Vec<ScrapedItem>> {
        let mut items = Vec::new();

        for url in &self.config.sources {
            match self.scrape_page(url).await {
                Ok(mut scraped) => items.append(&mut scraped),
                Err(e) => {
                    warn!("Scraping failed for {}: {}", url, e);
                }
            }
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <h1>Solar Panel Prices Hit Record Low</h1>
        <div class="content">
          <h2>Utility <em>inverter</em> upgrades accelerate</h2>
          <h2>Conference schedule</h2>
          <h3>Battery storage &amp; grid tie deployments</h3>
        </div>
        <h3></h3>
        </body></html>
    "#;

    #[test]
    fn test_extract_headings() {
        let headings = extract_headings(PAGE);
        assert_eq!(headings.len(), 4);
        assert!(headings.contains(&"Solar Panel Prices Hit Record Low".to_string()));
        // nested markup is stripped
        assert!(headings.contains(&"Utility inverter upgrades accelerate".to_string()));
        // entities are decoded
        assert!(headings.contains(&"Battery storage & grid tie deployments".to_string()));
    }

    #[test]
    fn test_extract_headings_handles_uppercase_tags() {
        let headings = extract_headings("<H1>PV SYSTEM permits surge</H1>");
        assert_eq!(headings, vec!["PV SYSTEM permits surge".to_string()]);
    }

    #[test]
    fn test_keyword_filter_drops_irrelevant_headings() {
        let kept: Vec<String> = extract_headings(PAGE)
            .into_iter()
            .filter(|t| classify::contains_domain_keyword(t))
            .collect();
        assert_eq!(kept.len(), 3);
        assert!(!kept.iter().any(|t| t.contains("Conference")));
    }

    #[test]
    fn test_hostname() {
        assert_eq!(
            hostname("https://www.energy.gov/eere/solar/solar-news"),
            "www.energy.gov"
        );
        assert_eq!(hostname("not a url"), "not a url");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("a <b>bold</b> move"), "a bold move");
        assert_eq!(strip_tags("plain"), "plain");
    }
}
