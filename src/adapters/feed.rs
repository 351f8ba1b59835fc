//! Feed-article adapter
//!
//! Retrieves a fixed external article feed through an rss2json-style
//! conversion endpoint and keeps only the items relevant to the requested
//! category. An empty filtered result is a valid outcome, not a failure.

use super::{FetchParams, SourceAdapter};
use crate::classify;
use crate::config::FeedConfig;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Filtered article from the configured feed.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub title: String,
    pub description: String,
    pub published: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    items: Vec<FeedEntry>,
}

#[derive(Debug, Deserialize)]
struct FeedEntry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

pub struct FeedAdapter {
    http: Client,
    config: FeedConfig,
}

impl FeedAdapter {
    pub fn new(config: FeedConfig, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, config })
    }

    /// Substring match against title or description, case-insensitive.
    fn is_relevant(keywords: &[&str], title: &str, description: &str) -> bool {
        classify::contains_keyword(title, keywords)
            || classify::contains_keyword(description, keywords)
    }
}

/// Feeds disagree on date formats; try the common ones.
fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|n| n.and_utc())
}

#[async_trait]
impl SourceAdapter for FeedAdapter {
    type Item = FeedItem;

    fn name(&self) -> &'static str {
        "feed"
    }

    async fn fetch(&self, params: &FetchParams) -> Result<Vec<FeedItem>> {
        let keywords = classify::category_keywords(params.category);

        let mut query: Vec<(&str, String)> = vec![
            ("rss_url", self.config.rss_url.clone()),
            ("count", self.config.count.to_string()),
        ];
        if let Some(key) = &self.config.api_key {
            query.push(("api_key", key.clone()));
        }

        let resp: FeedResponse = self
            .http
            .get(&self.config.endpoint)
            .query(&query)
            .send()
            .await?
            .json()
            .await?;

        let items = resp
            .items
            .into_iter()
            .filter(|entry| Self::is_relevant(keywords, &entry.title, &entry.description))
            .map(|entry| FeedItem {
                published: entry.pub_date.as_deref().and_then(parse_pub_date),
                title: entry.title,
                description: entry.description,
            })
            .collect();

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    #[test]
    fn test_relevance_checks_title_and_description() {
        let keywords = classify::category_keywords(Category::All);

        assert!(FeedAdapter::is_relevant(
            keywords,
            "New solar panel factory announced",
            ""
        ));
        assert!(FeedAdapter::is_relevant(
            keywords,
            "Energy roundup",
            "A look at photovoltaic supply chains"
        ));
        assert!(!FeedAdapter::is_relevant(
            keywords,
            "Quarterly software earnings",
            "Cloud revenue up"
        ));
    }

    #[test]
    fn test_relevance_narrows_with_category() {
        let battery_keywords = classify::category_keywords(Category::Batteries);
        assert!(FeedAdapter::is_relevant(
            battery_keywords,
            "Lithium battery costs keep falling",
            ""
        ));
        assert!(!FeedAdapter::is_relevant(
            battery_keywords,
            "New solar panel factory announced",
            ""
        ));
    }

    #[test]
    fn test_parse_pub_date_formats() {
        assert!(parse_pub_date("2025-06-01T09:30:00Z").is_some());
        assert!(parse_pub_date("Sun, 01 Jun 2025 09:30:00 +0000").is_some());
        assert!(parse_pub_date("2025-06-01 09:30:00").is_some());
        assert!(parse_pub_date("yesterday-ish").is_none());
    }

    #[test]
    fn test_feed_response_deserializes() {
        let body = r#"{
            "status": "ok",
            "items": [
                {"title": "Inverter recall", "description": "…", "pubDate": "2025-06-01 09:30:00"},
                {"title": "No description here"}
            ]
        }"#;
        let resp: FeedResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.items.len(), 2);
        assert_eq!(resp.items[0].title, "Inverter recall");
        assert!(resp.items[1].pub_date.is_none());
    }
}
