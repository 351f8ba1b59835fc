//! Social-post adapter
//!
//! Pulls recent posts from one fixed community feed (Reddit listing
//! shape). Sentiment is computed here at fetch time, not left for the
//! normalizer.

use super::{FetchParams, SourceAdapter};
use crate::classify;
use crate::config::SocialConfig;
use crate::error::Result;
use crate::types::SentimentLabel;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Community post with fetch-time sentiment.
#[derive(Debug, Clone)]
pub struct SocialPost {
    pub title: String,
    pub score: i64,
    pub comments: u64,
    pub created: DateTime<Utc>,
    pub permalink: String,
    pub sentiment: SentimentLabel,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    num_comments: u64,
    #[serde(default)]
    created_utc: f64,
    #[serde(default)]
    permalink: String,
}

pub struct SocialAdapter {
    http: Client,
    config: SocialConfig,
}

impl SocialAdapter {
    pub fn new(config: SocialConfig, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl SourceAdapter for SocialAdapter {
    type Item = SocialPost;

    fn name(&self) -> &'static str {
        "social"
    }

    async fn fetch(&self, _params: &FetchParams) -> Result<Vec<SocialPost>> {
        let resp: Listing = self
            .http
            .get(&self.config.endpoint)
            .header(reqwest::header::USER_AGENT, self.config.user_agent.as_str())
            .send()
            .await?
            .json()
            .await?;

        let posts = resp
            .data
            .children
            .into_iter()
            .map(|child| {
                let post = child.data;
                SocialPost {
                    sentiment: classify::score(&post.title),
                    created: DateTime::from_timestamp(post.created_utc as i64, 0)
                        .unwrap_or_else(Utc::now),
                    permalink: format!("https://reddit.com{}", post.permalink),
                    title: post.title,
                    score: post.score,
                    comments: post.num_comments,
                }
            })
            .collect();

        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_deserializes() {
        let body = r#"{
            "kind": "Listing",
            "data": {
                "children": [
                    {"kind": "t3", "data": {
                        "title": "Efficient growth in my panel output",
                        "score": 120,
                        "num_comments": 34,
                        "created_utc": 1748772000.0,
                        "permalink": "/r/solar/comments/abc/efficient_growth/"
                    }}
                ]
            }
        }"#;

        let listing: Listing = serde_json::from_str(body).unwrap();
        assert_eq!(listing.data.children.len(), 1);
        let post = &listing.data.children[0].data;
        assert_eq!(post.score, 120);
        assert_eq!(post.num_comments, 34);
    }

    #[test]
    fn test_empty_listing_is_valid() {
        let listing: Listing = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        assert!(listing.data.children.is_empty());
    }
}
