//! Normalization of source-specific records into the canonical shape

use crate::adapters::feed::FeedItem;
use crate::adapters::quotes::QuoteSnapshot;
use crate::adapters::scrape::ScrapedItem;
use crate::adapters::social::SocialPost;
use crate::classify;
use crate::types::{MarketDataPoint, SentimentLabel};
use chrono::Utc;

pub fn from_feed_item(item: &FeedItem) -> MarketDataPoint {
    MarketDataPoint {
        date: item
            .published
            .map(|d| d.date_naive())
            .unwrap_or_else(|| Utc::now().date_naive()),
        product: classify::categorize(&item.title).as_str().to_string(),
        price_trend: "N/A".to_string(),
        sentiment: classify::score(&item.title),
        volume: "N/A".to_string(),
        source: "News Feed".to_string(),
    }
}

/// Sentiment comes through from fetch time; only formatting happens here.
pub fn from_social_post(post: &SocialPost) -> MarketDataPoint {
    MarketDataPoint {
        date: post.created.date_naive(),
        product: classify::categorize(&post.title).as_str().to_string(),
        price_trend: "N/A".to_string(),
        sentiment: post.sentiment,
        volume: format_count(post.comments),
        source: "Reddit".to_string(),
    }
}

pub fn from_quote(quote: &QuoteSnapshot) -> MarketDataPoint {
    let sentiment = if quote.change > 0.0 {
        SentimentLabel::Positive
    } else if quote.change < 0.0 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };

    MarketDataPoint {
        date: Utc::now().date_naive(),
        product: format!("{} Stock", quote.symbol),
        price_trend: format!("{:+.2}", quote.change),
        sentiment,
        volume: match quote.volume {
            Some(v) if v > 0 => format_count(v),
            _ => "N/A".to_string(),
        },
        source: "Stock Market".to_string(),
    }
}

pub fn from_scraped_item(item: &ScrapedItem) -> MarketDataPoint {
    MarketDataPoint {
        date: item.scraped.date_naive(),
        product: classify::categorize(&item.title).as_str().to_string(),
        price_trend: "N/A".to_string(),
        sentiment: classify::score(&item.title),
        volume: "N/A".to_string(),
        source: item.source.clone(),
    }
}

/// en-US style thousands grouping.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
