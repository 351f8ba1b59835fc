//! Fallback generator
//!
//! Synthetic substitutes used when a live fetch fails. Feed, social and
//! scrape fallbacks are small fixed illustrative records; quote and
//! environmental fallbacks are randomized per item within plausible
//! ranges. Live and fallback data are never mixed for the same sub-unit.

use chrono::{Duration, Utc};
use rand::Rng;

use crate::adapters::feed::FeedItem;
use crate::adapters::quotes::QuoteSnapshot;
use crate::adapters::scrape::ScrapedItem;
use crate::adapters::social::SocialPost;
use crate::types::{MarketDataPoint, SentimentLabel, SolarReading};

/// Whole-adapter substitute for a failed feed fetch.
pub fn feed_items() -> Vec<FeedItem> {
    vec![FeedItem {
        title: "Solar Panel Efficiency Reaches New Heights".to_string(),
        description: "Latest breakthrough in photovoltaic technology...".to_string(),
        published: Some(Utc::now()),
    }]
}

/// Whole-adapter substitute for a failed social fetch.
pub fn social_posts() -> Vec<SocialPost> {
    vec![SocialPost {
        title: "Best inverter for home solar system?".to_string(),
        score: 45,
        comments: 23,
        created: Utc::now(),
        permalink: String::new(),
        sentiment: SentimentLabel::Positive,
    }]
}

/// Whole-adapter substitute for a failed scrape pass.
pub fn scraped_items() -> Vec<ScrapedItem> {
    vec![ScrapedItem {
        title: "Solar Industry Growth Continues".to_string(),
        source: "energy.gov".to_string(),
        url: "https://energy.gov/news".to_string(),
        scraped: Utc::now(),
    }]
}

/// Per-symbol substitute quote: price in [50,150), change in [-5,5),
/// volume in [0,1e6).
pub fn synthetic_quote(symbol: &str) -> QuoteSnapshot {
    let mut rng = rand::rng();
    QuoteSnapshot {
        symbol: symbol.to_string(),
        price: rng.random_range(50.0..150.0),
        change: rng.random_range(-5.0..5.0),
        volume: Some(rng.random_range(0..1_000_000)),
    }
}

/// Per-city substitute reading in plausible ranges.
pub fn synthetic_reading(city: &str) -> SolarReading {
    let mut rng = rand::rng();
    SolarReading {
        city: city.to_string(),
        temperature: rng.random_range(5.0..40.0),
        humidity: rng.random_range(0.0..100.0),
        cloudiness: rng.random_range(0.0..100.0),
        solar_efficiency: rng.random_range(15.0..40.0),
    }
}

/// Static rows served only when the whole analysis fails.
pub fn market_data() -> Vec<MarketDataPoint> {
    let today = Utc::now().date_naive();
    vec![
        MarketDataPoint {
            date: today,
            product: "Monocrystalline Solar Panel".to_string(),
            price_trend: "+5.2%".to_string(),
            sentiment: SentimentLabel::Positive,
            volume: "1,247".to_string(),
            source: "Industry Analysis".to_string(),
        },
        MarketDataPoint {
            date: today - Duration::days(1),
            product: "String Inverter".to_string(),
            price_trend: "-2.1%".to_string(),
            sentiment: SentimentLabel::Stable,
            volume: "892".to_string(),
            source: "Market Research".to_string(),
        },
        MarketDataPoint {
            date: today - Duration::days(2),
            product: "Lithium Battery Pack".to_string(),
            price_trend: "+8.7%".to_string(),
            sentiment: SentimentLabel::VeryPositive,
            volume: "2,156".to_string(),
            source: "Price Tracking".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_quote_ranges() {
        for _ in 0..200 {
            let quote = synthetic_quote("ENPH");
            assert_eq!(quote.symbol, "ENPH");
            assert!(quote.price >= 50.0 && quote.price < 150.0);
            assert!(quote.change >= -5.0 && quote.change < 5.0);
            assert!(quote.volume.unwrap() < 1_000_000);
        }
    }

    #[test]
    fn test_synthetic_reading_ranges() {
        for _ in 0..200 {
            let reading = synthetic_reading("Phoenix");
            assert!(reading.temperature >= 5.0 && reading.temperature < 40.0);
            assert!(reading.humidity >= 0.0 && reading.humidity < 100.0);
            assert!(reading.cloudiness >= 0.0 && reading.cloudiness < 100.0);
            assert!(reading.solar_efficiency >= 15.0 && reading.solar_efficiency < 40.0);
        }
    }

    #[test]
    fn test_market_data_rows() {
        let rows = market_data();
        assert_eq!(rows.len(), 3);
        // newest first, one day apart
        assert!(rows[0].date > rows[1].date);
        assert!(rows[1].date > rows[2].date);
        assert!(rows.iter().all(|r| !r.product.is_empty() && !r.source.is_empty()));
    }

    #[test]
    fn test_fixed_fallbacks_are_single_records() {
        assert_eq!(feed_items().len(), 1);
        assert_eq!(social_posts().len(), 1);
        assert_eq!(scraped_items().len(), 1);
    }
}
