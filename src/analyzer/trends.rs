//! Trend synthesis
//!
//! Five independent summaries over the aggregated set. The output is
//! illustrative, not predictive: directional labels and magnitudes come
//! from randomized plausible ranges rather than historical analysis.

use crate::types::{
    Forecast, KeywordMentions, MarketDataPoint, PriceMovement, SentimentSummary, TrendReport,
    VolumeSummary,
};
use rand::Rng;

pub fn synthesize(_data: &[MarketDataPoint]) -> TrendReport {
    TrendReport {
        price_movement: price_movement(),
        sentiment: overall_sentiment(),
        volume: volume_changes(),
        keywords: trending_keywords(),
        forecast: forecast(),
    }
}

fn direction(rng: &mut impl Rng) -> String {
    if rng.random_bool(0.5) { "up" } else { "down" }.to_string()
}

fn price_movement() -> PriceMovement {
    let mut rng = rand::rng();
    PriceMovement {
        solar: direction(&mut rng),
        inverters: direction(&mut rng),
        batteries: direction(&mut rng),
        overall: if rng.random_bool(0.5) { "bullish" } else { "bearish" }.to_string(),
    }
}

fn overall_sentiment() -> SentimentSummary {
    let mut rng = rand::rng();
    let score = rng.random_range(-1.0..1.0);
    SentimentSummary {
        score,
        label: sentiment_label(score).to_string(),
    }
}

/// 5-point label for a score in [-1, 1].
fn sentiment_label(score: f64) -> &'static str {
    if score < -0.6 {
        "Very Negative"
    } else if score < -0.2 {
        "Negative"
    } else if score <= 0.2 {
        "Neutral"
    } else if score <= 0.6 {
        "Positive"
    } else {
        "Very Positive"
    }
}

fn volume_changes() -> VolumeSummary {
    let mut rng = rand::rng();
    VolumeSummary {
        news: rng.random_range(500..1_500),
        social: rng.random_range(1_000..6_000),
        trading: rng.random_range(500_000..1_500_000),
    }
}

/// Fixed candidate set, ranked by mention count.
fn trending_keywords() -> Vec<KeywordMentions> {
    let mut rng = rand::rng();
    let mut keywords = vec![
        KeywordMentions {
            keyword: "solar efficiency".to_string(),
            mentions: rng.random_range(50..150),
        },
        KeywordMentions {
            keyword: "battery storage".to_string(),
            mentions: rng.random_range(40..120),
        },
        KeywordMentions {
            keyword: "grid modernization".to_string(),
            mentions: rng.random_range(30..90),
        },
        KeywordMentions {
            keyword: "inverter technology".to_string(),
            mentions: rng.random_range(25..75),
        },
    ];

    keywords.sort_by(|a, b| b.mentions.cmp(&a.mentions));
    keywords
}

fn forecast() -> Forecast {
    let mut rng = rand::rng();
    Forecast {
        next_week: if rng.random_bool(0.5) { "positive" } else { "stable" }.to_string(),
        next_month: if rng.random_bool(0.5) {
            "growth"
        } else {
            "consolidation"
        }
        .to_string(),
        confidence: rng.random_range(0.6..1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_confidence_bounds() {
        for _ in 0..200 {
            let report = synthesize(&[]);
            let confidence = report.forecast.confidence;
            assert!((0.6..=1.0).contains(&confidence), "confidence {confidence} out of range");
        }
    }

    #[test]
    fn test_sentiment_score_and_label_agree() {
        for _ in 0..200 {
            let sentiment = overall_sentiment();
            assert!((-1.0..=1.0).contains(&sentiment.score));
            assert_eq!(sentiment.label, sentiment_label(sentiment.score));
        }
    }

    #[test]
    fn test_sentiment_label_bands() {
        assert_eq!(sentiment_label(-0.9), "Very Negative");
        assert_eq!(sentiment_label(-0.4), "Negative");
        assert_eq!(sentiment_label(0.0), "Neutral");
        assert_eq!(sentiment_label(0.4), "Positive");
        assert_eq!(sentiment_label(0.9), "Very Positive");
    }

    #[test]
    fn test_price_movement_labels() {
        for _ in 0..50 {
            let movement = price_movement();
            for label in [&movement.solar, &movement.inverters, &movement.batteries] {
                assert!(label == "up" || label == "down");
            }
            assert!(movement.overall == "bullish" || movement.overall == "bearish");
        }
    }

    #[test]
    fn test_keywords_ranked_descending() {
        for _ in 0..50 {
            let keywords = trending_keywords();
            assert_eq!(keywords.len(), 4);
            for pair in keywords.windows(2) {
                assert!(pair[0].mentions >= pair[1].mentions);
            }
        }
    }

    #[test]
    fn test_volume_ranges() {
        for _ in 0..50 {
            let volume = volume_changes();
            assert!((500..1_500).contains(&volume.news));
            assert!((1_000..6_000).contains(&volume.social));
            assert!((500_000..1_500_000).contains(&volume.trading));
        }
    }
}
