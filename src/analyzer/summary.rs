//! Summary builder

use crate::types::{MarketDataPoint, Summary, TrendReport};
use chrono::Utc;

/// Condense the aggregated set and trend report into a single-screen
/// digest. Missing inputs degrade to defaults instead of failing.
pub fn build(data: &[MarketDataPoint], trends: Option<&TrendReport>) -> Summary {
    Summary {
        total_data_points: data.len(),
        market_direction: trends
            .map(|t| t.price_movement.overall.clone())
            .unwrap_or_else(|| "stable".to_string()),
        sentiment: trends
            .map(|t| t.sentiment.label.clone())
            .unwrap_or_else(|| "Neutral".to_string()),
        top_keyword: trends
            .and_then(|t| t.keywords.first())
            .map(|k| k.keyword.clone())
            .unwrap_or_else(|| "solar panels".to_string()),
        last_updated: Utc::now().to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::trends;
    use crate::fallback;
    use crate::types::{
        Forecast, KeywordMentions, PriceMovement, SentimentSummary, VolumeSummary,
    };

    #[test]
    fn test_defaults_on_empty_inputs() {
        let summary = build(&[], None);
        assert_eq!(summary.total_data_points, 0);
        assert_eq!(summary.market_direction, "stable");
        assert_eq!(summary.sentiment, "Neutral");
        assert_eq!(summary.top_keyword, "solar panels");
        assert!(!summary.last_updated.is_empty());
    }

    #[test]
    fn test_empty_keyword_list_falls_back() {
        let report = TrendReport {
            price_movement: PriceMovement {
                solar: "up".to_string(),
                inverters: "down".to_string(),
                batteries: "up".to_string(),
                overall: "bullish".to_string(),
            },
            sentiment: SentimentSummary {
                score: 0.4,
                label: "Positive".to_string(),
            },
            volume: VolumeSummary {
                news: 700,
                social: 2_000,
                trading: 900_000,
            },
            keywords: vec![],
            forecast: Forecast {
                next_week: "positive".to_string(),
                next_month: "growth".to_string(),
                confidence: 0.8,
            },
        };

        let summary = build(&[], Some(&report));
        assert_eq!(summary.market_direction, "bullish");
        assert_eq!(summary.sentiment, "Positive");
        assert_eq!(summary.top_keyword, "solar panels");
    }

    #[test]
    fn test_populated_path() {
        let data = fallback::market_data();
        let report = trends::synthesize(&data);
        let summary = build(&data, Some(&report));

        assert_eq!(summary.total_data_points, 3);
        assert_eq!(summary.market_direction, report.price_movement.overall);
        assert_eq!(summary.top_keyword, report.keywords[0].keyword);
    }

    #[test]
    fn test_keywords_ranking_feeds_top_keyword() {
        let mut report = trends::synthesize(&[]);
        report.keywords = vec![
            KeywordMentions {
                keyword: "grid modernization".to_string(),
                mentions: 80,
            },
            KeywordMentions {
                keyword: "solar efficiency".to_string(),
                mentions: 60,
            },
        ];
        assert_eq!(build(&[], Some(&report)).top_keyword, "grid modernization");
    }
}
