//! Canonical data model shared across the pipeline

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product category inferred from free text.
///
/// The classifier only ever emits these four; quote-derived data points
/// carry a `"<SYMBOL> Stock"` product string instead and bypass the
/// classifier entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCategory {
    #[serde(rename = "Solar Panel")]
    SolarPanel,
    Inverter,
    #[serde(rename = "Battery System")]
    BatterySystem,
    #[serde(rename = "General Solar")]
    GeneralSolar,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::SolarPanel => "Solar Panel",
            ProductCategory::Inverter => "Inverter",
            ProductCategory::BatterySystem => "Battery System",
            ProductCategory::GeneralSolar => "General Solar",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentiment display label.
///
/// The classifier emits only `Positive`, `Negative` and `Neutral`;
/// `Stable` and `Very Positive` exist as display labels on the static
/// fallback rows served when the whole analysis fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Stable,
    #[serde(rename = "Very Positive")]
    VeryPositive,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Stable => "Stable",
            SentimentLabel::VeryPositive => "Very Positive",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested product category filter.
///
/// Unrecognized values fall back to `All` and its full keyword set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    Solar,
    Inverters,
    Batteries,
    #[default]
    All,
}

impl Category {
    pub fn parse(s: &str) -> Self {
        match s {
            "solar" => Category::Solar,
            "inverters" => Category::Inverters,
            "batteries" => Category::Batteries,
            _ => Category::All,
        }
    }
}

/// Requested region for environmental readings.
///
/// Unrecognized values fall back to `Global` and its city list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    #[default]
    Global,
    Us,
    Eu,
    Asia,
}

impl Region {
    pub fn parse(s: &str) -> Self {
        match s {
            "global" => Region::Global,
            "us" => Region::Us,
            "eu" => Region::Eu,
            "asia" => Region::Asia,
            _ => Region::Global,
        }
    }
}

/// Canonical unit every source type is normalized into. Immutable once
/// created; the aggregated set is sorted by `date` descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDataPoint {
    pub date: NaiveDate,
    pub product: String,
    /// Signed percentage-style string, or `"N/A"` when the source type
    /// carries no numeric price signal.
    pub price_trend: String,
    pub sentiment: SentimentLabel,
    /// Formatted magnitude string, `"0"`, or `"N/A"`.
    pub volume: String,
    pub source: String,
}

/// Per-city environmental reading. Informational only: readings feed the
/// analysis log and efficiency context, never the market data set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarReading {
    pub city: String,
    pub temperature: f64,
    pub humidity: f64,
    pub cloudiness: f64,
    pub solar_efficiency: f64,
}

/// Directional label per product category plus the overall market call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceMovement {
    pub solar: String,
    pub inverters: String,
    pub batteries: String,
    pub overall: String,
}

/// Aggregate sentiment: numeric score in `[-1, 1]` plus a 5-point label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentSummary {
    pub score: f64,
    pub label: String,
}

/// Per-channel volume magnitudes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSummary {
    pub news: u64,
    pub social: u64,
    pub trading: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMentions {
    pub keyword: String,
    pub mentions: u32,
}

/// Short- and medium-term directional call. Confidence is always within
/// `[0.6, 1.0]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub next_week: String,
    pub next_month: String,
    pub confidence: f64,
}

/// Derived trend summary, recomputed fresh on every analysis call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub price_movement: PriceMovement,
    pub sentiment: SentimentSummary,
    pub volume: VolumeSummary,
    pub keywords: Vec<KeywordMentions>,
    pub forecast: Forecast,
}

/// Single-screen digest of an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_data_points: usize,
    pub market_direction: String,
    pub sentiment: String,
    pub top_keyword: String,
    pub last_updated: String,
}

/// Top-level analysis outcome.
///
/// `success: false` only when orchestration itself fails; individual
/// source outages are absorbed by fallbacks and still report success.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub data: Vec<MarketDataPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trends: Option<TrendReport>,
    pub last_updated: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
}

impl AnalysisResult {
    pub fn ok(data: Vec<MarketDataPoint>, trends: TrendReport, summary: Summary) -> Self {
        Self {
            success: true,
            error: None,
            data,
            trends: Some(trends),
            last_updated: Utc::now().to_rfc3339(),
            summary: Some(summary),
        }
    }

    /// Total-failure response: an error string plus static fallback rows,
    /// never a hard error to the caller.
    pub fn degraded(error: impl Into<String>, data: Vec<MarketDataPoint>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            data,
            trends: None,
            last_updated: Utc::now().to_rfc3339(),
            summary: None,
        }
    }
}
