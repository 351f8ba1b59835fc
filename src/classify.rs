//! Keyword and sentiment classification
//!
//! Pure functions shared by the adapters and the normalizer. Two distinct
//! matching modes coexist on purpose: relevance filtering is substring
//! based, sentiment scoring is exact-token based. Do not unify them.

use crate::types::{Category, ProductCategory, SentimentLabel};

/// Solar-industry terms used for substring relevance filtering.
pub const DOMAIN_KEYWORDS: &[&str] = &[
    "solar panel",
    "photovoltaic",
    "inverter",
    "battery storage",
    "lithium battery",
    "solar energy",
    "renewable energy",
    "grid tie",
    "off grid",
    "solar installation",
    "pv system",
    "solar efficiency",
    "monocrystalline",
    "polycrystalline",
];

const SOLAR_KEYWORDS: &[&str] = &["solar panel", "photovoltaic", "pv system"];
const INVERTER_KEYWORDS: &[&str] = &["inverter", "grid tie", "power converter"];
const BATTERY_KEYWORDS: &[&str] = &["battery storage", "lithium battery", "energy storage"];

const POSITIVE_WORDS: &[&str] = &[
    "efficient",
    "breakthrough",
    "improved",
    "innovative",
    "growth",
    "success",
];
const NEGATIVE_WORDS: &[&str] = &[
    "problem",
    "issue",
    "decline",
    "failure",
    "expensive",
    "shortage",
];

/// Keyword set for a requested category; `All` gets the full domain list.
pub fn category_keywords(category: Category) -> &'static [&'static str] {
    match category {
        Category::Solar => SOLAR_KEYWORDS,
        Category::Inverters => INVERTER_KEYWORDS,
        Category::Batteries => BATTERY_KEYWORDS,
        Category::All => DOMAIN_KEYWORDS,
    }
}

/// True if the text contains any of the keywords, case-insensitive.
pub fn contains_keyword(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

/// True if the text mentions any domain keyword.
pub fn contains_domain_keyword(text: &str) -> bool {
    contains_keyword(text, DOMAIN_KEYWORDS)
}

/// Infer the product category from free text.
///
/// Case-insensitive substring checks in fixed priority order; first match
/// wins, so a title naming both "panel" and "battery" resolves to
/// `BatterySystem`.
pub fn categorize(text: &str) -> ProductCategory {
    let lower = text.to_lowercase();
    if lower.contains("inverter") {
        ProductCategory::Inverter
    } else if lower.contains("battery") || lower.contains("storage") {
        ProductCategory::BatterySystem
    } else if lower.contains("panel") || lower.contains("photovoltaic") {
        ProductCategory::SolarPanel
    } else {
        ProductCategory::GeneralSolar
    }
}

/// Score free text into a sentiment label.
///
/// Tokens are whitespace-split with no punctuation stripping, matched
/// exactly against the word sets: a trailing period keeps a token from
/// matching, and substrings inside longer words never count.
pub fn score(text: &str) -> SentimentLabel {
    let lower = text.to_lowercase();
    let mut net: i32 = 0;
    for word in lower.split_whitespace() {
        if POSITIVE_WORDS.contains(&word) {
            net += 1;
        }
        if NEGATIVE_WORDS.contains(&word) {
            net -= 1;
        }
    }

    match net.cmp(&0) {
        std::cmp::Ordering::Greater => SentimentLabel::Positive,
        std::cmp::Ordering::Less => SentimentLabel::Negative,
        std::cmp::Ordering::Equal => SentimentLabel::Neutral,
    }
}
