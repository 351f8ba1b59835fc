//! Configuration management
//!
//! All endpoints and API keys are configurable; missing keys simply drive
//! the corresponding adapters down their fallback paths.

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub feed: FeedConfig,
    pub social: SocialConfig,
    pub quotes: QuotesConfig,
    pub weather: WeatherConfig,
    pub scrape: ScrapeConfig,
    pub analyzer: AnalyzerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// rss2json-style conversion endpoint
    pub endpoint: String,
    /// Source RSS feed handed to the conversion endpoint
    pub rss_url: String,
    pub api_key: Option<String>,
    /// Number of items to request
    pub count: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    /// Community listing endpoint (Reddit JSON shape)
    pub endpoint: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuotesConfig {
    /// Previous-day aggregate endpoint, `{endpoint}/{symbol}/prev`
    pub endpoint: String,
    pub api_key: Option<String>,
    /// Solar company tickers
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Public industry pages to scan for headings
    pub sources: Vec<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Per-adapter deadline at the aggregation level, in seconds. A hung
    /// adapter is cut off here instead of stalling the whole aggregation.
    pub adapter_deadline_secs: u64,
    /// Default HTTP client timeout for the non-scrape adapters
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.rss2json.com/v1/api.json".to_string(),
            rss_url: "https://feeds.feedburner.com/oreilly/radar".to_string(),
            api_key: None,
            count: 10,
        }
    }
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.reddit.com/r/solar.json".to_string(),
            user_agent: "SolarMarketAnalyzer/1.0".to_string(),
        }
    }
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.polygon.io/v2/aggs/ticker".to_string(),
            api_key: None,
            symbols: vec![
                "ENPH".to_string(),
                "SEDG".to_string(),
                "SPWR".to_string(),
                "FSLR".to_string(),
            ],
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openweathermap.org/data/2.5/weather".to_string(),
            api_key: None,
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                "https://www.energy.gov/eere/solar/solar-news".to_string(),
                "https://www.seia.org/news".to_string(),
                "https://www.renewableenergyworld.com/solar/".to_string(),
            ],
            timeout_secs: 5,
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            adapter_deadline_secs: 30,
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load configuration from a file, with `SOLAR_`-prefixed environment
    /// overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path.as_ref().to_str().unwrap()))
            .add_source(config::Environment::with_prefix("SOLAR").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    /// Load from default locations, falling back to built-in defaults when
    /// no config file exists. The analyzer is fully operational without
    /// one; every live fetch then degrades to its fallback.
    pub fn load_or_default() -> Self {
        let paths = [
            "config.toml",
            "~/.config/solar-market-analyzer/config.toml",
        ];

        for path in paths {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                match Self::load(expanded.as_ref()) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to load {}: {}", expanded, e);
                    }
                }
            }
        }

        tracing::info!("No configuration file found, using defaults");
        Config::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.quotes.symbols, ["ENPH", "SEDG", "SPWR", "FSLR"]);
        assert_eq!(config.scrape.sources.len(), 3);
        assert_eq!(config.scrape.timeout_secs, 5);
        assert!(config.feed.api_key.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [server]
            port = 8080

            [quotes]
            symbols = ["ENPH"]
            "#,
        )
        .unwrap();

        assert_eq!(parsed.server.port, 8080);
        assert_eq!(parsed.server.host, "127.0.0.1");
        assert_eq!(parsed.quotes.symbols, ["ENPH"]);
        assert_eq!(parsed.feed.count, 10);
    }
}
