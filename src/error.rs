//! Error types for the analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("analysis error: {0}")]
    Analysis(String),
}

impl AnalyzerError {
    /// Whether the error is recovered locally by substituting fallback data.
    ///
    /// Transport and parse failures never escape an adapter; only analysis
    /// orchestration errors surface to the caller.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AnalyzerError::Analysis(_))
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalyzerError::Malformed("missing results".to_string());
        assert_eq!(err.to_string(), "malformed response: missing results");

        let err = AnalyzerError::Analysis("orchestration failed".to_string());
        assert_eq!(err.to_string(), "analysis error: orchestration failed");
    }

    #[test]
    fn test_recoverable() {
        assert!(AnalyzerError::Malformed("bad body".into()).is_recoverable());
        assert!(AnalyzerError::Config("no key".into()).is_recoverable());
        assert!(!AnalyzerError::Analysis("boom".into()).is_recoverable());
    }

    #[test]
    fn test_from_serde_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: AnalyzerError = parse_err.into();
        assert!(matches!(err, AnalyzerError::Parse(_)));
    }
}
