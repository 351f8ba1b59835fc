//! HTTP layer
//!
//! Thin plumbing over the analyzer: analysis, trend-only queries, CSV
//! export of the latest data and a status probe. No data-shape decisions
//! live here.

use crate::analyzer::{trends, MarketAnalyzer};
use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::fallback;
use crate::types::{AnalysisResult, MarketDataPoint};
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared server state: the analyzer plus the latest analysis snapshot
/// served by the CSV export endpoint.
struct AppState {
    analyzer: MarketAnalyzer,
    latest: RwLock<Option<AnalysisResult>>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeQuery {
    category: Option<String>,
    timeframe: Option<String>,
    region: Option<String>,
}

/// Run the API server until ctrl-c.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let state = Arc::new(AppState {
        analyzer: MarketAnalyzer::new(&config)?,
        latest: RwLock::new(None),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/analyze", get(analyze))
        .route("/api/trends", get(trends_only))
        .route("/api/export", get(export_csv))
        .route("/api/status", get(status))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    info!("Solar market analyzer listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnalyzeQuery>,
) -> impl IntoResponse {
    let category = query.category.as_deref().unwrap_or("all");
    let timeframe = query.timeframe.as_deref().unwrap_or("7d");
    let region = query.region.as_deref().unwrap_or("global");

    info!(
        "Analysis request: category={} timeframe={} region={}",
        category, timeframe, region
    );

    let result = state.analyzer.analyze_market(category, timeframe, region).await;
    *state.latest.write() = Some(result.clone());
    Json(result)
}

async fn trends_only() -> impl IntoResponse {
    let report = trends::synthesize(&[]);
    Json(json!({
        "success": true,
        "trends": report,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn export_csv(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let rows = state
        .latest
        .read()
        .as_ref()
        .map(|r| r.data.clone())
        .unwrap_or_else(fallback::market_data);

    match to_csv(&rows) {
        Ok(body) => (
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=market_data.csv",
                ),
            ],
            body,
        )
            .into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": e.to_string() })),
        )
            .into_response(),
    }
}

async fn status() -> impl IntoResponse {
    Json(json!({
        "status": "online",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
        "endpoints": [
            "/api/analyze",
            "/api/trends",
            "/api/export",
            "/api/status",
        ],
    }))
}

/// Serialize data points to CSV with the canonical column set.
pub fn to_csv(rows: &[MarketDataPoint]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| AnalyzerError::Analysis(format!("csv serialization: {e}")))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| AnalyzerError::Analysis(format!("csv flush: {e}")))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_headers_and_rows() {
        let csv = to_csv(&fallback::market_data()).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "date,product,priceTrend,sentiment,volume,source"
        );
        assert_eq!(lines.count(), 3);
        assert!(csv.contains("String Inverter"));
        // grouped volumes contain commas and must come out quoted
        assert!(csv.contains("\"1,247\""));
        assert!(csv.contains("Very Positive"));
    }

    #[test]
    fn test_csv_empty_input() {
        assert_eq!(to_csv(&[]).unwrap(), "");
    }
}
