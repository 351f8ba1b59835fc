//! Solar Market Trend Analyzer
//!
//! Aggregates market signals about the solar industry and serves trend
//! analysis over HTTP.

use clap::{Parser, Subcommand};
use solar_market_analyzer::{analyzer::MarketAnalyzer, config::Config, server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "solar-market-analyzer")]
#[command(about = "Market trend analyzer for the solar industry")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path; built-in defaults apply without one
    #[arg(short, long)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run a one-shot market analysis and print the digest
    Analyze {
        #[arg(long, default_value = "all")]
        category: String,
        #[arg(long, default_value = "7d")]
        timeframe: String,
        #[arg(long, default_value = "global")]
        region: String,
    },
    /// Show resolved configuration and endpoints
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(),
    };

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            server::serve(config).await
        }
        Commands::Analyze {
            category,
            timeframe,
            region,
        } => run_analysis(config, &category, &timeframe, &region).await,
        Commands::Status => show_status(config),
    }
}

async fn run_analysis(
    config: Config,
    category: &str,
    timeframe: &str,
    region: &str,
) -> anyhow::Result<()> {
    let analyzer = MarketAnalyzer::new(&config)?;
    let result = analyzer.analyze_market(category, timeframe, region).await;

    println!("\n📊 Solar Market Analysis ({} data points)\n", result.data.len());
    println!(
        "{:<12} {:<24} {:>8} {:>14} {:>12}  {}",
        "Date", "Product", "Trend", "Sentiment", "Volume", "Source"
    );
    println!("{}", "-".repeat(86));

    for point in &result.data {
        let product = if point.product.len() > 22 {
            format!("{}...", &point.product[..22])
        } else {
            point.product.clone()
        };

        println!(
            "{:<12} {:<24} {:>8} {:>14} {:>12}  {}",
            point.date, product, point.price_trend, point.sentiment, point.volume, point.source
        );
    }

    if let Some(trends) = &result.trends {
        println!("\n📈 Trends\n");
        println!("Overall market: {}", trends.price_movement.overall);
        println!(
            "Sentiment: {} ({:.2})",
            trends.sentiment.label, trends.sentiment.score
        );
        if let Some(top) = trends.keywords.first() {
            println!("Top keyword: {} ({} mentions)", top.keyword, top.mentions);
        }
        println!(
            "Forecast: {} next week, {} next month ({:.0}% confidence)",
            trends.forecast.next_week,
            trends.forecast.next_month,
            trends.forecast.confidence * 100.0
        );
    }

    if let Some(error) = &result.error {
        println!("\n⚠ Degraded result: {}", error);
    }

    Ok(())
}

fn show_status(config: Config) -> anyhow::Result<()> {
    println!("\n🔍 Solar Market Analyzer v{}\n", env!("CARGO_PKG_VERSION"));
    println!("Server: http://{}:{}", config.server.host, config.server.port);
    println!("Quote symbols: {}", config.quotes.symbols.join(", "));
    println!("Scrape sources: {}", config.scrape.sources.len());

    println!("\nEndpoints:");
    for endpoint in ["/api/analyze", "/api/trends", "/api/export", "/api/status"] {
        println!(
            "  GET http://{}:{}{}",
            config.server.host, config.server.port, endpoint
        );
    }

    Ok(())
}
