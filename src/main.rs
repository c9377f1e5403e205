use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::error;

mod apis;
mod config;
mod constants;
mod error;
mod gateway;
mod logging;
mod server;
mod session;
mod types;

use crate::apis::KakaoClient;
use crate::config::Config;
use crate::gateway::GeocodingGateway;
use crate::session::{select_address, SearchResults, SearchSession, SessionState};
use crate::types::{AddressCandidate, SearchMode};

#[derive(Parser)]
#[command(name = "geo-gateway")]
#[command(about = "Kakao Local geocoding gateway for the bookstore address widget")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the geocoding HTTP gateway
    Serve {
        /// Port to listen on (overrides config.toml)
        #[arg(long)]
        port: Option<u16>,
    },
    /// One-shot address or place lookup
    Search {
        /// Query text, e.g. "서울특별시 강남구 테헤란로 152"
        #[arg(long)]
        query: String,
        /// Search by place/keyword instead of structured address
        #[arg(long)]
        keyword: bool,
    },
    /// One-shot reverse geocoding lookup
    Reverse {
        /// Longitude
        #[arg(long)]
        x: f64,
        /// Latitude
        #[arg(long)]
        y: f64,
    },
}

fn build_gateway(config: &Config) -> Result<GeocodingGateway, Box<dyn std::error::Error>> {
    let api_key = Config::api_key()?;
    let client = KakaoClient::new(&config.kakao, api_key)?;
    Ok(GeocodingGateway::new(Arc::new(client)))
}

async fn run_search(
    gateway: &GeocodingGateway,
    query: &str,
    mode: SearchMode,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = SearchSession::new();
    let Some((token, mode)) = session.dispatch(query, mode) else {
        println!("⚠️  Empty query, nothing to search");
        return Ok(());
    };

    let outcome = match mode {
        SearchMode::Structured => gateway
            .resolve_structured(query)
            .await
            .map(SearchResults::Structured),
        SearchMode::Keyword => gateway
            .resolve_keyword(query)
            .await
            .map(SearchResults::Keyword),
    };
    session.complete_search(token, outcome);

    match session.state() {
        SessionState::Results => match mode {
            SearchMode::Structured => {
                println!("📍 {} result(s):", session.address_results().len());
                for document in session.address_results().to_vec() {
                    let address = select_address(&AddressCandidate::Structured(document));
                    println!("   - {}", address);
                }
            }
            SearchMode::Keyword => {
                println!("🏢 {} result(s):", session.keyword_results().len());
                for place in session.keyword_results().to_vec() {
                    let name = place.place_name.clone();
                    let address = select_address(&AddressCandidate::Place(place));
                    println!("   - {} ({})", name, address);
                }
            }
        },
        SessionState::NoResults => {
            println!("ℹ️  {}", session.error().unwrap_or_default());
        }
        SessionState::Error => {
            let message = session.error().unwrap_or_default().to_string();
            error!("Search failed: {}", message);
            println!("❌ {}", message);
        }
        _ => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            server::start_server(&config, port).await?;
        }
        Commands::Search { query, keyword } => {
            let gateway = build_gateway(&config)?;
            let mode = if keyword {
                SearchMode::Keyword
            } else {
                SearchMode::Structured
            };
            run_search(&gateway, &query, mode).await?;
        }
        Commands::Reverse { x, y } => {
            let gateway = build_gateway(&config)?;
            match gateway.reverse_geocode(x, y).await {
                Ok(address) => println!("🧭 {}", address),
                Err(e) => {
                    error!("Reverse geocoding failed: {}", e);
                    println!("❌ {}", e);
                }
            }
        }
    }
    Ok(())
}
