use std::process::ExitCode;

use flight_planner::config::ServerConfig;
use flight_planner::currency::CurrencyTable;
use flight_planner::graph;
use flight_planner::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let graph = match graph::load_file(&config.dataset) {
        Ok(graph) => graph,
        Err(e) => {
            error!(path = %config.dataset.display(), "{e}");
            return ExitCode::FAILURE;
        }
    };

    // Without a table every response is quoted in the reference currency
    let currency = match &config.currency {
        Some(path) => match CurrencyTable::load_file(path) {
            Ok(table) => Some(table),
            Err(e) => {
                error!(path = %path.display(), "{e}");
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let state = AppState::new(graph, config.search.clone(), currency);
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.addr, "Failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(addr = %config.addr, "Flight planner listening");
    info!("  GET /health");
    info!("  GET /airports/search?q=");
    info!("  GET /airports/:code");
    info!("  GET /routes?departure=&destination=");
    info!("  GET /routes/multi-city?departure=&middle=&destination=");

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
