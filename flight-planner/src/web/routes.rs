//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::cors::CorsLayer;
use tracing::{debug, error, warn};

use crate::currency::{CurrencyError, REFERENCE_CURRENCY};
use crate::domain::AirportCode;
use crate::planner::{
    MultiCityRequest, Planner, RankCriterion, SearchError, SearchRequest, SearchResult, Strategy,
    deduplicate, rank_itineraries,
};

use super::dto::*;
use super::state::AppState;

/// Stop budget when the caller doesn't give one.
const DEFAULT_STOPS: i64 = 2;

const DEFAULT_CABIN: &str = "Economy";

const NO_ITINERARY: &str = "no itinerary available";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/airports/search", get(search_airports))
        .route("/airports/:code", get(airport_info))
        .route("/routes", get(find_routes))
        .route("/routes/multi-city", get(find_multi_city_routes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search airports by code or name.
async fn search_airports(
    State(state): State<AppState>,
    Query(req): Query<AirportSearchRequest>,
) -> Json<AirportSearchResponse> {
    let limit = req.limit.unwrap_or(10).min(50);
    let airports = state
        .graph
        .search_airports(&req.q, limit)
        .into_iter()
        .map(AirportResult::from_airport)
        .collect();

    Json(AirportSearchResponse { airports })
}

/// Look up a single airport.
async fn airport_info(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<AirportResult>, AppError> {
    let code = AirportCode::parse_normalized(&code).map_err(|e| AppError::BadRequest {
        message: format!("Invalid airport code {code:?}: {e}"),
    })?;

    let airport = state.graph.info(&code).ok_or_else(|| AppError::NotFound {
        message: format!("Unknown airport: {code}"),
    })?;

    Ok(Json(AirportResult::from_airport(airport)))
}

/// One-way search, falling back to neighbouring airports.
async fn find_routes(
    State(state): State<AppState>,
    Query(req): Query<RouteSearchRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let request = SearchRequest::parse(
        &req.departure,
        &req.destination,
        req.stops.unwrap_or(DEFAULT_STOPS),
        req.cabin.as_deref().unwrap_or(DEFAULT_CABIN),
    )?;
    let presentation = Presentation::parse(&state, &req.options())?;

    debug!(
        departure = %request.departure,
        destination = %request.destination,
        max_stops = request.max_stops,
        strategy = %presentation.strategy,
        "Route search"
    );

    let strategy = presentation.strategy;
    let result = run_search(&state, move |planner| planner.one_way(&request, strategy)).await?;

    presentation.respond(&state, result).map(Json)
}

/// Two-leg search joined at wherever the first leg actually lands.
async fn find_multi_city_routes(
    State(state): State<AppState>,
    Query(req): Query<MultiCitySearchRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let request = MultiCityRequest::parse(
        &req.departure,
        &req.middle,
        &req.destination,
        req.stops.unwrap_or(DEFAULT_STOPS),
        req.cabin.as_deref().unwrap_or(DEFAULT_CABIN),
    )?;
    let presentation = Presentation::parse(&state, &req.options())?;

    debug!(
        departure = %request.departure,
        middle = %request.middle,
        destination = %request.destination,
        max_stops = request.max_stops,
        strategy = %presentation.strategy,
        "Multi-city search"
    );

    let strategy = presentation.strategy;
    let result = run_search(&state, move |planner| {
        planner.compose_multi_city(&request, strategy)
    })
    .await?;

    presentation.respond(&state, result).map(Json)
}

/// Run a search on the blocking pool.
///
/// Searches are CPU-bound and can take a while on the full network.
async fn run_search<F>(state: &AppState, search: F) -> Result<SearchResult, AppError>
where
    F: FnOnce(&Planner<'_>) -> Result<SearchResult, SearchError> + Send + 'static,
{
    let graph = Arc::clone(&state.graph);
    let config = Arc::clone(&state.config);

    let result = tokio::task::spawn_blocking(move || {
        let planner = Planner::new(&graph, &config);
        search(&planner)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("Search task failed: {e}"),
    })?;

    Ok(result?)
}

/// How to order, filter and price a result set for the response.
#[derive(Debug)]
struct Presentation {
    criterion: RankCriterion,
    strategy: Strategy,
    unique: bool,
    currency: String,
}

impl Presentation {
    fn parse(state: &AppState, options: &SearchOptions) -> Result<Self, AppError> {
        let criterion = match options.sort.as_deref() {
            Some(sort) => RankCriterion::parse(sort).map_err(|e| AppError::BadRequest {
                message: e.to_string(),
            })?,
            None => RankCriterion::default(),
        };

        let strategy = match options.strategy.as_deref() {
            Some(name) => Strategy::parse(name).map_err(|e| AppError::BadRequest {
                message: e.to_string(),
            })?,
            None => Strategy::default(),
        };

        let requested = options
            .currency
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_ascii_uppercase);

        let currency = match (requested, &state.currency) {
            (None, _) => REFERENCE_CURRENCY.to_string(),
            (Some(code), Some(table)) => {
                table.get(&code)?;
                code
            }
            (Some(code), None) if code == REFERENCE_CURRENCY => code,
            (Some(code), None) => {
                return Err(AppError::BadRequest {
                    message: format!("Currency conversion is not available, cannot quote {code}"),
                });
            }
        };

        Ok(Self {
            criterion,
            strategy,
            unique: options.unique,
            currency,
        })
    }

    /// Rank, trim and price the search result.
    fn respond(&self, state: &AppState, result: SearchResult) -> Result<RouteResponse, AppError> {
        let mut itineraries = rank_itineraries(result.itineraries, self.criterion);
        if self.unique {
            itineraries = deduplicate(itineraries);
        }
        itineraries.truncate(state.config.max_results);

        let itineraries = itineraries
            .iter()
            .map(|itinerary| -> Result<ItineraryResult, AppError> {
                let price = match &state.currency {
                    Some(table) => table.convert(itinerary.price(), &self.currency)?,
                    None => itinerary.price(),
                };
                Ok(ItineraryResult::from_itinerary(itinerary, price))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let message = itineraries.is_empty().then(|| NO_ITINERARY.to_string());

        Ok(RouteResponse {
            itineraries,
            fallback: result.used_fallback,
            currency: self.currency.clone(),
            states_explored: result.states_explored,
            message,
        })
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidRequest(msg) => AppError::BadRequest { message: msg },
            SearchError::Timeout => AppError::Unavailable {
                message: e.to_string(),
            },
        }
    }
}

impl From<CurrencyError> for AppError {
    fn from(e: CurrencyError) -> Self {
        match e {
            CurrencyError::UnknownCurrency(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
