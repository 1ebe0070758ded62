//! Application state for the web layer.

use std::sync::Arc;

use crate::currency::CurrencyTable;
use crate::graph::AirportGraph;
use crate::planner::SearchConfig;

/// Shared application state.
///
/// The graph is immutable once loaded, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Airport and route graph
    pub graph: Arc<AirportGraph>,

    /// Route planner configuration
    pub config: Arc<SearchConfig>,

    /// Exchange rates for display, if a table was loaded
    pub currency: Option<Arc<CurrencyTable>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        graph: AirportGraph,
        config: SearchConfig,
        currency: Option<CurrencyTable>,
    ) -> Self {
        Self {
            graph: Arc::new(graph),
            config: Arc::new(config),
            currency: currency.map(Arc::new),
        }
    }
}
