//! Shared application state for axum handlers.

use std::sync::Arc;

use airhop_lib::{DatasetPaths, NetworkOptions, Result, RouteNetwork};

/// Read-only route network shared by every request.
///
/// Cloning is cheap; the network is held behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<RouteNetwork>,
}

impl AppState {
    pub fn new(network: RouteNetwork) -> Self {
        Self {
            inner: Arc::new(network),
        }
    }

    /// Load the dataset and build the network once.
    pub fn load(paths: &DatasetPaths, options: &NetworkOptions) -> Result<Self> {
        RouteNetwork::load(paths, options).map(Self::new)
    }

    pub fn network(&self) -> &RouteNetwork {
        &self.inner
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("airports", &self.inner.airports().len())
            .field("nodes", &self.inner.graph().node_count())
            .finish()
    }
}
