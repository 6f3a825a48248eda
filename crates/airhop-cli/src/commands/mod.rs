// Handlers for CLI subcommands.
//
// main.rs parses arguments and dispatches here; each module owns one
// subcommand.

pub mod airport;
pub mod route;

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use airhop_lib::{default_data_dir, DatasetPaths, NetworkOptions, RouteNetwork};

/// Environment variable overriding the proximity radius.
const PROXIMITY_KM_ENV: &str = "AIRHOP_PROXIMITY_KM";

/// Dataset and graph options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct NetworkArgs {
    pub data_dir: Option<PathBuf>,
    pub proximity_km: Option<f64>,
}

impl NetworkArgs {
    fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir().context("failed to resolve the dataset directory"),
        }
    }

    fn options(&self) -> Result<NetworkOptions> {
        let mut options = NetworkOptions::default();
        if let Some(km) = self.proximity_km {
            options.max_proximity_km = km;
        } else if let Ok(raw) = env::var(PROXIMITY_KM_ENV) {
            options.max_proximity_km = raw
                .parse()
                .with_context(|| format!("invalid {PROXIMITY_KM_ENV} value {raw:?}"))?;
        }
        Ok(options)
    }

    /// Load the dataset and build the route network.
    pub fn load(&self) -> Result<RouteNetwork> {
        let dir = self.data_dir()?;
        let paths = DatasetPaths::in_dir(&dir);
        RouteNetwork::load(&paths, &self.options()?)
            .with_context(|| format!("failed to load dataset from {}", dir.display()))
    }
}
