//! Service configuration read from the environment.
//!
//! - `AIRHOP_DATA_DIR`: dataset directory (default: platform data directory)
//! - `AIRHOP_PROXIMITY_KM`: ground connection radius (default: 100)
//! - `SERVICE_PORT`: HTTP port (default: 8080)

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

use airhop_lib::{default_data_dir, DatasetPaths, NetworkOptions, DEFAULT_PROXIMITY_KM};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub data_dir: PathBuf,
    pub proximity_km: f64,
    pub port: u16,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        let data_dir = default_data_dir().context("failed to resolve the dataset directory")?;

        let proximity_km = match env::var("AIRHOP_PROXIMITY_KM") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid AIRHOP_PROXIMITY_KM value {raw:?}"))?,
            Err(_) => DEFAULT_PROXIMITY_KM,
        };

        let port = env::var("SERVICE_PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            data_dir,
            proximity_km,
            port,
        })
    }

    pub fn dataset(&self) -> DatasetPaths {
        DatasetPaths::in_dir(&self.data_dir)
    }

    pub fn network_options(&self) -> NetworkOptions {
        NetworkOptions {
            max_proximity_km: self.proximity_km,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
