//! Shared helpers for airhop-lib integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use airhop_lib::{DatasetPaths, NetworkOptions, RouteNetwork};

/// Directory holding the checked-in OpenFlights-format fixture dataset.
pub fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn fixture_paths() -> DatasetPaths {
    DatasetPaths::in_dir(fixture_dir())
}

pub fn fixture_network() -> RouteNetwork {
    RouteNetwork::load(&fixture_paths(), &NetworkOptions::default()).expect("fixture loads")
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}
