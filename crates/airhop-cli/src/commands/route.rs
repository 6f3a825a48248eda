//! Route command handler.

use anyhow::Result;

use airhop_lib::RouteRequest;

use crate::commands::NetworkArgs;
use crate::output::{render_plan, OutputFormat};

/// Compute and print the shortest route between two airport codes.
pub fn handle_route(
    network: &NetworkArgs,
    from: &str,
    to: &str,
    max_hops: usize,
    format: OutputFormat,
) -> Result<()> {
    let network = network.load()?;
    let request = RouteRequest::new(from, to).max_hops(max_hops);
    let plan = network.plan_route(&request)?;

    render_plan(&plan, format)
}
