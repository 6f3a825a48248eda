//! Airport lookup command.

use anyhow::Result;

use airhop_lib::Error as LibError;

use crate::commands::NetworkArgs;
use crate::output::{render_airport, OutputFormat};

/// Print the airport registered under `code`.
pub fn handle_airport(network: &NetworkArgs, code: &str, format: OutputFormat) -> Result<()> {
    let network = network.load()?;
    let airport = network
        .find_airport(code)
        .ok_or_else(|| LibError::UnknownAirport {
            code: code.to_uppercase(),
        })?;

    render_airport(airport, format)
}
