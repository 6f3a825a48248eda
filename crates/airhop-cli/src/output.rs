//! Output formatting for command results.

use std::io::{self, Write};

use anyhow::Result;
use clap::ValueEnum;

use airhop_lib::{Airport, RoutePlan};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

pub fn render_airport(airport: &Airport, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => write_json(&mut out, airport),
        OutputFormat::Text => {
            writeln!(out, "{} {}", airport.display_code(), airport.name)?;
            writeln!(out, "  id: {}", airport.id)?;
            writeln!(out, "  iata: {}", airport.iata.as_deref().unwrap_or("-"))?;
            writeln!(out, "  icao: {}", airport.icao.as_deref().unwrap_or("-"))?;
            writeln!(
                out,
                "  location: {:.4}, {:.4}",
                airport.location.latitude, airport.location.longitude
            )?;
            Ok(())
        }
    }
}

pub fn render_plan(plan: &RoutePlan, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => write_json(&mut out, plan),
        OutputFormat::Text => {
            writeln!(
                out,
                "Route {} -> {}: {}",
                plan.source,
                plan.destination,
                plan.hops.join(" -> ")
            )?;
            writeln!(out, "  distance: {:.1} km", plan.distance)?;
            writeln!(
                out,
                "  legs: {} ({} scheduled, {} proximity)",
                plan.hop_count(),
                plan.scheduled,
                plan.proximity
            )?;
            Ok(())
        }
    }
}

fn write_json<W: Write, T: serde::Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
