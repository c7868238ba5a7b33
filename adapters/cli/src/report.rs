use std::io::Write;

use anyhow::{Context, Result};
use fire_escape_core::Outcome;
use serde::Serialize;

/// Result of a single scenario in the order it appeared in the batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct ScenarioReport {
    /// Zero-based position of the scenario in the batch.
    pub(crate) index: usize,
    /// Scenario name taken from the manifest or derived from its position.
    pub(crate) name: String,
    /// Whether the agent escaped.
    pub(crate) outcome: Outcome,
    /// Outcome symbol, `Y` or `N`.
    pub(crate) symbol: char,
}

impl ScenarioReport {
    pub(crate) fn new(index: usize, name: String, outcome: Outcome) -> Self {
        Self {
            index,
            name,
            outcome,
            symbol: outcome.symbol(),
        }
    }
}

/// Writes one outcome symbol per line.
pub(crate) fn write_symbols(out: &mut impl Write, reports: &[ScenarioReport]) -> Result<()> {
    for report in reports {
        writeln!(out, "{}", report.symbol).context("failed to write scenario outcome")?;
    }
    Ok(())
}

/// Writes every report as a pretty-printed JSON array.
pub(crate) fn write_json(out: &mut impl Write, reports: &[ScenarioReport]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports).context("failed to encode scenario report")?;
    writeln!(out).context("failed to write scenario report")?;
    Ok(())
}
