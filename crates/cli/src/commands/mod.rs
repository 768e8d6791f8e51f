//! CLI Commands

pub mod boot;
pub mod select;

pub use boot::BootCommand;
pub use select::SelectCommand;

use shared::{default_scenario_dir, OutboundEvent, Result, WireProtocol};
use std::path::PathBuf;
use std::process::ExitCode;

/// How a command finished without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// Operator answered 否
    Cancelled,
    /// Scenario directory has no scenario files
    NoScenarios,
    /// Required argument missing
    Usage,
    /// Scenario directory does not exist
    MissingDirectory,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Usage | Outcome::MissingDirectory => ExitCode::FAILURE,
            Outcome::Completed | Outcome::Cancelled | Outcome::NoScenarios => ExitCode::SUCCESS,
        }
    }
}

/// `--scenario-dir` if given, else `~/script_world/scenarios`
fn resolve_scenario_dir(flag: Option<&PathBuf>) -> Result<PathBuf> {
    match flag {
        Some(dir) => Ok(dir.clone()),
        None => default_scenario_dir(),
    }
}

/// Pretty JSON of the first shape of each event, for `--dry-run`
fn render_events(events: &[OutboundEvent], protocol: WireProtocol) -> Result<String> {
    let mut out = Vec::with_capacity(events.len());
    for event in events {
        if let Some(shape) = protocol.shapes(event)?.into_iter().next() {
            out.push(serde_json::to_string_pretty(&shape.body)?);
        }
    }
    Ok(out.join("\n"))
}
