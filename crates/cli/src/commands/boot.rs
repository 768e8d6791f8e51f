//! scriptworld-boot: load a scenario and hand out role packs

use clap::Parser;
use console::style;
use dispatch::run_boot;
use gateway::{HttpTransport, RecordingTransport};
use scenarios::ScenarioLoader;
use shared::{BootConfig, NetworkConfig, WireProtocol, DEFAULT_HOST};
use std::path::PathBuf;
use std::time::Duration;

use super::{render_events, resolve_scenario_dir, Outcome};

pub const USAGE: &str = "Usage: scriptworld-boot <scenario_id>";

#[derive(Debug, Parser)]
#[command(name = "scriptworld-boot")]
#[command(about = "Load a scenario and send role packs to its AI roles")]
#[command(version)]
pub struct BootCommand {
    /// Scenario id: file name in the scenario directory without `.yaml`
    pub scenario_id: Option<String>,

    /// Network base URL
    #[arg(long, env = "SCRIPTWORLD_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Scenario directory [default: ~/script_world/scenarios]
    #[arg(long)]
    pub scenario_dir: Option<PathBuf>,

    /// Identity the events are sent as
    #[arg(long)]
    pub sender: Option<String>,

    /// Channel for announcements
    #[arg(long)]
    pub channel: Option<String>,

    /// Agent id of the DM
    #[arg(long)]
    pub dm: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 20)]
    pub timeout: u64,

    /// Print the events instead of sending them
    #[arg(long)]
    pub dry_run: bool,
}

impl BootCommand {
    fn boot_config(&self) -> BootConfig {
        let defaults = BootConfig::default();
        BootConfig {
            sender_id: self.sender.clone().unwrap_or(defaults.sender_id),
            channel: self.channel.clone().unwrap_or(defaults.channel),
            dm_id: self.dm.clone().unwrap_or(defaults.dm_id),
        }
    }

    fn network_config(&self) -> NetworkConfig {
        NetworkConfig::new(&self.host, Duration::from_secs(self.timeout))
    }

    pub fn run(&self) -> anyhow::Result<Outcome> {
        let Some(scenario_id) = self.scenario_id.as_deref() else {
            eprintln!("{}", USAGE);
            return Ok(Outcome::Usage);
        };

        let loader = ScenarioLoader::new(resolve_scenario_dir(self.scenario_dir.as_ref())?);
        let scenario = loader.load(scenario_id)?;
        let config = self.boot_config();

        if self.dry_run {
            let mut transport = RecordingTransport::new();
            let report = run_boot(&scenario, &config, &mut transport)?;
            println!("{}", render_events(&report.delivered, WireProtocol::Thread)?);
            return Ok(Outcome::Completed);
        }

        let mut transport = HttpTransport::new(self.network_config(), WireProtocol::Thread)?;
        let report = run_boot(&scenario, &config, &mut transport)?;

        println!(
            "{} 《{}》: {} role pack(s), {} event(s) delivered",
            style("✓").green(),
            scenario.title(),
            report.role_packs(),
            report.delivered.len()
        );
        Ok(Outcome::Completed)
    }
}
