//! scriptworld-boot - Load a scenario and hand out role packs
//!
//! Usage:
//!   scriptworld-boot <scenario_id>
//!   SCRIPTWORLD_HOST=http://host:port scriptworld-boot <scenario_id>

use clap::Parser;
use cli::commands::BootCommand;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    cli::init_tracing();

    let cmd = BootCommand::parse();
    Ok(cmd.run()?.exit_code())
}
