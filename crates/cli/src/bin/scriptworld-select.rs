//! scriptworld-select - Pick a scenario from a lettered menu and post it to the lobby

use clap::Parser;
use cli::commands::SelectCommand;
use cli::interactive::TerminalOperator;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    cli::init_tracing();

    let cmd = SelectCommand::parse();
    let mut operator = TerminalOperator::new();
    Ok(cmd.run(&mut operator)?.exit_code())
}
