//! # ScriptWorld CLI
//!
//! `scriptworld-boot` loads a scenario and hands out role packs;
//! `scriptworld-select` lets an operator pick a scenario and posts it to the lobby.

pub mod commands;
pub mod interactive;

/// Log to stderr, filtered by `RUST_LOG`
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
