//! # ScriptWorld Dispatch
//!
//! Turns a scenario into the ordered events that open a session, and
//! delivers them one at a time through an [`EventTransport`].
//!
//! ```text
//! boot:  announce -> DM controller -> role pack per AI role -> closing announce
//! lobby: register (best effort) -> "加载剧本" -> pause -> fenced scenario text
//! ```

pub mod boot;
pub mod lobby;

pub use boot::{boot_events, run_boot, BootReport, RolePack};
pub use lobby::{fenced_scenario, lobby_events, run_lobby, LobbyReport};

// Re-export dependencies
pub use gateway::EventTransport;
