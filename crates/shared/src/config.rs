//! Configuration types for ScriptWorld

use std::path::PathBuf;
use std::time::Duration;

use crate::{Result, ScriptWorldError};

/// Default network address for both CLIs
pub const DEFAULT_HOST: &str = "http://127.0.0.1:8700";

/// Channel both CLIs talk in unless told otherwise
pub const DEFAULT_CHANNEL: &str = "general";

/// Scenario directory below the home directory
pub const SCENARIO_SUBDIR: &str = "script_world/scenarios";

/// Resolve `~/script_world/scenarios`
pub fn default_scenario_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(SCENARIO_SUBDIR))
        .ok_or_else(|| ScriptWorldError::Config("Cannot determine home directory".to_string()))
}

/// Where and how to reach the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Base URL, without a trailing slash
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl NetworkConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Absolute URL for an API path such as `/api/send_event`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, Duration::from_secs(20))
    }
}

/// Settings for the scenario boot sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootConfig {
    /// Identity the events are sent as
    pub sender_id: String,

    /// Channel for the opening and closing announcements
    pub channel: String,

    /// Agent that runs the game
    pub dm_id: String,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            sender_id: "admin".to_string(),
            channel: DEFAULT_CHANNEL.to_string(),
            dm_id: "universal_dm".to_string(),
        }
    }
}

/// Settings for the lobby broadcast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyConfig {
    /// Identity registered and used as the sender
    pub sender_id: String,

    /// Lobby channel
    pub channel: String,

    /// Gap between the announcement and the scenario text
    pub pause: Duration,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            sender_id: "ScriptWorldLobby".to_string(),
            channel: DEFAULT_CHANNEL.to_string(),
            pause: Duration::from_millis(300),
        }
    }
}
