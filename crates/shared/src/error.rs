//! Error types for ScriptWorld

use std::path::PathBuf;
use thiserror::Error;

/// A single rejected delivery attempt, kept for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeFailure {
    pub shape: String,
    pub reason: String,
}

impl std::fmt::Display for ShapeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} shape: {}", self.shape, self.reason)
    }
}

/// General ScriptWorld error type
#[derive(Debug, Error)]
pub enum ScriptWorldError {
    #[error("找不到目录：{}", .0.display())]
    ScenarioDirNotFound(PathBuf),

    #[error("Scenario not found: {}", .0.display())]
    ScenarioNotFound(PathBuf),

    #[error("Failed to parse scenario {}: {source}", .path.display())]
    ScenarioParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("AI role roles[{0}] has no id")]
    RoleWithoutId(usize),

    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("send_event failed: {status} {body}")]
    Rejected { url: String, status: u16, body: String },

    #[error("All payload shapes were rejected by {url}: {}", .failures.iter().map(|f| f.to_string()).collect::<Vec<_>>().join("; "))]
    AllShapesRejected {
        url: String,
        failures: Vec<ShapeFailure>,
    },

    #[error("Input closed before a valid answer was given")]
    InputClosed,

    #[error("No valid answer after {0} attempts")]
    TooManyAttempts(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScriptWorldError {
    /// Whether this error means something the operator asked for does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ScriptWorldError::ScenarioDirNotFound(_) | ScriptWorldError::ScenarioNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ScriptWorldError>;
