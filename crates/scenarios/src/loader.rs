//! ScenarioLoader - Locate and parse scenario YAML files

use glob::{MatchOptions, Pattern};
use shared::{Result, Scenario, ScriptWorldError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions recognised as scenario files
pub const SCENARIO_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Scenario loader bound to one scenario directory
#[derive(Debug, Clone)]
pub struct ScenarioLoader {
    dir: PathBuf,
}

impl ScenarioLoader {
    /// Create a loader for `dir`. The directory is not touched until used.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a scenario id resolves to
    pub fn path_for(&self, scenario_id: &str) -> PathBuf {
        self.dir.join(format!("{}.yaml", scenario_id))
    }

    /// Load `<dir>/<scenario_id>.yaml`
    pub fn load(&self, scenario_id: &str) -> Result<Scenario> {
        let path = self.path_for(scenario_id);
        if !path.is_file() {
            return Err(ScriptWorldError::ScenarioNotFound(path));
        }

        let content = std::fs::read_to_string(&path)?;
        let scenario = Scenario::from_yaml_str(scenario_id, &content)
            .map_err(|source| ScriptWorldError::ScenarioParse { path: path.clone(), source })?;

        debug!(
            scenario = %scenario.id,
            roles = scenario.roles.len(),
            "loaded scenario from {}",
            path.display()
        );
        Ok(scenario)
    }

    /// Scenario files in the directory, sorted by name
    pub fn list_files(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Err(ScriptWorldError::ScenarioDirNotFound(self.dir.clone()));
        }

        let dir = self.dir.to_str().ok_or_else(|| {
            ScriptWorldError::Config(format!(
                "Scenario directory is not valid UTF-8: {}",
                self.dir.display()
            ))
        })?;
        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::default()
        };

        let mut files = Vec::new();
        for ext in SCENARIO_EXTENSIONS {
            let pattern = format!("{}/*.{}", Pattern::escape(dir), ext);
            let entries = glob::glob_with(&pattern, options)
                .map_err(|e| ScriptWorldError::Config(format!("Bad scenario pattern: {}", e)))?;
            for entry in entries {
                let path = entry.map_err(|e| e.into_error())?;
                if path.is_file() {
                    files.push(path);
                }
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }
}
