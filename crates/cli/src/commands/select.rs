//! scriptworld-select: pick a scenario and post it to the lobby channel

use clap::Parser;
use console::style;
use dispatch::{run_lobby, LobbyReport};
use gateway::{HttpTransport, RecordingTransport};
use indicatif::ProgressBar;
use scenarios::{validate_syntax, Menu, ScenarioLoader, ValidationOutcome};
use shared::{LobbyConfig, NetworkConfig, ScriptWorldError, WireProtocol, DEFAULT_HOST};
use std::path::PathBuf;
use std::time::Duration;

use super::{render_events, resolve_scenario_dir, Outcome};
use crate::interactive::{ask_choice, ask_confirm, AttemptLimit, Operator};

pub const CANCELLED: &str = "已取消。欢迎下次再来～";

fn sent_notice(channel: &str) -> String {
    format!(
        "📨 已为你把剧本自动发送到 lobby（{}）频道，接下来去 Studio 跟 DM 继续：我扮演：<角色> → 开始游戏",
        channel
    )
}

#[derive(Debug, Parser)]
#[command(name = "scriptworld-select")]
#[command(about = "Choose a scenario and broadcast it to the lobby channel")]
#[command(version)]
pub struct SelectCommand {
    /// Network base URL
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Scenario directory [default: ~/script_world/scenarios]
    #[arg(long)]
    pub scenario_dir: Option<PathBuf>,

    /// Give up after this many invalid answers to a prompt
    #[arg(long)]
    pub max_attempts: Option<usize>,

    /// Do not check YAML syntax before sending
    #[arg(long)]
    pub skip_validation: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 15)]
    pub timeout: u64,

    /// Print the events instead of sending them
    #[arg(long)]
    pub dry_run: bool,
}

impl SelectCommand {
    fn network_config(&self) -> NetworkConfig {
        NetworkConfig::new(&self.host, Duration::from_secs(self.timeout))
    }

    fn validate(&self, content: &str) -> ValidationOutcome {
        if self.skip_validation {
            ValidationOutcome::skipped()
        } else {
            validate_syntax(content)
        }
    }

    pub fn run(&self, operator: &mut dyn Operator) -> anyhow::Result<Outcome> {
        let loader = ScenarioLoader::new(resolve_scenario_dir(self.scenario_dir.as_ref())?);
        let files = match loader.list_files() {
            Ok(files) => files,
            Err(e @ ScriptWorldError::ScenarioDirNotFound(_)) => {
                operator.tell(&format!("❌ {}", e));
                return Ok(Outcome::MissingDirectory);
            }
            Err(e) => return Err(e.into()),
        };

        let menu = Menu::build(&files);
        operator.tell(&menu.render());
        if menu.is_empty() {
            return Ok(Outcome::NoScenarios);
        }

        let limit = AttemptLimit::from_option(self.max_attempts);
        let entry = ask_choice(&menu, operator, limit)?;
        if !ask_confirm(&entry.title, operator, limit)? {
            operator.tell(CANCELLED);
            return Ok(Outcome::Cancelled);
        }

        let content = std::fs::read_to_string(&entry.path)?;
        let outcome = self.validate(&content);
        let mark = if outcome.is_ok() {
            style("✅ ").green()
        } else {
            style("⚠️ ").yellow()
        };
        operator.tell(&format!("{}{}", mark, outcome.message()));

        let config = LobbyConfig::default();
        let report = if self.dry_run {
            let mut transport = RecordingTransport::new();
            let report = run_lobby(&content, &config, &mut transport, |_| {})?;
            operator.tell(&render_events(
                &report.delivered,
                WireProtocol::WorkspaceMessaging,
            )?);
            report
        } else {
            self.broadcast(&content, &config)?
        };

        tracing::info!(
            registered = report.registered,
            events = report.delivered.len(),
            "lobby broadcast finished"
        );
        operator.tell(&format!("\n{}", sent_notice(&config.channel)));
        Ok(Outcome::Completed)
    }

    fn broadcast(&self, content: &str, config: &LobbyConfig) -> anyhow::Result<LobbyReport> {
        let mut transport =
            HttpTransport::new(self.network_config(), WireProtocol::WorkspaceMessaging)?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_message("发送中…");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = run_lobby(content, config, &mut transport, std::thread::sleep);
        spinner.finish_and_clear();
        Ok(result?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactive::scripted::ScriptedOperator;
    use crate::interactive::INVALID_CHOICE;
    use tempfile::TempDir;

    fn command(dir: &std::path::Path, extra: &[&str]) -> SelectCommand {
        let mut argv = vec![
            "scriptworld-select",
            "--scenario-dir",
            dir.to_str().unwrap(),
            "--dry-run",
        ];
        argv.extend_from_slice(extra);
        SelectCommand::try_parse_from(argv).unwrap()
    }

    fn scenario_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("午夜谋杀.yaml"), "title: 午夜谋杀\nroles: []\n").unwrap();
        std::fs::write(dir.path().join("broken.yml"), "title: [oops\n").unwrap();
        dir
    }

    #[test]
    fn test_defaults() {
        let cmd = SelectCommand::try_parse_from(["scriptworld-select"]).unwrap();
        assert_eq!(cmd.network_config().base_url, "http://127.0.0.1:8700");
        assert_eq!(cmd.network_config().timeout, Duration::from_secs(15));
        assert!(cmd.max_attempts.is_none());
        assert!(!cmd.skip_validation);
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let cmd = command(&dir.path().join("absent"), &[]);
        let mut op = ScriptedOperator::new(&[]);

        assert_eq!(cmd.run(&mut op).unwrap(), Outcome::MissingDirectory);
        assert!(op.told[0].starts_with("❌ "));
        assert!(op.prompts.is_empty());
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let cmd = command(dir.path(), &[]);
        let mut op = ScriptedOperator::new(&[]);

        assert_eq!(cmd.run(&mut op).unwrap(), Outcome::NoScenarios);
        assert!(op.prompts.is_empty());
    }

    #[test]
    fn test_cancelled() {
        let dir = scenario_dir();
        let cmd = command(dir.path(), &[]);
        let mut op = ScriptedOperator::new(&["b", "否"]);

        assert_eq!(cmd.run(&mut op).unwrap(), Outcome::Cancelled);
        assert_eq!(op.told.last().unwrap(), CANCELLED);
    }

    #[test]
    fn test_selects_after_invalid_letter() {
        let dir = scenario_dir();
        let cmd = command(dir.path(), &[]);
        // broken.yml sorts before 午夜谋杀.yaml
        let mut op = ScriptedOperator::new(&["q", "B", "是"]);

        assert_eq!(cmd.run(&mut op).unwrap(), Outcome::Completed);
        assert!(op.told.iter().any(|t| t == INVALID_CHOICE));
        assert!(op.told.iter().any(|t| t.contains("YAML 语法校验通过")));
        assert!(op.told.iter().any(|t| t.contains("加载剧本")));
        assert!(op.told.iter().any(|t| t.contains("```yaml\\ntitle: 午夜谋杀")));
    }

    #[test]
    fn test_invalid_yaml_still_sent() {
        let dir = scenario_dir();
        let cmd = command(dir.path(), &[]);
        let mut op = ScriptedOperator::new(&["a", "y"]);

        assert_eq!(cmd.run(&mut op).unwrap(), Outcome::Completed);
        assert!(op.told.iter().any(|t| t.contains("YAML 语法可能有问题")));
        assert!(op.told.last().unwrap().contains("📨"));
    }

    #[test]
    fn test_skip_validation() {
        let dir = scenario_dir();
        let cmd = command(dir.path(), &["--skip-validation"]);
        let mut op = ScriptedOperator::new(&["a", "yes"]);

        assert_eq!(cmd.run(&mut op).unwrap(), Outcome::Completed);
        assert!(op.told.iter().any(|t| t.contains("跳过")));
    }

    #[test]
    fn test_max_attempts() {
        let dir = scenario_dir();
        let cmd = command(dir.path(), &["--max-attempts", "1"]);
        let mut op = ScriptedOperator::new(&["z", "a"]);

        let err = cmd.run(&mut op).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScriptWorldError>(),
            Some(ScriptWorldError::TooManyAttempts(1))
        ));
    }
}
