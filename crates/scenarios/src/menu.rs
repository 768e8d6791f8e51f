//! Lettered scenario menu for the lobby selector

use std::path::{Path, PathBuf};

/// One letter per entry, A to Z
pub const MENU_CAPACITY: usize = 26;

const WELCOME: &str = "🕵️ 欢迎来到 ScriptWorld 探案馆！\n\
这里是【三人剧本·AI可补位】上车入口～\n\
请选择一个剧本（输入字母即可，比如 A）：\n";

const NO_SCENARIOS: &str = "（当前 scenarios 目录下没有 *.yaml 剧本文件）";

/// Title shown for a scenario file: its name without the extension
pub fn display_title(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A selectable scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub key: char,
    pub title: String,
    pub path: PathBuf,
}

/// Letter-to-file mapping in directory sort order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    entries: Vec<MenuEntry>,
}

impl Menu {
    /// Assign letters to `files` in order. Files past the 26th are left out.
    pub fn build(files: &[PathBuf]) -> Self {
        let entries = ('A'..='Z')
            .zip(files.iter())
            .map(|(key, path)| MenuEntry {
                key,
                title: display_title(path),
                path: path.clone(),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up an operator's answer. Surrounding whitespace and case are ignored.
    pub fn lookup(&self, answer: &str) -> Option<&MenuEntry> {
        let answer = answer.trim().to_uppercase();
        let mut chars = answer.chars();
        let key = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        self.entries.iter().find(|e| e.key == key)
    }

    /// Welcome text followed by one `X. title` line per entry
    pub fn render(&self) -> String {
        let mut lines = vec![WELCOME.to_string()];
        lines.extend(self.entries.iter().map(|e| format!("{}. {}", e.key, e.title)));
        if self.entries.is_empty() {
            lines.push(NO_SCENARIOS.to_string());
        }
        lines.join("\n")
    }
}
