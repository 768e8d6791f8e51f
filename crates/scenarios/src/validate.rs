//! Best-effort YAML syntax check of raw scenario text

/// Result of checking scenario text. Never blocks sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(String),
    Skipped(String),
}

impl ValidationOutcome {
    /// Operator asked not to check
    pub fn skipped() -> Self {
        ValidationOutcome::Skipped("（已跳过 YAML 语法校验）".to_string())
    }

    /// False only when the text failed to parse
    pub fn is_ok(&self) -> bool {
        !matches!(self, ValidationOutcome::Invalid(_))
    }

    pub fn message(&self) -> String {
        match self {
            ValidationOutcome::Valid => "YAML 语法校验通过".to_string(),
            ValidationOutcome::Invalid(reason) => format!("YAML 语法可能有问题：{}", reason),
            ValidationOutcome::Skipped(notice) => notice.clone(),
        }
    }
}

/// Parse `text` as a generic YAML document
pub fn validate_syntax(text: &str) -> ValidationOutcome {
    match serde_yaml::from_str::<serde_yaml::Value>(text) {
        Ok(_) => ValidationOutcome::Valid,
        Err(e) => ValidationOutcome::Invalid(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_yaml() {
        let outcome = validate_syntax("title: 午夜谋杀\nroles:\n  - id: npc_1\n");
        assert_eq!(outcome, ValidationOutcome::Valid);
        assert!(outcome.is_ok());
        assert_eq!(outcome.message(), "YAML 语法校验通过");
    }

    #[test]
    fn test_invalid_yaml() {
        let outcome = validate_syntax("title: [unterminated\n  - x: : y");
        assert!(!outcome.is_ok());
        assert!(outcome.message().starts_with("YAML 语法可能有问题："));
    }

    #[test]
    fn test_skipped_is_ok() {
        let outcome = ValidationOutcome::skipped();
        assert!(outcome.is_ok());
        assert!(outcome.message().contains("跳过"));
    }
}
