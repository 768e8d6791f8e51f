//! Operator prompts: scenario choice and confirmation

use console::Term;
use scenarios::{Menu, MenuEntry};
use shared::{Result, ScriptWorldError};
use std::io::{self, BufRead, IsTerminal, Write};

pub const CHOICE_PROMPT: &str = "你的选择：";
pub const CONFIRM_PROMPT: &str = "你的输入：";
pub const INVALID_CHOICE: &str = "😵 你的输入有点问题，请重新选择哇～（请输入 A/B/C…）";
pub const INVALID_CONFIRM: &str = "😵 我没看懂，请输入：是 或 否";

pub const AFFIRMATIVE: [&str; 6] = ["是", "Y", "y", "yes", "YES", "Yes"];
pub const NEGATIVE: [&str; 6] = ["否", "N", "n", "no", "NO", "No"];

pub fn confirm_question(title: &str) -> String {
    format!("✅ 你选择的是：{}\n是否确定开启？请输入：是 / 否", title)
}

/// The person at the terminal
pub trait Operator {
    /// Show `prompt` and read one answer. `None` means input is closed.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Show a message
    fn tell(&mut self, message: &str);
}

/// Operator on stdin/stdout. Uses dialoguer on a terminal, plain lines otherwise.
#[derive(Debug, Default)]
pub struct TerminalOperator;

impl TerminalOperator {
    pub fn new() -> Self {
        Self
    }

    fn is_interactive() -> bool {
        Term::stdout().is_term() && io::stdin().is_terminal()
    }
}

impl Operator for TerminalOperator {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        println!();
        if Self::is_interactive() {
            // dialoguer prompts are single-line
            let (lead, last) = prompt.rsplit_once('\n').unwrap_or(("", prompt));
            if !lead.is_empty() {
                println!("{}", lead);
            }
            let answer = dialoguer::Input::<String>::new()
                .with_prompt(last.trim_end_matches('：'))
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_error)?;
            return Ok(Some(answer));
        }

        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn tell(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Ctrl-C or end of input on the terminal closes input, like EOF on a pipe
fn prompt_error(err: dialoguer::Error) -> ScriptWorldError {
    let dialoguer::Error::IO(err) = err;
    match err.kind() {
        io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof => ScriptWorldError::InputClosed,
        _ => ScriptWorldError::Io(err),
    }
}

/// How many invalid answers a prompt tolerates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttemptLimit {
    #[default]
    Unbounded,
    AtMost(usize),
}

impl AttemptLimit {
    pub fn from_option(max: Option<usize>) -> Self {
        max.map(AttemptLimit::AtMost).unwrap_or_default()
    }

    fn check(&self, failed: usize) -> Result<()> {
        match self {
            AttemptLimit::AtMost(max) if failed >= *max => {
                Err(ScriptWorldError::TooManyAttempts(*max))
            }
            _ => Ok(()),
        }
    }
}

/// Ask until `parse` accepts an answer, repeating `invalid` after each miss
fn prompt_until<T>(
    operator: &mut dyn Operator,
    prompt: &str,
    invalid: &str,
    limit: AttemptLimit,
    mut parse: impl FnMut(&str) -> Option<T>,
) -> Result<T> {
    let mut failed = 0;
    loop {
        let answer = operator.ask(prompt)?.ok_or(ScriptWorldError::InputClosed)?;
        if let Some(value) = parse(&answer) {
            return Ok(value);
        }
        failed += 1;
        operator.tell(invalid);
        limit.check(failed)?;
    }
}

/// Read a menu letter. Case and surrounding whitespace are ignored.
pub fn ask_choice<'m>(
    menu: &'m Menu,
    operator: &mut dyn Operator,
    limit: AttemptLimit,
) -> Result<&'m MenuEntry> {
    prompt_until(operator, CHOICE_PROMPT, INVALID_CHOICE, limit, |answer| {
        menu.lookup(answer)
    })
}

/// Read 是/否 for `title`; true to go ahead. The question is repeated on every attempt.
pub fn ask_confirm(title: &str, operator: &mut dyn Operator, limit: AttemptLimit) -> Result<bool> {
    let prompt = format!("{}\n{}", confirm_question(title), CONFIRM_PROMPT);
    prompt_until(operator, &prompt, INVALID_CONFIRM, limit, |answer| {
        let answer = answer.trim();
        if AFFIRMATIVE.contains(&answer) {
            Some(true)
        } else if NEGATIVE.contains(&answer) {
            Some(false)
        } else {
            None
        }
    })
}


#[cfg(test)]
mod tests {
    use super::scripted::ScriptedOperator;
    use super::*;
    use std::path::PathBuf;

    fn menu() -> Menu {
        Menu::build(&[
            PathBuf::from("/s/alpha.yaml"),
            PathBuf::from("/s/beta.yaml"),
        ])
    }

    // ============== ask_choice ==============

    #[test]
    fn test_choice_accepts_lowercase() {
        let menu = menu();
        let mut op = ScriptedOperator::new(&["b\n"]);
        let entry = ask_choice(&menu, &mut op, AttemptLimit::Unbounded).unwrap();
        assert_eq!(entry.title, "beta");
        assert!(op.told.is_empty());
    }

    #[test]
    fn test_choice_reprompts_until_valid() {
        let menu = menu();
        let mut op = ScriptedOperator::new(&["Z", "", "hello", " a "]);
        let entry = ask_choice(&menu, &mut op, AttemptLimit::Unbounded).unwrap();

        assert_eq!(entry.key, 'A');
        assert_eq!(op.prompts.len(), 4);
        assert_eq!(op.told, vec![INVALID_CHOICE; 3]);
        assert_eq!(op.remaining(), 0);
    }

    #[test]
    fn test_choice_input_closed() {
        let menu = menu();
        let mut op = ScriptedOperator::new(&["x"]);
        let err = ask_choice(&menu, &mut op, AttemptLimit::Unbounded).unwrap_err();
        assert!(matches!(err, ScriptWorldError::InputClosed));
    }

    #[test]
    fn test_choice_attempt_limit() {
        let menu = menu();
        let mut op = ScriptedOperator::new(&["x", "y", "A"]);
        let err = ask_choice(&menu, &mut op, AttemptLimit::AtMost(2)).unwrap_err();
        assert!(matches!(err, ScriptWorldError::TooManyAttempts(2)));
        assert_eq!(op.remaining(), 1);
    }

    // ============== ask_confirm ==============

    #[test]
    fn test_confirm_yes_after_invalid_answers() {
        let mut op = ScriptedOperator::new(&["maybe", "yEs", "好", "是"]);
        assert!(ask_confirm("午夜谋杀", &mut op, AttemptLimit::Unbounded).unwrap());
        assert_eq!(op.remaining(), 0);
        assert_eq!(op.told, vec![INVALID_CONFIRM; 3]);
        assert!(op.prompts.iter().all(|p| p.contains("你选择的是：午夜谋杀")));
    }

    #[test]
    fn test_confirm_every_affirmative_token() {
        for token in AFFIRMATIVE {
            let mut op = ScriptedOperator::new(&[token]);
            assert!(ask_confirm("t", &mut op, AttemptLimit::Unbounded).unwrap());
        }
    }

    #[test]
    fn test_confirm_negative() {
        for token in NEGATIVE {
            let answer = format!("  {}\n", token);
            let mut op = ScriptedOperator::new(&[answer.as_str()]);
            assert!(!ask_confirm("t", &mut op, AttemptLimit::Unbounded).unwrap());
        }
    }

    // ============== terminal errors ==============

    #[test]
    fn test_prompt_error_closed_input() {
        for kind in [io::ErrorKind::Interrupted, io::ErrorKind::UnexpectedEof] {
            let err = prompt_error(dialoguer::Error::IO(io::Error::from(kind)));
            assert!(matches!(err, ScriptWorldError::InputClosed));
        }
    }

    #[test]
    fn test_prompt_error_keeps_io_error() {
        let err = prompt_error(dialoguer::Error::IO(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "tty gone",
        )));
        match err {
            ScriptWorldError::Io(io) => {
                assert_eq!(io.kind(), io::ErrorKind::BrokenPipe);
                assert_eq!(io.to_string(), "tty gone");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_attempt_limit_from_option() {
        assert_eq!(AttemptLimit::from_option(None), AttemptLimit::Unbounded);
        assert_eq!(AttemptLimit::from_option(Some(3)), AttemptLimit::AtMost(3));
    }
}
