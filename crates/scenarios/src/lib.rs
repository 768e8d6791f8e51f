//! # ScriptWorld Scenarios
//!
//! Reading scenario files from the scenario directory, building the
//! lettered selection menu, and best-effort YAML syntax checks.

pub mod loader;
pub mod menu;
pub mod validate;

pub use loader::ScenarioLoader;
pub use menu::{display_title, Menu, MenuEntry, MENU_CAPACITY};
pub use validate::{validate_syntax, ValidationOutcome};
