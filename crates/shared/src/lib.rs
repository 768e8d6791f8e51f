//! # ScriptWorld Shared
//!
//! Common types used by the scenario loader, the transport and both CLIs.

pub mod config;
pub mod error;
pub mod event;
pub mod scenario;

// Re-exports
pub use config::*;
pub use error::*;
pub use event::*;
pub use scenario::*;
