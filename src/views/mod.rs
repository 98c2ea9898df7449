//! Screen state shared by the CLI and the TUI.
//!
//! Each view owns what one screen shows and talks to the server through
//! an `ApiClient`. Rendering lives elsewhere (`report` for text, `tui` for
//! the terminal UI).

pub mod analytics;
pub mod apply;
pub mod candidates;
pub mod jobs;
pub mod ranking;
pub mod session;
pub mod settings;
pub mod upload;
