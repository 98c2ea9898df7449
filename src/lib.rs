//! `smartrecruit` library crate.
//!
//! The binary (`sr`) is a thin wrapper around this library so that:
//!
//! - the API client and screen state are testable without spawning processes
//! - the CLI and the TUI share one set of views over the same client
//! - code stays easy to navigate as the project grows

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod messages;
pub mod poll;
pub mod report;
pub mod tui;
pub mod views;
