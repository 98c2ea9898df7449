//! Text reports printed by the CLI subcommands.

pub mod format;

pub use format::*;
