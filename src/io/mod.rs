//! Local file output.
//!
//! - downloaded exports (CSV/PDF/JSON blobs) (`export`)
//! - ranking settings JSON read/write (`settings`)

pub mod export;
pub mod settings;

pub use export::*;
pub use settings::*;
