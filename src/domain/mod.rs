//! Domain types shared by the API client, the views and the front-ends.
//!
//! This module defines:
//!
//! - records mirrored from API responses (`Job`, `Candidate`, `Ranking`, ...)
//! - request bodies and list filters (`JobDraft`, `JobFilters`, ...)

pub mod requests;
pub mod types;

pub use requests::*;
pub use types::*;
