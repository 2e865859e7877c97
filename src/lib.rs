pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod tagging;
pub mod ui;
pub mod version;

pub use error::{Result, SemverTagError};
pub use tagging::{resolve_tag, tag, TagOutcome, TagRequest, Tagger};
