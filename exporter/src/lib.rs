//! Exports a YouTube playlist and its videos as catalog entities in a single JSON file.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{ExportError, PipelineError, Stage};
pub use models::{Blueprint, Entity};
pub use pipeline::{run, ExportSummary};
