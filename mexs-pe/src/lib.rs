//! mexs-pe library interface
//!
//! Classifies a target product, resolves its compound and pathway from
//! KEGG, maps pathway enzymes to native host genes, and emits ranked
//! engineering recommendations with CSV/markdown reports.

pub mod config;
pub mod error;
pub mod extractors;
pub mod models;
pub mod services;

pub use error::{PipelineError, PipelineResult};
