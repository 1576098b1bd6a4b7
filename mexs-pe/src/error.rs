//! Error types for mexs-pe

use crate::services::kegg_client::KeggError;
use thiserror::Error;

/// Pipeline error type
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Product name matched no configured product class
    #[error("Product '{0}' matches no configured product class")]
    UnclassifiedProduct(String),

    /// Compound search returned zero usable hits
    #[error("No candidate compound found for query: {query}")]
    NoCompoundMatch { query: String },

    /// Knowledge-base transport or lookup failure
    #[error("Knowledge base error: {0}")]
    KnowledgeBase(#[from] KeggError),

    /// Configuration, I/O or report-sink failure
    #[error("Common error: {0}")]
    Common(#[from] mexs_common::Error),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
