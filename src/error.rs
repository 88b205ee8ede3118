//! Error taxonomy for the rendering pipeline
//!
//! An unrecognized severity label is not an error: it falls back to the
//! Low variant (see [`crate::severity::classify`]).

use crate::viewport::Slot;
use thiserror::Error;

/// Failure of a single render step or binding
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// A named slot required by an operation does not exist in the view
    #[error("missing render target: #{slot}")]
    MissingTarget { slot: Slot },

    /// A numeric field violates its invariant
    #[error("invalid value for {field}: {value} ({reason})")]
    InvalidData {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl RenderError {
    pub fn missing(slot: Slot) -> Self {
        RenderError::MissingTarget { slot }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Failure to materialize a report record from disk or text
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed report: {0}")]
    Json(#[from] serde_json::Error),
}
