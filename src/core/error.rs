//! Error types surfaced by the render pipeline.
//!
//! Malformed markdown is never an error. The only failures are precondition
//! violations made by the host, such as an unusable font descriptor.

use std::fmt;

/// A programming error in the caller: required render input was missing or
/// unusable.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A required argument was missing or carried an unusable value.
    InvalidArgument {
        /// Name of the offending argument (e.g. `monospace_font`).
        argument: &'static str,
        /// Human readable description of what was wrong with it.
        reason: String,
    },
}

impl RenderError {
    pub(crate) fn invalid(argument: &'static str, reason: impl Into<String>) -> Self {
        RenderError::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    pub(crate) fn missing(argument: &'static str) -> Self {
        Self::invalid(argument, "value is required")
    }

    /// Name of the argument that failed validation.
    pub fn argument(&self) -> &'static str {
        match self {
            RenderError::InvalidArgument { argument, .. } => argument,
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InvalidArgument { argument, reason } => {
                write!(f, "Invalid argument '{argument}': {reason}")
            }
        }
    }
}

impl std::error::Error for RenderError {}
