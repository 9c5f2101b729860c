//! Layered error definitions
//!
//! Categorized by source: dynamics config / evaluation / translation

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Dynamics Configuration Errors =====
    /// Dynamics validation error
    #[error("invalid dynamics at '{field}': {message}")]
    InvalidDynamics { field: String, message: String },

    // ===== Evaluation Errors =====
    /// Checker evaluation failed
    #[error("safety check failed: {message}")]
    Check {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ===== Translation Errors =====
    /// Raw response value outside the closed set mapped for an axis
    #[error("unmapped response variant '{value}' on {axis} axis")]
    UnmappedVariant {
        axis: &'static str,
        value: String,
    },

    // ===== General Errors =====
    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create dynamics validation error
    pub fn invalid_dynamics(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDynamics {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create checker evaluation error
    pub fn check(message: impl Into<String>) -> Self {
        Self::Check {
            message: message.into(),
            source: None,
        }
    }

    /// Create unmapped-variant error
    pub fn unmapped_variant(axis: &'static str, value: impl std::fmt::Debug) -> Self {
        Self::UnmappedVariant {
            axis,
            value: format!("{value:?}"),
        }
    }
}
