//! RSS Check error types

use contracts::ContractError;
use thiserror::Error;

/// RSS Check specific error
#[derive(Debug, Error)]
pub enum RssCheckError {
    /// Dynamics profile parse error
    #[error("dynamics profile parse error: {message}")]
    ProfileParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Dynamics profile file read error
    #[error("dynamics profile read error: {0}")]
    ProfileRead(#[from] std::io::Error),

    /// Wrapped ContractError
    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl RssCheckError {
    /// Create profile parse error
    pub fn profile_parse(message: impl Into<String>) -> Self {
        Self::ProfileParse {
            message: message.into(),
            source: None,
        }
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, RssCheckError>;
