//! Dynamics profile loading
//!
//! TOML profiles carrying one `[ego]` and one `[other]` dynamics table,
//! parsed then validated (validation rules live in [`crate::check`]).

use std::path::Path;

use contracts::RssDynamics;
use serde::{Deserialize, Serialize};

use crate::check::validate_dynamics;
use crate::error::{Result, RssCheckError};

/// Ego + other dynamics loaded from one profile file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DynamicsProfile {
    /// Ego vehicle dynamics
    pub ego: RssDynamics,

    /// Other-vehicle dynamics
    pub other: RssDynamics,
}

impl DynamicsProfile {
    /// Parse and validate a TOML profile
    pub fn from_toml(content: &str) -> Result<Self> {
        let profile: Self = toml::from_str(content).map_err(|e| RssCheckError::ProfileParse {
            message: format!("TOML parse error: {e}"),
            source: Some(Box::new(e)),
        })?;
        validate_dynamics(&profile.ego)?;
        validate_dynamics(&profile.other)?;
        Ok(profile)
    }

    /// Read, parse and validate a profile file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

impl Default for DynamicsProfile {
    fn default() -> Self {
        Self {
            ego: RssDynamics::ego_default(),
            other: RssDynamics::other_default(),
        }
    }
}
