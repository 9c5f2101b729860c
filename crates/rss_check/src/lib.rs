//! # RSS Check
//!
//! Reference safety checker implementing the `SafetyChecker` contract.
//!
//! Responsibilities:
//! - Own and validate ego/other vehicle dynamics (reader/writer locked)
//! - Evaluate RSS safe-distance inequalities per ego/vehicle pair
//! - Produce the raw response triple, acceleration restriction, ego velocity
//! - Load dynamics profiles from TOML
//!
//! ## Usage Example
//!
//! ```ignore
//! use rss_check::RssCheck;
//!
//! let checker = RssCheck::new();
//! checker.set_ego_vehicle_dynamics(my_dynamics)?;
//! let outcome = checker.check_objects(ts, &world, &vehicles, &ego, &map, false)?;
//! ```

mod check;
mod error;
mod profile;

pub use check::{validate_dynamics, RssCheck};
pub use error::{Result, RssCheckError};
pub use profile::DynamicsProfile;

// Re-export contracts types
pub use contracts::{CheckOutcome, RssDynamics, SafetyChecker};
