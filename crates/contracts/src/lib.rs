//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Uses the simulation tick as primary clock: monotonic `frame` index plus
//!   elapsed simulation seconds (f64)
//! - One `Timestamp` per tick, immutable

mod checker;
mod dynamics;
mod error;
mod response;
mod tick;
mod timestamp;
mod transform;
mod world;

pub use checker::{CheckOutcome, SafetyChecker};
pub use dynamics::{LatAccelBounds, LonAccelBounds, RssDynamics};
pub use error::ContractError;
pub use response::{
    AccelRange, AccelerationRestriction, EgoVelocity, LateralResponse, LongitudinalResponse,
    ProperResponse, RawResponse, ResponseCallback, RssResponse,
};
pub use tick::{TickBroadcaster, TickHandler, TickSubscription};
pub use timestamp::Timestamp;
pub use transform::{Location, Rotation, Transform, Vector3};
pub use world::{ActorId, ActorSnapshot, MapSnapshot, WorldView};
