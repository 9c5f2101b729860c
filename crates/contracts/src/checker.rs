//! SafetyChecker trait - safety evaluation abstraction
//!
//! The checker computes a formal safety verdict plus required braking and
//! acceleration restrictions between the ego vehicle and nearby vehicles.
//! It owns and validates the vehicle dynamics configuration; the sensor only
//! forwards get/set calls through to it.

use crate::{
    AccelerationRestriction, ActorSnapshot, ContractError, EgoVelocity, MapSnapshot,
    ProperResponse, RssDynamics, Timestamp, WorldView,
};

/// Full output of one checker evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CheckOutcome {
    /// Overall safety verdict
    pub verdict: bool,

    /// Raw response triple
    pub response: ProperResponse,

    /// Acceleration bounds for compliant behavior
    pub acceleration_restriction: AccelerationRestriction,

    /// Ego velocity at evaluation time
    pub ego_velocity: EgoVelocity,
}

/// Safety checking capability
///
/// Implementations must tolerate concurrent dynamics get/set calls while an
/// evaluation is in flight; configuration access is expected to be guarded
/// internally (reader/writer lock or snapshot-on-read).
pub trait SafetyChecker: Send + Sync {
    /// Evaluate all vehicle/ego pairs for the given tick
    #[allow(clippy::too_many_arguments)]
    fn check_objects(
        &self,
        timestamp: Timestamp,
        world: &dyn WorldView,
        vehicles: &[ActorSnapshot],
        ego: &ActorSnapshot,
        map: &MapSnapshot,
        visualize: bool,
    ) -> Result<CheckOutcome, ContractError>;

    /// Get the stored ego vehicle dynamics
    fn ego_vehicle_dynamics(&self) -> RssDynamics;

    /// Replace the ego vehicle dynamics; rejects invalid configurations
    fn set_ego_vehicle_dynamics(&self, dynamics: RssDynamics) -> Result<(), ContractError>;

    /// Get the stored other-vehicle dynamics
    fn other_vehicle_dynamics(&self) -> RssDynamics;

    /// Replace the other-vehicle dynamics; rejects invalid configurations
    fn set_other_vehicle_dynamics(&self, dynamics: RssDynamics) -> Result<(), ContractError>;
}
