//! RSS safe-distance evaluation
//!
//! Point-model implementation of the RSS longitudinal and lateral
//! safe-distance inequalities, evaluated per ego/vehicle pair in the ego
//! frame. Dynamics live behind reader/writer locks so that accessor calls
//! stay safe while an evaluation is in flight; each evaluation works on a
//! single snapshot of both configurations.

use std::sync::RwLock;

use contracts::{
    AccelRange, AccelerationRestriction, ActorSnapshot, CheckOutcome, ContractError, EgoVelocity,
    MapSnapshot, ProperResponse, RawResponse, RssDynamics, SafetyChecker, Timestamp, WorldView,
};
use tracing::{debug, trace};

/// Lateral clearance (m) subtracted from the lateral gap before comparison
const LATERAL_CLEARANCE: f64 = 0.2;

/// Longitudinal window (m) within which a vehicle counts as alongside
const ALONGSIDE_WINDOW: f64 = 5.0;

/// Validate a dynamics configuration
///
/// Deceleration values are negative by convention:
/// `brake_max <= brake_min <= brake_min_correct < 0`.
pub fn validate_dynamics(dynamics: &RssDynamics) -> Result<(), ContractError> {
    let lon = &dynamics.alpha_lon;
    if lon.accel_max <= 0.0 {
        return Err(ContractError::invalid_dynamics(
            "alpha_lon.accel_max",
            format!("must be > 0, got {}", lon.accel_max),
        ));
    }
    if lon.brake_min_correct >= 0.0 {
        return Err(ContractError::invalid_dynamics(
            "alpha_lon.brake_min_correct",
            format!("must be < 0, got {}", lon.brake_min_correct),
        ));
    }
    if lon.brake_min > lon.brake_min_correct {
        return Err(ContractError::invalid_dynamics(
            "alpha_lon.brake_min",
            format!(
                "must be <= brake_min_correct ({}), got {}",
                lon.brake_min_correct, lon.brake_min
            ),
        ));
    }
    if lon.brake_max > lon.brake_min {
        return Err(ContractError::invalid_dynamics(
            "alpha_lon.brake_max",
            format!("must be <= brake_min ({}), got {}", lon.brake_min, lon.brake_max),
        ));
    }
    let lat = &dynamics.alpha_lat;
    if lat.accel_max <= 0.0 {
        return Err(ContractError::invalid_dynamics(
            "alpha_lat.accel_max",
            format!("must be > 0, got {}", lat.accel_max),
        ));
    }
    if lat.brake_min >= 0.0 {
        return Err(ContractError::invalid_dynamics(
            "alpha_lat.brake_min",
            format!("must be < 0, got {}", lat.brake_min),
        ));
    }
    if dynamics.response_time <= 0.0 {
        return Err(ContractError::invalid_dynamics(
            "response_time",
            format!("must be > 0, got {}", dynamics.response_time),
        ));
    }
    Ok(())
}

/// Reference safety checker
///
/// Fresh instances carry the default ego/other dynamics.
pub struct RssCheck {
    ego_dynamics: RwLock<RssDynamics>,
    other_dynamics: RwLock<RssDynamics>,
}

impl RssCheck {
    /// Create a checker with default dynamics
    pub fn new() -> Self {
        Self {
            ego_dynamics: RwLock::new(RssDynamics::ego_default()),
            other_dynamics: RwLock::new(RssDynamics::other_default()),
        }
    }

    /// Longitudinal safe distance for a follower braking at `brake`
    ///
    /// `v_follow`/`v_lead` are the longitudinal speeds (clamped to >= 0),
    /// `brake`/`lead_brake_max` are negative decelerations.
    fn longitudinal_safe_distance(
        v_follow: f64,
        v_lead: f64,
        ego: &RssDynamics,
        brake: f64,
        lead_brake_max: f64,
    ) -> f64 {
        let rho = ego.response_time;
        let accel = ego.alpha_lon.accel_max;
        let v_follow = v_follow.max(0.0);
        let v_lead = v_lead.max(0.0);

        let v_after_response = v_follow + rho * accel;
        let follow_stop = v_after_response * v_after_response / (2.0 * brake.abs());
        let lead_stop = v_lead * v_lead / (2.0 * lead_brake_max.abs());

        (v_follow * rho + 0.5 * accel * rho * rho + follow_stop - lead_stop).max(0.0)
    }

    /// Lateral safe distance for an ego closing at `v_toward` (>= 0)
    fn lateral_safe_distance(v_toward: f64, ego: &RssDynamics) -> f64 {
        let rho = ego.response_time;
        let accel = ego.alpha_lat.accel_max;
        let v = v_toward.max(0.0);

        let v_after_response = v + rho * accel;
        let stop = v_after_response * v_after_response / (2.0 * ego.alpha_lat.brake_min.abs());

        (v * rho + 0.5 * accel * rho * rho + stop).max(0.0)
    }

    /// Acceleration restriction implied by the raw triple
    fn restriction_for(response: &ProperResponse, ego: &RssDynamics) -> AccelerationRestriction {
        let lon = &ego.alpha_lon;
        let longitudinal = match response.longitudinal {
            RawResponse::None => AccelRange::new(lon.brake_max, lon.accel_max),
            RawResponse::BrakeMinCorrect => AccelRange::new(lon.brake_max, lon.brake_min_correct),
            RawResponse::BrakeMin => AccelRange::new(lon.brake_max, lon.brake_min),
        };

        let lat = &ego.alpha_lat;
        let lateral = |raw: RawResponse| match raw {
            RawResponse::None => AccelRange::new(-lat.accel_max, lat.accel_max),
            // Stop closing towards that side
            _ => AccelRange::new(lat.brake_min, 0.0),
        };

        AccelerationRestriction {
            longitudinal,
            lateral_right: lateral(response.lateral_right),
            lateral_left: lateral(response.lateral_left),
        }
    }

    /// Pick the more severe of two raw responses
    fn escalate(current: RawResponse, candidate: RawResponse) -> RawResponse {
        fn rank(raw: RawResponse) -> u8 {
            match raw {
                RawResponse::None => 0,
                RawResponse::BrakeMinCorrect => 1,
                RawResponse::BrakeMin => 2,
            }
        }
        if rank(candidate) > rank(current) {
            candidate
        } else {
            current
        }
    }
}

impl Default for RssCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SafetyChecker for RssCheck {
    fn check_objects(
        &self,
        timestamp: Timestamp,
        _world: &dyn WorldView,
        vehicles: &[ActorSnapshot],
        ego: &ActorSnapshot,
        _map: &MapSnapshot,
        visualize: bool,
    ) -> Result<CheckOutcome, ContractError> {
        // Single snapshot of both configurations for the whole evaluation
        let ego_dynamics = *self.ego_dynamics.read().unwrap();
        let other_dynamics = *self.other_dynamics.read().unwrap();

        let yaw = ego.transform.rotation.yaw.to_radians();
        let forward = (yaw.cos(), yaw.sin());
        let right = (-yaw.sin(), yaw.cos());

        let project = |x: f64, y: f64| (x * forward.0 + y * forward.1, x * right.0 + y * right.1);

        let (v_ego_lon, v_ego_lat) = project(ego.velocity.x, ego.velocity.y);

        let mut response = ProperResponse::default();

        for vehicle in vehicles {
            if vehicle.actor_id == ego.actor_id {
                continue;
            }

            let rel_x = vehicle.transform.location.x - ego.transform.location.x;
            let rel_y = vehicle.transform.location.y - ego.transform.location.y;
            let (lon, lat) = project(rel_x, rel_y);
            let (v_other_lon, _) = project(vehicle.velocity.x, vehicle.velocity.y);

            // Longitudinal: ego is the follower for vehicles ahead
            if lon > 0.0 {
                let hard = Self::longitudinal_safe_distance(
                    v_ego_lon,
                    v_other_lon,
                    &ego_dynamics,
                    ego_dynamics.alpha_lon.brake_min,
                    other_dynamics.alpha_lon.brake_max,
                );
                let correct = Self::longitudinal_safe_distance(
                    v_ego_lon,
                    v_other_lon,
                    &ego_dynamics,
                    ego_dynamics.alpha_lon.brake_min_correct,
                    other_dynamics.alpha_lon.brake_max,
                );

                let required = if lon < hard {
                    RawResponse::BrakeMin
                } else if lon < correct {
                    RawResponse::BrakeMinCorrect
                } else {
                    RawResponse::None
                };
                if required != RawResponse::None {
                    trace!(
                        frame = timestamp.frame,
                        actor_id = vehicle.actor_id,
                        lon_gap = lon,
                        safe_distance = hard,
                        required = ?required,
                        "longitudinal conflict"
                    );
                }
                response.longitudinal = Self::escalate(response.longitudinal, required);
            }

            // Lateral: only vehicles alongside are in conflict
            if lon.abs() < ALONGSIDE_WINDOW {
                let toward = if lat >= 0.0 { v_ego_lat } else { -v_ego_lat };
                let lat_gap = lat.abs() - LATERAL_CLEARANCE;
                if lat_gap < Self::lateral_safe_distance(toward, &ego_dynamics) {
                    trace!(
                        frame = timestamp.frame,
                        actor_id = vehicle.actor_id,
                        lat_gap,
                        "lateral conflict"
                    );
                    if lat >= 0.0 {
                        response.lateral_right =
                            Self::escalate(response.lateral_right, RawResponse::BrakeMin);
                    } else {
                        response.lateral_left =
                            Self::escalate(response.lateral_left, RawResponse::BrakeMin);
                    }
                }
            }
        }

        // Safe iff no axis requires a restriction
        let verdict = response == ProperResponse::default();

        if visualize {
            debug!(
                frame = timestamp.frame,
                verdict,
                response = ?response,
                vehicle_count = vehicles.len(),
                "rss check visualization"
            );
        }

        Ok(CheckOutcome {
            verdict,
            response,
            acceleration_restriction: Self::restriction_for(&response, &ego_dynamics),
            ego_velocity: EgoVelocity {
                speed_lon: v_ego_lon,
                speed_lat: v_ego_lat,
            },
        })
    }

    fn ego_vehicle_dynamics(&self) -> RssDynamics {
        *self.ego_dynamics.read().unwrap()
    }

    fn set_ego_vehicle_dynamics(&self, dynamics: RssDynamics) -> Result<(), ContractError> {
        validate_dynamics(&dynamics)?;
        *self.ego_dynamics.write().unwrap() = dynamics;
        Ok(())
    }

    fn other_vehicle_dynamics(&self) -> RssDynamics {
        *self.other_dynamics.read().unwrap()
    }

    fn set_other_vehicle_dynamics(&self, dynamics: RssDynamics) -> Result<(), ContractError> {
        validate_dynamics(&dynamics)?;
        *self.other_dynamics.write().unwrap() = dynamics;
        Ok(())
    }
}
