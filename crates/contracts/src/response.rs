//! RSS response vocabularies and the emitted sensor record
//!
//! Two closed vocabularies exist side by side: the raw values produced by the
//! safety checker ([`RawResponse`]) and the public categories carried by the
//! emitted [`RssResponse`]. Translation between the two lives in the sensor
//! crate and must stay exhaustive.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Timestamp, Transform};

/// Raw response value from the safety checker
///
/// One closed set shared by the longitudinal and both lateral axes. Lateral
/// axes only ever legitimately carry `None` or `BrakeMin`; a lateral
/// `BrakeMinCorrect` is out of domain for the public vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawResponse {
    /// No restriction required
    #[default]
    None,
    /// Brake with at least the correcting deceleration
    BrakeMinCorrect,
    /// Brake with at least the minimum safe deceleration
    BrakeMin,
}

/// Public longitudinal response category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongitudinalResponse {
    #[default]
    None,
    BrakeMinCorrect,
    BrakeMin,
}

/// Public lateral response category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LateralResponse {
    #[default]
    None,
    BrakeMin,
}

/// Raw response triple produced by one checker evaluation
///
/// `Default` yields the all-`None` triple the sensor falls back to when a
/// tick arrives while a previous evaluation is still in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProperResponse {
    pub longitudinal: RawResponse,
    pub lateral_right: RawResponse,
    pub lateral_left: RawResponse,
}

/// Closed interval of permissible acceleration (m/s²)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccelRange {
    pub min: f64,
    pub max: f64,
}

impl AccelRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Acceleration bounds for compliant behavior, per axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccelerationRestriction {
    pub longitudinal: AccelRange,
    pub lateral_right: AccelRange,
    pub lateral_left: AccelRange,
}

/// Ego velocity split into longitudinal and lateral components (m/s)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EgoVelocity {
    pub speed_lon: f64,
    pub speed_lat: f64,
}

/// Emitted sensor record: one immutable snapshot per evaluated tick
///
/// Produced at most once per tick and never revised afterwards. Responses
/// are not guaranteed to arrive in strict tick order when evaluation latency
/// varies; consumers should reorder on `frame`/`elapsed_seconds` if needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RssResponse {
    /// Frame index of the evaluated tick
    pub frame: u64,

    /// Elapsed simulation time of the evaluated tick (seconds)
    pub elapsed_seconds: f64,

    /// Sensor transform at evaluation time
    pub transform: Transform,

    /// Overall safety verdict
    pub verdict: bool,

    /// Required longitudinal response
    pub longitudinal: LongitudinalResponse,

    /// Required lateral response towards the right
    pub lateral_right: LateralResponse,

    /// Required lateral response towards the left
    pub lateral_left: LateralResponse,

    /// Acceleration bounds for compliant behavior
    pub acceleration_restriction: AccelerationRestriction,

    /// Ego velocity at evaluation time
    pub ego_velocity: EgoVelocity,
}

impl RssResponse {
    /// Build a response from a tick timestamp and translated fields
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        timestamp: Timestamp,
        transform: Transform,
        verdict: bool,
        longitudinal: LongitudinalResponse,
        lateral_right: LateralResponse,
        lateral_left: LateralResponse,
        acceleration_restriction: AccelerationRestriction,
        ego_velocity: EgoVelocity,
    ) -> Self {
        Self {
            frame: timestamp.frame,
            elapsed_seconds: timestamp.elapsed_seconds,
            transform,
            verdict,
            longitudinal,
            lateral_right,
            lateral_left,
            acceleration_restriction,
            ego_velocity,
        }
    }
}

/// Sensor response callback type
///
/// Invoked with the emitted record once per successfully evaluated tick.
/// May run on whichever thread completes the evaluation; callers must not
/// assume a fixed delivery thread.
pub type ResponseCallback = Arc<dyn Fn(RssResponse) + Send + Sync>;
