//! Vehicle dynamics configuration
//!
//! Owned and validated by the safety checker; the sensor only forwards
//! get/set calls. Deceleration values are negative by convention.

use serde::{Deserialize, Serialize};

/// Longitudinal acceleration bounds (m/s²)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonAccelBounds {
    /// Maximum acceleration
    pub accel_max: f64,

    /// Maximum braking deceleration (most negative)
    pub brake_max: f64,

    /// Minimum safe braking deceleration
    pub brake_min: f64,

    /// Minimum correcting braking deceleration
    pub brake_min_correct: f64,
}

/// Lateral acceleration bounds (m/s²)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatAccelBounds {
    /// Maximum lateral acceleration
    pub accel_max: f64,

    /// Minimum lateral braking deceleration
    pub brake_min: f64,
}

/// Full dynamics profile for one vehicle class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RssDynamics {
    /// Longitudinal bounds
    pub alpha_lon: LonAccelBounds,

    /// Lateral bounds
    pub alpha_lat: LatAccelBounds,

    /// Response time (seconds)
    pub response_time: f64,
}

impl RssDynamics {
    /// Defaults for the ego vehicle (response time 1.0 s)
    pub fn ego_default() -> Self {
        Self {
            alpha_lon: LonAccelBounds {
                accel_max: 3.5,
                brake_max: -8.0,
                brake_min: -4.0,
                brake_min_correct: -3.0,
            },
            alpha_lat: LatAccelBounds {
                accel_max: 0.2,
                brake_min: -0.8,
            },
            response_time: 1.0,
        }
    }

    /// Defaults for other vehicles (response time 2.0 s)
    pub fn other_default() -> Self {
        Self {
            response_time: 2.0,
            ..Self::ego_default()
        }
    }
}

impl Default for RssDynamics {
    fn default() -> Self {
        Self::ego_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_differ_only_in_response_time() {
        let ego = RssDynamics::ego_default();
        let other = RssDynamics::other_default();
        assert_eq!(ego.alpha_lon, other.alpha_lon);
        assert_eq!(ego.alpha_lat, other.alpha_lat);
        assert_eq!(ego.response_time, 1.0);
        assert_eq!(other.response_time, 2.0);
    }
}
