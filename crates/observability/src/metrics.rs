//! RSS response metrics
//!
//! Prometheus-facing record functions plus a local aggregator for run-level
//! summaries (used by the demo at shutdown).

use contracts::{LateralResponse, LongitudinalResponse, RssResponse};
use metrics::{counter, gauge};

/// Record one emitted response
///
/// Call from the sensor callback, once per delivered `RssResponse`.
pub fn record_response(response: &RssResponse) {
    counter!("rss_responses_total").increment(1);
    gauge!("rss_last_frame").set(response.frame as f64);

    if !response.verdict {
        counter!("rss_unsafe_frames_total").increment(1);
    }
    if response.longitudinal != LongitudinalResponse::None {
        counter!(
            "rss_brake_required_total",
            "axis" => "longitudinal"
        )
        .increment(1);
    }
    if response.lateral_right != LateralResponse::None {
        counter!("rss_brake_required_total", "axis" => "lateral_right").increment(1);
    }
    if response.lateral_left != LateralResponse::None {
        counter!("rss_brake_required_total", "axis" => "lateral_left").increment(1);
    }

    gauge!("rss_ego_speed_lon").set(response.ego_velocity.speed_lon);
    gauge!("rss_ego_speed_lat").set(response.ego_velocity.speed_lat);
}

/// Record a tick that produced no response (contention skip or failure)
pub fn record_tick_skipped(reason: &'static str) {
    counter!("rss_ticks_skipped_total", "reason" => reason).increment(1);
}

/// Run-level response statistics
#[derive(Debug, Default)]
pub struct ResponseAggregator {
    responses: u64,
    unsafe_frames: u64,
    longitudinal_activations: u64,
    lateral_right_activations: u64,
    lateral_left_activations: u64,
    last_frame: u64,
}

impl ResponseAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one response into the running statistics
    pub fn record(&mut self, response: &RssResponse) {
        self.responses += 1;
        self.last_frame = self.last_frame.max(response.frame);
        if !response.verdict {
            self.unsafe_frames += 1;
        }
        if response.longitudinal != LongitudinalResponse::None {
            self.longitudinal_activations += 1;
        }
        if response.lateral_right != LateralResponse::None {
            self.lateral_right_activations += 1;
        }
        if response.lateral_left != LateralResponse::None {
            self.lateral_left_activations += 1;
        }
    }

    /// Snapshot of the accumulated statistics
    pub fn summary(&self) -> ResponseSummary {
        ResponseSummary {
            responses: self.responses,
            unsafe_frames: self.unsafe_frames,
            longitudinal_activations: self.longitudinal_activations,
            lateral_right_activations: self.lateral_right_activations,
            lateral_left_activations: self.lateral_left_activations,
            last_frame: self.last_frame,
        }
    }
}

/// Aggregated counters for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseSummary {
    pub responses: u64,
    pub unsafe_frames: u64,
    pub longitudinal_activations: u64,
    pub lateral_right_activations: u64,
    pub lateral_left_activations: u64,
    pub last_frame: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{
        AccelerationRestriction, EgoVelocity, Timestamp, Transform,
    };

    fn response(frame: u64, verdict: bool, longitudinal: LongitudinalResponse) -> RssResponse {
        RssResponse::new(
            Timestamp::new(frame, frame as f64 * 0.05),
            Transform::default(),
            verdict,
            longitudinal,
            LateralResponse::None,
            LateralResponse::None,
            AccelerationRestriction::default(),
            EgoVelocity::default(),
        )
    }

    #[test]
    fn test_aggregator_counts() {
        let mut aggregator = ResponseAggregator::new();
        aggregator.record(&response(1, true, LongitudinalResponse::None));
        aggregator.record(&response(2, false, LongitudinalResponse::BrakeMin));
        aggregator.record(&response(3, false, LongitudinalResponse::BrakeMinCorrect));

        let summary = aggregator.summary();
        assert_eq!(summary.responses, 3);
        assert_eq!(summary.unsafe_frames, 2);
        assert_eq!(summary.longitudinal_activations, 2);
        assert_eq!(summary.lateral_right_activations, 0);
        assert_eq!(summary.last_frame, 3);
    }
}
