//! Mock RSS Pipeline Example
//!
//! Drives the RSS sensor against a mock world and tick broadcaster with the
//! reference checker: an ego vehicle closes in on a slower lead vehicle, and
//! the emitted responses switch from safe to BrakeMin as the gap shrinks.
//! Runs without a simulator.
//!
//! Run with: cargo run --bin mock_rss_pipeline [dynamics_profile.toml]

use std::sync::{Arc, Mutex};

use contracts::{
    Location, LongitudinalResponse, ResponseCallback, TickBroadcaster, Timestamp, Transform,
    Vector3, WorldView,
};
use observability::{metrics::record_response, LogFormat, ObservabilityConfig, ResponseAggregator};
use rss_check::DynamicsProfile;
use rss_sensor::mock::{MockTickBroadcaster, MockWorld};
use rss_sensor::RssSensor;

const EGO_ID: u32 = 1;
const LEAD_ID: u32 = 2;

const TICK_SECONDS: f64 = 0.05; // 20 Hz
const TARGET_FRAMES: u64 = 200;

const EGO_SPEED: f64 = 12.0;
const LEAD_SPEED: f64 = 8.0;
const INITIAL_GAP: f64 = 60.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Finite run: pretty logs, no Prometheus exporter
    observability::init_with_config(ObservabilityConfig {
        log_format: LogFormat::Pretty,
        metrics_port: None,
        default_log_level: "info".to_string(),
    })?;

    tracing::info!("Starting Mock RSS Pipeline Demo");

    // ==== Stage 1: Dynamics profile (default or from file) ====
    let profile = if let Some(path) = std::env::args().nth(1) {
        tracing::info!(path = %path, "Loading dynamics profile");
        DynamicsProfile::from_path(&path)?
    } else {
        DynamicsProfile::default()
    };

    // ==== Stage 2: Build mock world ====
    let world = Arc::new(MockWorld::new("Town01"));
    world.add_vehicle(
        EGO_ID,
        Location::default(),
        Vector3::new(EGO_SPEED, 0.0, 0.0),
    );
    world.add_vehicle(
        LEAD_ID,
        Location {
            x: INITIAL_GAP,
            y: 0.0,
            z: 0.0,
        },
        Vector3::new(LEAD_SPEED, 0.0, 0.0),
    );
    let broadcaster = Arc::new(MockTickBroadcaster::new());

    // ==== Stage 3: Arm the sensor ====
    let world_view: Arc<dyn WorldView> = world.clone();
    let tick_source: Arc<dyn TickBroadcaster> = broadcaster.clone();
    let sensor = RssSensor::new("rss_demo", world_view, tick_source, Some(EGO_ID));

    let aggregator = Arc::new(Mutex::new(ResponseAggregator::new()));
    let callback_aggregator = aggregator.clone();
    let callback: ResponseCallback = Arc::new(move |response| {
        record_response(&response);
        if response.longitudinal != LongitudinalResponse::None {
            tracing::info!(
                frame = response.frame,
                longitudinal = ?response.longitudinal,
                accel_max = response.acceleration_restriction.longitudinal.max,
                "braking required"
            );
        }
        callback_aggregator.lock().unwrap().record(&response);
    });
    sensor.listen(callback)?;

    sensor.set_ego_vehicle_dynamics(profile.ego)?;
    sensor.set_other_vehicle_dynamics(profile.other)?;
    tracing::info!(
        ego_response_time = profile.ego.response_time,
        other_response_time = profile.other.response_time,
        "Sensor armed"
    );

    // ==== Stage 4: Tick loop ====
    let mut ego_x = 0.0;
    let mut lead_x = INITIAL_GAP;
    for frame in 1..=TARGET_FRAMES {
        ego_x += EGO_SPEED * TICK_SECONDS;
        lead_x += LEAD_SPEED * TICK_SECONDS;
        world.set_actor_transform(
            EGO_ID,
            Transform {
                location: Location {
                    x: ego_x,
                    y: 0.0,
                    z: 0.0,
                },
                ..Default::default()
            },
        );
        world.set_actor_transform(
            LEAD_ID,
            Transform {
                location: Location {
                    x: lead_x,
                    y: 0.0,
                    z: 0.0,
                },
                ..Default::default()
            },
        );

        broadcaster.tick(Timestamp::new(frame, frame as f64 * TICK_SECONDS));
    }

    // ==== Stage 5: Shutdown and summary ====
    sensor.stop();

    let summary = aggregator.lock().unwrap().summary();
    let metrics = sensor.metrics();
    tracing::info!(
        responses = summary.responses,
        unsafe_frames = summary.unsafe_frames,
        longitudinal_activations = summary.longitudinal_activations,
        ticks_evaluated = metrics.ticks_evaluated(),
        ticks_contended = metrics.ticks_contended(),
        "Demo complete"
    );

    Ok(())
}
