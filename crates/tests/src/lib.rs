//! # Integration Tests
//!
//! End-to-end tests over the public mock surface:
//! - Full pipeline: mock world -> sensor -> reference checker -> callback
//! - Concurrency properties (at-most-one evaluation in flight)
//! - Lifecycle: stop, drop, re-arm

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::RawResponse::None;
        let _ = contracts::RssDynamics::ego_default();
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::{Arc, Mutex};

    use contracts::{
        Location, LongitudinalResponse, ResponseCallback, RssResponse, TickBroadcaster, Timestamp,
        Vector3, WorldView,
    };
    use observability::ResponseAggregator;
    use rss_sensor::mock::{MockTickBroadcaster, MockWorld};
    use rss_sensor::RssSensor;

    const EGO_ID: u32 = 1;
    const LEAD_ID: u32 = 2;

    fn collector() -> (ResponseCallback, Arc<Mutex<Vec<RssResponse>>>) {
        let responses = Arc::new(Mutex::new(Vec::new()));
        let sink = responses.clone();
        let callback: ResponseCallback = Arc::new(move |response| {
            sink.lock().unwrap().push(response);
        });
        (callback, responses)
    }

    /// Full pipeline with the reference checker: a close stationary lead
    /// vehicle must produce a longitudinal BrakeMin response, a distant one
    /// a safe verdict.
    #[test]
    fn test_e2e_reference_checker_pipeline() {
        let world = Arc::new(MockWorld::new("Town01"));
        world.add_vehicle(
            EGO_ID,
            Location::default(),
            Vector3::new(15.0, 0.0, 0.0),
        );
        world.add_vehicle(
            LEAD_ID,
            Location {
                x: 10.0,
                y: 0.0,
                z: 0.0,
            },
            Vector3::default(),
        );
        let broadcaster = Arc::new(MockTickBroadcaster::new());

        let world_view: Arc<dyn WorldView> = world.clone();
        let tick_source: Arc<dyn TickBroadcaster> = broadcaster.clone();
        let sensor = RssSensor::new("rss_e2e", world_view, tick_source, Some(EGO_ID));

        let (callback, responses) = collector();
        sensor.listen(callback).unwrap();

        broadcaster.tick(Timestamp::new(1, 0.05));

        {
            let responses = responses.lock().unwrap();
            assert_eq!(responses.len(), 1);
            assert!(!responses[0].verdict);
            assert_eq!(responses[0].longitudinal, LongitudinalResponse::BrakeMin);
            assert!((responses[0].ego_velocity.speed_lon - 15.0).abs() < 1e-9);
        }

        // Move the lead vehicle far away: next tick is safe
        world.set_actor_transform(
            LEAD_ID,
            contracts::Transform {
                location: Location {
                    x: 500.0,
                    y: 0.0,
                    z: 0.0,
                },
                ..Default::default()
            },
        );
        broadcaster.tick(Timestamp::new(2, 0.10));

        let responses = responses.lock().unwrap();
        assert_eq!(responses.len(), 2);
        assert!(responses[1].verdict);
        assert_eq!(responses[1].longitudinal, LongitudinalResponse::None);

        let mut aggregator = ResponseAggregator::new();
        for response in responses.iter() {
            aggregator.record(response);
        }
        let summary = aggregator.summary();
        assert_eq!(summary.responses, 2);
        assert_eq!(summary.unsafe_frames, 1);
        assert_eq!(summary.longitudinal_activations, 1);
        assert_eq!(summary.last_frame, 2);
    }

    /// A loaded dynamics profile forwards through the sensor accessors.
    #[test]
    fn test_profile_applies_through_sensor() {
        let world = Arc::new(MockWorld::new("Town01"));
        world.add_vehicle(EGO_ID, Location::default(), Vector3::default());
        let broadcaster = Arc::new(MockTickBroadcaster::new());

        let world_view: Arc<dyn WorldView> = world.clone();
        let tick_source: Arc<dyn TickBroadcaster> = broadcaster.clone();
        let sensor = RssSensor::new("rss_profile", world_view, tick_source, Some(EGO_ID));

        let (callback, _) = collector();
        sensor.listen(callback).unwrap();

        let mut profile = rss_check::DynamicsProfile::default();
        profile.ego.response_time = 0.8;
        sensor.set_ego_vehicle_dynamics(profile.ego).unwrap();
        sensor.set_other_vehicle_dynamics(profile.other).unwrap();

        assert_eq!(sensor.ego_vehicle_dynamics().unwrap().response_time, 0.8);
        assert_eq!(sensor.other_vehicle_dynamics().unwrap().response_time, 2.0);
    }

    /// Re-arming after stop builds a fresh checker with default dynamics.
    #[test]
    fn test_rearm_resets_dynamics() {
        let world = Arc::new(MockWorld::new("Town01"));
        world.add_vehicle(EGO_ID, Location::default(), Vector3::default());
        let broadcaster = Arc::new(MockTickBroadcaster::new());

        let world_view: Arc<dyn WorldView> = world.clone();
        let tick_source: Arc<dyn TickBroadcaster> = broadcaster.clone();
        let sensor = RssSensor::new("rss_rearm", world_view, tick_source, Some(EGO_ID));

        let (callback, _) = collector();
        sensor.listen(callback).unwrap();

        let mut dynamics = contracts::RssDynamics::ego_default();
        dynamics.response_time = 0.5;
        sensor.set_ego_vehicle_dynamics(dynamics).unwrap();
        assert_eq!(sensor.ego_vehicle_dynamics().unwrap().response_time, 0.5);

        sensor.stop();
        let (callback, _) = collector();
        sensor.listen(callback).unwrap();

        // Fresh checker, fresh defaults
        assert_eq!(sensor.ego_vehicle_dynamics().unwrap().response_time, 1.0);
        assert_eq!(broadcaster.subscriber_count(), 1);
    }
}

#[cfg(test)]
mod concurrency_tests {
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::Duration;

    use contracts::{
        Location, ResponseCallback, RssResponse, TickBroadcaster, Timestamp, Vector3, WorldView,
    };
    use rss_sensor::mock::{MockTickBroadcaster, MockWorld, ScriptedChecker};
    use rss_sensor::{RssSensor, RssSensorConfig};

    const EGO_ID: u32 = 1;

    /// Hammer the broadcaster from several threads: the guard must keep the
    /// checker's concurrent-call high-water mark at 1, and every contested
    /// tick still delivers a tick outcome without blocking.
    #[test]
    fn test_at_most_one_evaluation_in_flight() {
        let world = Arc::new(MockWorld::new("Town01"));
        world.add_vehicle(EGO_ID, Location::default(), Vector3::default());
        let broadcaster = Arc::new(MockTickBroadcaster::new());
        let checker = Arc::new(ScriptedChecker::safe().with_delay(Duration::from_millis(10)));

        let world_view: Arc<dyn WorldView> = world.clone();
        let tick_source: Arc<dyn TickBroadcaster> = broadcaster.clone();
        let factory_checker = checker.clone();
        let sensor = RssSensor::with_checker_factory(
            "rss_concurrent",
            world_view,
            tick_source,
            Some(EGO_ID),
            RssSensorConfig::default(),
            Box::new(move || factory_checker.clone()),
        );

        let responses = Arc::new(Mutex::new(Vec::<RssResponse>::new()));
        let sink = responses.clone();
        let callback: ResponseCallback = Arc::new(move |response| {
            sink.lock().unwrap().push(response);
        });
        sensor.listen(callback).unwrap();

        let threads: Vec<_> = (0..4)
            .map(|t| {
                let broadcaster = broadcaster.clone();
                thread::spawn(move || {
                    for i in 0..25u64 {
                        let frame = t * 100 + i;
                        broadcaster.tick(Timestamp::new(frame, frame as f64 * 0.05));
                    }
                })
            })
            .collect();
        for handle in threads {
            handle.join().unwrap();
        }

        assert_eq!(checker.max_concurrent(), 1);

        let metrics = sensor.metrics();
        assert_eq!(metrics.ticks_evaluated(), checker.call_count());
        assert_eq!(metrics.ticks_evaluated() + metrics.ticks_contended(), 100);
        // EmitDefault: every tick produced a response
        assert_eq!(responses.lock().unwrap().len(), 100);
    }
}
