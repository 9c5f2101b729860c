//! Mock collaborators
//!
//! World, tick broadcaster and checker implementations for testing and
//! development without a simulator. All support failure injection or
//! scripted outcomes, consistent with real collaborator behavior.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use contracts::{
    ActorId, ActorSnapshot, CheckOutcome, ContractError, Location, MapSnapshot, RssDynamics,
    SafetyChecker, TickBroadcaster, TickHandler, TickSubscription, Timestamp, Transform, Vector3,
    WorldView,
};
use tracing::trace;

/// Mock world with a mutable actor table
pub struct MockWorld {
    map_name: String,
    actors: Mutex<Vec<ActorSnapshot>>,
}

impl MockWorld {
    /// Create an empty world on the given map
    pub fn new(map_name: impl Into<String>) -> Self {
        Self {
            map_name: map_name.into(),
            actors: Mutex::new(Vec::new()),
        }
    }

    /// Add an actor snapshot
    pub fn add_actor(&self, actor: ActorSnapshot) {
        self.actors.lock().unwrap().push(actor);
    }

    /// Add a vehicle at a position with a velocity
    pub fn add_vehicle(&self, actor_id: ActorId, location: Location, velocity: Vector3) {
        self.add_actor(ActorSnapshot {
            actor_id,
            type_id: "vehicle.tesla.model3".to_string(),
            transform: Transform {
                location,
                ..Default::default()
            },
            velocity,
        });
    }

    /// Remove an actor; no-op if absent
    pub fn remove_actor(&self, actor_id: ActorId) {
        self.actors.lock().unwrap().retain(|a| a.actor_id != actor_id);
    }

    /// Replace an actor's transform
    pub fn set_actor_transform(&self, actor_id: ActorId, transform: Transform) {
        let mut actors = self.actors.lock().unwrap();
        if let Some(actor) = actors.iter_mut().find(|a| a.actor_id == actor_id) {
            actor.transform = transform;
        }
    }
}

impl WorldView for MockWorld {
    fn actors(&self) -> Vec<ActorSnapshot> {
        self.actors.lock().unwrap().clone()
    }

    fn map(&self) -> MapSnapshot {
        MapSnapshot {
            name: self.map_name.clone(),
        }
    }
}

/// Mock tick broadcaster with manual fan-out
///
/// `tick()` invokes the registered handlers synchronously on the calling
/// thread, matching the real broadcaster's delivery model. Cancelled
/// subscriptions are dropped on the next fan-out.
#[derive(Default)]
pub struct MockTickBroadcaster {
    handlers: Mutex<Vec<(TickHandler, TickSubscription)>>,
}

impl MockTickBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire one tick to all active handlers
    pub fn tick(&self, timestamp: Timestamp) {
        let active: Vec<TickHandler> = {
            let mut handlers = self.handlers.lock().unwrap();
            handlers.retain(|(_, sub)| !sub.is_cancelled());
            handlers.iter().map(|(h, _)| h.clone()).collect()
        };
        trace!(frame = timestamp.frame, handlers = active.len(), "tick");
        for handler in active {
            handler(timestamp);
        }
    }

    /// Number of non-cancelled subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, sub)| !sub.is_cancelled())
            .count()
    }
}

impl TickBroadcaster for MockTickBroadcaster {
    fn register_on_tick(&self, handler: TickHandler) -> TickSubscription {
        let subscription = TickSubscription::new();
        self.handlers
            .lock()
            .unwrap()
            .push((handler, subscription.clone()));
        subscription
    }
}

/// Scripted safety checker
///
/// Returns a preset outcome (or an injected failure), optionally sleeping
/// to simulate a slow evaluation, and tracks the concurrent-call high-water
/// mark for the at-most-one-in-flight property.
pub struct ScriptedChecker {
    outcome: Mutex<CheckOutcome>,
    fail_message: Mutex<Option<String>>,
    delay: Duration,
    calls: AtomicU64,
    in_flight: AtomicU64,
    max_in_flight: AtomicU64,
    ego_dynamics: Mutex<RssDynamics>,
    other_dynamics: Mutex<RssDynamics>,
}

impl ScriptedChecker {
    /// Checker that always reports the given outcome
    pub fn new(outcome: CheckOutcome) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            fail_message: Mutex::new(None),
            delay: Duration::ZERO,
            calls: AtomicU64::new(0),
            in_flight: AtomicU64::new(0),
            max_in_flight: AtomicU64::new(0),
            ego_dynamics: Mutex::new(RssDynamics::ego_default()),
            other_dynamics: Mutex::new(RssDynamics::other_default()),
        }
    }

    /// Checker that always reports "safe, no restriction"
    pub fn safe() -> Self {
        Self::new(CheckOutcome {
            verdict: true,
            ..Default::default()
        })
    }

    /// Sleep this long inside every evaluation
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Replace the scripted outcome
    pub fn set_outcome(&self, outcome: CheckOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    /// Make subsequent evaluations fail with this message
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.fail_message.lock().unwrap() = Some(message.into());
    }

    /// Clear an injected failure
    pub fn recover(&self) {
        *self.fail_message.lock().unwrap() = None;
    }

    /// Total evaluations attempted
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneously running evaluations observed
    pub fn max_concurrent(&self) -> u64 {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl SafetyChecker for ScriptedChecker {
    fn check_objects(
        &self,
        _timestamp: Timestamp,
        _world: &dyn WorldView,
        _vehicles: &[ActorSnapshot],
        _ego: &ActorSnapshot,
        _map: &MapSnapshot,
        _visualize: bool,
    ) -> Result<CheckOutcome, ContractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        let result = match self.fail_message.lock().unwrap().as_ref() {
            Some(message) => Err(ContractError::check(message.clone())),
            None => Ok(*self.outcome.lock().unwrap()),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    fn ego_vehicle_dynamics(&self) -> RssDynamics {
        *self.ego_dynamics.lock().unwrap()
    }

    fn set_ego_vehicle_dynamics(&self, dynamics: RssDynamics) -> Result<(), ContractError> {
        *self.ego_dynamics.lock().unwrap() = dynamics;
        Ok(())
    }

    fn other_vehicle_dynamics(&self) -> RssDynamics {
        *self.other_dynamics.lock().unwrap()
    }

    fn set_other_vehicle_dynamics(&self, dynamics: RssDynamics) -> Result<(), ContractError> {
        *self.other_dynamics.lock().unwrap() = dynamics;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn test_mock_world_filter_and_lookup() {
        let world = MockWorld::new("Town01");
        world.add_vehicle(1, Location::default(), Vector3::default());
        world.add_actor(ActorSnapshot {
            actor_id: 2,
            type_id: "sensor.other.rss".to_string(),
            transform: Transform::default(),
            velocity: Vector3::default(),
        });

        assert_eq!(world.actors().len(), 2);
        assert_eq!(world.filter("vehicle.*").len(), 1);
        assert_eq!(world.actor(2).unwrap().type_id, "sensor.other.rss");
        assert!(world.actor(99).is_none());
        assert_eq!(world.map().name, "Town01");
    }

    #[test]
    fn test_broadcaster_fan_out_and_cancel() {
        let broadcaster = MockTickBroadcaster::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = count.clone();
        let subscription = broadcaster.register_on_tick(Arc::new(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        }));

        broadcaster.tick(Timestamp::new(1, 0.05));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(broadcaster.subscriber_count(), 1);

        subscription.cancel();
        broadcaster.tick(Timestamp::new(2, 0.10));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[test]
    fn test_scripted_checker_failure_injection() {
        let checker = ScriptedChecker::safe();
        let world = MockWorld::new("Town01");
        world.add_vehicle(1, Location::default(), Vector3::default());
        let ego = world.actor(1).unwrap();

        let ok = checker.check_objects(
            Timestamp::new(1, 0.05),
            &world,
            &[],
            &ego,
            &world.map(),
            false,
        );
        assert!(ok.unwrap().verdict);

        checker.fail_with("scripted failure");
        let err = checker
            .check_objects(
                Timestamp::new(2, 0.10),
                &world,
                &[],
                &ego,
                &world.map(),
                false,
            )
            .unwrap_err();
        assert!(matches!(err, ContractError::Check { .. }));
        assert_eq!(checker.call_count(), 2);
    }
}
