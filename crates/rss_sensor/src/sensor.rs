//! RSS sensor: arming, per-tick evaluation, dynamics accessors
//!
//! The sensor registers a weak-bound tick handler with the broadcaster, so
//! the subscription never keeps the sensor alive; once every strong owner
//! is gone the handler resolves nothing and becomes inert. `stop()` cancels
//! the subscription handle directly instead of leaving a dangling handler
//! behind a status flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use contracts::{
    ActorId, CheckOutcome, MapSnapshot, ResponseCallback, RssDynamics, RssResponse, SafetyChecker,
    TickBroadcaster, TickHandler, TickSubscription, Timestamp, WorldView,
};
use tracing::{debug, error, warn};

use crate::error::{Result, RssSensorError};
use crate::guard::EvaluationGuard;
use crate::metrics::SensorMetrics;
use crate::translate;

/// Behavior when a tick arrives while a previous evaluation is in flight
///
/// `EmitDefault` reports the all-`None`/zero-restriction response for a tick
/// that was never actually evaluated, indistinguishable from a genuine
/// "no violation" verdict. That is the inherited contract and remains the
/// default; it is a deliberate, named choice rather than a silent fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentionPolicy {
    /// Emit the default no-restriction response for the contested tick
    #[default]
    EmitDefault,
    /// Emit nothing for the contested tick
    Skip,
}

/// Sensor configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct RssSensorConfig {
    /// Guard-contention behavior
    pub contention_policy: ContentionPolicy,
    /// Forward the visualization flag to the checker
    pub visualize: bool,
}

/// Factory for the safety checker built at arming time
pub type CheckerFactory = Box<dyn Fn() -> Arc<dyn SafetyChecker> + Send + Sync>;

/// State held only while the sensor is armed
///
/// Either all of this exists (armed) or none of it does; there is no
/// partially-armed state.
struct ArmedState {
    checker: Arc<dyn SafetyChecker>,
    map: MapSnapshot,
    subscription: TickSubscription,
}

/// Per-tick safety-evaluation sensor attached to a vehicle actor
pub struct RssSensor {
    sensor_id: String,
    world: Arc<dyn WorldView>,
    broadcaster: Arc<dyn TickBroadcaster>,
    parent: Option<ActorId>,
    contention_policy: ContentionPolicy,
    checker_factory: CheckerFactory,
    listening: AtomicBool,
    visualize: AtomicBool,
    armed: Mutex<Option<ArmedState>>,
    guard: EvaluationGuard,
    metrics: SensorMetrics,
}

impl RssSensor {
    /// Create a detached sensor with the default checker and configuration
    pub fn new(
        sensor_id: impl Into<String>,
        world: Arc<dyn WorldView>,
        broadcaster: Arc<dyn TickBroadcaster>,
        parent: Option<ActorId>,
    ) -> Arc<Self> {
        Self::with_config(sensor_id, world, broadcaster, parent, RssSensorConfig::default())
    }

    /// Create a sensor with explicit configuration and the default checker
    pub fn with_config(
        sensor_id: impl Into<String>,
        world: Arc<dyn WorldView>,
        broadcaster: Arc<dyn TickBroadcaster>,
        parent: Option<ActorId>,
        config: RssSensorConfig,
    ) -> Arc<Self> {
        Self::with_checker_factory(
            sensor_id,
            world,
            broadcaster,
            parent,
            config,
            Box::new(|| Arc::new(rss_check::RssCheck::new())),
        )
    }

    /// Create a sensor with an injected checker factory
    ///
    /// The factory runs once per successful `listen()`, so every arming
    /// starts from a fresh checker with default dynamics.
    pub fn with_checker_factory(
        sensor_id: impl Into<String>,
        world: Arc<dyn WorldView>,
        broadcaster: Arc<dyn TickBroadcaster>,
        parent: Option<ActorId>,
        config: RssSensorConfig,
        checker_factory: CheckerFactory,
    ) -> Arc<Self> {
        Arc::new(Self {
            sensor_id: sensor_id.into(),
            world,
            broadcaster,
            parent,
            contention_policy: config.contention_policy,
            checker_factory,
            listening: AtomicBool::new(false),
            visualize: AtomicBool::new(config.visualize),
            armed: Mutex::new(None),
            guard: EvaluationGuard::new(),
            metrics: SensorMetrics::new(),
        })
    }

    pub fn sensor_id(&self) -> &str {
        &self.sensor_id
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    pub fn metrics(&self) -> &SensorMetrics {
        &self.metrics
    }

    /// Forward the visualization flag on subsequent evaluations
    pub fn set_visualize(&self, visualize: bool) {
        self.visualize.store(visualize, Ordering::SeqCst);
    }

    /// Arm the sensor
    ///
    /// Captures the current map, builds a fresh checker, registers a
    /// weak-bound tick handler and sets the listening flag, all exactly once
    /// per successful call. Calling while already listening logs a warning
    /// and leaves the prior subscription untouched. Fails with
    /// [`RssSensorError::NotAttached`] before any registration when the
    /// sensor has no parent vehicle.
    pub fn listen(self: &Arc<Self>, callback: ResponseCallback) -> Result<()> {
        let mut armed = self.armed.lock().unwrap();
        if armed.is_some() {
            warn!(sensor_id = %self.sensor_id, "already listening");
            return Ok(());
        }

        if self.parent.is_none() {
            return Err(RssSensorError::NotAttached {
                sensor_id: self.sensor_id.clone(),
            });
        }

        let map = self.world.map();
        let checker = (self.checker_factory)();

        debug!(sensor_id = %self.sensor_id, map = %map.name, "subscribing to tick event");
        let weak = Arc::downgrade(self);
        let handler: TickHandler = Arc::new(move |timestamp| {
            // Failed upgrade means the sensor was destroyed: do nothing
            let Some(sensor) = weak.upgrade() else {
                return;
            };
            match sensor.tick(timestamp) {
                Ok(Some(response)) => callback(response),
                Ok(None) => {}
                Err(e) => {
                    sensor.metrics.inc_tick_failures();
                    error!(
                        sensor_id = %sensor.sensor_id,
                        frame = timestamp.frame,
                        error = %e,
                        "tick evaluation failed; no response emitted"
                    );
                }
            }
        });
        let subscription = self.broadcaster.register_on_tick(handler);

        *armed = Some(ArmedState {
            checker,
            map,
            subscription,
        });
        self.listening.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Disarm the sensor
    ///
    /// Cancels the tick subscription and drops the checker and map snapshot.
    /// Idempotent.
    pub fn stop(&self) {
        let mut armed = self.armed.lock().unwrap();
        self.listening.store(false, Ordering::SeqCst);
        if let Some(state) = armed.take() {
            state.subscription.cancel();
            debug!(sensor_id = %self.sensor_id, "tick subscription cancelled");
        }
    }

    /// Evaluate one tick
    ///
    /// Returns `Ok(None)` for skipped ticks (disarmed in the meantime, or
    /// guard contention under [`ContentionPolicy::Skip`]). The guard is
    /// released as soon as the checker call returns, before translation.
    fn tick(&self, timestamp: Timestamp) -> Result<Option<RssResponse>> {
        let Some((checker, map)) = self.armed_snapshot() else {
            return Ok(None);
        };

        let ego = self.parent.and_then(|id| self.world.actor(id));

        let outcome = match self.guard.try_acquire() {
            Some(_permit) => {
                let ego = ego.as_ref().ok_or_else(|| RssSensorError::EgoVehicleMissing {
                    sensor_id: self.sensor_id.clone(),
                })?;
                let vehicles = self.world.filter("vehicle.*");
                self.metrics.inc_ticks_evaluated();
                checker.check_objects(
                    timestamp,
                    self.world.as_ref(),
                    &vehicles,
                    ego,
                    &map,
                    self.visualize.load(Ordering::SeqCst),
                )?
            }
            None => {
                // A previous evaluation is still in flight; the checker is
                // not called for this tick.
                self.metrics.inc_ticks_contended();
                match self.contention_policy {
                    ContentionPolicy::EmitDefault => {
                        debug!(
                            sensor_id = %self.sensor_id,
                            frame = timestamp.frame,
                            "evaluation in flight; emitting default response"
                        );
                        CheckOutcome::default()
                    }
                    ContentionPolicy::Skip => {
                        debug!(
                            sensor_id = %self.sensor_id,
                            frame = timestamp.frame,
                            "evaluation in flight; tick skipped"
                        );
                        return Ok(None);
                    }
                }
            }
        };

        let longitudinal = translate::longitudinal(outcome.response.longitudinal)?;
        let lateral_right = translate::lateral(outcome.response.lateral_right, "lateral_right")?;
        let lateral_left = translate::lateral(outcome.response.lateral_left, "lateral_left")?;

        let transform = ego.map(|a| a.transform).unwrap_or_default();
        self.metrics.inc_responses_emitted();
        Ok(Some(RssResponse::new(
            timestamp,
            transform,
            outcome.verdict,
            longitudinal,
            lateral_right,
            lateral_left,
            outcome.acceleration_restriction,
            outcome.ego_velocity,
        )))
    }

    /// Clone the armed checker and map without holding the lock across the
    /// checker call
    fn armed_snapshot(&self) -> Option<(Arc<dyn SafetyChecker>, MapSnapshot)> {
        self.armed
            .lock()
            .unwrap()
            .as_ref()
            .map(|state| (Arc::clone(&state.checker), state.map.clone()))
    }

    fn checker(&self) -> Result<Arc<dyn SafetyChecker>> {
        self.armed_snapshot()
            .map(|(checker, _)| checker)
            .ok_or_else(|| RssSensorError::NotListening {
                sensor_id: self.sensor_id.clone(),
            })
    }

    // ===== Dynamics pass-through =====

    /// Get the armed checker's ego vehicle dynamics
    pub fn ego_vehicle_dynamics(&self) -> Result<RssDynamics> {
        Ok(self.checker()?.ego_vehicle_dynamics())
    }

    /// Set the armed checker's ego vehicle dynamics
    pub fn set_ego_vehicle_dynamics(&self, dynamics: RssDynamics) -> Result<()> {
        self.checker()?.set_ego_vehicle_dynamics(dynamics)?;
        Ok(())
    }

    /// Get the armed checker's other-vehicle dynamics
    pub fn other_vehicle_dynamics(&self) -> Result<RssDynamics> {
        Ok(self.checker()?.other_vehicle_dynamics())
    }

    /// Set the armed checker's other-vehicle dynamics
    pub fn set_other_vehicle_dynamics(&self, dynamics: RssDynamics) -> Result<()> {
        self.checker()?.set_other_vehicle_dynamics(dynamics)?;
        Ok(())
    }
}

impl Drop for RssSensor {
    fn drop(&mut self) {
        // Last owner gone: cancel the subscription so broadcasters can
        // purge the (already inert) handler entry.
        if let Ok(armed) = self.armed.get_mut() {
            if let Some(state) = armed.take() {
                state.subscription.cancel();
            }
        }
    }
}
