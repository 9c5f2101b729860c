//! # RSS Sensor
//!
//! Per-tick safety-evaluation adapter attached to a vehicle actor.
//!
//! Once armed via [`RssSensor::listen`], the sensor is invoked synchronously
//! on every simulation tick, gathers nearby vehicles, delegates to a
//! [`SafetyChecker`](contracts::SafetyChecker), and emits an immutable
//! [`RssResponse`](contracts::RssResponse) to the registered callback.
//!
//! Responsibilities:
//! - Arm/disarm with an explicit cancellable tick subscription
//! - Bound concurrent evaluations to one via a non-blocking guard
//! - Translate the checker's raw vocabulary exhaustively, failing loudly
//!   on unmapped values
//! - Forward dynamics get/set calls to the armed checker
//! - Provide Mock collaborators for tests and demos
//!
//! ## Usage Example
//!
//! ```ignore
//! use rss_sensor::RssSensor;
//!
//! let sensor = RssSensor::new("rss_front", world, broadcaster, Some(ego_id));
//! sensor.listen(Arc::new(|response| {
//!     println!("frame {}: verdict {}", response.frame, response.verdict);
//! }))?;
//! // ... simulation runs ...
//! sensor.stop();
//! ```

pub mod guard;
pub mod mock;
pub mod translate;

mod error;
mod metrics;
mod sensor;

pub use error::{Result, RssSensorError};
pub use guard::{EvaluationGuard, EvaluationPermit};
pub use metrics::SensorMetrics;
pub use sensor::{CheckerFactory, ContentionPolicy, RssSensor, RssSensorConfig};

// Re-export contracts types
pub use contracts::{
    ResponseCallback, RssResponse, SafetyChecker, TickBroadcaster, Timestamp, WorldView,
};
