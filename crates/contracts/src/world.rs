//! World and actor enumeration abstraction
//!
//! The sensor never talks to a concrete simulator client; it sees the world
//! through this trait, which mock implementations satisfy in tests.

use serde::{Deserialize, Serialize};

use crate::{Transform, Vector3};

/// Simulator actor handle type
pub type ActorId = u32;

/// Point-in-time view of one actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    /// Actor handle
    pub actor_id: ActorId,

    /// Blueprint type id (e.g., "vehicle.tesla.model3")
    pub type_id: String,

    /// Current pose
    pub transform: Transform,

    /// Current velocity (m/s, world frame)
    pub velocity: Vector3,
}

/// Map reference captured when the sensor arms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSnapshot {
    /// Map name (e.g., "Town01")
    pub name: String,
}

/// World access trait
///
/// Enumeration and filtering of actors plus the current map. Implementations
/// must be callable from the tick-delivery thread.
pub trait WorldView: Send + Sync {
    /// Enumerate all actors
    fn actors(&self) -> Vec<ActorSnapshot>;

    /// Enumerate actors whose `type_id` matches `pattern`
    ///
    /// Pattern is an exact type id or a prefix ending in `*`
    /// (e.g., "vehicle.*").
    fn filter(&self, pattern: &str) -> Vec<ActorSnapshot> {
        let matches: Box<dyn Fn(&str) -> bool> = match pattern.strip_suffix('*') {
            Some(prefix) => {
                let prefix = prefix.to_string();
                Box::new(move |type_id: &str| type_id.starts_with(&prefix))
            }
            None => {
                let exact = pattern.to_string();
                Box::new(move |type_id: &str| type_id == exact)
            }
        };

        self.actors()
            .into_iter()
            .filter(|actor| matches(&actor.type_id))
            .collect()
    }

    /// Look up a single actor by handle
    fn actor(&self, actor_id: ActorId) -> Option<ActorSnapshot> {
        self.actors().into_iter().find(|a| a.actor_id == actor_id)
    }

    /// Current map
    fn map(&self) -> MapSnapshot;
}
