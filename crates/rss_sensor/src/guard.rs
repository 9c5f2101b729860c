//! Non-blocking evaluation guard
//!
//! Bounds concurrent safety evaluations to at most one per sensor. The
//! guard only ever try-acquires; a miss returns immediately so the
//! tick-delivery thread is never stalled.

use std::sync::atomic::{AtomicBool, Ordering};

/// Non-blocking mutual-exclusion primitive
#[derive(Debug, Default)]
pub struct EvaluationGuard {
    busy: AtomicBool,
}

impl EvaluationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to acquire the guard without blocking
    ///
    /// Returns a permit that releases on drop, or `None` if an evaluation
    /// is already in flight.
    pub fn try_acquire(&self) -> Option<EvaluationPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| EvaluationPermit { guard: self })
    }

    /// Whether an evaluation currently holds the guard
    pub fn is_held(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// RAII permit; releases the guard on drop
#[derive(Debug)]
pub struct EvaluationPermit<'a> {
    guard: &'a EvaluationGuard,
}

impl Drop for EvaluationPermit<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_release() {
        let guard = EvaluationGuard::new();
        assert!(!guard.is_held());

        let permit = guard.try_acquire().unwrap();
        assert!(guard.is_held());
        drop(permit);

        assert!(!guard.is_held());
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn test_second_acquire_fails_without_blocking() {
        let guard = EvaluationGuard::new();
        let _permit = guard.try_acquire().unwrap();
        assert!(guard.try_acquire().is_none());
    }

    #[test]
    fn test_contended_acquire_across_threads() {
        let guard = std::sync::Arc::new(EvaluationGuard::new());
        let permit = guard.try_acquire().unwrap();

        let other = std::sync::Arc::clone(&guard);
        let handle = std::thread::spawn(move || other.try_acquire().is_none());
        assert!(handle.join().unwrap());

        drop(permit);
        assert!(guard.try_acquire().is_some());
    }
}
