//! Dashboard counters
//!
//! - Counters only, monotonic
//! - Reset only when the dashboard is rebuilt
//! - Shared by reference; increments use `&self`

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Operational counters of one dashboard.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Coordinated render passes
    render_passes: AtomicU64,
    /// Single-view renders
    view_renders: AtomicU64,
    /// Brush gestures accepted
    brush_gestures: AtomicU64,
    /// Gestures or commands rejected with an error
    rejected: AtomicU64,
    /// Filter changes applied programmatically
    filters_applied: AtomicU64,
    /// Reset affordances activated
    resets: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_render_passes(&self) {
        self.render_passes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_view_renders(&self) {
        self.view_renders.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_brush_gestures(&self) {
        self.brush_gestures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_filters_applied(&self, n: u64) {
        self.filters_applied.fetch_add(n, Ordering::Relaxed);
    }

    pub fn increment_resets(&self) {
        self.resets.fetch_add(1, Ordering::Relaxed);
    }

    /// Get render passes so far
    pub fn render_passes(&self) -> u64 {
        self.render_passes.load(Ordering::Relaxed)
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            render_passes: self.render_passes.load(Ordering::Relaxed),
            view_renders: self.view_renders.load(Ordering::Relaxed),
            brush_gestures: self.brush_gestures.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            filters_applied: self.filters_applied.load(Ordering::Relaxed),
            resets: self.resets.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub render_passes: u64,
    pub view_renders: u64,
    pub brush_gestures: u64,
    pub rejected: u64,
    pub filters_applied: u64,
    pub resets: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let registry = MetricsRegistry::new();
        assert_eq!(registry.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_increment_counters() {
        let registry = MetricsRegistry::new();

        registry.increment_render_passes();
        registry.increment_render_passes();
        registry.increment_view_renders();
        registry.increment_brush_gestures();
        registry.increment_rejected();
        registry.add_filters_applied(3);
        registry.increment_resets();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.render_passes, 2);
        assert_eq!(registry.render_passes(), 2);
        assert_eq!(snapshot.view_renders, 1);
        assert_eq!(snapshot.brush_gestures, 1);
        assert_eq!(snapshot.rejected, 1);
        assert_eq!(snapshot.filters_applied, 3);
        assert_eq!(snapshot.resets, 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let registry = MetricsRegistry::new();
        registry.increment_render_passes();

        let json = serde_json::to_value(registry.snapshot()).unwrap();
        assert_eq!(json["render_passes"], 1);
        assert_eq!(json["resets"], 0);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(MetricsRegistry::new());
        let mut handles = vec![];

        for _ in 0..4 {
            let reg = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    reg.increment_render_passes();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.render_passes(), 400);
    }
}
