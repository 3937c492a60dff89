use std::cmp::Ordering;

use runtime::Latch;
use tracing::debug;

/// Fires once, the first time the observed region's visible fraction reaches
/// the threshold. The observer may keep reporting crossings; they are ignored.
#[derive(Debug, Clone)]
pub struct ViewportVisibilityTrigger {
    threshold: f64,
    latch: Latch,
}

impl ViewportVisibilityTrigger {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(f64::MIN_POSITIVE, 1.0),
            latch: Latch::new(),
        }
    }

    pub fn has_fired(&self) -> bool {
        self.latch.is_set()
    }

    /// Feeds one observation. Returns `true` exactly once per trigger.
    pub fn observe(&mut self, visible_fraction: f64) -> bool {
        // NaN has no ordering and never counts as a crossing.
        let reached = matches!(
            visible_fraction.partial_cmp(&self.threshold),
            Some(Ordering::Greater | Ordering::Equal)
        );
        if self.latch.is_set() || !reached {
            return false;
        }
        debug!(visible_fraction, threshold = self.threshold, "map region became visible");
        self.latch.trip()
    }
}

/// Sidebar open/closed state: opened automatically once, user-controlled after.
#[derive(Debug, Default, Clone)]
pub struct SidebarState {
    open: bool,
    auto_opened: Latch,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn auto_open_once(&mut self) {
        if self.auto_opened.trip() {
            self.open = true;
        }
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }
}
