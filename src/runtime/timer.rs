//! Preview clocks and autoplay timers
//!
//! [`Timer`] is a cross-platform stopwatch: `std::time::Instant` on native
//! targets and `js_sys::Date::now()` on `wasm32` (where `Instant::now()`
//! panics with "time not implemented on this platform").
//!
//! [`PreviewTimers`] owns the auto-advance timers of animated previews. It
//! never reads the clock itself; callers pass the current time in
//! milliseconds, which keeps it deterministic under test.

use std::collections::HashMap;

use tracing::debug;

use crate::core::{Autoplay, Block, BlockId, BlockTypeRegistry, CatalogData, PreviewState};

// ── Native implementation ───────────────────────────────────────────────────

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use std::time::Instant;

    #[derive(Clone)]
    pub struct Timer {
        start: Instant,
    }

    impl Timer {
        pub fn now() -> Self {
            Self {
                start: Instant::now(),
            }
        }

        pub fn elapsed_ms(&self) -> f64 {
            self.start.elapsed().as_secs_f64() * 1000.0
        }
    }
}

// ── WASM implementation ─────────────────────────────────────────────────────

#[cfg(target_arch = "wasm32")]
mod imp {
    #[derive(Clone)]
    pub struct Timer {
        start_ms: f64,
    }

    impl Timer {
        pub fn now() -> Self {
            Self {
                start_ms: js_sys::Date::now(),
            }
        }

        pub fn elapsed_ms(&self) -> f64 {
            js_sys::Date::now() - self.start_ms
        }
    }
}

pub use imp::Timer;

// ── Autoplay timers ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
struct Scheduled {
    autoplay: Autoplay,
    next_due_ms: f64,
}

/// Auto-advance timers keyed by block id
#[derive(Debug, Clone, Default)]
pub struct PreviewTimers {
    timers: HashMap<BlockId, Scheduled>,
}

impl PreviewTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile timers with the blocks currently in the document
    ///
    /// Starts timers for newly animated blocks, restarts those whose autoplay
    /// parameters changed, and cancels timers of blocks that are gone or no
    /// longer animate. Returns the cancelled ids.
    pub fn sync(
        &mut self,
        blocks: &[Block],
        registry: &BlockTypeRegistry,
        catalog: &CatalogData,
        now_ms: f64,
    ) -> Vec<BlockId> {
        let mut wanted = HashMap::new();
        collect_autoplay(blocks, registry, catalog, &mut wanted);

        let mut cancelled: Vec<BlockId> = self
            .timers
            .keys()
            .filter(|id| !wanted.contains_key(*id))
            .cloned()
            .collect();
        cancelled.sort();
        for id in &cancelled {
            self.timers.remove(id);
            debug!(block = %id, "autoplay timer cancelled");
        }

        for (id, autoplay) in wanted {
            let unchanged = self.timers.get(&id).is_some_and(|s| s.autoplay == autoplay);
            if !unchanged {
                debug!(block = %id, interval_ms = autoplay.interval_ms, "autoplay timer started");
                self.timers.insert(
                    id,
                    Scheduled {
                        autoplay,
                        next_due_ms: now_ms + autoplay.interval_ms as f64,
                    },
                );
            }
        }
        cancelled
    }

    /// Fire every timer due at `now_ms`, advancing slides in `state`
    ///
    /// Returns the ids whose slide changed, sorted.
    pub fn poll(&mut self, now_ms: f64, state: &mut PreviewState) -> Vec<BlockId> {
        let mut advanced = Vec::new();
        for (id, scheduled) in self.timers.iter_mut() {
            if now_ms < scheduled.next_due_ms {
                continue;
            }
            let interval = scheduled.autoplay.interval_ms.max(1) as f64;
            // Kept in f64: a far-off `now_ms` overflows any integer count
            let ticks = ((now_ms - scheduled.next_due_ms) / interval).floor() + 1.0;
            scheduled.next_due_ms += ticks * interval;

            let slides = scheduled.autoplay.slides.max(1);
            let step = (ticks % slides as f64) as usize;
            let before = state.slide(id);
            state.set_slide(id, (before % slides + step) % slides);
            if state.slide(id) != before {
                advanced.push(id.clone());
            }
        }
        advanced.sort();
        advanced
    }

    pub fn cancel(&mut self, id: &BlockId) -> bool {
        self.timers.remove(id).is_some()
    }

    /// Cancel every timer (preview unmounted); returns how many were running
    pub fn teardown(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        if count > 0 {
            debug!(count, "preview timers torn down");
        }
        count
    }

    pub fn is_active(&self, id: &BlockId) -> bool {
        self.timers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

fn collect_autoplay(
    blocks: &[Block],
    registry: &BlockTypeRegistry,
    catalog: &CatalogData,
    out: &mut HashMap<BlockId, Autoplay>,
) {
    for block in blocks {
        if let Some(block_type) = registry.lookup(&block.block_type) {
            let content = block_type.resolve_content(&block.content);
            if let Some(autoplay) = block_type.autoplay(&content, catalog) {
                out.insert(block.id.clone(), autoplay);
            }
        }
        if let Some(children) = &block.children {
            collect_autoplay(children, registry, catalog, out);
        }
    }
}
