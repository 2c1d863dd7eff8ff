//! Pass orchestration: measure, place, snap, publish

use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockWriteGuard};

use smallvec::SmallVec;

use crate::context::LayoutContext;
use crate::error::{LayoutFault, TreeError};
use crate::geometry::{Geometry, LayoutSnapshot};
use crate::measure::Measurer;
use crate::tree::LayoutTree;
use crate::{place, snap};

thread_local! {
    /// Engines with a pass running on this thread, by address.
    static RUNNING: RefCell<SmallVec<[usize; 2]>> = RefCell::new(SmallVec::new());
}

#[derive(Default)]
pub(crate) struct EngineShared {
    generation: AtomicU64,
    published: RwLock<Option<Arc<LayoutSnapshot>>>,
    stray_faults: Mutex<Vec<LayoutFault>>,
}

impl EngineShared {
    /// Identity of this engine for [`PassMarker`].
    pub(crate) fn owner_id(&self) -> usize {
        self as *const EngineShared as usize
    }

    /// Whether the calling thread is inside one of this engine's passes.
    /// Other threads reading the published pass are never flagged.
    pub(crate) fn pass_active(&self) -> bool {
        let owner = self.owner_id();
        RUNNING.with(|running| running.borrow().contains(&owner))
    }

    pub(crate) fn published(&self) -> Option<Arc<LayoutSnapshot>> {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn publish_slot(&self) -> RwLockWriteGuard<'_, Option<Arc<LayoutSnapshot>>> {
        self.published
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn record_stray(&self, fault: LayoutFault) {
        self.stray_faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(fault);
    }

    fn take_stray(&self) -> Vec<LayoutFault> {
        std::mem::take(
            &mut *self
                .stray_faults
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}

/// Marks the current thread as running a pass of one engine for as long as
/// it lives, unwinding included.
pub(crate) struct PassMarker {
    owner: usize,
}

impl PassMarker {
    pub(crate) fn enter(owner: usize) -> Self {
        RUNNING.with(|running| running.borrow_mut().push(owner));
        Self { owner }
    }
}

impl Drop for PassMarker {
    fn drop(&mut self) {
        RUNNING.with(|running| {
            let mut running = running.borrow_mut();
            if let Some(slot) = running.iter().rposition(|&owner| owner == self.owner) {
                running.remove(slot);
            }
        });
    }
}

/// Runs layout passes and publishes their results.
///
/// Each [`run`](Self::run) is one synchronous measure, place and snap cycle
/// with its own private cache. [`invalidate`](Self::invalidate) starts a new
/// generation; a pass that finishes after a newer invalidation is dropped
/// instead of published, so readers never see frames from two passes.
/// Clones share the same published state.
#[derive(Clone, Default)]
pub struct LayoutEngine {
    shared: Arc<EngineShared>,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.shared.generation.load(Ordering::Acquire)
    }

    /// Supersedes any pass in flight. Returns the new generation.
    pub fn invalidate(&self) -> u64 {
        let _slot = self.shared.publish_slot();
        self.shared.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Most recently published pass, if any.
    pub fn snapshot(&self) -> Option<Arc<LayoutSnapshot>> {
        self.shared.published()
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Lays out `tree` under `context` and publishes the result.
    ///
    /// Returns `Ok(None)` when [`invalidate`](Self::invalidate) was called
    /// while the pass ran; the previously published snapshot stays in place.
    pub fn run(
        &self,
        tree: &LayoutTree,
        context: &LayoutContext,
    ) -> Result<Option<Arc<LayoutSnapshot>>, TreeError> {
        let root = tree.root().ok_or(TreeError::NoRoot)?;
        let generation = self.generation();

        let pass = PassMarker::enter(self.shared.owner_id());
        let mut measurer = Measurer::new(tree, context);
        #[cfg(feature = "parallel")]
        measurer.set_owner(self.shared.owner_id());
        let measured = measurer.measure_root(root);
        let (cache, mut faults) = measurer.finish();
        let frames = place::place_tree(&cache, measured.key);
        let snapped = snap::snap_frames(&frames, context.scale());
        drop(pass);

        faults.extend(self.shared.take_stray());
        let snapshot = Arc::new(LayoutSnapshot {
            generation,
            root,
            frames,
            snapped,
            faults,
            measurements: cache.len(),
        });
        log::trace!(
            "pass {generation}: {} nodes placed, {} measurements, {} faults",
            snapshot.frames.len(),
            snapshot.measurements,
            snapshot.faults.len()
        );

        let mut slot = self.shared.publish_slot();
        let current = self.generation();
        if current != generation {
            log::debug!("discarding pass {generation}, superseded by generation {current}");
            return Ok(None);
        }
        *slot = Some(Arc::clone(&snapshot));
        Ok(Some(snapshot))
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
