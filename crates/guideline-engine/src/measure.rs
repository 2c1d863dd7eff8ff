//! Measurement pass
//!
//! `measure(node, proposal)` asks a node what size it chooses for a proposal.
//! Results are memoized per pass and never revised: a parent may reposition a
//! child after measuring it, never resize it.
//!
//! Besides the proposal, every cache key carries the nearest bounded extent
//! on each axis. A leaf that cannot express `Infinite` is handed that bound
//! instead, so the same node can legitimately answer differently under
//! different ancestors.

use guideline_geometry::{Point, Size};
use guideline_layout::{
    Axis, Baselines, LeafMeasure, ProposedDimension, ProposedSize, ViewDimensions,
};
use smallvec::{smallvec, SmallVec};

use crate::collections::map::{HashMap, HashSet};
use crate::context::LayoutContext;
use crate::error::{FaultKey, LayoutFault};
use crate::guides;
use crate::tree::{LayoutTree, ModifierNode, NodeId, NodeKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct MeasureKey {
    pub node: NodeId,
    pub proposal: ProposedSize,
    /// Nearest `Exact` extent per axis, this node's own proposal included.
    pub bounds: ProposedSize,
}

/// Where a child sits inside its parent's box.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ChildPlacement {
    pub key: MeasureKey,
    pub origin: Point,
    /// Drawing-time shift, not part of the layout origin.
    pub shift: Point,
}

#[derive(Clone, Debug)]
pub(crate) struct MeasureRecord {
    pub dimensions: ViewDimensions,
    pub children: SmallVec<[ChildPlacement; 4]>,
}

impl MeasureRecord {
    pub(crate) fn childless(dimensions: ViewDimensions) -> Self {
        Self {
            dimensions,
            children: SmallVec::new(),
        }
    }
}

pub(crate) type MeasureCache = HashMap<MeasureKey, MeasureRecord>;

/// A finished measurement, as seen by the parent that asked for it.
#[derive(Clone, Debug)]
pub(crate) struct Measured {
    pub key: MeasureKey,
    pub dimensions: ViewDimensions,
}

impl Measured {
    #[inline]
    pub fn size(&self) -> Size {
        self.dimensions.size()
    }
}

/// Per-pass measurement state. Never shared between passes.
pub(crate) struct Measurer<'a> {
    pub(crate) tree: &'a LayoutTree,
    pub(crate) context: &'a LayoutContext,
    cache: MeasureCache,
    faults: Vec<LayoutFault>,
    reported: HashSet<FaultKey>,
    #[cfg(feature = "parallel")]
    parallel: bool,
    /// Engine whose pass this is; forked tasks mark their worker threads.
    #[cfg(feature = "parallel")]
    owner: Option<usize>,
}

impl<'a> Measurer<'a> {
    pub(crate) fn new(tree: &'a LayoutTree, context: &'a LayoutContext) -> Self {
        Self {
            tree,
            context,
            cache: HashMap::default(),
            faults: Vec::new(),
            reported: HashSet::default(),
            #[cfg(feature = "parallel")]
            parallel: true,
            #[cfg(feature = "parallel")]
            owner: None,
        }
    }

    #[cfg(feature = "parallel")]
    pub(crate) fn set_owner(&mut self, owner: usize) {
        self.owner = Some(owner);
    }

    /// Measures siblings one after another even with `parallel` enabled.
    #[cfg(all(test, feature = "parallel"))]
    pub(crate) fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub(crate) fn measure_root(&mut self, root: NodeId) -> Measured {
        self.measure(root, self.context.proposal(), ProposedSize::UNSPECIFIED)
    }

    pub(crate) fn finish(self) -> (MeasureCache, Vec<LayoutFault>) {
        (self.cache, self.faults)
    }

    /// Modifier chains are walked with an explicit stack: the chain is
    /// proposed down to the first leaf, container or cached entry, then each
    /// modifier derives its size on the way back up.
    pub(crate) fn measure(
        &mut self,
        node: NodeId,
        proposal: ProposedSize,
        bounds: ProposedSize,
    ) -> Measured {
        let tree = self.tree;
        let context = self.context;
        let mut chain: Vec<(&'a ModifierNode, MeasureKey)> = Vec::new();
        let mut key = key_for(node, proposal, bounds);

        let mut measured = loop {
            if let Some(record) = self.cache.get(&key) {
                break Measured {
                    key,
                    dimensions: record.dimensions.clone(),
                };
            }
            let record = match tree.get(key.node).kind() {
                NodeKind::Modifier(modifier) => {
                    let child_proposal = modifier.kind.propose(key.proposal, context);
                    chain.push((modifier, key));
                    key = key_for(modifier.child, child_proposal, key.bounds);
                    continue;
                }
                NodeKind::Leaf(leaf) => {
                    self.measure_leaf(key.node, leaf.as_ref(), key.proposal, key.bounds)
                }
                NodeKind::Container(container) => {
                    self.measure_container(container, key.proposal, key.bounds)
                }
            };
            break self.store(key, record);
        };

        while let Some((modifier, key)) = chain.pop() {
            let record = self.wrap_child(key, modifier, &measured);
            measured = self.store(key, record);
        }
        measured
    }

    fn store(&mut self, key: MeasureKey, record: MeasureRecord) -> Measured {
        let dimensions = record.dimensions.clone();
        self.cache.entry(key).or_insert(record);
        Measured { key, dimensions }
    }

    /// Measures several children against the same bounds, in order.
    pub(crate) fn measure_all(
        &mut self,
        requests: &[(NodeId, ProposedSize)],
        bounds: ProposedSize,
    ) -> Vec<Measured> {
        #[cfg(feature = "parallel")]
        {
            if self.parallel && requests.len() > 1 {
                return self.measure_all_parallel(requests, bounds);
            }
        }
        requests
            .iter()
            .map(|&(node, proposal)| self.measure(node, proposal, bounds))
            .collect()
    }

    /// Forks one task per uncached request. Each task measures into its own
    /// cache; the caches are merged when the tasks join.
    #[cfg(feature = "parallel")]
    fn measure_all_parallel(
        &mut self,
        requests: &[(NodeId, ProposedSize)],
        bounds: ProposedSize,
    ) -> Vec<Measured> {
        use rayon::prelude::*;

        use crate::engine::PassMarker;

        let mut results: Vec<Option<Measured>> = requests
            .iter()
            .map(|&(node, proposal)| {
                let key = key_for(node, proposal, bounds);
                self.cache.get(&key).map(|record| Measured {
                    key,
                    dimensions: record.dimensions.clone(),
                })
            })
            .collect();
        let misses: Vec<(usize, NodeId, ProposedSize)> = requests
            .iter()
            .enumerate()
            .filter(|(index, _)| results[*index].is_none())
            .map(|(index, &(node, proposal))| (index, node, proposal))
            .collect();

        let tree = self.tree;
        let context = self.context;
        let owner = self.owner;
        let forked: Vec<(usize, Measured, MeasureCache, Vec<LayoutFault>)> = misses
            .into_par_iter()
            .map(|(index, node, proposal)| {
                let _marker = owner.map(PassMarker::enter);
                let mut local = Measurer::new(tree, context);
                local.owner = owner;
                let measured = local.measure(node, proposal, bounds);
                let (cache, faults) = local.finish();
                (index, measured, cache, faults)
            })
            .collect();

        for (index, measured, cache, faults) in forked {
            for (key, record) in cache {
                self.cache.entry(key).or_insert(record);
            }
            for fault in faults {
                self.record(fault);
            }
            results[index] = Some(measured);
        }
        results.into_iter().flatten().collect()
    }

    fn measure_leaf(
        &mut self,
        node: NodeId,
        leaf: &dyn LeafMeasure,
        proposal: ProposedSize,
        bounds: ProposedSize,
    ) -> MeasureRecord {
        let offered = if leaf.handles_infinite() {
            proposal
        } else {
            self.bound_infinite(node, proposal, bounds)
        };
        let size = self.checked(node, leaf.measure(offered));
        let baselines = finite_baselines(leaf.baselines(offered, size));
        MeasureRecord::childless(ViewDimensions::new(size).with_baselines(baselines))
    }

    /// Derives a modifier's own record from its already measured child.
    fn wrap_child(
        &mut self,
        key: MeasureKey,
        modifier: &ModifierNode,
        child: &Measured,
    ) -> MeasureRecord {
        let context = self.context;
        let own = modifier
            .kind
            .derive(child.size(), key.proposal, key.bounds, context);
        let own = self.checked(key.node, own);
        let origin = finite_point(modifier.kind.place_child(own, &child.dimensions, context));
        let dimensions =
            guides::modifier_dimensions(own, &child.dimensions, origin, &modifier.guides);
        MeasureRecord {
            dimensions,
            children: smallvec![ChildPlacement {
                key: child.key,
                origin,
                shift: modifier.kind.draw_shift(),
            }],
        }
    }

    /// Replaces `Infinite` components with the nearest bounded extent, or
    /// `Unspecified` when nothing above is bounded.
    fn bound_infinite(
        &mut self,
        node: NodeId,
        proposal: ProposedSize,
        bounds: ProposedSize,
    ) -> ProposedSize {
        let mut offered = proposal;
        for axis in [Axis::Horizontal, Axis::Vertical] {
            if !proposal.get(axis).is_infinite() {
                continue;
            }
            let substituted = match bounds.get(axis) {
                exact @ ProposedDimension::Exact(_) => exact,
                _ => ProposedDimension::Unspecified,
            };
            log::debug!("node {node}: infinite {axis:?} proposal replaced by {substituted:?}");
            self.record(LayoutFault::AmbiguousProposal {
                node,
                axis,
                substituted,
            });
            offered = offered.with(axis, substituted);
        }
        offered
    }

    fn checked(&mut self, node: NodeId, size: Size) -> Size {
        if size.is_valid() {
            return size;
        }
        log::warn!(
            "node {node} reported invalid size {}x{}, laying it out at 0x0",
            size.width,
            size.height
        );
        self.record(LayoutFault::MeasurementFault {
            node,
            reported: size,
        });
        Size::ZERO
    }

    pub(crate) fn record(&mut self, fault: LayoutFault) {
        if self.reported.insert(fault.dedup_key()) {
            self.faults.push(fault);
        }
    }
}

fn key_for(node: NodeId, proposal: ProposedSize, bounds: ProposedSize) -> MeasureKey {
    let narrow = |offered: ProposedDimension, bound: ProposedDimension| {
        if offered.is_exact() {
            offered
        } else {
            bound
        }
    };
    MeasureKey {
        node,
        proposal,
        bounds: ProposedSize::new(
            narrow(proposal.width, bounds.width),
            narrow(proposal.height, bounds.height),
        ),
    }
}

fn finite_baselines(baselines: Baselines) -> Baselines {
    Baselines {
        first: baselines.first.filter(|value| value.is_finite()),
        last: baselines.last.filter(|value| value.is_finite()),
    }
}

fn finite_point(point: Point) -> Point {
    let clean = |value: f64| if value.is_finite() { value } else { 0.0 };
    Point::new(clean(point.x), clean(point.y))
}

#[cfg(test)]
#[path = "tests/measure_tests.rs"]
mod tests;
