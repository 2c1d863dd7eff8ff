//! Container measurement and fair division of the primary axis

use guideline_geometry::{Point, Size};
use guideline_layout::{Axis, ProposedDimension, ProposedSize, ViewDimensions};
use smallvec::SmallVec;

use crate::guides;
use crate::measure::{ChildPlacement, MeasureRecord, Measured, Measurer};
use crate::place::{arrange_stack, extent};
use crate::tree::{ContainerNode, NodeId};

/// Two extents closer than this are the same extent.
const EXTENT_EPSILON: f64 = 1e-6;

/// Splits `available` among children whose natural primary extents are
/// `naturals`.
///
/// Each round offers every still-flexible child the current even share via
/// `probe(active, share)`, which returns the extent each active child picks.
/// A child whose natural extent fits under the share, and which does not grow
/// to take the share, is granted its natural extent and leaves the
/// distribution. If no child does, children that insist on more than the
/// share are fixed instead. The rest is re-divided until a round fixes
/// nobody. Still-flexible children end up with the share, the last of them
/// absorbing the rounding remainder so the flexible offers sum exactly to
/// what was left.
///
/// Fixed children keep the share they were offered, so their final
/// measurement reuses the probe. Returns the primary-axis offer for each
/// child.
pub(crate) fn divide_extent(
    available: f64,
    naturals: &[f64],
    mut probe: impl FnMut(&[usize], f64) -> Vec<f64>,
) -> Vec<f64> {
    let mut offers = vec![0.0; naturals.len()];
    let mut active: Vec<usize> = (0..naturals.len()).collect();
    let mut remaining = available.max(0.0);

    while !active.is_empty() {
        let share = remaining / active.len() as f64;
        let picked = probe(&active, share);

        let below = |slot: usize| {
            picked[slot] < share - EXTENT_EPSILON
                && naturals[active[slot]] < share - EXTENT_EPSILON
        };
        let mut fixed: Vec<bool> = (0..active.len()).map(below).collect();
        if !fixed.contains(&true) {
            fixed = (0..active.len())
                .map(|slot| picked[slot] > share + EXTENT_EPSILON)
                .collect();
        }
        if !fixed.contains(&true) {
            break;
        }

        for (slot, _) in fixed.iter().enumerate().filter(|(_, is_fixed)| **is_fixed) {
            offers[active[slot]] = share;
            remaining -= picked[slot];
        }
        remaining = remaining.max(0.0);
        let mut mask = fixed.into_iter();
        active.retain(|_| !mask.next().unwrap_or(false));
    }

    if let Some((&last, rest)) = active.split_last() {
        let share = remaining / active.len() as f64;
        for &index in rest {
            offers[index] = share;
        }
        offers[last] = (remaining - share * rest.len() as f64).max(0.0);
    }
    offers
}

impl Measurer<'_> {
    pub(crate) fn measure_container(
        &mut self,
        container: &ContainerNode,
        proposal: ProposedSize,
        bounds: ProposedSize,
    ) -> MeasureRecord {
        if container.children.is_empty() {
            return MeasureRecord::childless(ViewDimensions::new(Size::ZERO));
        }

        let measured = match container.axis.primary() {
            Some(axis) => self.measure_linear(
                &container.children,
                axis,
                container.spacing,
                proposal,
                bounds,
            ),
            None => {
                let requests: SmallVec<[(NodeId, ProposedSize); 4]> = container
                    .children
                    .iter()
                    .map(|&child| (child, proposal))
                    .collect();
                self.measure_all(&requests, bounds)
            }
        };

        let children: SmallVec<[&ViewDimensions; 4]> =
            measured.iter().map(|child| &child.dimensions).collect();
        let (content, origins) = arrange_stack(
            container.axis,
            container.spacing,
            container.alignment,
            &children,
        );
        let own = clamp_to_proposal(content, proposal);
        let placed: SmallVec<[(&ViewDimensions, Point); 4]> = children
            .iter()
            .copied()
            .zip(origins.iter().copied())
            .collect();
        let dimensions = guides::container_dimensions(own, &placed);

        MeasureRecord {
            dimensions,
            children: measured
                .iter()
                .zip(origins)
                .map(|(child, origin)| ChildPlacement {
                    key: child.key,
                    origin,
                    shift: Point::ZERO,
                })
                .collect(),
        }
    }

    fn measure_linear(
        &mut self,
        children: &[NodeId],
        axis: Axis,
        spacing: f64,
        proposal: ProposedSize,
        bounds: ProposedSize,
    ) -> Vec<Measured> {
        let Some(offered) = proposal.get(axis).value() else {
            // Unspecified and Infinite pass straight through
            let requests: SmallVec<[(NodeId, ProposedSize); 4]> =
                children.iter().map(|&child| (child, proposal)).collect();
            return self.measure_all(&requests, bounds);
        };

        let reserved = spacing * children.len().saturating_sub(1) as f64;
        let natural_requests: SmallVec<[(NodeId, ProposedSize); 4]> = children
            .iter()
            .map(|&child| (child, proposal.with(axis, ProposedDimension::Unspecified)))
            .collect();
        let naturals: Vec<f64> = self
            .measure_all(&natural_requests, bounds)
            .iter()
            .map(|child| extent(child.size(), axis))
            .collect();

        let offer = |extent: f64| proposal.with(axis, ProposedDimension::exact(extent));
        let offers = divide_extent(offered - reserved, &naturals, |active, share| {
            let requests: SmallVec<[(NodeId, ProposedSize); 4]> = active
                .iter()
                .map(|&index| (children[index], offer(share)))
                .collect();
            self.measure_all(&requests, bounds)
                .iter()
                .map(|child| extent(child.size(), axis))
                .collect()
        });

        let requests: SmallVec<[(NodeId, ProposedSize); 4]> = children
            .iter()
            .zip(offers)
            .map(|(&child, extent)| (child, offer(extent)))
            .collect();
        self.measure_all(&requests, bounds)
    }
}

/// A container never reports more than an exact offer. Children may still
/// overflow it.
fn clamp_to_proposal(content: Size, proposal: ProposedSize) -> Size {
    let clamp = |value: f64, offered: ProposedDimension| match offered {
        ProposedDimension::Exact(limit) => value.min(limit),
        ProposedDimension::Unspecified | ProposedDimension::Infinite => value,
    };
    Size::new(
        clamp(content.width, proposal.width),
        clamp(content.height, proposal.height),
    )
}

#[cfg(test)]
#[path = "tests/stack_tests.rs"]
mod tests;
