//! Curb range made unusable by queued traffic on the adjoining travel lane.
//!
//! A travel lane whose middle node is the curb lane's start node runs
//! alongside it. Its blockage range is widened slightly and snapped to the
//! lane ends when it reaches past the midpoint from either side; the ranges
//! of every such sibling are unioned.

use crate::curve::CurveRange;
use crate::network::{LaneNodes, NodeId};

/// Margin added on both sides of a reported blockage.
pub const BLOCKED_RANGE_BUFFER: f32 = 0.01;

/// Blockages starting at or before this position extend to the lane start.
pub const EXTEND_TO_START_AT: f32 = 0.51;

/// Blockages ending at or after this position extend to the lane end.
pub const EXTEND_TO_END_AT: f32 = 0.49;

/// Widen a raw travel-lane blockage into the range it blocks on the curb.
pub fn widen_blockage(raw: CurveRange) -> CurveRange {
    let min = if raw.min <= EXTEND_TO_START_AT {
        0.0
    } else {
        raw.min - BLOCKED_RANGE_BUFFER
    };
    let max = if raw.max >= EXTEND_TO_END_AT {
        1.0
    } else {
        raw.max + BLOCKED_RANGE_BUFFER
    };
    CurveRange::new(min, max)
}

/// Union of the widened blockages of every travel lane running alongside a
/// curb lane that starts at `curb_start`. Empty when none is blocked.
pub fn blocked_range<'a>(
    curb_start: NodeId,
    travel_lanes: impl IntoIterator<Item = (&'a LaneNodes, Option<CurveRange>)>,
) -> CurveRange {
    travel_lanes
        .into_iter()
        .filter(|(nodes, _)| nodes.middle == curb_start)
        .filter_map(|(_, blockage)| blockage)
        .fold(CurveRange::EMPTY, |acc, raw| acc.union(widen_blockage(raw)))
}
