//! Anchor lookup: the attached child closest to an orientation's anchor point.

use crate::recycler::ViewHolder;
use crate::{AnchorPoints, Axis};

/// Index of the child whose leading edge is closest to the anchor point along `axis`.
///
/// Ties keep the earliest child.
pub fn anchor_index(children: &[ViewHolder], points: &AnchorPoints, axis: Axis) -> Option<usize> {
    let target = points.for_axis(axis).along(axis);
    let mut result = None;
    let mut best = f32::INFINITY;
    for (index, child) in children.iter().enumerate() {
        let diff = (child.view.frame.leading(axis) as f32 - target).abs();
        if diff < best {
            best = diff;
            result = Some(index);
        }
    }
    result
}

pub fn horizontal_anchor_index(children: &[ViewHolder], points: &AnchorPoints) -> Option<usize> {
    anchor_index(children, points, Axis::Horizontal)
}

pub fn vertical_anchor_index(children: &[ViewHolder], points: &AnchorPoints) -> Option<usize> {
    anchor_index(children, points, Axis::Vertical)
}
