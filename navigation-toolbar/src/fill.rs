use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::anchor;
use crate::container::HeaderContainer;
use crate::observer::ItemDecoration;
use crate::recycler::ViewHolder;
use crate::{
    AnchorPoints, Axis, Geometry, HeaderError, Insets, Orientation, Rect, Result, ScrollState,
};

/// Counters for layout work, exposed for diagnostics and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutStats {
    /// Discrete fills that laid out children.
    pub fill_passes: u64,
    /// Fill requests skipped because the header was transitional.
    pub skipped_fills: u64,
    /// Calls into the item transformer.
    pub transform_passes: u64,
}

/// Mutable layout state owned by the layout manager.
#[derive(Clone, Debug, Default)]
pub(crate) struct LayoutState {
    /// Orientation derived from the current header bottom.
    pub current: Option<Orientation>,
    /// Last non-transitional orientation.
    pub sticky: Option<Orientation>,
    pub points: AnchorPoints,
    /// Position a `scroll_to_position` asked to place at the anchor point on the next fill.
    pub pending_position: Option<usize>,
    pub scroll_state: ScrollState,
    pub stats: LayoutStats,
}

/// What a fill pass did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FillOutcome {
    /// The header is transitional; nothing moved.
    Skipped,
    /// No adapter or no orientation yet.
    NotReady,
    Filled,
}

/// Lays out the window of positions around the anchor for the current orientation.
///
/// Attached children are detached into a position-keyed cache, the window
/// `anchor - radius ..= anchor + radius` is walked (clamped to the item range), cached holders are
/// reattached at their cell and missing positions come from the recycler. Leftovers are pooled.
pub(crate) fn fill(
    state: &mut LayoutState,
    header: &mut HeaderContainer,
    geometry: &Geometry,
    header_bottom: i32,
    decorations: &[Box<dyn ItemDecoration>],
) -> Result<FillOutcome> {
    let Some(orientation) = state.current else {
        return Ok(FillOutcome::NotReady);
    };
    let Some(axis) = orientation.axis() else {
        state.stats.skipped_fills += 1;
        ntrace!(header_bottom, "fill skipped: transitional");
        return Ok(FillOutcome::Skipped);
    };
    let Some(count) = header.item_count() else {
        return Ok(FillOutcome::NotReady);
    };

    if count == 0 {
        state.pending_position = None;
        for holder in header.detach_all() {
            header.recycle_view(holder)?;
        }
        state.stats.fill_passes += 1;
        return Ok(FillOutcome::Filled);
    }

    let (anchor_pos, anchor_coord) = resolve_anchor(state, header, geometry, axis, count)?;

    let mut cache: BTreeMap<usize, ViewHolder> = BTreeMap::new();
    let mut stale = Vec::new();
    for holder in header.detach_all() {
        match holder.position() {
            Some(position) if position < count => {
                if let Some(duplicate) = cache.insert(position, holder) {
                    nwarn!(position, "two attached children bound to one position");
                    stale.push(duplicate);
                }
            }
            _ => stale.push(holder),
        }
    }
    for holder in stale {
        header.recycle_view(holder)?;
    }

    let radius = geometry.window_radius();
    let first = anchor_pos.saturating_sub(radius);
    let last = (anchor_pos + radius).min(count - 1);
    let extent = geometry.extent(axis);
    let mut reused = 0usize;

    for position in first..=last {
        let mut holder = match cache.remove(&position) {
            Some(holder) => {
                reused += 1;
                holder
            }
            None => header.obtain_view(position)?,
        };
        let steps = position as i64 - anchor_pos as i64;
        let leading = anchor_coord as i64 + steps * extent as i64;
        holder.view.frame = cell(geometry, axis, leading as i32, header_bottom);
        apply_decorations(&mut holder, decorations);
        header.add_view(holder);
    }

    for (_, holder) in cache {
        header.recycle_view(holder)?;
    }

    state.stats.fill_passes += 1;
    ntrace!(
        ?axis,
        anchor = anchor_pos,
        first,
        last,
        reused,
        "fill"
    );
    Ok(FillOutcome::Filled)
}

/// Anchor position and the leading coordinate it is laid out at.
fn resolve_anchor(
    state: &mut LayoutState,
    header: &HeaderContainer,
    geometry: &Geometry,
    axis: Axis,
    count: usize,
) -> Result<(usize, i32)> {
    let target = state.points.for_axis(axis).along(axis);
    if let Some(position) = state.pending_position.take() {
        let position = position.min(count - 1);
        return Ok((position, pinned_leading(geometry, axis, target as i32, position, count)));
    }

    let Some(index) = anchor::anchor_index(header.children(), &state.points, axis) else {
        return Ok((0, target as i32));
    };
    let child = &header.children()[index];
    let position = child
        .position()
        .ok_or(HeaderError::MissingViewHolder { child: index })?;
    let coord = child.view.frame.leading(axis);

    // The closest child can be far from the anchor point right after a jump of the header
    // bottom; shift the anchor by whole cards so the window still covers the screen.
    let extent = geometry.extent(axis).max(1);
    let diff = target - coord as f32;
    let shift = if diff.abs() * 2.0 <= extent as f32 {
        0
    } else {
        (diff / extent as f32).round() as i64
    };
    let shifted = position as i64 + shift;
    if shifted >= count as i64 {
        // The item count shrank under the anchor: restart from the last item.
        let last = count - 1;
        return Ok((last, pinned_leading(geometry, axis, target as i32, last, count)));
    }
    let corrected = shifted.max(0);
    let coord = coord as i64 + (corrected - position as i64) * extent as i64;
    Ok((corrected as usize, coord as i32))
}

/// Leading coordinate that puts `position` at `target`, moved toward the trailing side when that
/// would leave the last item ending short of the container. Item 0 never moves past `target`.
fn pinned_leading(
    geometry: &Geometry,
    axis: Axis,
    target: i32,
    position: usize,
    count: usize,
) -> i32 {
    let extent = geometry.extent(axis) as i64;
    let container = geometry.container_extent(axis) as i64;
    let target = target as i64;
    let gap = container - (target + (count - position) as i64 * extent);
    if gap <= 0 {
        return target as i32;
    }
    (target + gap.min(position as i64 * extent)) as i32
}

/// Frame of the card whose leading edge is at `leading`.
fn cell(geometry: &Geometry, axis: Axis, leading: i32, header_bottom: i32) -> Rect {
    match axis {
        Axis::Horizontal => Rect::new(
            leading,
            geometry.container_height - header_bottom,
            geometry.horizontal_tab_width,
            header_bottom,
        ),
        Axis::Vertical => Rect::new(
            geometry.points.vertical.x as i32,
            leading,
            geometry.vertical_tab_width,
            geometry.vertical_tab_height,
        ),
    }
}

fn apply_decorations(holder: &mut ViewHolder, decorations: &[Box<dyn ItemDecoration>]) {
    if holder.decor_valid {
        return;
    }
    let mut insets = Insets::default();
    for decoration in decorations {
        insets = insets.add(decoration.item_offsets(holder));
    }
    holder.decor_insets = insets;
    holder.decor_valid = true;
}
