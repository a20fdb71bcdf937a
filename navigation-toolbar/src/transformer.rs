use alloc::vec::Vec;

use crate::anchor;
use crate::container::HeaderContainer;
use crate::recycler::HolderId;
use crate::{AnchorPoints, Geometry, Orientation, Point};

/// What a transformer sees besides the container.
#[derive(Clone, Copy, Debug)]
pub struct LayoutContext<'a> {
    pub geometry: &'a Geometry,
    pub points: AnchorPoints,
    /// Last non-transitional orientation.
    pub orientation: Option<Orientation>,
}

/// Continuous presentation stage, run after every header-bottom change and every fill.
pub trait ItemTransformer {
    fn attach(&mut self, _geometry: &Geometry) {}

    fn detach(&mut self) {}

    /// The attached child at `child` was tapped while the list was vertical.
    fn on_item_click(
        &mut self,
        _header: &HeaderContainer,
        _ctx: &LayoutContext<'_>,
        _child: usize,
    ) {
    }

    fn transform(
        &mut self,
        header: &mut HeaderContainer,
        ctx: &LayoutContext<'_>,
        header_bottom: i32,
    );
}

/// Progress of the header through its bands, all clamped at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ratios {
    /// `header_bottom / screen_height`.
    pub ratio: f32,
    /// Progress from collapsed (toolbar) to expanded.
    pub ratio_work: f32,
    /// Progress through `[toolbar, screen_half]`, capped at 1.
    pub ratio_top_half: f32,
    /// Progress through `[screen_half, screen_height]`.
    pub ratio_bottom_half: f32,
}

impl Ratios {
    pub fn compute(geometry: &Geometry, header_bottom: i32) -> Self {
        let height = geometry.screen_height.max(1) as f32;
        let ratio = (header_bottom as f32 / height).max(0.0);
        let ratio_work = if geometry.work_height > 0 {
            let above_toolbar = (header_bottom - geometry.tool_bar_height) as f32;
            (above_toolbar / geometry.work_height as f32).max(0.0)
        } else {
            0.0
        };

        let top = geometry.tool_bar_height as f32 / height;
        let bottom = geometry.screen_half as f32 / height;
        let ratio_top_half = if bottom > top {
            let clamped = ratio.max(top).min(bottom);
            (1.0 - (bottom - clamped) / (bottom - top)).max(0.0)
        } else {
            1.0
        };
        let ratio_bottom_half = if bottom > 0.0 {
            ((ratio - bottom) / bottom).max(0.0)
        } else {
            0.0
        };

        Self {
            ratio,
            ratio_work,
            ratio_top_half,
            ratio_bottom_half: ratio_bottom_half.min(1.0),
        }
    }
}

/// Horizontal and vertical pose of one attached child.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Pose {
    id: HolderId,
    horizontal: Point,
    vertical: Point,
}

/// Interpolates cards between the carousel pose and the list pose.
///
/// In the top half (`header_bottom <= screen_half`) cards keep their x and stretch to the header
/// bottom. In the bottom half each card moves linearly from its horizontal pose to its vertical
/// pose and its size shrinks from a horizontal card to a vertical row. Poses are captured when
/// the header leaves a rest orientation and dropped when it arrives at one, so both end points
/// coincide with what a discrete fill produces.
#[derive(Clone, Debug, Default)]
pub struct DefaultItemTransformer {
    ratios: Option<Ratios>,
    poses: Vec<Pose>,
    clicked_child: Option<usize>,
    last_input: Option<(usize, Option<(i32, i32)>, i32)>,
    passes: u64,
}

impl DefaultItemTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ratios of the last applied pass.
    pub fn ratios(&self) -> Option<Ratios> {
        self.ratios
    }

    /// Transform passes that actually ran (unchanged input is skipped).
    pub fn passes(&self) -> u64 {
        self.passes
    }

    fn poses_match(&self, header: &HeaderContainer) -> bool {
        !self.poses.is_empty()
            && self.poses.len() == header.child_count()
            && self
                .poses
                .iter()
                .zip(header.children())
                .all(|(pose, child)| pose.id == child.id())
    }

    fn ensure_poses(
        &mut self,
        header: &HeaderContainer,
        ctx: &LayoutContext<'_>,
        prev_bottom_half: Option<f32>,
    ) {
        if self.poses_match(header) {
            return;
        }
        let from_vertical = match prev_bottom_half {
            Some(p) if p >= 1.0 => true,
            Some(p) if p <= 0.0 => false,
            _ => ctx.orientation == Some(Orientation::Vertical),
        };
        if from_vertical {
            self.capture_from_vertical(header, ctx);
        } else {
            self.capture_from_horizontal(header, ctx);
        }
    }

    /// Cards sit in the carousel; their list rows are stacked around the horizontal anchor.
    fn capture_from_horizontal(&mut self, header: &HeaderContainer, ctx: &LayoutContext<'_>) {
        self.poses.clear();
        self.clicked_child = None;
        let Some(pivot) = anchor::horizontal_anchor_index(header.children(), &ctx.points) else {
            return;
        };
        let vertical = ctx.points.vertical;
        let row = ctx.geometry.vertical_tab_height as f32;
        for (index, child) in header.children().iter().enumerate() {
            let steps = index as f32 - pivot as f32;
            self.poses.push(Pose {
                id: child.id(),
                horizontal: Point::new(child.view.frame.left as f32, ctx.points.horizontal.y),
                vertical: Point::new(vertical.x, vertical.y + steps * row),
            });
        }
        ntrace!(pivot, count = self.poses.len(), "capture poses from horizontal");
    }

    /// Rows sit in the list; their cards are laid side by side around the clicked row, or the
    /// vertical anchor when nothing was clicked.
    fn capture_from_vertical(&mut self, header: &HeaderContainer, ctx: &LayoutContext<'_>) {
        self.poses.clear();
        let clicked = self
            .clicked_child
            .take()
            .filter(|&index| index < header.child_count());
        let Some(pivot) =
            clicked.or_else(|| anchor::vertical_anchor_index(header.children(), &ctx.points))
        else {
            return;
        };
        let horizontal = ctx.points.horizontal;
        let card = ctx.geometry.horizontal_tab_width as f32;
        for (index, child) in header.children().iter().enumerate() {
            let steps = index as f32 - pivot as f32;
            self.poses.push(Pose {
                id: child.id(),
                horizontal: Point::new(horizontal.x + steps * card, horizontal.y),
                vertical: Point::new(child.view.frame.left as f32, child.view.frame.top as f32),
            });
        }
        ntrace!(pivot, count = self.poses.len(), "capture poses from vertical");
    }

    fn clear_poses(&mut self) {
        self.poses.clear();
    }

    fn apply_bottom_half(
        &self,
        header: &mut HeaderContainer,
        geometry: &Geometry,
        bottom_half: f32,
    ) {
        let hw = geometry.horizontal_tab_width as f32;
        let hh = geometry.horizontal_tab_height as f32;
        let vw = geometry.vertical_tab_width as f32;
        let vh = geometry.vertical_tab_height as f32;
        let width = (hw - (hw - vw) * bottom_half).round() as i32;
        let height = (hh - (hh - vh) * bottom_half).round() as i32;

        for (child, pose) in header.children_mut().iter_mut().zip(&self.poses) {
            let at = pose.horizontal.lerp(pose.vertical, bottom_half);
            let frame = &mut child.view.frame;
            frame.left = at.x.round() as i32;
            frame.top = at.y.round() as i32;
            frame.width = width;
            frame.height = height;
        }
    }

    fn apply_top_half(header: &mut HeaderContainer, header_bottom: i32) {
        let top = header.height() - header_bottom;
        for child in header.children_mut() {
            child.view.frame.top = top;
            child.view.frame.height = header_bottom;
        }
    }
}

impl ItemTransformer for DefaultItemTransformer {
    fn attach(&mut self, _geometry: &Geometry) {
        self.ratios = None;
        self.poses.clear();
        self.last_input = None;
    }

    fn detach(&mut self) {
        self.attach(&Geometry::default());
        self.clicked_child = None;
    }

    fn on_item_click(&mut self, _header: &HeaderContainer, _ctx: &LayoutContext<'_>, child: usize) {
        self.clicked_child = Some(child);
    }

    fn transform(
        &mut self,
        header: &mut HeaderContainer,
        ctx: &LayoutContext<'_>,
        header_bottom: i32,
    ) {
        let first = header
            .children()
            .first()
            .map(|child| (child.view.frame.left, child.view.frame.top));
        let input = (header.child_count(), first, header_bottom);
        if self.last_input == Some(input) {
            return;
        }

        let prev_bottom_half = self.ratios.map(|r| r.ratio_bottom_half);
        let ratios = Ratios::compute(ctx.geometry, header_bottom);
        let bottom_half = ratios.ratio_bottom_half;
        self.ratios = Some(ratios);
        self.passes += 1;

        if bottom_half <= 0.0 {
            if prev_bottom_half.is_some_and(|p| p > 0.0) {
                self.ensure_poses(header, ctx, prev_bottom_half);
                self.apply_bottom_half(header, ctx.geometry, 0.0);
            }
            self.clear_poses();
            Self::apply_top_half(header, header_bottom);
        } else if bottom_half >= 1.0 {
            if prev_bottom_half.is_some_and(|p| p < 1.0) {
                self.ensure_poses(header, ctx, prev_bottom_half);
                self.apply_bottom_half(header, ctx.geometry, 1.0);
            }
            self.clear_poses();
        } else {
            self.ensure_poses(header, ctx, prev_bottom_half);
            self.apply_bottom_half(header, ctx.geometry, bottom_half);
        }

        // Record the post-transform layout so the follow-up call after a fill only re-runs
        // when the fill actually changed something.
        let first = header
            .children()
            .first()
            .map(|child| (child.view.frame.left, child.view.frame.top));
        self.last_input = Some((header.child_count(), first, header_bottom));
    }
}
