use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::anchor;
use crate::container::{HeaderContainer, HeaderGesture, TouchEvent};
use crate::fill::{self, FillOutcome, LayoutState, LayoutStats};
use crate::observer::{HeaderObserver, ItemDecoration};
use crate::recycler::HeaderAdapter;
use crate::scroller::Scroller;
use crate::state::{ChildSnapshot, LayoutSnapshot};
use crate::transformer::{DefaultItemTransformer, ItemTransformer, LayoutContext};
use crate::tween::{Easing, Tween};
use crate::{
    AnchorPoints, Axis, Geometry, HeaderConfig, HeaderError, HeaderState, Orientation, Result,
    ScrollState,
};

/// Pending "has the app bar stopped moving" check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct StopCheck {
    start_offset: i32,
    deadline_ms: u64,
}

/// Scroller plus the axis it moves children along. `axis` is `None` when idle.
#[derive(Clone, Debug)]
struct ViewFlinger {
    scroller: Scroller,
    axis: Option<Axis>,
}

/// Positions the header cards for the current app-bar offset and drives every header motion.
///
/// The host owns the clock and the app bar. It reports offset changes and touch input, calls
/// [`HeaderLayoutManager::tick`] every frame while it returns `true`, and renders
/// [`HeaderLayoutManager::container`] children plus [`HeaderLayoutManager::app_bar_offset`].
///
/// The header bottom is `screen_height + app_bar_offset`; its ratio to the screen height picks
/// the orientation. Horizontal and vertical layouts are produced by discrete fills; everything in
/// between is left to the [`ItemTransformer`].
pub struct HeaderLayoutManager {
    config: HeaderConfig,
    geometry: Geometry,
    header: HeaderContainer,
    state: LayoutState,
    laid_out: bool,

    app_bar_offset: i32,
    can_drag: bool,
    header_state: Option<HeaderState>,

    flinger: ViewFlinger,
    offset_animator: Option<Tween>,
    offset_changed: bool,
    stop_check: Option<StopCheck>,
    snap_pending: bool,
    last_item_changed: Option<usize>,

    transformer: Option<Box<dyn ItemTransformer>>,
    observer: Option<Box<dyn HeaderObserver>>,
    decorations: Vec<Box<dyn ItemDecoration>>,
}

impl HeaderLayoutManager {
    pub fn new(config: HeaderConfig) -> Self {
        let geometry = Geometry::new(&config, config.screen_width, config.screen_height);
        let app_bar_offset = offset_for_state(&geometry, config.initial_state);
        ndebug!(
            screen_width = config.screen_width,
            screen_height = config.screen_height,
            tool_bar_height = config.tool_bar_height,
            initial_state = ?config.initial_state,
            "HeaderLayoutManager::new"
        );
        Self {
            flinger: ViewFlinger {
                scroller: Scroller::new(config.fling_friction, config.density),
                axis: None,
            },
            state: LayoutState {
                points: geometry.points,
                ..LayoutState::default()
            },
            geometry,
            header: HeaderContainer::new(),
            laid_out: false,
            app_bar_offset,
            can_drag: false,
            header_state: None,
            offset_animator: None,
            offset_changed: false,
            stop_check: None,
            snap_pending: false,
            last_item_changed: None,
            transformer: Some(Box::new(DefaultItemTransformer::new())),
            observer: None,
            decorations: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &HeaderConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn container(&self) -> &HeaderContainer {
        &self.header
    }

    pub fn stats(&self) -> LayoutStats {
        self.state.stats
    }

    pub fn is_laid_out(&self) -> bool {
        self.laid_out
    }

    pub fn app_bar_offset(&self) -> i32 {
        self.app_bar_offset
    }

    pub fn header_bottom(&self) -> i32 {
        self.geometry.screen_height + self.app_bar_offset
    }

    /// Orientation for the current header bottom. `None` before the first layout.
    pub fn orientation(&self) -> Option<Orientation> {
        self.state.current
    }

    /// Last non-transitional orientation.
    pub fn sticky_orientation(&self) -> Option<Orientation> {
        self.state.sticky
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.state.scroll_state
    }

    pub fn header_state(&self) -> Option<HeaderState> {
        self.header_state
    }

    /// Whether the host may let the user drag the app bar itself.
    pub fn can_drag(&self) -> bool {
        self.can_drag
    }

    pub fn anchor_points(&self) -> AnchorPoints {
        self.state.points
    }

    /// Whether [`Self::tick`] still has work to do.
    pub fn is_animating(&self) -> bool {
        self.flinger.axis.is_some()
            || self.offset_animator.is_some()
            || self.stop_check.is_some()
            || self.offset_changed
            || self.snap_pending
    }

    pub fn set_adapter(&mut self, adapter: impl HeaderAdapter + 'static) -> Result<()> {
        self.set_boxed_adapter(Some(Box::new(adapter))).map(|_| ())
    }

    /// Replaces the adapter and refills. Returns the previous adapter.
    pub fn set_boxed_adapter(
        &mut self,
        adapter: Option<Box<dyn HeaderAdapter>>,
    ) -> Result<Option<Box<dyn HeaderAdapter>>> {
        self.stop_flinger();
        let previous = self.header.set_adapter(adapter);
        self.state.pending_position = None;
        self.last_item_changed = None;
        ndebug!(
            item_count = ?self.header.item_count(),
            "set adapter"
        );
        self.fill()?;
        Ok(previous)
    }

    pub fn set_observer(
        &mut self,
        observer: Option<Box<dyn HeaderObserver>>,
    ) -> Option<Box<dyn HeaderObserver>> {
        core::mem::replace(&mut self.observer, observer)
    }

    /// Swaps the item transformer. `None` disables continuous transforms.
    pub fn set_item_transformer(&mut self, transformer: Option<Box<dyn ItemTransformer>>) {
        if let Some(previous) = self.transformer.as_deref_mut() {
            previous.detach();
        }
        self.transformer = transformer;
        if self.laid_out {
            if let Some(transformer) = self.transformer.as_deref_mut() {
                transformer.attach(&self.geometry);
            }
            self.transform(self.header_bottom());
        }
    }

    /// Registers a decoration and refills so every attached card picks up its insets.
    pub fn add_item_decoration(&mut self, decoration: Box<dyn ItemDecoration>) -> Result<()> {
        self.decorations.push(decoration);
        for child in self.header.children_mut() {
            child.decor_valid = false;
        }
        self.fill()
    }

    pub fn clear_item_decorations(&mut self) -> Result<()> {
        self.decorations.clear();
        for child in self.header.children_mut() {
            child.decor_valid = false;
        }
        self.fill()
    }

    /// Sizes the header container. The first call also performs the initial fill and locks the
    /// scroll flags for the initial landmark.
    pub fn layout(&mut self, width: i32, height: i32, now_ms: u64) -> Result<()> {
        if width <= 0 || height <= 0 {
            return Ok(());
        }
        let resized = self.header.width() != width || self.header.height() != height;
        if self.laid_out && !resized {
            return self.fill();
        }

        let first = !self.laid_out;
        let anchor = self.anchor_position();
        self.header.set_size(width, height);
        self.geometry = Geometry::new(&self.config, width, height);
        self.state.points = self.geometry.points;
        if let Some(transformer) = self.transformer.as_deref_mut() {
            transformer.attach(&self.geometry);
        }
        self.laid_out = true;
        if !first {
            self.state.pending_position = anchor;
        }
        ndebug!(width, height, first, "layout");

        self.on_dependent_changed()?;
        if first {
            self.on_offset_changing_stopped(self.app_bar_offset, now_ms)?;
        }
        Ok(())
    }

    /// Host-reported app-bar offset (`0` expanded, down to `-(screen_height - tool_bar_height)`).
    ///
    /// A running offset animation is cancelled: the host is moving the app bar itself.
    pub fn on_app_bar_offset_changed(&mut self, offset: i32) -> Result<()> {
        if !self.laid_out {
            return Ok(());
        }
        if self.offset_animator.take().is_some() {
            ntrace!("offset animation cancelled by host");
        }
        self.set_offset(offset)
    }

    /// Feeds one touch event. Returns whether the header consumed it.
    pub fn on_touch(&mut self, event: TouchEvent, now_ms: u64) -> Result<bool> {
        if !self.laid_out {
            return Ok(false);
        }
        let Some(gesture) = self.header.translate(event)? else {
            return Ok(false);
        };
        let handled = match gesture {
            HeaderGesture::Down => self.on_header_down(),
            HeaderGesture::Up => self.on_header_up(),
            HeaderGesture::Scroll { axis, distance } => self.on_header_scroll(axis, distance)?,
            HeaderGesture::Fling { axis, velocity } => {
                self.on_header_fling(axis, velocity, now_ms)?
            }
            HeaderGesture::ItemClick { child } => self.on_item_click(child, now_ms)?,
        };
        self.run_pending_snap(now_ms)?;
        Ok(handled)
    }

    /// Advances flings, offset animations and the settle debounce.
    ///
    /// Returns `true` while another tick is needed.
    pub fn tick(&mut self, now_ms: u64) -> Result<bool> {
        if !self.laid_out {
            return Ok(false);
        }
        self.run_flinger(now_ms)?;
        self.run_offset_animator(now_ms)?;
        self.run_stop_check(now_ms)?;
        self.run_pending_snap(now_ms)?;
        Ok(self.is_animating())
    }

    /// Runs a discrete fill for the current orientation. Skipped while transitional.
    pub fn fill(&mut self) -> Result<()> {
        if !self.laid_out {
            return Ok(());
        }
        let bottom = self.header_bottom();
        let outcome = fill::fill(
            &mut self.state,
            &mut self.header,
            &self.geometry,
            bottom,
            &self.decorations,
        )?;
        if outcome == FillOutcome::Filled {
            self.transform(bottom);
            if let Some(observer) = self.observer.as_deref_mut() {
                observer.on_header_updated(bottom);
            }
        }
        Ok(())
    }

    /// Jumps so `position` sits at the anchor point, short of leaving a gap after the last item.
    /// Out-of-range positions are ignored. A running fling or app-bar animation is finished
    /// first.
    pub fn scroll_to_position(&mut self, position: usize) -> Result<bool> {
        if !self.laid_out {
            return Ok(false);
        }
        let Some(count) = self.header.item_count() else {
            return Ok(false);
        };
        if position >= count {
            ndebug!(position, count, "scroll_to_position out of range");
            return Ok(false);
        }
        if let Some(tween) = self.offset_animator.take() {
            ntrace!(to = tween.to, "offset animation finished by scroll_to_position");
            self.set_offset(tween.to)?;
            let finished_ms = tween.start_ms.saturating_add(tween.duration_ms);
            self.on_offset_changing_stopped(tween.to, finished_ms)?;
        }
        if self.state.current.and_then(Orientation::axis).is_none() {
            return Ok(false);
        }

        if self.flinger.axis.take().is_some() {
            self.flinger.scroller.force_finished();
            self.set_scroll_state(ScrollState::Idle);
        }
        self.snap_pending = false;
        self.state.pending_position = Some(position);
        self.fill()?;
        self.notify_item_changed(position);
        Ok(true)
    }

    /// Animates `position` onto the anchor point along the enabled scroll axis.
    ///
    /// Ignored while the app bar is animating, for out-of-range positions, and when no axis is
    /// enabled.
    pub fn smooth_scroll_to_position(&mut self, position: usize, now_ms: u64) -> Result<bool> {
        if !self.laid_out || self.offset_animator.is_some() {
            return Ok(false);
        }
        let Some(count) = self.header.item_count() else {
            return Ok(false);
        };
        if position >= count {
            ndebug!(position, count, "smooth_scroll_to_position out of range");
            return Ok(false);
        }
        let axis = if self.header.is_horizontal_scroll_enabled() {
            Axis::Horizontal
        } else if self.header.is_vertical_scroll_enabled() {
            Axis::Vertical
        } else {
            return Ok(false);
        };
        let Some(index) = anchor::anchor_index(self.header.children(), &self.state.points, axis)
        else {
            return Ok(false);
        };
        let anchor_child = &self.header.children()[index];
        let anchor_pos = anchor_child
            .position()
            .ok_or(HeaderError::MissingViewHolder { child: index })?;
        let anchor_leading = anchor_child.view.frame.leading(axis);

        self.notify_item_changed(position);

        let extent = self.geometry.extent(axis).max(1);
        let point = self.state.points.for_axis(axis).along(axis);
        let start = self.virtual_leading(axis)?.unwrap_or(0);
        let requested = (position as i64 - anchor_pos as i64) * extent as i64
            + (anchor_leading as f32 - point) as i64;
        // The last item never ends short of the container.
        let container = self.geometry.container_extent(axis) as i64;
        let lowest = (container - count as i64 * extent as i64).min(point as i64);
        let offset = start as i64 - (start as i64 - requested).max(lowest);
        if offset == 0 {
            return Ok(false);
        }

        let cards = offset.unsigned_abs() as f32 / extent as f32;
        let duration_ms = (((cards + 1.0) * 100.0) as u64).min(self.config.max_scroll_duration_ms);
        ndebug!(position, anchor_pos, offset, duration_ms, "smooth scroll");
        self.flinger.scroller.start_scroll(
            start,
            saturate(-offset),
            duration_ms,
            Easing::ViscousFluid,
            now_ms,
        );
        self.flinger.axis = Some(axis);
        self.set_scroll_state(ScrollState::Fling);
        Ok(true)
    }

    /// Index of the attached child closest to the current orientation's anchor point.
    pub fn anchor_view_index(&self) -> Option<usize> {
        let axis = self.state.current?.axis()?;
        anchor::anchor_index(self.header.children(), &self.state.points, axis)
    }

    pub fn anchor_position(&self) -> Option<usize> {
        self.anchor_view_index()
            .and_then(|index| self.header.child_at(index))
            .and_then(|child| child.position())
    }

    /// Clicks the anchor card: from the vertical list this animates the header to the middle.
    pub fn collapse(&mut self, now_ms: u64) -> Result<bool> {
        match self.anchor_view_index() {
            Some(index) => self.on_item_click(index, now_ms),
            None => Ok(false),
        }
    }

    /// Moves the app bar to fully expanded or fully collapsed.
    pub fn set_expanded(&mut self, expanded: bool, animate: bool, now_ms: u64) -> Result<()> {
        if !self.laid_out {
            return Ok(());
        }
        let distance = if expanded {
            0
        } else {
            self.geometry.screen_height - self.geometry.tool_bar_height
        };
        if animate {
            self.smooth_offset(distance, self.config.scroll_up_animation_duration_ms, now_ms);
            return Ok(());
        }
        self.offset_animator = None;
        self.set_offset(-distance)?;
        self.on_offset_changing_stopped(-distance, now_ms)
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            app_bar_offset: self.app_bar_offset,
            header_bottom: self.header_bottom(),
            orientation: self.state.current,
            scroll_state: self.state.scroll_state,
            header_state: self.header_state,
            anchor_position: self.anchor_position(),
            children: self
                .header
                .children()
                .iter()
                .map(|child| ChildSnapshot {
                    position: child.position(),
                    frame: child.view.frame,
                    elevation: child.view.elevation,
                })
                .collect(),
        }
    }

    /// Puts the app bar and the anchor card back where `snapshot` saw them.
    ///
    /// Running motion is dropped and the app bar is treated as having stopped at the snapshot
    /// offset at `now_ms`, so an offset between landmarks starts the usual snap. Returns whether
    /// the anchor position was restored or queued for the next discrete fill.
    pub fn restore_snapshot(&mut self, snapshot: &LayoutSnapshot, now_ms: u64) -> Result<bool> {
        if !self.laid_out {
            return Ok(false);
        }
        self.stop_flinger();
        self.offset_animator = None;
        self.snap_pending = false;
        self.set_offset(snapshot.app_bar_offset)?;
        self.on_offset_changing_stopped(self.app_bar_offset, now_ms)?;
        ndebug!(
            offset = self.app_bar_offset,
            anchor = ?snapshot.anchor_position,
            "restore snapshot"
        );
        let Some(position) = snapshot.anchor_position else {
            return Ok(false);
        };
        if self.state.current.and_then(Orientation::axis).is_some() {
            return self.scroll_to_position(position);
        }
        // Transitional: the next discrete fill places it.
        match self.header.item_count() {
            Some(count) if position < count => {
                self.state.pending_position = Some(position);
                self.notify_item_changed(position);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn set_offset(&mut self, offset: i32) -> Result<()> {
        let offset = offset.clamp(self.geometry.min_offset(), 0);
        if offset == self.app_bar_offset {
            return Ok(());
        }
        self.app_bar_offset = offset;
        self.offset_changed = true;
        self.on_dependent_changed()
    }

    /// Reacts to a new header bottom: transform first, then a discrete fill unless transitional.
    fn on_dependent_changed(&mut self) -> Result<()> {
        self.stop_flinger();

        let bottom = self.header_bottom();
        self.header.set_translation_y(bottom - self.header.height());

        let orientation = self.geometry.orientation(bottom);
        if self.state.current != Some(orientation) {
            ndebug!(?orientation, bottom, "orientation changed");
        }
        self.state.current = Some(orientation);
        if orientation != Orientation::Transitional {
            self.state.sticky = Some(orientation);
        }

        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_header_changed(bottom);
        }
        self.transform(bottom);
        self.fill()
    }

    fn transform(&mut self, header_bottom: i32) {
        let Some(transformer) = self.transformer.as_deref_mut() else {
            return;
        };
        let ctx = LayoutContext {
            geometry: &self.geometry,
            points: self.state.points,
            orientation: self.state.sticky,
        };
        transformer.transform(&mut self.header, &ctx, header_bottom);
        self.state.stats.transform_passes += 1;
    }

    /// Leading edge item 0 would have, extrapolated from the first attached child.
    fn virtual_leading(&self, axis: Axis) -> Result<Option<i32>> {
        let Some(first) = self.header.children().first() else {
            return Ok(None);
        };
        let position = first
            .position()
            .ok_or(HeaderError::MissingViewHolder { child: 0 })?;
        let leading = first.view.frame.leading(axis) as i64
            - position as i64 * self.geometry.extent(axis) as i64;
        Ok(Some(saturate(leading)))
    }

    /// Clamps a drag so content never leaves a gap before item 0 or after the last item.
    fn clamped_scroll_offset(&self, axis: Axis, distance: f32) -> Result<i32> {
        let Some(count) = self.header.item_count() else {
            return Ok(0);
        };
        let children = self.header.children();
        let (Some(first), Some(last)) = (children.first(), children.last()) else {
            return Ok(0);
        };
        let first_pos = first
            .position()
            .ok_or(HeaderError::MissingViewHolder { child: 0 })?;
        let last_pos = last.position().ok_or(HeaderError::MissingViewHolder {
            child: children.len() - 1,
        })?;

        let extent = self.geometry.extent(axis) as i64;
        let container = self.geometry.container_extent(axis) as i64;
        let leading = first.view.frame.leading(axis) as i64 - first_pos as i64 * extent;
        let remaining = (count as i64 - 1 - last_pos as i64).max(0);
        let trailing = last.view.frame.trailing(axis) as i64 + remaining * extent;
        let requested = distance as i64;

        let offset = if distance >= 0.0 {
            if trailing <= container {
                0
            } else if trailing as f32 - distance > container as f32 {
                requested
            } else {
                trailing - container
            }
        } else if leading > 0 {
            0
        } else if (leading as f32 - distance) < 0.0 {
            requested
        } else {
            leading
        };
        Ok(saturate(offset))
    }

    fn on_header_down(&mut self) -> bool {
        self.stop_flinger();
        if self.offset_animator.take().is_some() {
            self.offset_changed = true;
        }
        self.snap_pending = false;
        self.header.child_count() > 0
    }

    fn on_header_up(&mut self) -> bool {
        if self.state.scroll_state != ScrollState::Fling {
            let dragging = self.state.scroll_state == ScrollState::Dragging;
            self.set_scroll_state(ScrollState::Idle);
            if dragging {
                self.request_snap();
            }
        }
        true
    }

    fn on_header_scroll(&mut self, axis: Axis, distance: f32) -> Result<bool> {
        if self.header.child_count() == 0 {
            return Ok(false);
        }
        if self.flinger.axis.take().is_some() {
            self.flinger.scroller.abort();
        }
        self.snap_pending = false;
        self.set_scroll_state(ScrollState::Dragging);

        let offset = self.clamped_scroll_offset(axis, distance)?;
        ntrace!(?axis, distance, offset, "scroll");
        match axis {
            Axis::Horizontal => self.header.offset_children(-offset, 0),
            Axis::Vertical => self.header.offset_children(0, -offset),
        }
        self.fill()?;
        Ok(true)
    }

    fn on_header_fling(&mut self, axis: Axis, velocity: f32, now_ms: u64) -> Result<bool> {
        let Some(count) = self.header.item_count() else {
            return Ok(false);
        };
        let Some(start) = self.virtual_leading(axis)? else {
            return Ok(false);
        };
        let extent = self.geometry.extent(axis) as i64;
        let container = self.geometry.container_extent(axis) as i64;
        let min = saturate((container - count as i64 * extent).min(start as i64));
        let max = start.max(0);

        self.snap_pending = false;
        self.flinger.scroller.fling(start, velocity, min, max, now_ms);
        self.flinger.axis = Some(axis);
        self.set_scroll_state(ScrollState::Fling);
        Ok(true)
    }

    fn on_item_click(&mut self, child: usize, now_ms: u64) -> Result<bool> {
        let Some(holder) = self.header.child_at(child) else {
            return Ok(false);
        };
        let position = holder
            .position()
            .ok_or(HeaderError::MissingViewHolder { child })?;
        ndebug!(child, position, "item click");

        if self.header.is_horizontal_scroll_enabled() {
            self.smooth_scroll_to_position(position, now_ms)?;
        } else if self.header.is_vertical_scroll_enabled() {
            if let Some(transformer) = self.transformer.as_deref_mut() {
                let ctx = LayoutContext {
                    geometry: &self.geometry,
                    points: self.state.points,
                    orientation: self.state.sticky,
                };
                transformer.on_item_click(&self.header, &ctx, child);
            }
            self.smooth_offset(
                self.geometry.screen_half,
                self.config.scroll_up_animation_duration_ms,
                now_ms,
            );
        } else {
            return Ok(false);
        }

        if let Some(observer) = self.observer.as_deref_mut() {
            if let Some(holder) = self.header.child_at(child) {
                observer.on_item_click(holder);
            }
        }
        Ok(true)
    }

    fn stop_flinger(&mut self) {
        if self.flinger.axis.take().is_some() {
            self.flinger.scroller.abort();
            self.set_scroll_state(ScrollState::Idle);
        }
    }

    fn run_flinger(&mut self, now_ms: u64) -> Result<()> {
        let Some(axis) = self.flinger.axis else {
            return Ok(());
        };
        let before = self.flinger.scroller.current();
        if !self.flinger.scroller.compute_scroll_offset(now_ms) {
            self.flinger.axis = None;
            self.set_scroll_state(ScrollState::Idle);
            self.request_snap();
            return Ok(());
        }
        let diff = self.flinger.scroller.current() - before;
        if diff != 0 {
            match axis {
                Axis::Horizontal => self.header.offset_children(diff, 0),
                Axis::Vertical => self.header.offset_children(0, diff),
            }
            self.fill()?;
        }
        Ok(())
    }

    /// Animates the app bar so the header is `distance` px collapsed.
    fn smooth_offset(&mut self, distance: i32, duration_ms: u64, now_ms: u64) {
        let target = -distance;
        ndebug!(from = self.app_bar_offset, to = target, duration_ms, "smooth offset");
        self.offset_animator = Some(Tween::new(
            self.app_bar_offset,
            target,
            now_ms,
            duration_ms,
            Easing::AccelerateDecelerate,
        ));
        self.header.set_scroll_enabled(false, false);
    }

    fn run_offset_animator(&mut self, now_ms: u64) -> Result<()> {
        let Some(tween) = self.offset_animator else {
            return Ok(());
        };
        self.set_offset(tween.sample(now_ms))?;
        if tween.is_done(now_ms) {
            self.offset_animator = None;
            self.on_offset_changing_stopped(tween.to, now_ms)?;
        }
        Ok(())
    }

    fn run_stop_check(&mut self, now_ms: u64) -> Result<()> {
        match self.stop_check {
            Some(check) if now_ms >= check.deadline_ms => {
                self.stop_check = None;
                if self.app_bar_offset == check.start_offset && self.offset_animator.is_none() {
                    self.on_offset_changing_stopped(self.app_bar_offset, now_ms)?;
                }
            }
            Some(_) => {}
            None => {
                if self.offset_changed {
                    self.offset_changed = false;
                    self.stop_check = Some(StopCheck {
                        start_offset: self.app_bar_offset,
                        deadline_ms: now_ms.saturating_add(self.config.scroll_stop_check_delay_ms),
                    });
                }
            }
        }
        Ok(())
    }

    /// Locks scroll flags on a landmark or starts the snap animation toward one.
    fn on_offset_changing_stopped(&mut self, offset: i32, now_ms: u64) -> Result<()> {
        let g = self.geometry;
        let inverted = g.screen_height + offset;
        let mut horizontal = false;
        let mut vertical = false;

        if inverted == g.screen_height {
            vertical = true;
            self.can_drag = false;
            self.set_header_state(HeaderState::Expanded);
        } else if inverted == g.screen_half {
            horizontal = true;
            self.can_drag = false;
            self.set_header_state(HeaderState::Middle);
        } else if inverted == g.tool_bar_height {
            horizontal = true;
            self.can_drag = true;
            self.set_header_state(HeaderState::Collapsed);
        } else if inverted >= g.tool_bar_height && inverted < g.top_snap_distance {
            self.smooth_offset(g.work_height, self.config.snap_animation_duration_ms, now_ms);
        } else if inverted >= g.top_snap_distance && inverted < g.bottom_snap_distance {
            self.smooth_offset(g.screen_half, self.config.snap_animation_duration_ms, now_ms);
        } else {
            self.smooth_offset(0, self.config.snap_animation_duration_ms, now_ms);
        }

        ndebug!(inverted, horizontal, vertical, "offset changing stopped");
        self.header.set_scroll_enabled(horizontal, vertical);
        Ok(())
    }

    fn request_snap(&mut self) {
        if self.config.snap_to_anchor {
            self.snap_pending = true;
        }
    }

    fn run_pending_snap(&mut self, now_ms: u64) -> Result<()> {
        if !core::mem::take(&mut self.snap_pending) {
            return Ok(());
        }
        if let Some(position) = self.anchor_position() {
            self.smooth_scroll_to_position(position, now_ms)?;
        }
        Ok(())
    }

    fn set_scroll_state(&mut self, state: ScrollState) {
        if self.state.scroll_state == state {
            return;
        }
        ntrace!(from = ?self.state.scroll_state, to = ?state, "scroll state");
        self.state.scroll_state = state;
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_scroll_state_changed(state);
        }
    }

    fn set_header_state(&mut self, state: HeaderState) {
        if self.header_state == Some(state) {
            return;
        }
        self.header_state = Some(state);
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_header_state_changed(state);
        }
    }

    fn notify_item_changed(&mut self, position: usize) {
        if self.last_item_changed == Some(position) {
            return;
        }
        self.last_item_changed = Some(position);
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_item_changed(position);
        }
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

fn offset_for_state(geometry: &Geometry, state: HeaderState) -> i32 {
    match state {
        HeaderState::Expanded => 0,
        HeaderState::Middle => geometry.offset_for_bottom(geometry.screen_half),
        HeaderState::Collapsed => geometry.min_offset(),
    }
}

impl core::fmt::Debug for HeaderLayoutManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HeaderLayoutManager")
            .field("config", &self.config)
            .field("header", &self.header)
            .field("laid_out", &self.laid_out)
            .field("app_bar_offset", &self.app_bar_offset)
            .field("orientation", &self.state.current)
            .field("scroll_state", &self.state.scroll_state)
            .field("header_state", &self.header_state)
            .field("stats", &self.state.stats)
            .finish_non_exhaustive()
    }
}
