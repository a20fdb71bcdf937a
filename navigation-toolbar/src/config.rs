use crate::{Axis, HeaderState, Orientation, Point, VerticalGravity};

/// Configuration for [`crate::HeaderLayoutManager`].
///
/// Screen metrics are host-provided pixels. Everything else has defaults tuned for a phone-sized
/// header: five vertical rows on screen, one extra card kept attached on each side.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    /// Height of the collapsed app bar (the toolbar strip).
    pub tool_bar_height: i32,

    /// Rows visible at once in the vertical list. Also sets the vertical row height.
    pub tab_on_screen_count: usize,
    /// Extra positions kept attached beyond the visible window on each side.
    pub tab_off_screen_count: usize,
    pub vertical_tab_width_ratio: f32,
    pub vertical_gravity: VerticalGravity,

    /// Debounce before an unchanged app-bar offset counts as "stopped".
    pub scroll_stop_check_delay_ms: u64,
    /// Duration of the app-bar animation started by an item click in vertical mode.
    pub scroll_up_animation_duration_ms: u64,
    /// Duration of the app-bar animation that snaps a released offset onto a landmark.
    pub snap_animation_duration_ms: u64,
    /// Upper bound for `smooth_scroll_to_position` animations.
    pub max_scroll_duration_ms: u64,

    /// Deceleration friction of the fling scroller.
    pub fling_friction: f32,
    /// Display density (1.0 = 160 dpi). Scales fling deceleration.
    pub density: f32,

    pub initial_state: HeaderState,
    /// Smooth-scroll the anchor onto its anchor point after a drag or fling ends.
    pub snap_to_anchor: bool,
}

impl HeaderConfig {
    pub fn new(screen_width: i32, screen_height: i32, tool_bar_height: i32) -> Self {
        Self {
            screen_width,
            screen_height,
            tool_bar_height,
            tab_on_screen_count: 5,
            tab_off_screen_count: 1,
            vertical_tab_width_ratio: 0.8,
            vertical_gravity: VerticalGravity::Right,
            scroll_stop_check_delay_ms: 100,
            scroll_up_animation_duration_ms: 500,
            snap_animation_duration_ms: 300,
            max_scroll_duration_ms: 600,
            fling_friction: 0.015,
            density: 1.0,
            initial_state: HeaderState::Expanded,
            snap_to_anchor: true,
        }
    }

    pub fn with_tab_counts(mut self, on_screen: usize, off_screen: usize) -> Self {
        self.tab_on_screen_count = on_screen.max(1);
        self.tab_off_screen_count = off_screen;
        self
    }

    pub fn with_vertical_tab_width_ratio(mut self, ratio: f32) -> Self {
        self.vertical_tab_width_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn with_vertical_gravity(mut self, gravity: VerticalGravity) -> Self {
        self.vertical_gravity = gravity;
        self
    }

    pub fn with_scroll_stop_check_delay_ms(mut self, delay_ms: u64) -> Self {
        self.scroll_stop_check_delay_ms = delay_ms;
        self
    }

    pub fn with_scroll_up_animation_duration_ms(mut self, duration_ms: u64) -> Self {
        self.scroll_up_animation_duration_ms = duration_ms;
        self
    }

    pub fn with_snap_animation_duration_ms(mut self, duration_ms: u64) -> Self {
        self.snap_animation_duration_ms = duration_ms;
        self
    }

    pub fn with_max_scroll_duration_ms(mut self, duration_ms: u64) -> Self {
        self.max_scroll_duration_ms = duration_ms.max(1);
        self
    }

    pub fn with_fling_friction(mut self, friction: f32) -> Self {
        self.fling_friction = friction;
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_initial_state(mut self, state: HeaderState) -> Self {
        self.initial_state = state;
        self
    }

    pub fn with_snap_to_anchor(mut self, snap: bool) -> Self {
        self.snap_to_anchor = snap;
        self
    }
}

/// Reference coordinates the anchor child is aligned to, one per discrete orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorPoints {
    pub horizontal: Point,
    pub vertical: Point,
}

impl AnchorPoints {
    pub fn for_axis(&self, axis: Axis) -> Point {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }
}

/// Pixel metrics derived from [`HeaderConfig`] and the container size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    pub screen_width: i32,
    pub screen_height: i32,
    pub screen_half: i32,
    pub tool_bar_height: i32,
    /// Height the app bar travels between collapsed and expanded.
    pub work_height: i32,

    pub container_width: i32,
    pub container_height: i32,

    pub horizontal_tab_width: i32,
    pub horizontal_tab_height: i32,
    pub vertical_tab_width: i32,
    pub vertical_tab_height: i32,

    /// Index of the anchor slot within the visible vertical rows.
    pub center_index: usize,
    pub off_screen_count: usize,

    /// Header bottoms splitting the settle bands.
    pub top_snap_distance: i32,
    pub bottom_snap_distance: i32,

    pub points: AnchorPoints,
}

impl Geometry {
    pub fn new(config: &HeaderConfig, container_width: i32, container_height: i32) -> Self {
        let on_screen = config.tab_on_screen_count.max(1);
        let screen_half_f = config.screen_height as f32 / 2.0;
        let screen_half = screen_half_f as i32;
        let tool_bar = config.tool_bar_height;

        let vertical_tab_height = (config.screen_height as f32 / on_screen as f32) as i32;
        let vertical_tab_width =
            (config.screen_width as f32 * config.vertical_tab_width_ratio) as i32;
        let center_index = on_screen / 2;

        let top_snap_distance = (tool_bar as f32 + (screen_half_f - tool_bar as f32) / 2.0) as i32;
        let bottom_snap_distance = (screen_half_f + screen_half_f / 2.0) as i32;

        let vertical_x = match config.vertical_gravity {
            VerticalGravity::Left => 0,
            VerticalGravity::Center => (container_width - vertical_tab_width) / 2,
            VerticalGravity::Right => container_width - vertical_tab_width,
        };
        let points = AnchorPoints {
            horizontal: Point::new(0.0, screen_half_f),
            vertical: Point::new(
                vertical_x as f32,
                (vertical_tab_height as usize * center_index) as f32,
            ),
        };

        Self {
            screen_width: config.screen_width,
            screen_height: config.screen_height,
            screen_half,
            tool_bar_height: tool_bar,
            work_height: config.screen_height - tool_bar,
            container_width,
            container_height,
            horizontal_tab_width: config.screen_width,
            horizontal_tab_height: screen_half,
            vertical_tab_width,
            vertical_tab_height,
            center_index,
            off_screen_count: config.tab_off_screen_count,
            top_snap_distance,
            bottom_snap_distance,
            points,
        }
    }

    /// Card extent along the scroll axis.
    pub fn extent(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.horizontal_tab_width,
            Axis::Vertical => self.vertical_tab_height,
        }
    }

    /// Container extent along the scroll axis.
    pub fn container_extent(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.container_width,
            Axis::Vertical => self.container_height,
        }
    }

    /// Most negative app-bar offset (fully collapsed).
    pub fn min_offset(&self) -> i32 {
        -(self.screen_height - self.tool_bar_height)
    }

    /// App-bar offset that puts the header bottom at `bottom`.
    pub fn offset_for_bottom(&self, bottom: i32) -> i32 {
        bottom - self.screen_height
    }

    pub fn ratio(&self, header_bottom: i32) -> f32 {
        if self.screen_height <= 0 {
            return 0.0;
        }
        (header_bottom as f32 / self.screen_height as f32).max(0.0)
    }

    pub fn orientation(&self, header_bottom: i32) -> Orientation {
        crate::derive_orientation(self.ratio(header_bottom))
    }

    /// Positions kept attached on each side of the anchor.
    pub fn window_radius(&self) -> usize {
        self.center_index + self.off_screen_count
    }
}
