/// Layout mode of the header, derived from how far the app bar is expanded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Full-width cards laid out side by side (`ratio <= 0.5`).
    Horizontal,
    /// Narrow rows stacked top to bottom (`ratio >= 1.0`).
    Vertical,
    /// Between the two; no discrete fill runs, only the item transformer.
    Transitional,
}

impl Orientation {
    /// Scroll axis of a discrete orientation. `Transitional` has none.
    pub fn axis(self) -> Option<Axis> {
        match self {
            Self::Horizontal => Some(Axis::Horizontal),
            Self::Vertical => Some(Axis::Vertical),
            Self::Transitional => None,
        }
    }
}

/// Maps the header expansion ratio to an orientation.
///
/// `ratio` is `header_bottom / screen_height`. Ties go to the discrete orientations: `0.5`
/// is horizontal and `1.0` is vertical.
pub fn derive_orientation(ratio: f32) -> Orientation {
    if ratio <= 0.5 {
        Orientation::Horizontal
    } else if ratio < 1.0 {
        Orientation::Transitional
    } else {
        Orientation::Vertical
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollState {
    #[default]
    Idle,
    Dragging,
    Fling,
}

/// Landmark the app bar has settled on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeaderState {
    #[default]
    Expanded,
    Middle,
    Collapsed,
}

/// Horizontal placement of the vertical list inside the header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalGravity {
    Left,
    Center,
    #[default]
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    pub fn lerp(self, to: Point, t: f32) -> Point {
        Point {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Per-side spacing reported by item decorations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn add(self, other: Insets) -> Insets {
        Insets {
            left: self.left + other.left,
            top: self.top + other.top,
            right: self.right + other.right,
            bottom: self.bottom + other.bottom,
        }
    }
}

/// Integer frame in header-container coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Leading edge along `axis` (left or top).
    pub fn leading(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Trailing edge along `axis` (right or bottom).
    pub fn trailing(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.right(),
            Axis::Vertical => self.bottom(),
        }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Rect {
        Rect {
            left: self.left + dx,
            top: self.top + dy,
            ..self
        }
    }

    /// Half-open hit test: the left and top edges are inside, right and bottom are not.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left as f32
            && x < self.right() as f32
            && y >= self.top as f32
            && y < self.bottom() as f32
    }

    pub fn inset(self, insets: Insets) -> Rect {
        Rect {
            left: self.left + insets.left,
            top: self.top + insets.top,
            width: (self.width - insets.left - insets.right).max(0),
            height: (self.height - insets.top - insets.bottom).max(0),
        }
    }
}
