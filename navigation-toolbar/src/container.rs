use crate::recycler::{HeaderAdapter, Recycler, ViewHolder};
use crate::{HeaderError, Rect, Result};

/// Raw pointer input, in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TouchEvent {
    Down { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    /// Incremental drag; positive distances mean the finger moved left/up.
    Scroll { distance_x: f32, distance_y: f32 },
    /// Release velocity in px/s; positive means the finger moved right/down.
    Fling { velocity_x: f32, velocity_y: f32 },
    SingleTapUp { x: f32, y: f32 },
}

/// A touch event routed by the container's scroll flags.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeaderGesture {
    Down,
    Up,
    Scroll { axis: crate::Axis, distance: f32 },
    Fling { axis: crate::Axis, velocity: f32 },
    /// Tap on the attached child at this index.
    ItemClick { child: usize },
}

/// The header view: owns the attached children, the recycler and the adapter.
///
/// Children are kept in ascending position order. The container never lays anything out by
/// itself; the layout manager decides frames and calls back in.
pub struct HeaderContainer {
    width: i32,
    height: i32,
    translation_y: i32,
    children: Vec<ViewHolder>,
    recycler: Recycler,
    adapter: Option<Box<dyn HeaderAdapter>>,
    horizontal_scroll_enabled: bool,
    vertical_scroll_enabled: bool,
}

impl Default for HeaderContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderContainer {
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            translation_y: 0,
            children: Vec::new(),
            recycler: Recycler::new(),
            adapter: None,
            horizontal_scroll_enabled: false,
            vertical_scroll_enabled: false,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub(crate) fn set_size(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    /// Screen y of the container's top edge.
    pub fn translation_y(&self) -> i32 {
        self.translation_y
    }

    pub(crate) fn set_translation_y(&mut self, y: i32) {
        self.translation_y = y;
    }

    pub fn is_horizontal_scroll_enabled(&self) -> bool {
        self.horizontal_scroll_enabled
    }

    pub fn is_vertical_scroll_enabled(&self) -> bool {
        self.vertical_scroll_enabled
    }

    pub(crate) fn set_scroll_enabled(&mut self, horizontal: bool, vertical: bool) {
        self.horizontal_scroll_enabled = horizontal;
        self.vertical_scroll_enabled = vertical;
    }

    pub fn children(&self) -> &[ViewHolder] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [ViewHolder] {
        &mut self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn child_at(&self, index: usize) -> Option<&ViewHolder> {
        self.children.get(index)
    }

    /// Index of the attached child bound to `position`.
    pub fn index_of_position(&self, position: usize) -> Option<usize> {
        self.children
            .iter()
            .position(|child| child.position() == Some(position))
    }

    pub fn recycler(&self) -> &Recycler {
        &self.recycler
    }

    pub fn has_adapter(&self) -> bool {
        self.adapter.is_some()
    }

    /// Current item count, `None` without an adapter.
    pub fn item_count(&self) -> Option<usize> {
        self.adapter.as_deref().map(|adapter| adapter.item_count())
    }

    /// Swaps the adapter. Every attached and pooled holder belonged to the old adapter and is
    /// dropped after being handed back to it.
    pub fn set_adapter(
        &mut self,
        adapter: Option<Box<dyn HeaderAdapter>>,
    ) -> Option<Box<dyn HeaderAdapter>> {
        self.recycle_all();
        self.recycler.clear();
        core::mem::replace(&mut self.adapter, adapter)
    }

    /// A holder bound to `position`, from the pool or freshly created.
    pub fn obtain_view(&mut self, position: usize) -> Result<ViewHolder> {
        let adapter = self.adapter.as_deref_mut().ok_or(HeaderError::NoAdapter)?;
        Ok(self.recycler.view_for_position(adapter, position))
    }

    /// Pools `holder` for reuse.
    pub fn recycle_view(&mut self, holder: ViewHolder) -> Result<()> {
        let adapter = self.adapter.as_deref_mut().ok_or(HeaderError::NoAdapter)?;
        self.recycler.recycle_view(adapter, holder, true);
        Ok(())
    }

    pub(crate) fn add_view(&mut self, holder: ViewHolder) {
        ntrace!(id = holder.id().0, position = ?holder.position(), "add view");
        self.children.push(holder);
    }

    pub(crate) fn detach_view(&mut self, index: usize) -> Option<ViewHolder> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    pub(crate) fn detach_all(&mut self) -> Vec<ViewHolder> {
        core::mem::take(&mut self.children)
    }

    /// Detaches the child at `index` and pools it.
    pub fn remove_view(&mut self, index: usize) -> Result<()> {
        match self.detach_view(index) {
            Some(holder) => self.recycle_view(holder),
            None => Ok(()),
        }
    }

    /// Detaches every child and hands it back to the adapter without pooling.
    pub fn recycle_all(&mut self) {
        let children = core::mem::take(&mut self.children);
        if let Some(adapter) = self.adapter.as_deref_mut() {
            for holder in children {
                self.recycler.recycle_view(adapter, holder, false);
            }
        }
    }

    pub(crate) fn offset_children(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        for child in &mut self.children {
            child.view.frame = child.view.frame.offset(dx, dy);
        }
    }

    /// Screen-space frame of an attached child.
    pub fn screen_frame(&self, index: usize) -> Option<Rect> {
        self.children
            .get(index)
            .map(|child| child.view.frame.offset(0, self.translation_y))
    }

    /// Attached child under a screen point.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        (0..self.children.len()).find(|&index| {
            self.screen_frame(index)
                .is_some_and(|frame| frame.contains(x, y))
        })
    }

    /// Routes a touch event to a header gesture.
    ///
    /// Scroll and fling are delivered only along the enabled axis (horizontal wins when both are
    /// set). A tap that lands on a child without a bound position is a fault.
    pub fn translate(&self, event: TouchEvent) -> Result<Option<HeaderGesture>> {
        let gesture = match event {
            TouchEvent::Down { .. } => Some(HeaderGesture::Down),
            TouchEvent::Up { .. } => Some(HeaderGesture::Up),
            TouchEvent::Scroll {
                distance_x,
                distance_y,
            } => self.enabled_axis().map(|axis| HeaderGesture::Scroll {
                axis,
                distance: match axis {
                    crate::Axis::Horizontal => distance_x,
                    crate::Axis::Vertical => distance_y,
                },
            }),
            TouchEvent::Fling {
                velocity_x,
                velocity_y,
            } => self.enabled_axis().map(|axis| HeaderGesture::Fling {
                axis,
                velocity: match axis {
                    crate::Axis::Horizontal => velocity_x,
                    crate::Axis::Vertical => velocity_y,
                },
            }),
            TouchEvent::SingleTapUp { x, y } => match self.hit_test(x, y) {
                Some(child) => {
                    if self.children[child].position().is_none() {
                        return Err(HeaderError::MissingViewHolder { child });
                    }
                    Some(HeaderGesture::ItemClick { child })
                }
                None => None,
            },
        };
        Ok(gesture)
    }

    fn enabled_axis(&self) -> Option<crate::Axis> {
        if self.horizontal_scroll_enabled {
            Some(crate::Axis::Horizontal)
        } else if self.vertical_scroll_enabled {
            Some(crate::Axis::Vertical)
        } else {
            None
        }
    }
}

impl core::fmt::Debug for HeaderContainer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HeaderContainer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("translation_y", &self.translation_y)
            .field("children", &self.children.len())
            .field("pooled", &self.recycler.pooled())
            .field("has_adapter", &self.adapter.is_some())
            .field("horizontal_scroll_enabled", &self.horizontal_scroll_enabled)
            .field("vertical_scroll_enabled", &self.vertical_scroll_enabled)
            .finish_non_exhaustive()
    }
}
