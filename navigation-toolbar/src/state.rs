use alloc::vec::Vec;

use crate::{HeaderState, Orientation, Rect, ScrollState};

/// One attached card at snapshot time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChildSnapshot {
    pub position: Option<usize>,
    pub frame: Rect,
    pub elevation: f32,
}

/// A serializable picture of the header layout.
///
/// Useful for golden tests. [`HeaderLayoutManager::restore_snapshot`] puts the app bar and the
/// anchor card back from one, for example across sessions.
///
/// [`HeaderLayoutManager::restore_snapshot`]: crate::HeaderLayoutManager::restore_snapshot
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutSnapshot {
    pub app_bar_offset: i32,
    pub header_bottom: i32,
    pub orientation: Option<Orientation>,
    pub scroll_state: ScrollState,
    pub header_state: Option<HeaderState>,
    pub anchor_position: Option<usize>,
    pub children: Vec<ChildSnapshot>,
}

impl LayoutSnapshot {
    /// Positions of the attached cards, in child order.
    pub fn positions(&self) -> Vec<Option<usize>> {
        self.children.iter().map(|child| child.position).collect()
    }
}
