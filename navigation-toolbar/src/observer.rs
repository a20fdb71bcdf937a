use crate::recycler::ViewHolder;
use crate::{HeaderState, Insets, ScrollState};

/// Callbacks from the layout manager. Every method has an empty default.
pub trait HeaderObserver {
    /// The header bottom moved (raw app-bar offset change).
    fn on_header_changed(&mut self, _header_bottom: i32) {}
    /// A discrete fill finished at this header bottom.
    fn on_header_updated(&mut self, _header_bottom: i32) {}
    fn on_scroll_state_changed(&mut self, _state: ScrollState) {}
    fn on_header_state_changed(&mut self, _state: HeaderState) {}
    /// A new position became the scroll target.
    fn on_item_changed(&mut self, _position: usize) {}
    fn on_item_click(&mut self, _holder: &ViewHolder) {}
}

/// Observer callbacks flattened to values, for logging and replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeaderEvent {
    HeaderChanged { header_bottom: i32 },
    HeaderUpdated { header_bottom: i32 },
    ScrollStateChanged(ScrollState),
    HeaderStateChanged(HeaderState),
    ItemChanged { position: usize },
    ItemClick { position: Option<usize> },
}

/// Extra spacing around a card's content. Summed over all registered decorations.
pub trait ItemDecoration {
    fn item_offsets(&self, holder: &ViewHolder) -> Insets;
}

/// Same inset on every card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UniformSpacing(pub Insets);

impl ItemDecoration for UniformSpacing {
    fn item_offsets(&self, _holder: &ViewHolder) -> Insets {
        self.0
    }
}
