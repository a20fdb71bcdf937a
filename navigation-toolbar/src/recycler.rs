use crate::{Insets, Rect, Size};

/// Stable identity of a view holder for its whole lifetime (across recycling).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HolderId(pub u64);

/// Presentation of a card's title overlay, relative to the card frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Overlay {
    pub x: f32,
    pub y: f32,
    pub alpha: f32,
    pub scale: f32,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            alpha: 1.0,
            scale: 1.0,
        }
    }
}

/// Render state of one card.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct View {
    /// Frame in header-container coordinates.
    pub frame: Rect,
    pub elevation: f32,
    pub overlay: Option<Overlay>,
}

/// A reusable card: one view plus the position it is currently bound to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewHolder {
    pub(crate) id: HolderId,
    pub(crate) position: Option<usize>,
    pub(crate) decor_insets: Insets,
    pub(crate) decor_valid: bool,
    pub view: View,
    /// Intrinsic size of the title label, if the card carries one.
    pub title: Option<Size>,
}

impl ViewHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(title: Size) -> Self {
        Self {
            title: Some(title),
            ..Self::default()
        }
    }

    pub fn id(&self) -> HolderId {
        self.id
    }

    /// Adapter position this holder is bound to. `None` while pooled.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn frame(&self) -> Rect {
        self.view.frame
    }

    pub fn decor_insets(&self) -> Insets {
        self.decor_insets
    }

    /// Frame shrunk by the item decoration insets.
    pub fn content_frame(&self) -> Rect {
        self.view.frame.inset(self.decor_insets)
    }
}

/// Consumer-side data source for the header cards.
pub trait HeaderAdapter {
    fn item_count(&self) -> usize;

    /// Creates a fresh holder. The recycler assigns its id.
    fn create_view_holder(&mut self) -> ViewHolder;

    /// Rebinds `holder` to the item at `position`. The holder's position is already updated.
    fn bind_view_holder(&mut self, holder: &mut ViewHolder, position: usize);

    fn on_view_recycled(&mut self, _holder: &mut ViewHolder) {}
}

/// Free list of detached view holders.
///
/// Holders are interchangeable (a single view type), so any pooled holder can be bound to any
/// position.
#[derive(Debug, Default)]
pub struct Recycler {
    pool: Vec<ViewHolder>,
    next_id: u64,
    created: usize,
}

impl Recycler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a holder bound to `position`, reusing a pooled one when possible.
    pub fn view_for_position(
        &mut self,
        adapter: &mut dyn HeaderAdapter,
        position: usize,
    ) -> ViewHolder {
        let mut holder = match self.pool.pop() {
            Some(holder) => holder,
            None => self.create_view_holder(adapter),
        };
        Self::bind_view_holder(adapter, &mut holder, position);
        holder
    }

    pub fn create_view_holder(&mut self, adapter: &mut dyn HeaderAdapter) -> ViewHolder {
        let mut holder = adapter.create_view_holder();
        holder.id = HolderId(self.next_id);
        holder.position = None;
        holder.decor_valid = false;
        self.next_id += 1;
        self.created += 1;
        ntrace!(id = holder.id.0, "create view holder");
        holder
    }

    pub fn bind_view_holder(
        adapter: &mut dyn HeaderAdapter,
        holder: &mut ViewHolder,
        position: usize,
    ) {
        holder.position = Some(position);
        holder.decor_valid = false;
        adapter.bind_view_holder(holder, position);
    }

    /// Hands `holder` back to the adapter and, when `cache` is set, keeps it for reuse.
    pub fn recycle_view(
        &mut self,
        adapter: &mut dyn HeaderAdapter,
        mut holder: ViewHolder,
        cache: bool,
    ) {
        adapter.on_view_recycled(&mut holder);
        if cache {
            holder.position = None;
            holder.decor_valid = false;
            self.pool.push(holder);
        }
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }

    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    /// Total holders ever created through this recycler.
    pub fn created(&self) -> usize {
        self.created
    }
}
