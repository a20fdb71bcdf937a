use navigation_toolbar::{
    DefaultItemTransformer, HeaderAdapter, HeaderConfig, HeaderLayoutManager, HeaderObserver,
    ItemDecoration, ItemTransformer, Result, TouchEvent,
};

/// Outcome of [`NavigationToolBar::settle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SettleReport {
    /// Timestamp of the last tick.
    pub now_ms: u64,
    pub frames: u32,
    /// `false` when `max_frames` ran out with motion still pending.
    pub settled: bool,
}

/// A framework-neutral facade over [`HeaderLayoutManager`].
///
/// This type does not hold any UI objects. A widget binding drives it by calling:
/// - `layout` when the header container is measured
/// - `on_app_bar_offset_changed` / `on_touch` when UI events occur
/// - `tick(now_ms)` each frame while it returns `true`
///
/// and renders the layout manager's container children.
#[derive(Debug)]
pub struct NavigationToolBar {
    lm: HeaderLayoutManager,
}

impl NavigationToolBar {
    pub fn new(config: HeaderConfig) -> Self {
        Self {
            lm: HeaderLayoutManager::new(config),
        }
    }

    pub fn from_layout_manager(lm: HeaderLayoutManager) -> Self {
        Self { lm }
    }

    pub fn layout_manager(&self) -> &HeaderLayoutManager {
        &self.lm
    }

    pub fn layout_manager_mut(&mut self) -> &mut HeaderLayoutManager {
        &mut self.lm
    }

    pub fn into_layout_manager(self) -> HeaderLayoutManager {
        self.lm
    }

    pub fn layout(&mut self, width: i32, height: i32, now_ms: u64) -> Result<()> {
        self.lm.layout(width, height, now_ms)
    }

    pub fn set_adapter(&mut self, adapter: impl HeaderAdapter + 'static) -> Result<()> {
        self.lm.set_adapter(adapter)
    }

    pub fn set_observer(
        &mut self,
        observer: Option<Box<dyn HeaderObserver>>,
    ) -> Option<Box<dyn HeaderObserver>> {
        self.lm.set_observer(observer)
    }

    /// Installs a transformer. `None` restores [`DefaultItemTransformer`].
    pub fn set_item_transformer(&mut self, transformer: Option<Box<dyn ItemTransformer>>) {
        let transformer =
            transformer.unwrap_or_else(|| Box::new(DefaultItemTransformer::new()));
        self.lm.set_item_transformer(Some(transformer));
    }

    pub fn add_item_decoration(&mut self, decoration: Box<dyn ItemDecoration>) -> Result<()> {
        self.lm.add_item_decoration(decoration)
    }

    pub fn scroll_to_position(&mut self, position: usize) -> Result<bool> {
        self.lm.scroll_to_position(position)
    }

    pub fn smooth_scroll_to_position(&mut self, position: usize, now_ms: u64) -> Result<bool> {
        self.lm.smooth_scroll_to_position(position, now_ms)
    }

    pub fn anchor_position(&self) -> Option<usize> {
        self.lm.anchor_position()
    }

    /// From the vertical list: opens the carousel on the anchor row.
    pub fn collapse(&mut self, now_ms: u64) -> Result<bool> {
        self.lm.collapse(now_ms)
    }

    pub fn expand(&mut self, animate: bool, now_ms: u64) -> Result<()> {
        self.lm.set_expanded(true, animate, now_ms)
    }

    pub fn on_touch(&mut self, event: TouchEvent, now_ms: u64) -> Result<bool> {
        self.lm.on_touch(event, now_ms)
    }

    pub fn on_app_bar_offset_changed(&mut self, offset: i32) -> Result<()> {
        self.lm.on_app_bar_offset_changed(offset)
    }

    pub fn tick(&mut self, now_ms: u64) -> Result<bool> {
        self.lm.tick(now_ms)
    }

    /// Ticks every `frame_ms` starting after `now_ms` until no motion is pending, for at most
    /// `max_frames` frames.
    pub fn settle(&mut self, now_ms: u64, frame_ms: u64, max_frames: u32) -> Result<SettleReport> {
        let frame_ms = frame_ms.max(1);
        let mut report = SettleReport {
            now_ms,
            frames: 0,
            settled: !self.lm.is_animating(),
        };
        while !report.settled && report.frames < max_frames {
            report.now_ms += frame_ms;
            report.frames += 1;
            report.settled = !self.lm.tick(report.now_ms)?;
        }
        #[cfg(feature = "tracing")]
        if !report.settled {
            tracing::warn!(
                target: "navigation_toolbar_adapter",
                frames = report.frames,
                "header still moving after settle budget"
            );
        }
        Ok(report)
    }

    /// Opacity of the header background: hidden once the header is at least half collapsed.
    pub fn background_alpha(&self) -> f32 {
        let height = self.lm.geometry().screen_height as f32;
        let ratio = 1.0 - self.lm.header_bottom() as f32 / (height + 1.0);
        if ratio >= 0.5 { 0.0 } else { 1.0 }
    }
}
