use crate::container::HeaderContainer;
use crate::recycler::Overlay;
use crate::transformer::{DefaultItemTransformer, ItemTransformer, LayoutContext, Ratios};
use crate::Geometry;

/// Tuning for [`OverlayItemTransformer`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayStyle {
    /// Elevation of every card in the vertical list, and the floor of the carousel stack.
    pub base_elevation: f32,
    /// How far titles are pulled toward the header center in the carousel.
    pub horizontal_center_offset_ratio: f32,
    /// Title y offset when the header is fully collapsed.
    pub horizontal_top_offset: f32,
    /// Title x when the header is fully expanded.
    pub vertical_left_offset: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            base_elevation: 0.0,
            horizontal_center_offset_ratio: 0.5,
            horizontal_top_offset: 0.0,
            vertical_left_offset: 0.0,
        }
    }
}

/// Default card transform plus stacking order and title placement.
///
/// In the top half cards closer to the header center are raised above their neighbours and
/// titles drift toward the center, fading with distance. In the bottom half every card shares
/// the base elevation and titles slide to the vertical left offset.
#[derive(Clone, Debug, Default)]
pub struct OverlayItemTransformer {
    inner: DefaultItemTransformer,
    style: OverlayStyle,
}

impl OverlayItemTransformer {
    pub fn new(style: OverlayStyle) -> Self {
        Self {
            inner: DefaultItemTransformer::new(),
            style,
        }
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    pub fn ratios(&self) -> Option<Ratios> {
        self.inner.ratios()
    }

    fn decorate_top_half(&self, header: &mut HeaderContainer, ratios: &Ratios) {
        let count = header.child_count();
        let center = header.width() as f32 / 2.0;
        let mut elevation = count as f32 / 2.0 + self.style.base_elevation;
        let mut prev_distance = f32::INFINITY;

        for child in header.children_mut() {
            let frame = child.view.frame;
            let item_center = frame.left as f32 + frame.width as f32 / 2.0;
            let diff = item_center - center;
            let distance = diff.abs();
            if distance < prev_distance {
                elevation += 1.0;
            } else {
                elevation -= 1.0;
            }
            prev_distance = distance;
            child.view.elevation = elevation;

            let Some(title) = child.title else {
                child.view.overlay = None;
                continue;
            };
            let new_center = center + diff * self.style.horizontal_center_offset_ratio;
            let initial_left = (frame.width - title.width) as f32 / 2.0;
            let x = initial_left + (new_center - item_center) * ratios.ratio_top_half;
            let y = self.style.horizontal_top_offset * (1.0 - ratios.ratio_top_half);
            let strength = if center > 0.0 {
                1.5 - center.min((center - new_center).abs()) / center
            } else {
                1.0
            };
            child.view.overlay = Some(Overlay {
                x,
                y,
                alpha: strength.clamp(0.0, 1.0),
                scale: strength.clamp(0.0, 1.0),
            });
        }
    }

    fn decorate_bottom_half(&self, header: &mut HeaderContainer, ratios: &Ratios) {
        for child in header.children_mut() {
            child.view.elevation = self.style.base_elevation;
            let Some(title) = child.title else {
                child.view.overlay = None;
                continue;
            };
            let initial_left = (child.view.frame.width - title.width) as f32 / 2.0;
            let x = initial_left
                - (initial_left - self.style.vertical_left_offset).abs() * ratios.ratio_bottom_half;
            child.view.overlay = Some(Overlay {
                x,
                y: 0.0,
                alpha: 1.0,
                scale: 1.0,
            });
        }
    }
}

impl ItemTransformer for OverlayItemTransformer {
    fn attach(&mut self, geometry: &Geometry) {
        self.inner.attach(geometry);
    }

    fn detach(&mut self) {
        self.inner.detach();
    }

    fn on_item_click(&mut self, header: &HeaderContainer, ctx: &LayoutContext<'_>, child: usize) {
        self.inner.on_item_click(header, ctx, child);
    }

    fn transform(
        &mut self,
        header: &mut HeaderContainer,
        ctx: &LayoutContext<'_>,
        header_bottom: i32,
    ) {
        let before = self.inner.passes();
        self.inner.transform(header, ctx, header_bottom);
        if self.inner.passes() == before {
            return;
        }
        let Some(ratios) = self.inner.ratios() else {
            return;
        };
        if ratios.ratio_bottom_half <= 0.0 {
            self.decorate_top_half(header, &ratios);
        } else {
            self.decorate_bottom_half(header, &ratios);
        }
    }
}
