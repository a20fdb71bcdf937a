// Example: sweep the app bar from expanded to collapsed and watch the cards morph.
use navigation_toolbar::{HeaderAdapter, HeaderConfig, HeaderLayoutManager, ViewHolder};

struct Cards(usize);

impl HeaderAdapter for Cards {
    fn item_count(&self) -> usize {
        self.0
    }

    fn create_view_holder(&mut self) -> ViewHolder {
        ViewHolder::new()
    }

    fn bind_view_holder(&mut self, _holder: &mut ViewHolder, _position: usize) {}
}

fn main() -> navigation_toolbar::Result<()> {
    let mut lm = HeaderLayoutManager::new(HeaderConfig::new(1080, 1920, 200));
    lm.set_adapter(Cards(12))?;
    lm.layout(1080, 1920, 0)?;
    lm.scroll_to_position(3)?;

    let min = lm.geometry().min_offset();
    for offset in (min..=0).rev().step_by(240) {
        lm.on_app_bar_offset_changed(offset)?;
        let anchor = lm
            .anchor_view_index()
            .and_then(|index| lm.container().child_at(index));
        println!(
            "bottom={} orientation={:?} children={} anchor_frame={:?}",
            lm.header_bottom(),
            lm.orientation(),
            lm.container().child_count(),
            anchor.map(|child| child.frame()),
        );
    }
    println!("stats={:?}", lm.stats());
    Ok(())
}
