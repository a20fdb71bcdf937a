use navigation_toolbar::{HeaderAdapter, HeaderConfig, TouchEvent, ViewHolder};
use navigation_toolbar_adapter::{EventLog, NavigationToolBar};

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
    // Example: a widget binding replaying a short session without any UI objects.
    //
    // A binding would:
    // - forward app-bar offsets and touch input
    // - call tick(now_ms) in a frame loop while it returns true
    // - render the container children and the background alpha
    let log = EventLog::new();
    let mut bar = NavigationToolBar::new(HeaderConfig::new(720, 1280, 140));
    bar.set_observer(Some(Box::new(log.clone())));
    bar.set_adapter(Cards(8))?;
    bar.layout(720, 1280, 0)?;

    // Tap the second row of the vertical list: the header animates to the middle.
    bar.on_touch(TouchEvent::SingleTapUp { x: 400.0, y: 1000.0 }, 0)?;
    let report = bar.settle(0, 16, 500)?;
    println!(
        "after tap: {report:?} anchor={:?} background_alpha={}",
        bar.anchor_position(),
        bar.background_alpha()
    );

    bar.on_touch(
        TouchEvent::Fling {
            velocity_x: -3_000.0,
            velocity_y: 0.0,
        },
        report.now_ms,
    )?;
    let report = bar.settle(report.now_ms, 16, 500)?;
    println!("after fling: {report:?} anchor={:?}", bar.anchor_position());

    bar.expand(true, report.now_ms)?;
    bar.settle(report.now_ms, 16, 500)?;

    for event in log.drain() {
        println!("{event:?}");
    }
    Ok(())
}
