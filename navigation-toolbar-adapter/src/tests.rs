use crate::*;

use navigation_toolbar::{
    HeaderAdapter, HeaderConfig, HeaderEvent, HeaderState, Orientation, OverlayItemTransformer,
    OverlayStyle, Rect, ScrollState, Size, TouchEvent, ViewHolder,
};

const WIDTH: i32 = 400;
const HEIGHT: i32 = 800;
const TOOLBAR: i32 = 80;

struct Cards(usize);

impl HeaderAdapter for Cards {
    fn item_count(&self) -> usize {
        self.0
    }

    fn create_view_holder(&mut self) -> ViewHolder {
        ViewHolder::with_title(Size::new(120, 24))
    }

    fn bind_view_holder(&mut self, _holder: &mut ViewHolder, _position: usize) {}
}

fn toolbar(count: usize) -> (NavigationToolBar, EventLog) {
    let log = EventLog::new();
    let mut bar = NavigationToolBar::new(HeaderConfig::new(WIDTH, HEIGHT, TOOLBAR));
    bar.set_observer(Some(Box::new(log.clone())));
    bar.set_adapter(Cards(count)).unwrap();
    bar.layout(WIDTH, HEIGHT, 0).unwrap();
    (bar, log)
}

#[test]
fn event_log_clones_share_one_buffer() {
    let (mut bar, log) = toolbar(10);
    assert_eq!(
        log.drain(),
        [
            HeaderEvent::HeaderChanged { header_bottom: 800 },
            HeaderEvent::HeaderUpdated { header_bottom: 800 },
            HeaderEvent::HeaderStateChanged(HeaderState::Expanded),
        ]
    );
    assert!(log.is_empty());

    bar.scroll_to_position(4).unwrap();
    assert_eq!(log.last(), Some(HeaderEvent::ItemChanged { position: 4 }));
    log.clear();
    assert_eq!(log.len(), 0);
}

#[test]
fn settle_reports_frames_and_landing() {
    let (mut bar, log) = toolbar(10);
    let idle = bar.settle(0, 16, 100).unwrap();
    assert_eq!(
        idle,
        SettleReport {
            now_ms: 0,
            frames: 0,
            settled: true
        }
    );

    bar.on_app_bar_offset_changed(-350).unwrap();
    let report = bar.settle(0, 16, 200).unwrap();
    assert!(report.settled);
    assert_eq!(report.now_ms, 16 * report.frames as u64);
    assert_eq!(bar.layout_manager().header_bottom(), HEIGHT / 2);
    assert_eq!(bar.layout_manager().header_state(), Some(HeaderState::Middle));
    assert_eq!(
        log.events()
            .iter()
            .filter(|e| **e == HeaderEvent::HeaderStateChanged(HeaderState::Middle))
            .count(),
        1
    );

    bar.expand(true, report.now_ms).unwrap();
    let short = bar.settle(report.now_ms, 16, 3).unwrap();
    assert!(!short.settled);
    assert_eq!(short.frames, 3);
    assert!(bar.settle(short.now_ms, 16, 200).unwrap().settled);
    assert_eq!(bar.layout_manager().header_state(), Some(HeaderState::Expanded));
}

#[test]
fn background_hides_past_half_collapse() {
    let (mut bar, _) = toolbar(10);
    assert_eq!(bar.background_alpha(), 1.0);

    bar.on_app_bar_offset_changed(-300).unwrap();
    assert_eq!(bar.background_alpha(), 1.0);

    bar.on_app_bar_offset_changed(-400).unwrap();
    assert_eq!(bar.background_alpha(), 0.0);

    bar.on_app_bar_offset_changed(-(HEIGHT - TOOLBAR)).unwrap();
    assert_eq!(bar.background_alpha(), 0.0);
}

#[test]
fn collapse_then_expand_round_trips_the_anchor() {
    let (mut bar, log) = toolbar(30);
    bar.scroll_to_position(12).unwrap();
    log.clear();

    assert!(bar.collapse(0).unwrap());
    assert_eq!(log.events()[0], HeaderEvent::ItemClick { position: Some(12) });
    let middle = bar.settle(0, 16, 500).unwrap();
    assert!(middle.settled);
    let lm = bar.layout_manager();
    assert_eq!(lm.orientation(), Some(Orientation::Horizontal));
    assert_eq!(bar.anchor_position(), Some(12));

    bar.expand(true, middle.now_ms).unwrap();
    bar.settle(middle.now_ms, 16, 500).unwrap();
    let lm = bar.layout_manager();
    assert_eq!(lm.orientation(), Some(Orientation::Vertical));
    assert_eq!(bar.anchor_position(), Some(12));
    let index = lm.container().index_of_position(12).unwrap();
    assert_eq!(
        lm.container().children()[index].frame(),
        Rect::new(80, 320, 320, 160)
    );
}

#[test]
fn expand_without_animation_lands_immediately() {
    let (mut bar, _) = toolbar(10);
    bar.on_app_bar_offset_changed(-400).unwrap();
    bar.settle(0, 16, 200).unwrap();

    bar.expand(false, 1000).unwrap();
    assert_eq!(bar.layout_manager().header_bottom(), HEIGHT);
    assert_eq!(bar.layout_manager().header_state(), Some(HeaderState::Expanded));
    assert!(bar.layout_manager().container().is_vertical_scroll_enabled());
}

#[test]
fn carousel_swipe_lands_on_a_whole_card() {
    let (mut bar, log) = toolbar(20);
    bar.on_app_bar_offset_changed(-400).unwrap();
    let mut now = bar.settle(0, 16, 200).unwrap().now_ms;
    log.clear();

    bar.on_touch(TouchEvent::Down { x: 200.0, y: 200.0 }, now).unwrap();
    for _ in 0..6 {
        now += 16;
        bar.on_touch(
            TouchEvent::Scroll {
                distance_x: 45.0,
                distance_y: 0.0,
            },
            now,
        )
        .unwrap();
    }
    bar.on_touch(
        TouchEvent::Fling {
            velocity_x: -1200.0,
            velocity_y: 0.0,
        },
        now,
    )
    .unwrap();
    bar.on_touch(TouchEvent::Up { x: 0.0, y: 200.0 }, now).unwrap();

    let report = bar.settle(now, 16, 500).unwrap();
    assert!(report.settled);
    let lm = bar.layout_manager();
    assert_eq!(lm.scroll_state(), ScrollState::Idle);
    let anchor = bar.anchor_position().unwrap();
    assert!(anchor >= 1);
    let index = lm.container().index_of_position(anchor).unwrap();
    assert_eq!(lm.container().children()[index].frame().left, 0);

    let states: Vec<_> = log
        .events()
        .into_iter()
        .filter_map(|e| match e {
            HeaderEvent::ScrollStateChanged(state) => Some(state),
            _ => None,
        })
        .collect();
    assert_eq!(states.first(), Some(&ScrollState::Dragging));
    assert_eq!(states.last(), Some(&ScrollState::Idle));
}

#[test]
fn none_transformer_restores_the_default() {
    let (mut bar, _) = toolbar(10);
    bar.set_item_transformer(Some(Box::new(OverlayItemTransformer::new(
        OverlayStyle::default(),
    ))));
    assert!(
        bar.layout_manager()
            .container()
            .children()
            .iter()
            .all(|child| child.view.overlay.is_some())
    );

    bar.set_item_transformer(None);
    bar.on_app_bar_offset_changed(-400).unwrap();
    bar.settle(0, 16, 200).unwrap();
    let lm = bar.layout_manager();
    assert_eq!(lm.header_state(), Some(HeaderState::Middle));
    let index = lm.container().index_of_position(0).unwrap();
    assert_eq!(lm.container().children()[index].frame(), Rect::new(0, 400, 400, 400));
}
