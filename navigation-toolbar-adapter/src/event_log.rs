use std::cell::RefCell;
use std::rc::Rc;

use navigation_toolbar::{HeaderEvent, HeaderObserver, HeaderState, ScrollState, ViewHolder};

/// A recording [`HeaderObserver`].
///
/// Clones share one buffer: hand a clone to the layout manager and keep the other to inspect
/// what happened.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<HeaderEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<HeaderEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn last(&self) -> Option<HeaderEvent> {
        self.events.borrow().last().copied()
    }

    /// Takes every recorded event, leaving the log empty.
    pub fn drain(&self) -> Vec<HeaderEvent> {
        core::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: HeaderEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl HeaderObserver for EventLog {
    fn on_header_changed(&mut self, header_bottom: i32) {
        self.push(HeaderEvent::HeaderChanged { header_bottom });
    }

    fn on_header_updated(&mut self, header_bottom: i32) {
        self.push(HeaderEvent::HeaderUpdated { header_bottom });
    }

    fn on_scroll_state_changed(&mut self, state: ScrollState) {
        self.push(HeaderEvent::ScrollStateChanged(state));
    }

    fn on_header_state_changed(&mut self, state: HeaderState) {
        self.push(HeaderEvent::HeaderStateChanged(state));
    }

    fn on_item_changed(&mut self, position: usize) {
        self.push(HeaderEvent::ItemChanged { position });
    }

    fn on_item_click(&mut self, holder: &ViewHolder) {
        self.push(HeaderEvent::ItemClick {
            position: holder.position(),
        });
    }
}
