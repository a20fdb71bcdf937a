//! Driver utilities for the `navigation-toolbar` crate.
//!
//! The `navigation-toolbar` crate is a headless layout engine. This crate wraps it in the
//! surface a widget binding usually wants:
//!
//! - a single facade ([`NavigationToolBar`]) with programmatic collapse/expand
//! - a frame driver ([`NavigationToolBar::settle`]) for tests, tools and headless replays
//! - the header background visibility rule
//! - a recording observer ([`EventLog`])
//!
//! No UI toolkit bindings live here.
#![forbid(unsafe_code)]

mod controller;
mod event_log;

#[cfg(test)]
mod tests;

pub use controller::{NavigationToolBar, SettleReport};
pub use event_log::EventLog;
