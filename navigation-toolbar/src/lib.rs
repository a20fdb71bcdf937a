//! A headless header layout engine for a collapsing navigation toolbar.
//!
//! For a host-facing facade (event log, settle helper), see the `navigation-toolbar-adapter`
//! crate.
//!
//! The header sits under an app bar that the user drags between three landmarks:
//! - expanded: the header fills the screen and cards form a vertical list
//! - middle: the header is half the screen and cards form a horizontal carousel
//! - collapsed: only the toolbar strip remains, still a carousel
//!
//! Between the middle and expanded landmarks an [`ItemTransformer`] interpolates every card
//! between its carousel pose and its list pose. At the landmarks (and everywhere in the top half)
//! a discrete fill lays cards out around an anchor and recycles the rest.
//!
//! It is UI-agnostic. A host is expected to provide:
//! - screen metrics and the header container size
//! - app-bar offset changes and touch input
//! - a monotonic clock, via [`HeaderLayoutManager::tick`]
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

mod anchor;
mod config;
mod container;
mod error;
mod fill;
mod layout_manager;
mod observer;
mod overlay;
mod recycler;
mod scroller;
mod state;
mod transformer;
mod tween;
mod types;


pub use anchor::{anchor_index, horizontal_anchor_index, vertical_anchor_index};
pub use config::{AnchorPoints, Geometry, HeaderConfig};
pub use container::{HeaderContainer, HeaderGesture, TouchEvent};
pub use error::{HeaderError, Result};
pub use fill::LayoutStats;
pub use layout_manager::HeaderLayoutManager;
pub use observer::{HeaderEvent, HeaderObserver, ItemDecoration, UniformSpacing};
pub use overlay::{OverlayItemTransformer, OverlayStyle};
pub use recycler::{HeaderAdapter, HolderId, Overlay, Recycler, View, ViewHolder};
pub use scroller::{FlingCalculator, Scroller};
pub use state::{ChildSnapshot, LayoutSnapshot};
pub use transformer::{DefaultItemTransformer, ItemTransformer, LayoutContext, Ratios};
pub use tween::{Easing, Tween};
pub use types::{
    Axis, HeaderState, Insets, Orientation, Point, Rect, ScrollState, Size, VerticalGravity,
    derive_orientation,
};
