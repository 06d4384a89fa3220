// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_popover --heading-base-level=0

//! Understory Popover: a headless popover with outside-touch dismissal.
//!
//! ## Overview
//!
//! A popover is a floating panel with an arrow that points at an anchor
//! rectangle. This crate owns the lifecycle; the host owns pixels and events.
//!
//! - [`PopoverController`] is the public entry point: present, reposition, dismiss.
//! - [`ContainerSurface`] holds the placed panel and produces a [`DrawItem`] list.
//! - [`touch::OutsideTouchDetector`] classifies pointer-downs while visible.
//! - [`PopoverBackend`] is the seam between the controller and whatever shows
//!   the popover. [`CustomBackend`] places it with `understory_placement`; a host
//!   with a native popover primitive can supply its own through a [`NativeProbe`].
//!
//! The host implements [`PopoverContent`] for its content handle,
//! [`PresentingView`] for the view it presents in, and [`AssetResolver`] to map
//! image identifiers to its own image type.
//!
//! ## Workflow
//!
//! 1) Build a controller with the content handle and, optionally, a delegate.
//! 2) Call [`PopoverController::present_from_rect`] with the anchor.
//! 3) Feed pointer events to [`PopoverController::handle_pointer`]. A touch
//!    outside the panel and its passthrough regions asks the delegate and dismisses.
//! 4) On rotation or layout changes call [`PopoverController::reposition_from_rect`].
//! 5) Draw [`ContainerSurface::render`] output from [`PopoverController::view`].
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_popover::{
//!     ArrowDirection, ArrowDirections, PopoverContent, PopoverController, PopoverState,
//!     PresentingView,
//! };
//!
//! #[derive(Clone)]
//! struct Menu;
//! impl PopoverContent for Menu {
//!     fn preferred_size(&self) -> Size {
//!         Size::new(200.0, 150.0)
//!     }
//! }
//!
//! struct Window;
//! impl PresentingView for Window {
//!     fn bounds(&self) -> Rect {
//!         Rect::new(0.0, 0.0, 400.0, 300.0)
//!     }
//! }
//!
//! let mut popover = PopoverController::new(Menu);
//! let anchor = Rect::from_origin_size((100.0, 100.0), (20.0, 20.0));
//! popover
//!     .present_from_rect(anchor, &Window, ArrowDirections::ANY, true)
//!     .unwrap();
//! assert_eq!(popover.popover_arrow_direction(), Some(ArrowDirection::Down));
//!
//! // A tap far away dismisses; with no delegate nobody vetoes.
//! popover.handle_pointer(understory_popover::touch::PointerEvent::down(Point::new(390.0, 10.0)));
//! assert_eq!(popover.state(), PopoverState::Idle);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod assets;
mod backend;
mod container;
mod controller;
mod error;
mod host;
pub mod touch;

pub use assets::{AssetResolver, ContainerProperties, ImageNames};
pub use backend::{CustomBackend, NativeProbe, NoNativePopover, PopoverBackend, PresentRequest};
pub use container::{ContainerSurface, DrawItem};
pub use controller::{PopoverController, PopoverDelegate, PopoverState};
pub use error::{LifecycleError, PopoverError};
pub use host::{BarItem, PopoverContent, PresentingView};

pub use understory_placement::{
    ArrowDirection, ArrowDirections, ConfigurationError, Placement, PlacementConfig,
};
