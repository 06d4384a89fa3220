// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_placement --heading-base-level=0

//! Understory Placement: deterministic placement for anchored popovers.
//!
//! Given a content size, an anchor rectangle, a display area, and a set of
//! permitted sides, this crate chooses the side the popover panel goes on,
//! sizes and slides the panel so it stays inside the display area, and
//! positions the arrow so it points at the anchor.
//!
//! ## Overview
//!
//! - [`compute`] is a pure function from [`PlacementConfig`] + [`PlacementRequest`] to [`Placement`].
//! - [`Placement::update`] recomputes for a new anchor or display area.
//!   It deliberately has no memory of the previous side.
//! - [`ArrowDirections`] is the permitted set; [`ArrowDirection`] is the resolved side.
//! - Invalid input ([`ConfigurationError`]) is limited to an empty permitted set
//!   and a degenerate display area. Everything else yields a best-effort result;
//!   see [`Placement::is_clipped`].
//!
//! ## Not a renderer
//!
//! This crate only produces rectangles. Drawing the background and arrow images,
//! and owning the content, is left to a higher layer such as `understory_popover`.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_placement::{compute, ArrowDirection, ArrowDirections, PlacementConfig, PlacementRequest};
//!
//! let config = PlacementConfig::default();
//! let request = PlacementRequest::new(
//!     Size::new(200.0, 150.0),
//!     Rect::from_origin_size((100.0, 100.0), (20.0, 20.0)),
//!     Rect::new(0.0, 0.0, 400.0, 300.0),
//!     ArrowDirections::ANY,
//! );
//!
//! let placement = compute(&config, &request).unwrap();
//! // More room below the anchor than above it.
//! assert_eq!(placement.arrow_direction(), ArrowDirection::Down);
//! assert!(placement.background_rect().y0 > 120.0);
//!
//! // Rotating the display re-runs the same rule.
//! let rotated = PlacementRequest { display_area: Rect::new(0.0, 0.0, 300.0, 400.0), ..request };
//! let next = placement.update(&config, &rotated).unwrap();
//! assert_eq!(next.arrow_direction(), ArrowDirection::Down);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod config;
mod engine;
mod error;
mod types;

pub use config::PlacementConfig;
pub use engine::compute;
pub use error::ConfigurationError;
pub use types::{ArrowDirection, ArrowDirections, Edge, Placement, PlacementRequest};
