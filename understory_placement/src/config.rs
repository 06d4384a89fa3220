// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-popover geometry configuration.

use kurbo::{Insets, Size};

use crate::types::ArrowDirection;

/// Geometry configuration for a popover.
///
/// Supplied once per popover and read-only during placement.
///
/// - `background_margins` is the transparent border of the background image
///   (shadow, glow); it is part of the background rectangle but not visible panel.
/// - `content_margins` is padding between the visible panel and the content.
/// - `top_cap_size` / `left_cap_size` are the stretchable-image caps of the
///   background; a background narrower than two caps cannot be drawn, which
///   floors the content size (see [`PlacementConfig::min_content_size`]).
/// - `arrow_margin` is the minimum clearance between the arrow and a panel corner.
/// - `arrow_size` is the size of the up/down arrow image (base × thickness).
///   Left/right arrows use the transposed size.
///
/// `Insets` follow Kurbo's convention: `x0` left, `y0` top, `x1` right, `y1` bottom.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementConfig {
    /// Margins of the background image around the visible panel.
    pub background_margins: Insets,
    /// Padding between the visible panel and the content.
    pub content_margins: Insets,
    /// Vertical cap size of the background image.
    pub top_cap_size: f64,
    /// Horizontal cap size of the background image.
    pub left_cap_size: f64,
    /// Minimum clearance from a panel corner to the arrow.
    pub arrow_margin: f64,
    /// Size of the up/down arrow image.
    pub arrow_size: Size,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            background_margins: Insets::uniform(4.0),
            content_margins: Insets::uniform(2.0),
            top_cap_size: 16.0,
            left_cap_size: 16.0,
            arrow_margin: 4.0,
            arrow_size: Size::new(24.0, 10.0),
        }
    }
}

impl PlacementConfig {
    /// Arrow image size in display orientation for `direction`.
    pub fn arrow_size_for(&self, direction: ArrowDirection) -> Size {
        if direction.is_vertical() {
            self.arrow_size
        } else {
            Size::new(self.arrow_size.height, self.arrow_size.width)
        }
    }

    /// How far the arrow protrudes from the background towards the anchor.
    pub fn arrow_thickness(&self) -> f64 {
        self.arrow_size.height
    }

    /// Extent of the background that is not content (background plus content margins).
    pub fn background_chrome(&self) -> Size {
        let b = self.background_margins;
        let c = self.content_margins;
        Size::new(b.x0 + b.x1 + c.x0 + c.x1, b.y0 + b.y1 + c.y0 + c.y1)
    }

    /// Total non-content footprint for `direction`: background chrome plus the
    /// arrow thickness on the main axis.
    pub fn chrome(&self, direction: ArrowDirection) -> Size {
        let bg = self.background_chrome();
        let t = self.arrow_thickness();
        if direction.is_vertical() {
            Size::new(bg.width, bg.height + t)
        } else {
            Size::new(bg.width + t, bg.height)
        }
    }

    /// Minimum distance from the start and end corners of the arrow edge to the
    /// arrow's centre.
    ///
    /// For vertical directions the corners are left/right, otherwise top/bottom.
    pub fn arrow_corner_clearance(&self, direction: ArrowDirection) -> (f64, f64) {
        let half = self.arrow_size.width / 2.0;
        let b = self.background_margins;
        let (start, end) = if direction.is_vertical() {
            (b.x0, b.x1)
        } else {
            (b.y0, b.y1)
        };
        (
            start + self.arrow_margin + half,
            end + self.arrow_margin + half,
        )
    }

    /// Smallest content size the background can be drawn around for `direction`.
    ///
    /// The background must be at least two caps wide and tall, and the arrow edge
    /// must be long enough to keep the arrow clear of both corners.
    pub fn min_content_size(&self, direction: ArrowDirection) -> Size {
        let bg = self.background_chrome();
        let (start, end) = self.arrow_corner_clearance(direction);
        let arrow_edge = start + end;
        let mut width = 2.0 * self.left_cap_size - bg.width;
        let mut height = 2.0 * self.top_cap_size - bg.height;
        if direction.is_vertical() {
            width = width.max(arrow_edge - bg.width);
        } else {
            height = height.max(arrow_edge - bg.height);
        }
        Size::new(width.max(0.0), height.max(0.0))
    }
}
