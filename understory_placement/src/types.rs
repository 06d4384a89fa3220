// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for placement: arrow directions, requests, and results.

use kurbo::{Point, Rect, Size, Vec2};

/// The side of the anchor on which the popover panel is placed.
///
/// The arrow is drawn on the panel edge facing the anchor, so for [`Down`](Self::Down)
/// the panel hangs below the anchor and its arrow sits on the panel's top edge,
/// pointing back up at the anchor. See [`ArrowDirection::edge`].
///
/// A resolved [`Placement`] always carries exactly one direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArrowDirection {
    /// Panel above the anchor; arrow on the panel's bottom edge.
    Up,
    /// Panel below the anchor; arrow on the panel's top edge.
    Down,
    /// Panel left of the anchor; arrow on the panel's right edge.
    Left,
    /// Panel right of the anchor; arrow on the panel's left edge.
    Right,
}

/// An edge of the panel's background rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Top edge (`y0`).
    Top,
    /// Bottom edge (`y1`).
    Bottom,
    /// Left edge (`x0`).
    Left,
    /// Right edge (`x1`).
    Right,
}

impl ArrowDirection {
    /// Candidate order before space is considered: the vertical pair, then the
    /// horizontal pair.
    ///
    /// Within each pair the side with more room moves to the front, so this
    /// order only decides when both sides offer exactly the same space.
    pub const TIE_BREAK_ORDER: [Self; 4] = [Self::Down, Self::Up, Self::Left, Self::Right];

    /// Returns `true` for [`Up`](Self::Up) and [`Down`](Self::Down).
    ///
    /// Vertical directions stack the panel along the y axis; the arrow then
    /// runs along a horizontal edge.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// The background edge that carries the arrow.
    pub const fn edge(self) -> Edge {
        match self {
            Self::Up => Edge::Bottom,
            Self::Down => Edge::Top,
            Self::Left => Edge::Right,
            Self::Right => Edge::Left,
        }
    }

    /// The single-bit set for this direction.
    pub const fn flag(self) -> ArrowDirections {
        match self {
            Self::Up => ArrowDirections::UP,
            Self::Down => ArrowDirections::DOWN,
            Self::Left => ArrowDirections::LEFT,
            Self::Right => ArrowDirections::RIGHT,
        }
    }
}

bitflags::bitflags! {
    /// A set of permitted arrow directions.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ArrowDirections: u8 {
        /// Panel may be placed above the anchor.
        const UP    = 0b0000_0001;
        /// Panel may be placed below the anchor.
        const DOWN  = 0b0000_0010;
        /// Panel may be placed left of the anchor.
        const LEFT  = 0b0000_0100;
        /// Panel may be placed right of the anchor.
        const RIGHT = 0b0000_1000;
        /// Above or below.
        const VERTICAL = Self::UP.bits() | Self::DOWN.bits();
        /// Left or right.
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
        /// Any side.
        const ANY = Self::VERTICAL.bits() | Self::HORIZONTAL.bits();
    }
}

impl Default for ArrowDirections {
    fn default() -> Self {
        Self::ANY
    }
}

impl From<ArrowDirection> for ArrowDirections {
    fn from(direction: ArrowDirection) -> Self {
        direction.flag()
    }
}

impl ArrowDirections {
    /// Returns `true` if `direction` is in the set.
    pub fn permits(self, direction: ArrowDirection) -> bool {
        self.contains(direction.flag())
    }
}

/// Input to a single placement computation.
///
/// All rectangles share one coordinate space (the display area's).
/// Float inputs are assumed to be finite; negative content extents are treated as zero.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementRequest {
    /// Requested content size before any correction.
    pub content_size: Size,
    /// The region the popover points at.
    pub anchor_rect: Rect,
    /// The region the popover background must stay within.
    pub display_area: Rect,
    /// Sides the panel may be placed on. Must not be empty.
    pub permitted_directions: ArrowDirections,
}

impl PlacementRequest {
    /// Bundle the inputs of a placement computation.
    pub fn new(
        content_size: Size,
        anchor_rect: Rect,
        display_area: Rect,
        permitted_directions: ArrowDirections,
    ) -> Self {
        Self {
            content_size,
            anchor_rect,
            display_area,
            permitted_directions,
        }
    }
}

/// Result of a placement computation.
///
/// A `Placement` is an immutable value: repositioning produces a new one via
/// [`Placement::update`](crate::Placement::update) rather than editing fields in place.
///
/// ## Geometry
///
/// - [`background_rect`](Self::background_rect) is the panel body; it always lies inside the display area.
/// - [`arrow_rect`](Self::arrow_rect) sits just outside the background on its
///   [arrow edge](ArrowDirection::edge), spanning the gap between the background and the anchor.
/// - [`frame`](Self::frame) is the union of the two, i.e. the container's full extent.
/// - [`content_offset`](Self::content_offset) is measured from the frame origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub(crate) arrow_direction: ArrowDirection,
    pub(crate) background_rect: Rect,
    pub(crate) arrow_rect: Rect,
    pub(crate) content_offset: Vec2,
    pub(crate) corrected_content_size: Size,
    pub(crate) clipped: bool,
}

impl Placement {
    /// The chosen side.
    pub fn arrow_direction(&self) -> ArrowDirection {
        self.arrow_direction
    }

    /// Panel body, contained in the display area.
    pub fn background_rect(&self) -> Rect {
        self.background_rect
    }

    /// Arrow image rectangle, adjacent to the background on the arrow edge.
    pub fn arrow_rect(&self) -> Rect {
        self.arrow_rect
    }

    /// Top-left of the content relative to [`frame`](Self::frame).
    pub fn content_offset(&self) -> Vec2 {
        self.content_offset
    }

    /// Content size after growing to the minimum and shrinking to fit.
    pub fn corrected_content_size(&self) -> Size {
        self.corrected_content_size
    }

    /// Whether best-effort clipping was needed because even the minimum size did not fit.
    pub fn is_clipped(&self) -> bool {
        self.clipped
    }

    /// Container frame: background plus arrow.
    pub fn frame(&self) -> Rect {
        self.background_rect.union(self.arrow_rect)
    }

    /// Content rectangle in display-area coordinates.
    pub fn content_rect(&self) -> Rect {
        let origin: Point = self.frame().origin() + self.content_offset;
        Rect::from_origin_size(origin, self.corrected_content_size)
    }

    /// Centre of the arrow along its edge.
    pub fn arrow_position(&self) -> f64 {
        let c = self.arrow_rect.center();
        if self.arrow_direction.is_vertical() {
            c.x
        } else {
            c.y
        }
    }
}
