// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement computation.
//!
//! ## Side selection
//!
//! - Candidates are ordered vertical pair first, then horizontal pair.
//! - Within a pair, the side with more room between the anchor edge and the
//!   display edge goes first. Exact ties follow [`ArrowDirection::TIE_BREAK_ORDER`].
//! - The first candidate whose unshrunk footprint fits wins.
//! - Otherwise, among candidates whose minimum fits, the one with the largest
//!   shrunk footprint wins.
//! - When no minimum fits, the candidate with the least overflow wins.
//! - Remaining ties are resolved by candidate order.
//!
//! ## Sizing
//!
//! Content is first grown to [`PlacementConfig::min_content_size`] and then
//! shrunk on any axis where it does not fit, never below that minimum.
//! When even the minimum overflows, the background is clamped into the
//! display area and the result is marked [clipped](Placement::is_clipped).
//!
//! There is no memory of a previous direction: [`Placement::update`] applies the
//! same rule from scratch, so a popover may flip sides when space changes.

use kurbo::{Point, Rect, Size, Vec2};

use crate::config::PlacementConfig;
use crate::error::ConfigurationError;
use crate::types::{ArrowDirection, Edge, Placement, PlacementRequest};

/// Compute a placement for `request`.
///
/// Deterministic and side-effect free. Fails only on an empty permitted set or a
/// degenerate display area; all other inputs produce a best-effort result.
pub fn compute(
    config: &PlacementConfig,
    request: &PlacementRequest,
) -> Result<Placement, ConfigurationError> {
    validate(request)?;

    let mut best: Option<Candidate> = None;
    for direction in priority_order(request) {
        let candidate = Candidate::measure(config, request, direction);
        if candidate.fits_unshrunk {
            return Ok(place(config, request, &candidate));
        }
        if best.as_ref().is_none_or(|b| candidate.beats(b)) {
            best = Some(candidate);
        }
    }

    // `validate` guarantees at least one permitted direction.
    let chosen = best.ok_or(ConfigurationError::NoPermittedDirections)?;
    Ok(place(config, request, &chosen))
}

impl Placement {
    /// Recompute for a new request (for example after rotation).
    ///
    /// The previous direction has no influence on the outcome; calling this
    /// with identical arguments always yields an identical placement.
    pub fn update(
        &self,
        config: &PlacementConfig,
        request: &PlacementRequest,
    ) -> Result<Self, ConfigurationError> {
        let next = compute(config, request)?;
        if next.arrow_direction != self.arrow_direction {
            tracing::trace!(
                from = ?self.arrow_direction,
                to = ?next.arrow_direction,
                "placement changed side"
            );
        }
        Ok(next)
    }
}

fn validate(request: &PlacementRequest) -> Result<(), ConfigurationError> {
    if request.permitted_directions.is_empty() {
        return Err(ConfigurationError::NoPermittedDirections);
    }
    let width = request.display_area.width();
    let height = request.display_area.height();
    // Written so that NaN fails as well.
    if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
        return Err(ConfigurationError::DegenerateDisplayArea { width, height });
    }
    Ok(())
}

/// Anchor coordinate the panel attaches to, clamped into the display area.
fn anchor_edge(direction: ArrowDirection, anchor: Rect, display: Rect) -> f64 {
    match direction {
        ArrowDirection::Down => anchor.y1.clamp(display.y0, display.y1),
        ArrowDirection::Up => anchor.y0.clamp(display.y0, display.y1),
        ArrowDirection::Right => anchor.x1.clamp(display.x0, display.x1),
        ArrowDirection::Left => anchor.x0.clamp(display.x0, display.x1),
    }
}

/// Room between the anchor and the display edge on the side of `direction`.
fn available_space(direction: ArrowDirection, anchor: Rect, display: Rect) -> f64 {
    let edge = anchor_edge(direction, anchor, display);
    match direction {
        ArrowDirection::Down => display.y1 - edge,
        ArrowDirection::Up => edge - display.y0,
        ArrowDirection::Right => display.x1 - edge,
        ArrowDirection::Left => edge - display.x0,
    }
}

fn priority_order(request: &PlacementRequest) -> impl Iterator<Item = ArrowDirection> {
    let anchor = request.anchor_rect;
    let display = request.display_area;
    let space = |d| available_space(d, anchor, display);

    let [mut v0, mut v1, mut h0, mut h1] = ArrowDirection::TIE_BREAK_ORDER;
    if space(v1) > space(v0) {
        core::mem::swap(&mut v0, &mut v1);
    }
    if space(h1) > space(h0) {
        core::mem::swap(&mut h0, &mut h1);
    }
    let permitted = request.permitted_directions;
    [v0, v1, h0, h1]
        .into_iter()
        .filter(move |d| permitted.permits(*d))
}

/// A direction with its corrected content size.
#[derive(Clone, Debug)]
struct Candidate {
    direction: ArrowDirection,
    content: Size,
    fits_unshrunk: bool,
    overflow: f64,
    /// Area of the shrunk footprint, arrow included.
    area: f64,
}

impl Candidate {
    fn measure(
        config: &PlacementConfig,
        request: &PlacementRequest,
        direction: ArrowDirection,
    ) -> Self {
        let display = request.display_area;
        let chrome = config.chrome(direction);
        let min = config.min_content_size(direction);
        let main = available_space(direction, request.anchor_rect, display);
        let room = if direction.is_vertical() {
            Size::new(display.width(), main)
        } else {
            Size::new(main, display.height())
        };

        // `max` maps NaN and negatives to the floor.
        let wanted = Size::new(
            request.content_size.width.max(0.0).max(min.width),
            request.content_size.height.max(0.0).max(min.height),
        );
        let fits_unshrunk = wanted.width + chrome.width <= room.width
            && wanted.height + chrome.height <= room.height;

        let content = Size::new(
            wanted.width.min(room.width - chrome.width).max(min.width),
            wanted.height.min(room.height - chrome.height).max(min.height),
        );
        // Overflow only remains where the minimum itself does not fit.
        let overflow = (min.width - (room.width - chrome.width)).max(0.0)
            + (min.height - (room.height - chrome.height)).max(0.0);

        let area = (content.width + chrome.width) * (content.height + chrome.height);

        Self {
            direction,
            content,
            fits_unshrunk,
            overflow,
            area,
        }
    }

    /// Whether `self` is a better fallback than `other`, an earlier candidate.
    ///
    /// Strict comparisons keep the earlier candidate on ties.
    fn beats(&self, other: &Self) -> bool {
        if self.overflow == 0.0 && other.overflow == 0.0 {
            self.area > other.area
        } else {
            self.overflow < other.overflow
        }
    }
}

/// Slide `rect` into `bounds` on each axis; clip the axes where it is larger.
fn fit_within(rect: Rect, bounds: Rect) -> Rect {
    fn axis(lo: f64, len: f64, min: f64, max: f64) -> (f64, f64) {
        if len > max - min {
            (min, max)
        } else if lo <= min {
            (min, min + len)
        } else if lo + len >= max {
            (max - len, max)
        } else {
            (lo, lo + len)
        }
    }
    let (x0, x1) = axis(rect.x0, rect.width(), bounds.x0, bounds.x1);
    let (y0, y1) = axis(rect.y0, rect.height(), bounds.y0, bounds.y1);
    Rect::new(x0, y0, x1, y1)
}

fn place(config: &PlacementConfig, request: &PlacementRequest, candidate: &Candidate) -> Placement {
    let direction = candidate.direction;
    let anchor = request.anchor_rect;
    let display = request.display_area;
    let center = anchor.center();
    let thickness = config.arrow_thickness();
    let chrome = config.background_chrome();
    let size = Size::new(
        candidate.content.width + chrome.width,
        candidate.content.height + chrome.height,
    );

    // The arrow occupies the band between the anchor edge and the background.
    let edge = anchor_edge(direction, anchor, display);
    let origin = match direction {
        ArrowDirection::Down => Point::new(center.x - size.width / 2.0, edge + thickness),
        ArrowDirection::Up => Point::new(
            center.x - size.width / 2.0,
            edge - thickness - size.height,
        ),
        ArrowDirection::Right => Point::new(edge + thickness, center.y - size.height / 2.0),
        ArrowDirection::Left => Point::new(
            edge - thickness - size.width,
            center.y - size.height / 2.0,
        ),
    };
    let unclamped = Rect::from_origin_size(origin, size);
    let background_rect = fit_within(unclamped, display);
    let clipped = candidate.overflow > 0.0;
    if clipped {
        tracing::debug!(
            ?direction,
            overflow = candidate.overflow,
            "popover does not fit display area; clipping"
        );
    }

    let arrow_rect = arrow_rect(config, direction, background_rect, center);

    let b = config.background_margins;
    let c = config.content_margins;
    let mut content_offset = Vec2::new(b.x0 + c.x0, b.y0 + c.y0);
    // Only an arrow on the leading edge moves the frame origin.
    match direction.edge() {
        Edge::Top => content_offset.y += thickness,
        Edge::Left => content_offset.x += thickness,
        Edge::Bottom | Edge::Right => {}
    }

    Placement {
        arrow_direction: direction,
        background_rect,
        arrow_rect,
        content_offset,
        corrected_content_size: candidate.content,
        clipped,
    }
}

fn arrow_rect(
    config: &PlacementConfig,
    direction: ArrowDirection,
    background: Rect,
    anchor_center: Point,
) -> Rect {
    let arrow = config.arrow_size_for(direction);
    let (start, end) = config.arrow_corner_clearance(direction);
    let along = |target: f64, lo: f64, hi: f64| {
        let (min, max) = (lo + start, hi - end);
        if min <= max {
            target.clamp(min, max)
        } else {
            (lo + hi) / 2.0
        }
    };

    let (half_w, half_h) = (arrow.width / 2.0, arrow.height / 2.0);
    match direction.edge() {
        Edge::Top | Edge::Bottom => {
            let cx = along(anchor_center.x, background.x0, background.x1);
            let y0 = if direction.edge() == Edge::Top {
                background.y0 - arrow.height
            } else {
                background.y1
            };
            Rect::new(cx - half_w, y0, cx + half_w, y0 + arrow.height)
        }
        Edge::Left | Edge::Right => {
            let cy = along(anchor_center.y, background.y0, background.y1);
            let x0 = if direction.edge() == Edge::Left {
                background.x0 - arrow.width
            } else {
                background.x1
            };
            Rect::new(x0, cy - half_h, x0 + arrow.width, cy + half_h)
        }
    }
}
