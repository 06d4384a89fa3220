// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside-touch detection.
//!
//! ## Overview
//!
//! The detector models a transparent, full-screen capture layer underneath the
//! popover. It classifies pointer-down events:
//!
//! - inside the container frame → [`TouchDisposition::Content`],
//! - inside a passthrough region → [`TouchDisposition::Passthrough`] (first match wins),
//! - anywhere else → [`TouchDisposition::DismissRequested`].
//!
//! Other pointer phases are [`Ignored`](TouchDisposition::Ignored).
//!
//! The detector only raises the request. Confirming it (asking the delegate
//! whether to dismiss) and tearing down is the controller's job; see
//! [`PopoverController::handle_pointer`](crate::PopoverController::handle_pointer).
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_popover::touch::{OutsideTouchDetector, PointerEvent, TouchDisposition};
//!
//! let mut detector = OutsideTouchDetector::new(Rect::new(100.0, 100.0, 200.0, 200.0));
//! detector.set_passthrough_regions(&[Rect::new(0.0, 0.0, 50.0, 50.0)]);
//!
//! assert_eq!(detector.handle_pointer(PointerEvent::down(Point::new(150.0, 150.0))), TouchDisposition::Content);
//! assert_eq!(detector.handle_pointer(PointerEvent::down(Point::new(10.0, 10.0))), TouchDisposition::Passthrough(0));
//! assert_eq!(detector.handle_pointer(PointerEvent::down(Point::new(300.0, 10.0))), TouchDisposition::DismissRequested);
//! ```

use alloc::vec::Vec;

use kurbo::{Point, Rect};

/// Phase of a pointer event.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PointerPhase {
    /// Pointer pressed / touch began.
    Down,
    /// Pointer moved while pressed.
    Move,
    /// Pointer released / touch ended.
    Up,
    /// Gesture cancelled by the host.
    Cancel,
}

/// A pointer event in display-area coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Event phase.
    pub phase: PointerPhase,
    /// Pointer location.
    pub position: Point,
}

impl PointerEvent {
    /// A pointer-down event at `position`.
    pub fn down(position: Point) -> Self {
        Self {
            phase: PointerPhase::Down,
            position,
        }
    }
}

/// How the capture layer routes a pointer event.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TouchDisposition {
    /// Not a pointer-down, or nothing is presented.
    Ignored,
    /// Inside the popover; the content handles it.
    Content,
    /// Inside the passthrough region at this index; its owner handles it.
    Passthrough(usize),
    /// Outside everything; dismissal is requested.
    DismissRequested,
}

/// Capture layer classifying pointer-downs relative to the container and passthrough regions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutsideTouchDetector {
    container_frame: Rect,
    passthrough: Vec<Rect>,
}

impl OutsideTouchDetector {
    /// Create a detector for a container occupying `container_frame`.
    pub fn new(container_frame: Rect) -> Self {
        Self {
            container_frame,
            passthrough: Vec::new(),
        }
    }

    /// The container frame currently exempted.
    pub fn container_frame(&self) -> Rect {
        self.container_frame
    }

    /// Update the container frame (after a reposition).
    pub fn set_container_frame(&mut self, frame: Rect) {
        self.container_frame = frame;
    }

    /// Regions exempt from dismissal.
    pub fn passthrough_regions(&self) -> &[Rect] {
        &self.passthrough
    }

    /// Replace the passthrough regions.
    pub fn set_passthrough_regions(&mut self, regions: &[Rect]) {
        self.passthrough.clear();
        self.passthrough.extend_from_slice(regions);
    }

    /// Classify a pointer event.
    pub fn handle_pointer(&self, event: PointerEvent) -> TouchDisposition {
        if event.phase != PointerPhase::Down {
            return TouchDisposition::Ignored;
        }
        let p = event.position;
        if self.container_frame.contains(p) {
            return TouchDisposition::Content;
        }
        if let Some(i) = self.passthrough.iter().position(|r| r.contains(p)) {
            return TouchDisposition::Passthrough(i);
        }
        TouchDisposition::DismissRequested
    }
}
