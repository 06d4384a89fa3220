// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation backends.
//!
//! ## Overview
//!
//! [`PopoverBackend`] is the single capability interface the controller drives:
//! present, reposition, dismiss, and visibility/property queries.
//! Two kinds of implementation exist:
//!
//! - [`CustomBackend`], which places the panel with `understory_placement`,
//!   owns a [`ContainerSurface`] and an [`OutsideTouchDetector`] while visible,
//!   and drops both on dismissal.
//! - A host-provided adapter over a native popover primitive, returned by a
//!   [`NativeProbe`]. It must behave like the native primitive and report its
//!   dismissal callbacks back through
//!   [`PopoverController::native_should_dismiss`](crate::PopoverController::native_should_dismiss) and
//!   [`PopoverController::native_did_dismiss`](crate::PopoverController::native_did_dismiss).
//!
//! The choice is made once, when the controller is constructed.

use alloc::boxed::Box;

use kurbo::{Rect, Size};
use understory_placement::{ArrowDirection, ArrowDirections};

use crate::assets::ContainerProperties;
use crate::container::ContainerSurface;
use crate::error::{LifecycleError, PopoverError};
use crate::host::PopoverContent;
use crate::touch::{OutsideTouchDetector, PointerEvent, TouchDisposition};

/// Everything a backend needs to show a popover.
#[derive(Debug)]
pub struct PresentRequest<'a, C> {
    /// Content handle to show.
    pub content: &'a C,
    /// Declared content size (already defaulted to the preferred size).
    pub content_size: Size,
    /// Region to point at.
    pub anchor_rect: Rect,
    /// Region to stay within.
    pub display_area: Rect,
    /// Permitted sides.
    pub permitted_directions: ArrowDirections,
    /// Container appearance.
    pub properties: &'a ContainerProperties,
    /// Regions exempt from outside-touch dismissal.
    pub passthrough_regions: &'a [Rect],
    /// Whether the host should animate the appearance.
    pub animated: bool,
}

/// Capability interface for showing a popover.
pub trait PopoverBackend<C> {
    /// Show the popover. Fails with [`LifecycleError::AlreadyVisible`] when shown.
    fn present(&mut self, request: PresentRequest<'_, C>) -> Result<(), PopoverError>;

    /// Move the visible popover to a new anchor or display area.
    fn reposition(
        &mut self,
        anchor_rect: Rect,
        display_area: Rect,
        permitted_directions: ArrowDirections,
    ) -> Result<(), PopoverError>;

    /// Tear the popover down. A no-op when nothing is shown.
    fn dismiss(&mut self, animated: bool);

    /// Whether a popover is currently shown.
    fn is_visible(&self) -> bool;

    /// Side of the anchor the visible popover sits on.
    fn arrow_direction(&self) -> Option<ArrowDirection>;

    /// Replace the passthrough regions of the visible popover.
    fn set_passthrough_regions(&mut self, regions: &[Rect]);

    /// Swap the content of the visible popover.
    fn set_content(&mut self, content: &C);

    /// Route a pointer event through the outside-touch layer.
    ///
    /// Native primitives handle touches themselves, so the default ignores them.
    fn handle_pointer(&mut self, _event: PointerEvent) -> TouchDisposition {
        TouchDisposition::Ignored
    }

    /// The rendered panel, if this backend owns one.
    fn surface(&self) -> Option<&ContainerSurface<C>> {
        None
    }
}

/// Capability probe for a native popover primitive.
pub trait NativeProbe<C> {
    /// Returns an adapter over the host's native popover, if the host has one.
    fn native_popover(&self) -> Option<Box<dyn PopoverBackend<C>>>;
}

/// A probe for hosts without a native popover.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoNativePopover;

impl<C> NativeProbe<C> for NoNativePopover {
    fn native_popover(&self) -> Option<Box<dyn PopoverBackend<C>>> {
        None
    }
}

#[derive(Clone, Debug)]
struct Presentation<C> {
    surface: ContainerSurface<C>,
    detector: OutsideTouchDetector,
}

/// Backend that places and hit-tests the popover itself.
#[derive(Clone, Debug)]
pub struct CustomBackend<C> {
    presentation: Option<Presentation<C>>,
}

impl<C> Default for CustomBackend<C> {
    fn default() -> Self {
        Self { presentation: None }
    }
}

impl<C> CustomBackend<C> {
    /// Create an idle backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// The outside-touch layer, while visible.
    pub fn detector(&self) -> Option<&OutsideTouchDetector> {
        self.presentation.as_ref().map(|p| &p.detector)
    }
}

impl<C: PopoverContent + Clone> PopoverBackend<C> for CustomBackend<C> {
    fn present(&mut self, request: PresentRequest<'_, C>) -> Result<(), PopoverError> {
        if self.presentation.is_some() {
            return Err(LifecycleError::AlreadyVisible.into());
        }
        let mut surface = ContainerSurface::new(
            request.content_size,
            request.anchor_rect,
            request.display_area,
            request.permitted_directions,
            request.properties.clone(),
        )?;
        surface.set_content(Some(request.content.clone()));

        let mut detector = OutsideTouchDetector::new(surface.frame());
        detector.set_passthrough_regions(request.passthrough_regions);

        tracing::debug!(
            direction = ?surface.arrow_direction(),
            frame = ?surface.frame(),
            animated = request.animated,
            "presenting popover"
        );
        request.content.will_appear(request.animated);
        self.presentation = Some(Presentation { surface, detector });
        request.content.did_appear(request.animated);
        Ok(())
    }

    fn reposition(
        &mut self,
        anchor_rect: Rect,
        display_area: Rect,
        permitted_directions: ArrowDirections,
    ) -> Result<(), PopoverError> {
        let p = self
            .presentation
            .as_mut()
            .ok_or(LifecycleError::NotVisible)?;
        p.surface
            .reposition(anchor_rect, display_area, permitted_directions)?;
        p.detector.set_container_frame(p.surface.frame());
        tracing::debug!(
            direction = ?p.surface.arrow_direction(),
            frame = ?p.surface.frame(),
            "repositioned popover"
        );
        Ok(())
    }

    fn dismiss(&mut self, animated: bool) {
        let Some(p) = self.presentation.take() else {
            return;
        };
        tracing::debug!(animated, "dismissing popover");
        let content = p.surface.content().cloned();
        if let Some(content) = &content {
            content.will_disappear(animated);
        }
        // Surface and detector are released before the final hook.
        drop(p);
        if let Some(content) = content {
            content.did_disappear(animated);
        }
    }

    fn is_visible(&self) -> bool {
        self.presentation.is_some()
    }

    fn arrow_direction(&self) -> Option<ArrowDirection> {
        self.presentation
            .as_ref()
            .map(|p| p.surface.arrow_direction())
    }

    fn set_passthrough_regions(&mut self, regions: &[Rect]) {
        if let Some(p) = self.presentation.as_mut() {
            p.detector.set_passthrough_regions(regions);
        }
    }

    fn set_content(&mut self, content: &C) {
        if let Some(p) = self.presentation.as_mut() {
            p.surface.set_content(Some(content.clone()));
        }
    }

    fn handle_pointer(&mut self, event: PointerEvent) -> TouchDisposition {
        match self.presentation.as_ref() {
            Some(p) => {
                let disposition = p.detector.handle_pointer(event);
                tracing::trace!(position = ?event.position, ?disposition, "pointer routed");
                disposition
            }
            None => TouchDisposition::Ignored,
        }
    }

    fn surface(&self) -> Option<&ContainerSurface<C>> {
        self.presentation.as_ref().map(|p| &p.surface)
    }
}
