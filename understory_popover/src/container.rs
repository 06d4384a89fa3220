// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container surface: the placed panel holding the user's content.
//!
//! A [`ContainerSurface`] stores the current [`Placement`] and the content
//! handle. Repositioning replaces the placement wholesale and never touches
//! the content handle. Rendering is a pure function of the stored placement;
//! see [`ContainerSurface::render`].

use alloc::vec::Vec;

use kurbo::{Rect, Size};
use understory_placement::{
    ArrowDirection, ArrowDirections, ConfigurationError, Placement, PlacementRequest, compute,
};

use crate::assets::{AssetResolver, ContainerProperties};

/// One entry of the display list produced by [`ContainerSurface::render`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawItem<I> {
    /// Stretchable background image drawn over the background rectangle.
    Background {
        /// Resolved background image.
        image: I,
        /// Target rectangle.
        rect: Rect,
    },
    /// Arrow image for the current direction.
    Arrow {
        /// Resolved arrow image.
        image: I,
        /// Target rectangle.
        rect: Rect,
        /// Side the panel sits on.
        direction: ArrowDirection,
    },
    /// Slot where the host lays out the content view.
    Content {
        /// Content rectangle.
        rect: Rect,
    },
}

/// The placed popover panel.
#[derive(Clone, Debug)]
pub struct ContainerSurface<C> {
    properties: ContainerProperties,
    content_size: Size,
    placement: Placement,
    content: Option<C>,
}

impl<C> ContainerSurface<C> {
    /// Compute the initial placement for `content_size` pointing at `anchor_rect`.
    ///
    /// The surface starts without content; see [`set_content`](Self::set_content).
    pub fn new(
        content_size: Size,
        anchor_rect: Rect,
        display_area: Rect,
        permitted_directions: ArrowDirections,
        properties: ContainerProperties,
    ) -> Result<Self, ConfigurationError> {
        let request = PlacementRequest::new(
            content_size,
            anchor_rect,
            display_area,
            permitted_directions,
        );
        let placement = compute(&properties.placement, &request)?;
        Ok(Self {
            properties,
            content_size,
            placement,
            content: None,
        })
    }

    /// Recompute the placement for a new anchor or display area.
    ///
    /// The content handle is kept; only its rectangle may change. On error the
    /// previous placement stays in effect.
    pub fn reposition(
        &mut self,
        anchor_rect: Rect,
        display_area: Rect,
        permitted_directions: ArrowDirections,
    ) -> Result<(), ConfigurationError> {
        let request = PlacementRequest::new(
            self.content_size,
            anchor_rect,
            display_area,
            permitted_directions,
        );
        self.placement = self.placement.update(&self.properties.placement, &request)?;
        Ok(())
    }

    /// Side of the anchor the panel currently sits on.
    pub fn arrow_direction(&self) -> ArrowDirection {
        self.placement.arrow_direction()
    }

    /// The latest placement.
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Full extent of the panel, arrow included.
    pub fn frame(&self) -> Rect {
        self.placement.frame()
    }

    /// Content size as declared by the caller, before correction.
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Appearance used for this surface.
    pub fn properties(&self) -> &ContainerProperties {
        &self.properties
    }

    /// Current content handle.
    pub fn content(&self) -> Option<&C> {
        self.content.as_ref()
    }

    /// Replace the content, returning the previous handle.
    ///
    /// The placement is left as is until the next [`reposition`](Self::reposition).
    pub fn set_content(&mut self, content: Option<C>) -> Option<C> {
        core::mem::replace(&mut self.content, content)
    }

    /// Produce the display list for the current placement.
    ///
    /// Images the resolver does not know are skipped. The content slot is
    /// emitted last so the host draws content above the chrome.
    pub fn render<R: AssetResolver + ?Sized>(&self, resolver: &R) -> Vec<DrawItem<R::Image>> {
        let images = &self.properties.images;
        let direction = self.placement.arrow_direction();
        let mut out = Vec::with_capacity(3);

        match resolver.resolve(&images.background) {
            Some(image) => out.push(DrawItem::Background {
                image,
                rect: self.placement.background_rect(),
            }),
            None => tracing::warn!(name = %images.background, "background image not found"),
        }

        let arrow_name = images.arrow(direction);
        match resolver.resolve(arrow_name) {
            Some(image) => out.push(DrawItem::Arrow {
                image,
                rect: self.placement.arrow_rect(),
                direction,
            }),
            None => tracing::warn!(name = %arrow_name, "arrow image not found"),
        }

        out.push(DrawItem::Content {
            rect: self.placement.content_rect(),
        });
        out
    }
}
