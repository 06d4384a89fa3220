// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual assets: image identifiers and the injected resolver.
//!
//! Images are never looked up globally. A host supplies an [`AssetResolver`]
//! that maps identifiers to whatever its renderer draws, and the core only
//! asks it for images and their sizes.

use alloc::string::String;

use kurbo::Size;
use understory_placement::{ArrowDirection, PlacementConfig};

/// Maps image identifiers to renderable images.
pub trait AssetResolver {
    /// Host image type.
    type Image: Clone;
    /// Returns the image registered under `name`, if any.
    fn resolve(&self, name: &str) -> Option<Self::Image>;
    /// Returns the natural size of `image`.
    fn image_size(&self, image: &Self::Image) -> Size;
}

/// Identifiers of the background and arrow images.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageNames {
    /// Stretchable background image.
    pub background: String,
    /// Arrow pointing up; drawn when the panel sits below the anchor.
    pub up_arrow: String,
    /// Arrow pointing down; drawn when the panel sits above the anchor.
    pub down_arrow: String,
    /// Arrow pointing left; drawn when the panel sits right of the anchor.
    pub left_arrow: String,
    /// Arrow pointing right; drawn when the panel sits left of the anchor.
    pub right_arrow: String,
}

impl Default for ImageNames {
    fn default() -> Self {
        Self {
            background: "popoverBg.png".into(),
            up_arrow: "popoverArrowUp.png".into(),
            down_arrow: "popoverArrowDown.png".into(),
            left_arrow: "popoverArrowLeft.png".into(),
            right_arrow: "popoverArrowRight.png".into(),
        }
    }
}

impl ImageNames {
    /// Identifier of the arrow image for a panel placed on the `direction` side.
    ///
    /// The arrow points back at the anchor, so the image is the opposite one.
    pub fn arrow(&self, direction: ArrowDirection) -> &str {
        match direction {
            ArrowDirection::Up => &self.down_arrow,
            ArrowDirection::Down => &self.up_arrow,
            ArrowDirection::Left => &self.right_arrow,
            ArrowDirection::Right => &self.left_arrow,
        }
    }
}

/// Container appearance: placement geometry plus image identifiers.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerProperties {
    /// Margins, caps and arrow metrics.
    pub placement: PlacementConfig,
    /// Images drawn by the container.
    pub images: ImageNames,
}

impl ContainerProperties {
    /// Take the arrow size from the resolved up-arrow image.
    ///
    /// Leaves the configured size alone when the image cannot be resolved.
    pub fn with_resolved_arrow_size<R: AssetResolver + ?Sized>(mut self, resolver: &R) -> Self {
        match resolver.resolve(&self.images.up_arrow) {
            Some(image) => self.placement.arrow_size = resolver.image_size(&image),
            None => tracing::warn!(
                name = %self.images.up_arrow,
                "arrow image not found; keeping configured arrow size"
            ),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sizes;
    impl AssetResolver for Sizes {
        type Image = Size;
        fn resolve(&self, name: &str) -> Option<Size> {
            (name == "popoverArrowUp.png").then_some(Size::new(30.0, 12.0))
        }
        fn image_size(&self, image: &Size) -> Size {
            *image
        }
    }

    #[test]
    fn arrow_names_by_direction() {
        let names = ImageNames::default();
        // Each arrow points back at the anchor.
        assert_eq!(names.arrow(ArrowDirection::Down), "popoverArrowUp.png");
        assert_eq!(names.arrow(ArrowDirection::Up), "popoverArrowDown.png");
        assert_eq!(names.arrow(ArrowDirection::Left), "popoverArrowRight.png");
        assert_eq!(names.arrow(ArrowDirection::Right), "popoverArrowLeft.png");
    }

    #[test]
    fn arrow_size_comes_from_resolver() {
        let props = ContainerProperties::default().with_resolved_arrow_size(&Sizes);
        assert_eq!(props.placement.arrow_size, Size::new(30.0, 12.0));
    }

    #[test]
    fn missing_arrow_keeps_configured_size() {
        let mut props = ContainerProperties::default();
        props.images.up_arrow = "custom.png".into();
        let before = props.placement.arrow_size;
        let props = props.with_resolved_arrow_size(&Sizes);
        assert_eq!(props.placement.arrow_size, before);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn properties_deserialize_from_json() {
        let props = ContainerProperties::default();
        let json = serde_json::to_string(&props).unwrap();
        let back: ContainerProperties = serde_json::from_str(&json).unwrap();
        assert_eq!(back, props);
    }
}
