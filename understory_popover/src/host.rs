// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traits a host toolkit implements to plug into the controller.

use kurbo::{Rect, Size};

/// The content shown inside a popover.
///
/// Implement this on a cheap, clonable handle to your view (an `Rc`, an id).
/// The lifecycle hooks mirror a view controller's appearance callbacks and
/// default to no-ops.
pub trait PopoverContent {
    /// Size the content would like when [`popover_content_size`] is zero.
    ///
    /// [`popover_content_size`]: crate::PopoverController::popover_content_size
    fn preferred_size(&self) -> Size;

    /// Called before the popover becomes visible.
    fn will_appear(&self, _animated: bool) {}
    /// Called once the popover is visible.
    fn did_appear(&self, _animated: bool) {}
    /// Called before the popover is torn down.
    fn will_disappear(&self, _animated: bool) {}
    /// Called after the popover is torn down.
    fn did_disappear(&self, _animated: bool) {}
}

/// A view a popover can be presented in.
pub trait PresentingView {
    /// Bounds of the view in the shared coordinate space.
    fn bounds(&self) -> Rect;

    /// Region the popover must stay within.
    ///
    /// Views that want popovers to avoid bars or insets override this.
    fn display_area(&self) -> Rect {
        self.bounds()
    }
}

/// A bar item (toolbar or navigation button) a popover can point at.
pub trait BarItem {
    /// Frame of the item inside [`key_view`](Self::key_view).
    fn frame(&self) -> Rect;
    /// The top-level view the item lives in.
    fn key_view(&self) -> &dyn PresentingView;
}
