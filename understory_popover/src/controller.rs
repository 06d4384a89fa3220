// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation controller.
//!
//! ## States
//!
//! A controller is either [`Idle`](PopoverState::Idle) or
//! [`Visible`](PopoverState::Visible). Presenting and dismissing happen within a
//! single call; there are no observable in-between states.
//!
//! | Operation                     | Valid from | Otherwise                     |
//! |-------------------------------|------------|-------------------------------|
//! | `present_from_rect`/`_bar_item` | `Idle`   | [`LifecycleError::AlreadyVisible`] |
//! | `reposition_from_rect`        | `Visible`  | [`LifecycleError::NotVisible`]    |
//! | `dismiss`                     | `Visible`  | [`LifecycleError::NotVisible`]    |
//!
//! ## Dismissal
//!
//! - Caller-invoked [`dismiss`](PopoverController::dismiss) never asks the delegate.
//! - A touch outside the popover (see [`handle_pointer`](PopoverController::handle_pointer))
//!   first asks [`PopoverDelegate::should_dismiss`]; a veto leaves everything as it was.
//! - Every completed dismissal ends with exactly one [`PopoverDelegate::did_dismiss`].
//!
//! The delegate is held weakly. Once it is dropped its callbacks are skipped and
//! outside touches dismiss unconditionally.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::any::Any;

use kurbo::{Rect, Size};
use understory_placement::{ArrowDirection, ArrowDirections};

use crate::assets::ContainerProperties;
use crate::backend::{CustomBackend, NativeProbe, PopoverBackend, PresentRequest};
use crate::container::ContainerSurface;
use crate::error::{LifecycleError, PopoverError};
use crate::host::{BarItem, PopoverContent, PresentingView};
use crate::touch::{PointerEvent, TouchDisposition};

/// Externally visible presentation state.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PopoverState {
    /// Nothing shown.
    Idle,
    /// Shown and interactive.
    Visible,
}

/// Receives dismissal callbacks from a [`PopoverController`].
pub trait PopoverDelegate<C> {
    /// Asked before an outside touch dismisses the popover. Return `false` to veto.
    fn should_dismiss(&self, _controller: &PopoverController<C>) -> bool {
        true
    }

    /// Called after the popover has been torn down.
    fn did_dismiss(&self, controller: &PopoverController<C>);
}

/// Shows a content handle in a popover anchored to a rectangle.
pub struct PopoverController<C> {
    content: Option<C>,
    content_size: Size,
    properties: ContainerProperties,
    context: Option<Rc<dyn Any>>,
    passthrough: Vec<Rect>,
    delegate: Option<Weak<dyn PopoverDelegate<C>>>,
    backend: Box<dyn PopoverBackend<C>>,
    native: bool,
}

impl<C> core::fmt::Debug for PopoverController<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PopoverController")
            .field("visible", &self.backend.is_visible())
            .field("native", &self.native)
            .field("content_size", &self.content_size)
            .field("passthrough", &self.passthrough)
            .finish_non_exhaustive()
    }
}

impl<C: PopoverContent + Clone + 'static> PopoverController<C> {
    /// Create a controller that places the popover itself.
    pub fn new(content: C) -> Self {
        Self::with_backend(Some(content), Box::new(CustomBackend::new()), false)
    }

    /// Create a controller, using the host's native popover when `probe` finds one.
    pub fn with_probe<P: NativeProbe<C> + ?Sized>(content: C, probe: &P) -> Self {
        match probe.native_popover() {
            Some(native) => {
                tracing::debug!("using native popover backend");
                Self::with_backend(Some(content), native, true)
            }
            None => Self::new(content),
        }
    }

    fn with_backend(content: Option<C>, backend: Box<dyn PopoverBackend<C>>, native: bool) -> Self {
        Self {
            content,
            content_size: Size::ZERO,
            properties: ContainerProperties::default(),
            context: None,
            passthrough: Vec::new(),
            delegate: None,
            backend,
            native,
        }
    }
}

impl<C: PopoverContent + Clone> PopoverController<C> {
    /// Whether the native backend was selected at construction.
    pub fn uses_native_backend(&self) -> bool {
        self.native
    }

    /// Current state.
    pub fn state(&self) -> PopoverState {
        if self.backend.is_visible() {
            PopoverState::Visible
        } else {
            PopoverState::Idle
        }
    }

    /// Whether the popover is shown.
    pub fn is_popover_visible(&self) -> bool {
        self.backend.is_visible()
    }

    /// Side of the anchor the visible popover sits on.
    pub fn popover_arrow_direction(&self) -> Option<ArrowDirection> {
        self.backend.arrow_direction()
    }

    /// The rendered panel, when the custom backend is showing one.
    pub fn view(&self) -> Option<&ContainerSurface<C>> {
        self.backend.surface()
    }

    /// Content handle.
    pub fn content(&self) -> Option<&C> {
        self.content.as_ref()
    }

    /// Replace the content handle; a visible popover shows it immediately.
    pub fn set_content(&mut self, content: C) {
        self.backend.set_content(&content);
        self.content = Some(content);
    }

    /// Declared content size. Zero means "use the content's preferred size".
    pub fn popover_content_size(&self) -> Size {
        self.content_size
    }

    /// Set the declared content size used by the next presentation.
    pub fn set_popover_content_size(&mut self, size: Size) {
        self.content_size = size;
    }

    /// Container appearance.
    pub fn container_properties(&self) -> &ContainerProperties {
        &self.properties
    }

    /// Set the container appearance used by the next presentation.
    pub fn set_container_properties(&mut self, properties: ContainerProperties) {
        self.properties = properties;
    }

    /// Opaque caller payload.
    pub fn context(&self) -> Option<&Rc<dyn Any>> {
        self.context.as_ref()
    }

    /// Set the opaque caller payload.
    pub fn set_context(&mut self, context: Option<Rc<dyn Any>>) {
        self.context = context;
    }

    /// Regions that do not dismiss the popover when touched.
    pub fn passthrough_regions(&self) -> &[Rect] {
        &self.passthrough
    }

    /// Replace the passthrough regions, including on a visible popover.
    pub fn set_passthrough_regions(&mut self, regions: Vec<Rect>) {
        self.backend.set_passthrough_regions(&regions);
        self.passthrough = regions;
    }

    /// The delegate, if it is still alive.
    pub fn delegate(&self) -> Option<Rc<dyn PopoverDelegate<C>>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    /// Set the delegate. Only a weak reference is kept.
    pub fn set_delegate(&mut self, delegate: Option<Weak<dyn PopoverDelegate<C>>>) {
        self.delegate = delegate;
    }

    /// Present pointing at `rect` inside `view`.
    ///
    /// When [`popover_content_size`](Self::popover_content_size) is zero the
    /// content's preferred size is used. The declared size is left as is.
    pub fn present_from_rect(
        &mut self,
        rect: Rect,
        view: &dyn PresentingView,
        permitted_directions: ArrowDirections,
        animated: bool,
    ) -> Result<(), PopoverError> {
        if self.backend.is_visible() {
            return Err(LifecycleError::AlreadyVisible.into());
        }
        let content = self.content.as_ref().ok_or(PopoverError::NoContent)?;
        let content_size = if self.content_size == Size::ZERO {
            content.preferred_size()
        } else {
            self.content_size
        };
        let display_area = view.display_area();
        tracing::debug!(anchor = ?rect, ?display_area, native = self.native, "present");
        self.backend.present(PresentRequest {
            content,
            content_size,
            anchor_rect: rect,
            display_area,
            permitted_directions,
            properties: &self.properties,
            passthrough_regions: &self.passthrough,
            animated,
        })
    }

    /// Present pointing at a bar item.
    pub fn present_from_bar_item(
        &mut self,
        item: &dyn BarItem,
        permitted_directions: ArrowDirections,
        animated: bool,
    ) -> Result<(), PopoverError> {
        self.present_from_rect(item.frame(), item.key_view(), permitted_directions, animated)
    }

    /// Re-anchor the visible popover, for example after rotation.
    ///
    /// The side is chosen afresh and may change.
    pub fn reposition_from_rect(
        &mut self,
        rect: Rect,
        view: &dyn PresentingView,
        permitted_directions: ArrowDirections,
    ) -> Result<(), PopoverError> {
        if !self.backend.is_visible() {
            return Err(LifecycleError::NotVisible.into());
        }
        self.backend
            .reposition(rect, view.display_area(), permitted_directions)
    }

    /// Dismiss the visible popover without consulting the delegate.
    pub fn dismiss(&mut self, animated: bool) -> Result<(), PopoverError> {
        if !self.backend.is_visible() {
            return Err(LifecycleError::NotVisible.into());
        }
        self.tear_down(animated);
        Ok(())
    }

    /// Route a pointer event through the outside-touch layer.
    ///
    /// A [`DismissRequested`](TouchDisposition::DismissRequested) result has
    /// already been confirmed with the delegate and acted on; check
    /// [`is_popover_visible`](Self::is_popover_visible) to tell a veto apart.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> TouchDisposition {
        let disposition = self.backend.handle_pointer(event);
        if disposition == TouchDisposition::DismissRequested {
            if self.should_dismiss() {
                self.tear_down(true);
            } else {
                tracing::debug!("outside-touch dismissal vetoed");
            }
        }
        disposition
    }

    /// Forward the native primitive's "should dismiss" query to the delegate.
    pub fn native_should_dismiss(&self) -> bool {
        self.should_dismiss()
    }

    /// Forward the native primitive's "did dismiss" callback to the delegate.
    pub fn native_did_dismiss(&self) {
        self.notify_did_dismiss();
    }

    fn should_dismiss(&self) -> bool {
        match self.delegate() {
            Some(delegate) => delegate.should_dismiss(self),
            None => true,
        }
    }

    fn tear_down(&mut self, animated: bool) {
        self.backend.dismiss(animated);
        self.notify_did_dismiss();
    }

    fn notify_did_dismiss(&self) {
        if let Some(delegate) = self.delegate() {
            delegate.did_dismiss(self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;
    use core::cell::{Cell, RefCell};
    use kurbo::Point;

    #[derive(Clone, Debug, Default)]
    struct Panel {
        log: Rc<RefCell<Vec<&'static str>>>,
        preferred: Option<Size>,
    }

    impl PopoverContent for Panel {
        fn preferred_size(&self) -> Size {
            self.preferred.unwrap_or(Size::new(200.0, 150.0))
        }
        fn will_appear(&self, _animated: bool) {
            self.log.borrow_mut().push("will_appear");
        }
        fn did_appear(&self, _animated: bool) {
            self.log.borrow_mut().push("did_appear");
        }
        fn will_disappear(&self, _animated: bool) {
            self.log.borrow_mut().push("will_disappear");
        }
        fn did_disappear(&self, _animated: bool) {
            self.log.borrow_mut().push("did_disappear");
        }
    }

    struct Screen;
    impl PresentingView for Screen {
        fn bounds(&self) -> Rect {
            Rect::new(0.0, 0.0, 400.0, 300.0)
        }
    }

    struct Inset;
    impl PresentingView for Inset {
        fn bounds(&self) -> Rect {
            Rect::new(0.0, 0.0, 400.0, 300.0)
        }
        fn display_area(&self) -> Rect {
            Rect::new(0.0, 0.0, 400.0, 150.0)
        }
    }

    #[derive(Default)]
    struct Recorder {
        veto: Cell<bool>,
        asked: Cell<u32>,
        dismissed: Cell<u32>,
        visible_at_dismiss: Cell<Option<bool>>,
    }

    impl PopoverDelegate<Panel> for Recorder {
        fn should_dismiss(&self, _controller: &PopoverController<Panel>) -> bool {
            self.asked.set(self.asked.get() + 1);
            !self.veto.get()
        }
        fn did_dismiss(&self, controller: &PopoverController<Panel>) {
            self.dismissed.set(self.dismissed.get() + 1);
            self.visible_at_dismiss
                .set(Some(controller.is_popover_visible()));
        }
    }

    fn anchor() -> Rect {
        Rect::from_origin_size((100.0, 100.0), (20.0, 20.0))
    }

    fn weak_delegate(recorder: &Rc<Recorder>) -> Weak<dyn PopoverDelegate<Panel>> {
        let delegate: Rc<dyn PopoverDelegate<Panel>> = recorder.clone();
        Rc::downgrade(&delegate)
    }

    fn visible() -> (PopoverController<Panel>, Rc<Recorder>) {
        let mut c = PopoverController::new(Panel::default());
        let recorder = Rc::new(Recorder::default());
        c.set_delegate(Some(weak_delegate(&recorder)));
        c.present_from_rect(anchor(), &Screen, ArrowDirections::ANY, false)
            .unwrap();
        (c, recorder)
    }

    #[test]
    fn present_shows_panel() {
        let (c, _) = visible();
        assert_eq!(c.state(), PopoverState::Visible);
        assert!(!c.uses_native_backend());
        assert_eq!(c.popover_arrow_direction(), Some(ArrowDirection::Down));
        assert_eq!(c.popover_content_size(), Size::ZERO);
        let view = c.view().unwrap();
        assert_eq!(view.content_size(), Size::new(200.0, 150.0));
        assert_eq!(view.arrow_direction(), ArrowDirection::Down);
        assert!(view.content().is_some());
        assert_eq!(
            *c.content().unwrap().log.borrow(),
            vec!["will_appear", "did_appear"]
        );
    }

    #[test]
    fn declared_size_wins_over_preferred() {
        let mut c = PopoverController::new(Panel::default());
        c.set_popover_content_size(Size::new(80.0, 60.0));
        c.present_from_rect(anchor(), &Screen, ArrowDirections::ANY, false)
            .unwrap();
        assert_eq!(c.view().unwrap().content_size(), Size::new(80.0, 60.0));
    }

    #[test]
    fn zero_size_follows_swapped_content() {
        let (mut c, _) = visible();
        c.dismiss(false).unwrap();
        c.set_content(Panel {
            preferred: Some(Size::new(60.0, 40.0)),
            ..Panel::default()
        });
        c.present_from_rect(anchor(), &Screen, ArrowDirections::ANY, false)
            .unwrap();
        assert_eq!(c.popover_content_size(), Size::ZERO);
        assert_eq!(c.view().unwrap().content_size(), Size::new(60.0, 40.0));
    }

    #[test]
    fn display_area_comes_from_view() {
        let mut c = PopoverController::new(Panel::default());
        c.present_from_rect(anchor(), &Inset, ArrowDirections::ANY, false)
            .unwrap();
        let bg = c.view().unwrap().placement().background_rect();
        assert!(bg.y1 <= 150.0);
    }

    #[test]
    fn present_twice_is_lifecycle_error() {
        let (mut c, _) = visible();
        assert_eq!(
            c.present_from_rect(anchor(), &Screen, ArrowDirections::ANY, false),
            Err(PopoverError::Lifecycle(LifecycleError::AlreadyVisible))
        );
        assert!(c.is_popover_visible());
    }

    #[test]
    fn idle_dismiss_and_reposition_are_lifecycle_errors() {
        let mut c = PopoverController::new(Panel::default());
        assert_eq!(
            c.dismiss(false),
            Err(PopoverError::Lifecycle(LifecycleError::NotVisible))
        );
        assert_eq!(
            c.reposition_from_rect(anchor(), &Screen, ArrowDirections::ANY),
            Err(PopoverError::Lifecycle(LifecycleError::NotVisible))
        );
        assert_eq!(c.state(), PopoverState::Idle);
    }

    #[test]
    fn configuration_errors_surface() {
        let mut c = PopoverController::new(Panel::default());
        assert!(matches!(
            c.present_from_rect(anchor(), &Screen, ArrowDirections::empty(), false),
            Err(PopoverError::Configuration(_))
        ));
        assert_eq!(c.state(), PopoverState::Idle);
    }

    #[test]
    fn dismiss_skips_veto_and_notifies_once() {
        let (mut c, recorder) = visible();
        recorder.veto.set(true);
        c.dismiss(true).unwrap();
        assert_eq!(c.state(), PopoverState::Idle);
        assert!(c.view().is_none());
        assert_eq!(recorder.asked.get(), 0);
        assert_eq!(recorder.dismissed.get(), 1);
        assert_eq!(recorder.visible_at_dismiss.get(), Some(false));
        assert_eq!(
            *c.content().unwrap().log.borrow(),
            vec!["will_appear", "did_appear", "will_disappear", "did_disappear"]
        );
    }

    #[test]
    fn reposition_can_flip_side() {
        let (mut c, _) = visible();
        let low = Rect::from_origin_size((100.0, 260.0), (20.0, 20.0));
        c.reposition_from_rect(low, &Screen, ArrowDirections::ANY)
            .unwrap();
        assert_eq!(c.popover_arrow_direction(), Some(ArrowDirection::Up));
        assert_eq!(c.state(), PopoverState::Visible);
    }

    #[test]
    fn touch_inside_is_left_to_content() {
        let (mut c, recorder) = visible();
        let inside = c.view().unwrap().frame().center();
        assert_eq!(
            c.handle_pointer(PointerEvent::down(inside)),
            TouchDisposition::Content
        );
        assert!(c.is_popover_visible());
        assert_eq!(recorder.asked.get(), 0);
    }

    #[test]
    fn passthrough_touch_does_not_dismiss() {
        let (mut c, recorder) = visible();
        c.set_passthrough_regions(vec![Rect::new(350.0, 0.0, 400.0, 50.0)]);
        assert_eq!(
            c.handle_pointer(PointerEvent::down(Point::new(375.0, 25.0))),
            TouchDisposition::Passthrough(0)
        );
        assert!(c.is_popover_visible());
        assert_eq!(recorder.asked.get(), 0);
    }

    #[test]
    fn vetoed_outside_touch_keeps_popover() {
        let (mut c, recorder) = visible();
        recorder.veto.set(true);
        let before = c.view().unwrap().placement().clone();
        assert_eq!(
            c.handle_pointer(PointerEvent::down(Point::new(390.0, 10.0))),
            TouchDisposition::DismissRequested
        );
        assert_eq!(c.state(), PopoverState::Visible);
        assert_eq!(c.view().unwrap().placement(), &before);
        assert_eq!(recorder.asked.get(), 1);
        assert_eq!(recorder.dismissed.get(), 0);
    }

    #[test]
    fn confirmed_outside_touch_dismisses_once() {
        let (mut c, recorder) = visible();
        c.handle_pointer(PointerEvent::down(Point::new(390.0, 10.0)));
        assert_eq!(c.state(), PopoverState::Idle);
        assert_eq!(recorder.asked.get(), 1);
        assert_eq!(recorder.dismissed.get(), 1);

        // Nothing left to route.
        assert_eq!(
            c.handle_pointer(PointerEvent::down(Point::new(390.0, 10.0))),
            TouchDisposition::Ignored
        );
        assert_eq!(recorder.dismissed.get(), 1);
    }

    #[test]
    fn dropped_delegate_is_tolerated() {
        let (mut c, recorder) = visible();
        drop(recorder);
        assert!(c.delegate().is_none());
        c.handle_pointer(PointerEvent::down(Point::new(390.0, 10.0)));
        assert_eq!(c.state(), PopoverState::Idle);
    }

    #[test]
    fn present_without_content_fails() {
        let mut c: PopoverController<Panel> =
            PopoverController::with_backend(None, Box::new(CustomBackend::new()), false);
        assert_eq!(
            c.present_from_rect(anchor(), &Screen, ArrowDirections::ANY, false),
            Err(PopoverError::NoContent)
        );
    }

    #[test]
    fn set_content_while_visible_updates_surface() {
        let (mut c, _) = visible();
        let replacement = Panel::default();
        c.set_content(replacement.clone());
        let shown = c.view().unwrap().content().unwrap();
        assert!(Rc::ptr_eq(&shown.log, &replacement.log));
    }

    #[test]
    fn context_is_opaque() {
        let mut c = PopoverController::new(Panel::default());
        c.set_context(Some(Rc::new(String::from("row 7"))));
        let ctx = c.context().unwrap();
        assert_eq!(ctx.downcast_ref::<String>().map(String::as_str), Some("row 7"));
    }

    struct Item;
    impl BarItem for Item {
        fn frame(&self) -> Rect {
            Rect::new(360.0, 0.0, 400.0, 44.0)
        }
        fn key_view(&self) -> &dyn PresentingView {
            &Screen
        }
    }

    #[test]
    fn present_from_bar_item() {
        let mut c = PopoverController::new(Panel::default());
        c.set_popover_content_size(Size::new(150.0, 100.0));
        c.present_from_bar_item(&Item, ArrowDirections::ANY, true)
            .unwrap();
        assert_eq!(c.popover_arrow_direction(), Some(ArrowDirection::Down));
        let arrow = c.view().unwrap().placement().arrow_rect();
        assert_eq!(arrow.y0, 44.0);
    }

    // A stand-in for a host primitive: tracks visibility only.
    #[derive(Default)]
    struct FakeNative {
        visible: Rc<Cell<bool>>,
    }

    impl PopoverBackend<Panel> for FakeNative {
        fn present(&mut self, _request: PresentRequest<'_, Panel>) -> Result<(), PopoverError> {
            self.visible.set(true);
            Ok(())
        }
        fn reposition(
            &mut self,
            _anchor_rect: Rect,
            _display_area: Rect,
            _permitted_directions: ArrowDirections,
        ) -> Result<(), PopoverError> {
            Ok(())
        }
        fn dismiss(&mut self, _animated: bool) {
            self.visible.set(false);
        }
        fn is_visible(&self) -> bool {
            self.visible.get()
        }
        fn arrow_direction(&self) -> Option<ArrowDirection> {
            self.visible.get().then_some(ArrowDirection::Up)
        }
        fn set_passthrough_regions(&mut self, _regions: &[Rect]) {}
        fn set_content(&mut self, _content: &Panel) {}
    }

    struct HasNative(Rc<Cell<bool>>);
    impl NativeProbe<Panel> for HasNative {
        fn native_popover(&self) -> Option<Box<dyn PopoverBackend<Panel>>> {
            Some(Box::new(FakeNative {
                visible: self.0.clone(),
            }))
        }
    }

    #[test]
    fn probe_selects_native_backend() {
        let flag = Rc::new(Cell::new(false));
        let mut c = PopoverController::with_probe(Panel::default(), &HasNative(flag.clone()));
        assert!(c.uses_native_backend());
        let recorder = Rc::new(Recorder::default());
        c.set_delegate(Some(weak_delegate(&recorder)));

        c.present_from_rect(anchor(), &Screen, ArrowDirections::ANY, false)
            .unwrap();
        assert!(c.is_popover_visible());
        assert_eq!(c.popover_arrow_direction(), Some(ArrowDirection::Up));
        assert!(c.view().is_none());
        // Touches belong to the native primitive.
        assert_eq!(
            c.handle_pointer(PointerEvent::down(Point::new(390.0, 10.0))),
            TouchDisposition::Ignored
        );

        // The primitive dismisses itself and reports back.
        recorder.veto.set(true);
        assert!(!c.native_should_dismiss());
        recorder.veto.set(false);
        assert!(c.native_should_dismiss());
        flag.set(false);
        c.native_did_dismiss();
        assert_eq!(c.state(), PopoverState::Idle);
        assert_eq!(recorder.dismissed.get(), 1);
    }

    #[test]
    fn probe_without_native_falls_back() {
        let c = PopoverController::with_probe(Panel::default(), &crate::backend::NoNativePopover);
        assert!(!c.uses_native_backend());
    }
}
