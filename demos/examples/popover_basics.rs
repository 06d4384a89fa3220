// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popover basics.
//!
//! Presents a popover from a button, prints the display list, then routes a few
//! taps: one inside the panel, one on a passthrough toolbar, one outside that the
//! delegate vetoes, and one outside that it allows.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example popover_basics`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Point, Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_popover::touch::PointerEvent;
use understory_popover::{
    ArrowDirections, AssetResolver, PopoverContent, PopoverController, PopoverDelegate,
    PresentingView,
};

#[derive(Clone, Debug)]
struct ColorPicker;

impl PopoverContent for ColorPicker {
    fn preferred_size(&self) -> Size {
        Size::new(200.0, 150.0)
    }
    fn did_appear(&self, animated: bool) {
        println!("  picker appeared (animated: {animated})");
    }
    fn did_disappear(&self, _animated: bool) {
        println!("  picker gone");
    }
}

struct Window;

impl PresentingView for Window {
    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, 400.0, 300.0)
    }
}

/// Resolves image names to themselves and reports the stock arrow size.
struct ByName;

impl AssetResolver for ByName {
    type Image = String;
    fn resolve(&self, name: &str) -> Option<String> {
        Some(name.to_owned())
    }
    fn image_size(&self, _image: &String) -> Size {
        Size::new(24.0, 10.0)
    }
}

#[derive(Default)]
struct KeepOpenOnce {
    vetoed: Cell<bool>,
}

impl PopoverDelegate<ColorPicker> for KeepOpenOnce {
    fn should_dismiss(&self, _controller: &PopoverController<ColorPicker>) -> bool {
        // Refuse the first outside tap only.
        self.vetoed.replace(true)
    }
    fn did_dismiss(&self, _controller: &PopoverController<ColorPicker>) {
        println!("  delegate: did dismiss");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Must outlive the popover; the controller only keeps a weak reference.
    let delegate: Rc<dyn PopoverDelegate<ColorPicker>> = Rc::new(KeepOpenOnce::default());
    let mut popover = PopoverController::new(ColorPicker);
    popover.set_delegate(Some(Rc::downgrade(&delegate)));
    popover.set_passthrough_regions(vec![Rect::new(0.0, 0.0, 400.0, 44.0)]);

    let button = Rect::from_origin_size((100.0, 100.0), (20.0, 20.0));
    println!("== Present ==");
    popover
        .present_from_rect(button, &Window, ArrowDirections::ANY, true)
        .expect("valid placement");
    println!(
        "  side: {:?}, size: {:?}",
        popover.popover_arrow_direction(),
        popover.view().map(|v| v.content_size())
    );

    if let Some(view) = popover.view() {
        println!("== Display list ==");
        for item in view.render(&ByName) {
            println!("  {item:?}");
        }
    }

    println!("== Taps ==");
    let taps = [
        ("inside", popover.view().map(|v| v.frame().center())),
        ("toolbar", Some(Point::new(380.0, 20.0))),
        ("outside", Some(Point::new(380.0, 280.0))),
        ("outside", Some(Point::new(380.0, 280.0))),
    ];
    for (label, point) in taps {
        let Some(point) = point else { continue };
        let disposition = popover.handle_pointer(PointerEvent::down(point));
        println!(
            "  {label:8} {point:?} -> {disposition:?} (state: {:?})",
            popover.state()
        );
    }
}
