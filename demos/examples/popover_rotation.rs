// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement across rotations.
//!
//! Computes placements for one anchor in a landscape and a portrait display,
//! then keeps a live popover pinned to a bar item while the window rotates.
//!
//! Run:
//! - `cargo run -p understory_demos --example popover_rotation`

use kurbo::{Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_placement::{ArrowDirections, PlacementConfig, PlacementRequest, compute};
use understory_popover::{BarItem, PopoverContent, PopoverController, PresentingView};

#[derive(Clone, Debug)]
struct Details;

impl PopoverContent for Details {
    fn preferred_size(&self) -> Size {
        Size::new(320.0, 240.0)
    }
}

struct Window {
    size: Size,
}

impl PresentingView for Window {
    fn bounds(&self) -> Rect {
        self.size.to_rect()
    }

    // Keep popovers off the 44pt toolbar.
    fn display_area(&self) -> Rect {
        let b = self.bounds();
        Rect::new(b.x0, b.y0 + 44.0, b.x1, b.y1)
    }
}

/// The rightmost toolbar button.
struct ShareButton<'a> {
    window: &'a Window,
}

impl BarItem for ShareButton<'_> {
    fn frame(&self) -> Rect {
        let w = self.window.size.width;
        Rect::new(w - 44.0, 0.0, w, 44.0)
    }
    fn key_view(&self) -> &dyn PresentingView {
        self.window
    }
}

fn print_engine(config: &PlacementConfig, display: Rect) {
    let request = PlacementRequest::new(
        Size::new(320.0, 240.0),
        Rect::from_origin_size((500.0, 300.0), (40.0, 40.0)),
        display,
        ArrowDirections::ANY,
    );
    match compute(config, &request) {
        Ok(p) => println!(
            "  display {:?}: {:?} bg={:?} arrow={:?} clipped={}",
            display.size(),
            p.arrow_direction(),
            p.background_rect(),
            p.arrow_rect(),
            p.is_clipped()
        ),
        Err(err) => println!("  display {:?}: {err}", display.size()),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = PlacementConfig::default();
    println!("== Engine ==");
    print_engine(&config, Rect::new(0.0, 0.0, 1024.0, 768.0));
    print_engine(&config, Rect::new(0.0, 0.0, 768.0, 1024.0));
    print_engine(&config, Rect::new(0.0, 0.0, 0.0, 768.0));

    println!("== Controller ==");
    let mut popover = PopoverController::new(Details);
    let landscape = Window {
        size: Size::new(1024.0, 768.0),
    };
    let item = ShareButton { window: &landscape };
    popover
        .present_from_bar_item(&item, ArrowDirections::VERTICAL, false)
        .expect("valid placement");
    if let Some(view) = popover.view() {
        println!("  landscape: {:?} {:?}", view.arrow_direction(), view.frame());
    }

    let portrait = Window {
        size: Size::new(768.0, 1024.0),
    };
    let item = ShareButton { window: &portrait };
    popover
        .reposition_from_rect(item.frame(), item.key_view(), ArrowDirections::VERTICAL)
        .expect("popover is visible");
    if let Some(view) = popover.view() {
        println!("  portrait:  {:?} {:?}", view.arrow_direction(), view.frame());
    }

    popover.dismiss(false).expect("popover is visible");
    println!("  dismissed: {:?}", popover.state());
}
