// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement errors.

use thiserror::Error;

/// Invalid geometry input. Placement never fails for any other reason.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigurationError {
    /// The permitted direction set was empty.
    #[error("no permitted arrow directions")]
    NoPermittedDirections,
    /// The display area had a non-positive (or non-finite) width or height.
    #[error("display area must have a positive size, got {width}x{height}")]
    DegenerateDisplayArea {
        /// Display area width.
        width: f64,
        /// Display area height.
        height: f64,
    },
}
