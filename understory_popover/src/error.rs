// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popover errors.

use thiserror::Error;
use understory_placement::ConfigurationError;

/// An operation was invoked in a state that does not allow it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// `present` while a popover is already shown.
    #[error("popover is already visible")]
    AlreadyVisible,
    /// `dismiss` or `reposition` while nothing is shown.
    #[error("popover is not visible")]
    NotVisible,
}

/// Errors reported by [`PopoverController`](crate::PopoverController) and backends.
///
/// All of these are reported synchronously and nothing is retried.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum PopoverError {
    /// Invalid placement input.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// Operation invalid for the current state.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    /// `present` was called without a content handle.
    #[error("no content to present")]
    NoContent,
}
