// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! User-notification contract.
//!
//! The engine never draws UI chrome; it reports user-facing conditions
//! through this trait and the embedding app decides how to surface them
//! (snackbar, toast, overlay). All methods default to no-ops so an
//! integration only implements the events it cares about.

/// Notification surface exposed by the UI layer.
pub trait Notifier {
    /// Shows a transient message. `dismissible` messages carry a dismiss
    /// affordance and may end the session when dismissed (e.g. "tracking
    /// unavailable").
    fn show_message(&mut self, text: &str, dismissible: bool) {
        let _ = (text, dismissible);
    }

    /// Hides the currently-shown transient message, if any.
    fn hide_message(&mut self) {}

    /// The user tried to place an object past the placement cap.
    fn anchor_cap_reached(&mut self) {}
}

/// A notifier that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {}
