// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Side effects a select asks of its environment.
//!
//! The controller never touches platform focus or scroll state itself. It calls into a
//! [`Host`], which the embedding UI implements on top of its focus manager and list view.

/// The focusable part of a select.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// The search / tag text input.
    Input,
    /// The selector body, used when there is no input.
    Selector,
}

/// Environment callbacks.
pub trait Host {
    /// Moves platform focus to `target`.
    fn focus(&mut self, target: FocusTarget);

    /// Removes platform focus from `target`.
    fn blur(&mut self, target: FocusTarget);

    /// Returns which part of this select currently holds platform focus, if any.
    fn focused_target(&self) -> Option<FocusTarget>;

    /// Scrolls the dropdown list so that row `index` is visible.
    fn scroll_to_index(&mut self, index: usize) {
        let _ = index;
    }
}

/// A host that tracks focus in memory and ignores scrolling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoopHost {
    focused: Option<FocusTarget>,
}

impl NoopHost {
    /// Creates a host with nothing focused.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Host for NoopHost {
    fn focus(&mut self, target: FocusTarget) {
        self.focused = Some(target);
    }

    fn blur(&mut self, target: FocusTarget) {
        if self.focused == Some(target) {
            self.focused = None;
        }
    }

    fn focused_target(&self) -> Option<FocusTarget> {
        self.focused
    }
}
