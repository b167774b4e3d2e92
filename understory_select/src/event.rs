// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outbound notifications.

use alloc::string::String;
use alloc::vec::Vec;

use crate::option::OptionData;
use crate::value::SelectValue;

/// A notification produced by a [`Select`](crate::Select).
///
/// Events are appended in the order they happen and drained with
/// [`Select::take_events`](crate::Select::take_events). For a single intent, `Select` and
/// `Deselect` always come before the `Change` they cause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectEvent {
    /// The committed value changed (or, when controlled, should change).
    Change {
        /// New value in its external shape. `None` for an empty single select.
        value: Option<SelectValue>,
        /// Option descriptors for the new values, in value order.
        options: Vec<OptionData>,
    },
    /// A value was selected.
    Select {
        /// The value in its external shape.
        value: SelectValue,
        /// Its option descriptor.
        option: OptionData,
    },
    /// A value was removed in a multi-value mode.
    Deselect {
        /// The value in its external shape.
        value: SelectValue,
        /// Its option descriptor.
        option: OptionData,
    },
    /// The search text changed.
    Search(String),
    /// The widget gained focus.
    Focus,
    /// The widget lost focus; carries the value at that moment.
    Blur(Option<SelectValue>),
    /// The dropdown opened (`true`) or closed (`false`).
    DropdownVisibleChange(bool),
}
