// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_select --heading-base-level=0

//! Understory Select: headless select / dropdown state.
//!
//! This crate is the interaction core of a select control: choosing one or more values from a
//! list of options, with optional search, tags (user-created values), and keyboard navigation.
//! It does **not** render anything. A UI layer forwards input into a [`Select`], drains the
//! [`SelectEvent`]s it produces, and draws the [`SelectorView`] / [`DropdownView`] snapshots.
//!
//! The pieces, from the bottom up:
//! - [`value`]: the value codec. Callers pass scalars, lists, or labeled values; internally a
//!   select keeps an ordered list of [`RawValue`]s.
//! - [`option`] and [`index`]: option descriptors, and a lookup table from values to labels that
//!   keeps entries for selected values whose option went away.
//! - [`filter`]: the options visible for a search string, including tag creation.
//! - [`navigator`]: keyboard highlight movement that skips headers and disabled rows.
//! - [`Select`]: the state machine tying it together, with focus and blur debounced on a
//!   host-driven clock ([`timer`]) and side effects routed through a [`Host`].
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_select::{Mode, NoopHost, Select, SelectConfig, SelectEvent, SelectProps};
//! use understory_select::option::{OptionData, OptionNode};
//! use understory_select::value::RawValue;
//!
//! let config = SelectConfig::default()
//!     .mode(Mode::Tags)
//!     .token_separators([","]);
//! let props = SelectProps::with_options([OptionNode::from(OptionData::new("red"))]);
//! let mut select = Select::new(config, props, NoopHost::new());
//!
//! // Pasting a separated list creates one tag per piece.
//! select.input_changed("red,blue,");
//! assert_eq!(select.values(), &[RawValue::from("red"), RawValue::from("blue")]);
//! assert_eq!(select.input_value(), "");
//!
//! let changes = select
//!     .take_events()
//!     .into_iter()
//!     .filter(|e| matches!(e, SelectEvent::Change { .. }))
//!     .count();
//! assert_eq!(changes, 1);
//! ```
//!
//! ## Controlled values
//!
//! When the `value` prop is set, the caller owns the value: intents still produce
//! [`SelectEvent::Change`], but the select only adopts a new value when the caller passes it
//! back through [`Select::update`]. The open state can be controlled the same way.
//!
//! ## Timers
//!
//! Focus and blur notifications are deferred by a few milliseconds so that focus moving
//! between the parts of one select does not look like leaving it. The select never reads a
//! clock. The host passes its time to [`Select::focus_in`] and [`Select::focus_out`], and
//! may report it with [`Select::set_now`] before other input. It calls [`Select::advance_to`]
//! when [`Select::next_deadline`] comes due.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod event;
pub mod filter;
pub mod host;
pub mod index;
pub mod keyboard;
pub mod navigator;
pub mod option;
pub mod select;
pub mod selection;
pub mod timer;
pub mod value;
pub mod view;

pub use config::{MaxTagPlaceholder, Mode, PropsUpdate, SelectConfig, SelectProps};
pub use event::SelectEvent;
pub use filter::FilterPolicy;
pub use host::{FocusTarget, Host, NoopHost};
pub use keyboard::{Key, KeyParseError, Modifiers};
pub use select::Select;
pub use value::{LabeledValue, RawValue, SelectValue};
pub use view::{DropdownItem, DropdownView, SelectionItem, SelectorView};
