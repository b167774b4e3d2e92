// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render models for the selector and the dropdown.
//!
//! A renderer draws these plain snapshots and relays user input back to the [`Select`]. The
//! snapshots hold no references into the select, so they can be diffed or sent elsewhere.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::config::{MaxTagPlaceholder, Mode};
use crate::filter::FlatItem;
use crate::host::Host;
use crate::select::Select;
use crate::value::{RawValue, SelectValue, to_external_single};

/// One entry of the selector's value area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionItem {
    /// The value of a single select.
    Single {
        /// Raw value.
        value: RawValue,
        /// Display label.
        label: String,
        /// Tooltip, falling back to the label.
        title: String,
        /// Hidden while the user types a search.
        visible: bool,
        /// Shown faded while the dropdown is open with an empty search.
        dimmed: bool,
    },
    /// A tag in a multi-value mode.
    Tag {
        /// Raw value.
        value: RawValue,
        /// Label, truncated to `max_tag_text_length`.
        content: String,
        /// Untruncated tooltip.
        title: String,
        /// Offers a remove affordance.
        removable: bool,
    },
    /// Stands in for the tags hidden by `max_tag_count`.
    Overflow {
        /// Placeholder text.
        content: String,
    },
}

/// Snapshot of the closed-control area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorView {
    /// Value area entries, in order.
    pub items: Vec<SelectionItem>,
    /// Placeholder text, if configured.
    pub placeholder: Option<String>,
    /// Whether the placeholder is shown.
    pub placeholder_visible: bool,
    /// Whether the clear affordance is shown.
    pub clear_visible: bool,
    /// Current input text.
    pub input_value: String,
    /// Whether the text input is shown.
    pub input_visible: bool,
    /// Whether the dropdown is shown.
    pub open: bool,
    /// Focused styling: focused or open.
    pub focused: bool,
    /// Disabled styling.
    pub disabled: bool,
}

/// One dropdown row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropdownItem {
    /// A group header.
    Group {
        /// Group key.
        key: String,
        /// Header label.
        label: String,
    },
    /// An option row.
    Option {
        /// Raw value.
        value: RawValue,
        /// Row text.
        label: String,
        /// Tooltip.
        title: Option<String>,
        /// The value is selected.
        selected: bool,
        /// The row is keyboard highlighted.
        active: bool,
        /// The option cannot be chosen.
        disabled: bool,
        /// The row sits inside a group.
        grouped: bool,
    },
}

/// Snapshot of the dropdown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DropdownView {
    /// Whether the dropdown is shown.
    pub visible: bool,
    /// Rows, in order. Indices match [`Select::flat_items`].
    pub items: Vec<DropdownItem>,
    /// Shown instead of rows when nothing matches.
    pub not_found: Option<String>,
}

/// Truncates `label` to `max` characters, appending `"..."` when it was cut.
fn truncate_label(label: &str, max: Option<usize>) -> String {
    match max {
        Some(max) if max > 0 && label.chars().count() > max => {
            let mut cut: String = label.chars().take(max).collect();
            cut.push_str("...");
            cut
        }
        _ => label.into(),
    }
}

impl<H: Host> Select<H> {
    /// Builds the selector snapshot.
    #[must_use]
    pub fn selector_view(&self) -> SelectorView {
        let config = self.config();
        let values = self.values();
        let input = self.input_value();
        let open = self.is_open();

        let mut items = Vec::new();
        match config.mode {
            Mode::Single => {
                if let Some(value) = values.first() {
                    let info = self.index().get(value);
                    let label = self.label_of(value);
                    let title = info
                        .and_then(|i| i.title.clone())
                        .unwrap_or_else(|| label.clone());
                    let typing = config.show_search && open;
                    items.push(SelectionItem::Single {
                        value: value.clone(),
                        label,
                        title,
                        visible: !typing || input.is_empty(),
                        dimmed: typing && input.is_empty(),
                    });
                }
            }
            Mode::Multiple | Mode::Tags => {
                let shown = config.max_tag_count.unwrap_or(values.len()).min(values.len());
                for value in &values[..shown] {
                    let label = self.label_of(value);
                    let title = self
                        .index()
                        .get(value)
                        .and_then(|i| i.title.clone())
                        .unwrap_or_else(|| label.clone());
                    items.push(SelectionItem::Tag {
                        value: value.clone(),
                        content: truncate_label(&label, config.max_tag_text_length),
                        title,
                        removable: !self.index().is_disabled(value),
                    });
                }
                if shown < values.len() {
                    let omitted = &values[shown..];
                    let content = match &config.max_tag_placeholder {
                        MaxTagPlaceholder::Count => format!("+ {} ...", omitted.len()),
                        MaxTagPlaceholder::Text(text) => text.clone(),
                        MaxTagPlaceholder::Render(render) => {
                            let omitted: Vec<SelectValue> = omitted
                                .iter()
                                .map(|v| {
                                    to_external_single(v, config.label_in_value, |v| {
                                        self.label_of(v)
                                    })
                                })
                                .collect();
                            render(omitted.as_slice())
                        }
                    };
                    items.push(SelectionItem::Overflow { content });
                }
            }
            Mode::Combobox => {}
        }

        let mut placeholder_visible = input.is_empty() && values.is_empty();
        if config.mode.is_combobox() && values.len() == 1 && values[0].is_empty_text() {
            placeholder_visible = true;
        }

        let clear_visible = config.allow_clear
            && if config.mode.is_combobox() {
                !input.is_empty()
            } else {
                !input.is_empty() || !values.is_empty()
            };

        let input_visible = match config.mode {
            Mode::Single => config.show_search && open,
            _ => true,
        };

        SelectorView {
            items,
            placeholder: config.placeholder.clone(),
            placeholder_visible,
            clear_visible,
            input_value: input.into(),
            input_visible,
            open: self.is_dropdown_visible(),
            focused: open || self.is_focused(),
            disabled: config.disabled,
        }
    }

    /// Builds the dropdown snapshot.
    #[must_use]
    pub fn dropdown_view(&self) -> DropdownView {
        let active = self.active_index();
        let items: Vec<DropdownItem> = self
            .flat_items()
            .iter()
            .enumerate()
            .map(|(idx, item)| match item {
                FlatItem::Group { key, label } => DropdownItem::Group {
                    key: key.clone(),
                    label: label.clone(),
                },
                FlatItem::Option { data, grouped } => DropdownItem::Option {
                    value: data.value.clone(),
                    label: data.display_text().into_owned(),
                    title: data.title.clone(),
                    selected: self.values().contains(&data.value),
                    active: active == Some(idx),
                    disabled: data.disabled,
                    grouped: *grouped,
                },
            })
            .collect();
        let not_found = if items.is_empty() {
            self.config().not_found_content.clone()
        } else {
            None
        };
        DropdownView {
            visible: self.is_dropdown_visible(),
            items,
            not_found,
        }
    }
}
