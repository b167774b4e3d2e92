// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Behavior knobs and props.
//!
//! [`SelectConfig`] holds the options that shape behavior and presentation. It is fixed for the
//! lifetime of a [`Select`](crate::Select). [`SelectProps`] are the caller-owned inputs at
//! mount, and [`PropsUpdate`] carries later changes to them.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;

use crate::filter::FilterPolicy;
use crate::option::{OptionNode, OptionProp};
use crate::value::SelectValue;

/// Selection mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// One value from the options.
    #[default]
    Single,
    /// Any number of values from the options.
    Multiple,
    /// Any number of values, including new ones typed by the user.
    Tags,
    /// Free text with suggestions; the text itself is the value.
    Combobox,
}

impl Mode {
    /// `Multiple` or `Tags`.
    #[must_use]
    pub fn is_multiple(self) -> bool {
        matches!(self, Self::Multiple | Self::Tags)
    }

    /// `Tags`.
    #[must_use]
    pub fn is_tags(self) -> bool {
        self == Self::Tags
    }

    /// `Combobox`.
    #[must_use]
    pub fn is_combobox(self) -> bool {
        self == Self::Combobox
    }

    /// `Single` or `Combobox`.
    #[must_use]
    pub fn is_single(self) -> bool {
        !self.is_multiple()
    }
}

/// Renderer for the overflow tag: receives the values that were not rendered as tags.
pub type PlaceholderFn = dyn Fn(&[SelectValue]) -> String + Send + Sync;

/// Content of the overflow tag shown when `max_tag_count` hides values.
#[derive(Clone, Default)]
pub enum MaxTagPlaceholder {
    /// `"+ N ..."`.
    #[default]
    Count,
    /// Fixed text.
    Text(String),
    /// Computed from the omitted values.
    Render(Arc<PlaceholderFn>),
}

impl MaxTagPlaceholder {
    /// Wraps a renderer.
    pub fn render<F>(f: F) -> Self
    where
        F: Fn(&[SelectValue]) -> String + Send + Sync + 'static,
    {
        Self::Render(Arc::new(f))
    }
}

impl fmt::Debug for MaxTagPlaceholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count => f.write_str("Count"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Render(_) => f.write_str("Render(..)"),
        }
    }
}

/// Behavior and presentation configuration.
#[derive(Clone, Debug)]
pub struct SelectConfig {
    /// Selection mode.
    pub mode: Mode,
    /// Report values as [`LabeledValue`](crate::value::LabeledValue)s.
    pub label_in_value: bool,
    /// Allow typing to filter in single mode. Multi and combobox modes always have an input.
    pub show_search: bool,
    /// How options are matched against the search text.
    pub filter_option: FilterPolicy,
    /// Option field the default filter matches.
    pub option_filter_prop: OptionProp,
    /// Option field used as the display label of selected values.
    pub option_label_prop: OptionProp,
    /// Tokens that split pasted text into several values in multi modes.
    pub token_separators: SmallVec<[String; 2]>,
    /// Clear the search text after selecting.
    pub auto_clear_search_value: bool,
    /// Highlight the first enabled option whenever the list changes.
    pub default_active_first_option: bool,
    /// Preview the highlighted option as the value while navigating with the keyboard.
    pub backfill: bool,
    /// Maximum number of tags rendered; `None` renders all.
    pub max_tag_count: Option<usize>,
    /// Maximum number of characters of a tag label before it is truncated.
    pub max_tag_text_length: Option<usize>,
    /// Content of the overflow tag.
    pub max_tag_placeholder: MaxTagPlaceholder,
    /// Text shown when no option is visible; `None` hides the dropdown instead.
    pub not_found_content: Option<String>,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Disables all interaction.
    pub disabled: bool,
    /// Offer a clear affordance.
    pub allow_clear: bool,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Single,
            label_in_value: false,
            show_search: true,
            filter_option: FilterPolicy::Default,
            option_filter_prop: OptionProp::Value,
            option_label_prop: OptionProp::Value,
            token_separators: SmallVec::new(),
            auto_clear_search_value: true,
            default_active_first_option: true,
            backfill: false,
            max_tag_count: None,
            max_tag_text_length: None,
            max_tag_placeholder: MaxTagPlaceholder::Count,
            not_found_content: Some("Not Found".into()),
            placeholder: None,
            disabled: false,
            allow_clear: false,
        }
    }
}

impl SelectConfig {
    /// Sets `mode`.
    #[must_use]
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets `label_in_value`.
    #[must_use]
    pub fn label_in_value(mut self, on: bool) -> Self {
        self.label_in_value = on;
        self
    }

    /// Sets `show_search`.
    #[must_use]
    pub fn show_search(mut self, on: bool) -> Self {
        self.show_search = on;
        self
    }

    /// Sets `filter_option`.
    #[must_use]
    pub fn filter_option(mut self, policy: FilterPolicy) -> Self {
        self.filter_option = policy;
        self
    }

    /// Sets `option_filter_prop`.
    #[must_use]
    pub fn option_filter_prop(mut self, prop: OptionProp) -> Self {
        self.option_filter_prop = prop;
        self
    }

    /// Sets `option_label_prop`.
    #[must_use]
    pub fn option_label_prop(mut self, prop: OptionProp) -> Self {
        self.option_label_prop = prop;
        self
    }

    /// Sets `token_separators`.
    #[must_use]
    pub fn token_separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.token_separators = separators.into_iter().map(Into::into).collect();
        self
    }

    /// Sets `auto_clear_search_value`.
    #[must_use]
    pub fn auto_clear_search_value(mut self, on: bool) -> Self {
        self.auto_clear_search_value = on;
        self
    }

    /// Sets `default_active_first_option`.
    #[must_use]
    pub fn default_active_first_option(mut self, on: bool) -> Self {
        self.default_active_first_option = on;
        self
    }

    /// Sets `backfill`.
    #[must_use]
    pub fn backfill(mut self, on: bool) -> Self {
        self.backfill = on;
        self
    }

    /// Sets `max_tag_count`.
    #[must_use]
    pub fn max_tag_count(mut self, count: Option<usize>) -> Self {
        self.max_tag_count = count;
        self
    }

    /// Sets `max_tag_text_length`.
    #[must_use]
    pub fn max_tag_text_length(mut self, len: Option<usize>) -> Self {
        self.max_tag_text_length = len;
        self
    }

    /// Sets `max_tag_placeholder`.
    #[must_use]
    pub fn max_tag_placeholder(mut self, placeholder: MaxTagPlaceholder) -> Self {
        self.max_tag_placeholder = placeholder;
        self
    }

    /// Sets `not_found_content`.
    #[must_use]
    pub fn not_found_content(mut self, content: Option<String>) -> Self {
        self.not_found_content = content;
        self
    }

    /// Sets `placeholder`.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Sets `disabled`.
    #[must_use]
    pub fn disabled(mut self, on: bool) -> Self {
        self.disabled = on;
        self
    }

    /// Sets `allow_clear`.
    #[must_use]
    pub fn allow_clear(mut self, on: bool) -> Self {
        self.allow_clear = on;
        self
    }
}

/// Caller-owned inputs at mount.
#[derive(Clone, Debug, Default)]
pub struct SelectProps {
    /// The option tree.
    pub options: Vec<OptionNode>,
    /// Controlled value. `Some` puts the value under caller control.
    pub value: Option<SelectValue>,
    /// Initial value when uncontrolled.
    pub default_value: Option<SelectValue>,
    /// Controlled open state.
    pub open: Option<bool>,
    /// Initial open state when uncontrolled.
    pub default_open: bool,
}

impl SelectProps {
    /// Props with the given options and nothing else.
    pub fn with_options(options: impl IntoIterator<Item = OptionNode>) -> Self {
        Self {
            options: options.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Sets the controlled value.
    #[must_use]
    pub fn value(mut self, value: impl Into<SelectValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<SelectValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Sets the controlled open state.
    #[must_use]
    pub fn open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    /// Sets the initial open state.
    #[must_use]
    pub fn default_open(mut self, open: bool) -> Self {
        self.default_open = open;
        self
    }
}

/// Changes to props after mount.
///
/// Only the fields that were set are applied, in the order options, value, open.
#[derive(Clone, Debug, Default)]
pub struct PropsUpdate {
    pub(crate) options: Option<Vec<OptionNode>>,
    pub(crate) value: Option<Option<SelectValue>>,
    pub(crate) open: Option<Option<bool>>,
}

impl PropsUpdate {
    /// An empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the option tree.
    #[must_use]
    pub fn options(mut self, options: impl IntoIterator<Item = OptionNode>) -> Self {
        self.options = Some(options.into_iter().collect());
        self
    }

    /// Replaces the controlled value. `None` hands control back to the select.
    #[must_use]
    pub fn value(mut self, value: Option<SelectValue>) -> Self {
        self.value = Some(value);
        self
    }

    /// Replaces the controlled open state. `None` hands control back to the select.
    #[must_use]
    pub fn open(mut self, open: Option<bool>) -> Self {
        self.open = Some(open);
        self
    }

    /// Returns `true` if nothing would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_none() && self.value.is_none() && self.open.is_none()
    }
}
