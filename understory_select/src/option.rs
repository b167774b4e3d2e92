// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative option descriptors: leaves, one-level groups, and field selection.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use crate::value::RawValue;

/// A selectable option.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionData {
    /// The option identifier.
    pub value: RawValue,
    /// Display label, if different from the value.
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: Option<String>,
    /// Tooltip text.
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: Option<String>,
    /// Disabled options can be neither selected nor deselected.
    #[cfg_attr(feature = "serde", serde(default))]
    pub disabled: bool,
    /// Extra named fields that [`OptionProp::Attribute`] can address.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Vec<(String, String)>,
}

impl OptionData {
    /// Creates an enabled option with no label.
    pub fn new(value: impl Into<RawValue>) -> Self {
        Self {
            value: value.into(),
            label: None,
            title: None,
            disabled: false,
            attributes: Vec::new(),
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the disabled flag.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Adds a named attribute.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Reads the field selected by `prop`, if the option has it.
    #[must_use]
    pub fn prop(&self, prop: &OptionProp) -> Option<Cow<'_, str>> {
        match prop {
            OptionProp::Value => Some(self.value.as_text()),
            OptionProp::Label => self.label.as_deref().map(Cow::Borrowed),
            OptionProp::Title => self.title.as_deref().map(Cow::Borrowed),
            OptionProp::Attribute(name) => self
                .attributes
                .iter()
                .rev()
                .find(|(key, _)| key == name)
                .map(|(_, value)| Cow::Borrowed(value.as_str())),
        }
    }

    /// Text shown for this option in the dropdown: the label, or the value when unlabeled.
    #[must_use]
    pub fn display_text(&self) -> Cow<'_, str> {
        match &self.label {
            Some(label) => Cow::Borrowed(label),
            None => self.value.as_text(),
        }
    }
}

/// A labeled group of options. Groups do not nest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionGroup {
    /// Stable key; defaults to the label.
    #[cfg_attr(feature = "serde", serde(default))]
    pub key: Option<String>,
    /// Header label; defaults to the key.
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: Option<String>,
    /// Options inside the group.
    pub options: Vec<OptionData>,
}

impl OptionGroup {
    /// Creates an empty group with a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            key: None,
            label: Some(label.into()),
            options: Vec::new(),
        }
    }

    /// Sets the key.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Appends an option.
    #[must_use]
    pub fn option(mut self, option: OptionData) -> Self {
        self.options.push(option);
        self
    }

    /// Resolves the effective `(key, label)` pair, each falling back to the other.
    #[must_use]
    pub fn key_and_label(&self) -> (String, String) {
        let key = self.key.clone().or_else(|| self.label.clone());
        let label = self.label.clone().or_else(|| self.key.clone());
        (key.unwrap_or_default(), label.unwrap_or_default())
    }
}

/// An entry of the option tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum OptionNode {
    /// A group of options.
    Group(OptionGroup),
    /// A leaf option.
    Option(OptionData),
}

impl From<OptionData> for OptionNode {
    fn from(option: OptionData) -> Self {
        Self::Option(option)
    }
}

impl From<OptionGroup> for OptionNode {
    fn from(group: OptionGroup) -> Self {
        Self::Group(group)
    }
}

/// Iterates every leaf option of `nodes` in declaration order, descending into groups.
pub fn leaves(nodes: &[OptionNode]) -> impl Iterator<Item = &OptionData> {
    nodes.iter().flat_map(|node| match node {
        OptionNode::Option(option) => core::slice::from_ref(option),
        OptionNode::Group(group) => group.options.as_slice(),
    })
}

/// Selects which option field is used for labels or for filtering.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum OptionProp {
    /// The raw value.
    #[default]
    Value,
    /// The option label.
    Label,
    /// The option title.
    Title,
    /// A named entry of [`OptionData::attributes`].
    Attribute(String),
}
