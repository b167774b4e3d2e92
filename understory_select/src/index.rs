// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Options index: a flat `RawValue → OptionInfo` projection of the option tree.
//!
//! The index is rebuilt whenever the option set changes. Entries for values that are still
//! selected but no longer present in the new option set are carried over from the previous
//! index, so a selected tag keeps its label while its option is temporarily missing.
//!
//! ```
//! use understory_select::index::OptionsIndex;
//! use understory_select::option::{OptionData, OptionNode, OptionProp};
//! use understory_select::value::RawValue;
//!
//! let old = OptionsIndex::rebuild(
//!     &[OptionNode::from(OptionData::new("nl").label("Netherlands"))],
//!     &OptionProp::Label,
//!     None,
//! );
//! let selected = [RawValue::from("nl")];
//! let new = OptionsIndex::rebuild(&[], &OptionProp::Label, Some((&old, &selected[..])));
//! assert_eq!(new.lookup(&RawValue::from("nl")).label, "Netherlands");
//! ```

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use crate::option::{OptionData, OptionNode, OptionProp, leaves};
use crate::value::RawValue;

/// Cached projection of one option, used for rendering and label lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionInfo {
    /// The option descriptor.
    pub option: OptionData,
    /// The option's raw value.
    pub value: RawValue,
    /// Label resolved through the configured label field.
    pub label: String,
    /// Tooltip text.
    pub title: Option<String>,
}

impl OptionInfo {
    /// Builds the info for a value that has no option, using `label` or the value itself.
    #[must_use]
    pub fn synthesized(value: RawValue, label: Option<String>) -> Self {
        let label = label.unwrap_or_else(|| value.as_text().into_owned());
        Self {
            option: OptionData::new(value.clone()).label(label.clone()),
            value,
            label,
            title: None,
        }
    }

    fn from_option(option: &OptionData, label_prop: &OptionProp) -> Self {
        let label = option
            .prop(label_prop)
            .unwrap_or_else(|| option.value.as_text())
            .into_owned();
        Self {
            option: option.clone(),
            value: option.value.clone(),
            label,
            title: option.title.clone(),
        }
    }
}

/// Lookup table from raw values to [`OptionInfo`].
#[derive(Clone, Debug, Default)]
pub struct OptionsIndex {
    entries: HashMap<RawValue, OptionInfo>,
    /// Declaration order, each value once.
    order: Vec<RawValue>,
    /// Values kept from a previous index because they are still selected.
    carried: HashSet<RawValue>,
}

impl OptionsIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flattens `tree` into a new index.
    ///
    /// Labels come from `label_prop`, falling back to the raw value when an option lacks that
    /// field. Duplicate values resolve to the last declaration.
    ///
    /// With `previous = Some((index, selected))`, every value in `selected` missing from
    /// `tree` keeps its entry from `index` unchanged.
    #[must_use]
    pub fn rebuild(
        tree: &[OptionNode],
        label_prop: &OptionProp,
        previous: Option<(&Self, &[RawValue])>,
    ) -> Self {
        let mut index = Self::new();
        for option in leaves(tree) {
            let info = OptionInfo::from_option(option, label_prop);
            if index.entries.insert(option.value.clone(), info).is_none() {
                index.order.push(option.value.clone());
            }
        }

        if let Some((prev, selected)) = previous {
            for value in selected {
                if index.entries.contains_key(value) {
                    continue;
                }
                if let Some(info) = prev.entries.get(value) {
                    index.entries.insert(value.clone(), info.clone());
                    index.order.push(value.clone());
                    index.carried.insert(value.clone());
                }
            }
        }

        tracing::trace!(
            entries = index.entries.len(),
            carried = index.carried.len(),
            "rebuilt options index"
        );
        index
    }

    /// Number of entries, carried ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the index has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry for `value`, if one is cached.
    #[must_use]
    pub fn get(&self, value: &RawValue) -> Option<&OptionInfo> {
        self.entries.get(value)
    }

    /// Returns the entry for `value`, synthesizing one labeled with the value itself when
    /// nothing is cached. Never fails.
    #[must_use]
    pub fn lookup(&self, value: &RawValue) -> Cow<'_, OptionInfo> {
        match self.entries.get(value) {
            Some(info) => Cow::Borrowed(info),
            None => Cow::Owned(OptionInfo::synthesized(value.clone(), None)),
        }
    }

    /// Returns `true` if `value` is only present because it was carried from a previous index.
    #[must_use]
    pub fn is_carried(&self, value: &RawValue) -> bool {
        self.carried.contains(value)
    }

    /// Returns `true` if the current option set declares `value` as disabled.
    #[must_use]
    pub fn is_disabled(&self, value: &RawValue) -> bool {
        !self.is_carried(value)
            && self
                .entries
                .get(value)
                .is_some_and(|info| info.option.disabled)
    }

    /// Finds the value whose label equals `label`. The last match in declaration order wins.
    #[must_use]
    pub fn value_by_label(&self, label: &str) -> Option<RawValue> {
        self.order
            .iter()
            .rev()
            .find(|value| self.entries.get(*value).is_some_and(|info| info.label == label))
            .cloned()
    }

    /// Iterates entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionInfo> {
        self.order.iter().filter_map(|value| self.entries.get(value))
    }
}
