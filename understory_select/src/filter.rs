// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filter engine: the visible subset of the option tree for a search string.
//!
//! [`compute_visible`] keeps the group structure (dropping groups with no surviving child) and,
//! in tag mode, appends free-form selected values and a synthetic "create" entry for the
//! current search text. [`flatten`] then turns the result into the linear item list that
//! keyboard navigation and virtualized rendering work on.
//!
//! ```
//! use understory_select::filter::{FilterContext, FilterPolicy, compute_visible};
//! use understory_select::option::{OptionData, OptionNode, OptionProp};
//!
//! let tree: Vec<OptionNode> = vec![
//!     OptionData::new("apple").into(),
//!     OptionData::new("banana").into(),
//! ];
//! let policy = FilterPolicy::Default;
//! let ctx = FilterContext::new(&policy, &OptionProp::Value);
//! let visible = compute_visible("APP", &tree, &ctx);
//! assert_eq!(visible.len(), 1);
//! ```

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;

use crate::option::{OptionData, OptionNode, OptionProp};
use crate::value::RawValue;

/// Caller-supplied filter predicate: `(search_text, option) -> keep`.
pub type FilterFn = dyn Fn(&str, &OptionData) -> bool + Send + Sync;

/// How options are matched against the search text.
#[derive(Clone, Default)]
pub enum FilterPolicy {
    /// Every option passes.
    Disabled,
    /// Case-insensitive substring match on the filter field; disabled options never match.
    #[default]
    Default,
    /// A caller predicate.
    Custom(Arc<FilterFn>),
}

impl FilterPolicy {
    /// Wraps a predicate.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&str, &OptionData) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }
}

impl fmt::Debug for FilterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Default => f.write_str("Default"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// The built-in matcher: case-insensitive substring search on `prop`.
#[must_use]
pub fn default_filter(search: &str, option: &OptionData, prop: &OptionProp) -> bool {
    if option.disabled {
        return false;
    }
    let Some(field) = option.prop(prop) else {
        return false;
    };
    field.to_lowercase().contains(&search.to_lowercase())
}

/// Everything a filter pass needs besides the search text and the tree.
#[derive(Clone, Copy, Debug)]
pub struct FilterContext<'a> {
    /// Matching policy.
    pub policy: &'a FilterPolicy,
    /// Field the default policy matches against.
    pub filter_prop: &'a OptionProp,
    /// Currently selected values, in selection order.
    pub selected: &'a [RawValue],
    /// Value currently previewed by keyboard backfill.
    pub backfill: Option<&'a RawValue>,
    /// Tag mode: keep free-form values and offer to create the search text.
    pub tags: bool,
}

impl<'a> FilterContext<'a> {
    /// A context with no selection, no backfill, and tag mode off.
    #[must_use]
    pub fn new(policy: &'a FilterPolicy, filter_prop: &'a OptionProp) -> Self {
        Self {
            policy,
            filter_prop,
            selected: &[],
            backfill: None,
            tags: false,
        }
    }

    /// Everything passes while the search is empty or the last selected value is the
    /// backfill preview.
    fn bypass(&self, search: &str) -> bool {
        search.is_empty() || (self.backfill.is_some() && self.selected.last() == self.backfill)
    }

    /// Returns `true` if `option` survives filtering for `search`.
    #[must_use]
    pub fn matches(&self, search: &str, option: &OptionData) -> bool {
        if self.bypass(search) {
            return true;
        }
        match self.policy {
            FilterPolicy::Disabled => true,
            FilterPolicy::Default => default_filter(search, option, self.filter_prop),
            FilterPolicy::Custom(predicate) => predicate(search, option),
        }
    }

    /// The "does the search text already exist" test used before offering a new tag.
    ///
    /// Like [`FilterContext::matches`], but the default matcher is replaced by value equality.
    fn matches_exact(&self, search: &str, option: &OptionData) -> bool {
        let equal = || option.value.as_text() == search;
        match self.policy {
            FilterPolicy::Disabled => equal(),
            _ if self.bypass(search) => true,
            FilterPolicy::Default => equal(),
            FilterPolicy::Custom(predicate) => predicate(search, option),
        }
    }
}

/// A node of the filtered tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VisibleNode {
    /// A leaf option.
    Option(OptionData),
    /// A group with at least one surviving option.
    Group {
        /// Group key.
        key: String,
        /// Header label.
        label: String,
        /// Surviving options, in declaration order.
        options: Vec<OptionData>,
    },
}

/// Computes the visible options for `search`.
///
/// Returns an empty list when nothing matches; substituting "not found" content is up to the
/// caller.
#[must_use]
pub fn compute_visible(
    search: &str,
    tree: &[OptionNode],
    ctx: &FilterContext<'_>,
) -> Vec<VisibleNode> {
    let mut visible = Vec::new();
    let mut declared: HashSet<&RawValue> = HashSet::new();

    for node in tree {
        match node {
            OptionNode::Option(option) => {
                if ctx.matches(search, option) {
                    visible.push(VisibleNode::Option(option.clone()));
                }
                if ctx.tags {
                    declared.insert(&option.value);
                }
            }
            OptionNode::Group(group) => {
                let options: Vec<OptionData> = group
                    .options
                    .iter()
                    .filter(|option| ctx.matches(search, option))
                    .cloned()
                    .collect();
                if ctx.tags {
                    declared.extend(group.options.iter().map(|o| &o.value));
                }
                if !options.is_empty() {
                    let (key, label) = group.key_and_label();
                    visible.push(VisibleNode::Group {
                        key,
                        label,
                        options,
                    });
                }
            }
        }
    }

    if ctx.tags {
        for value in ctx.selected {
            if declared.contains(value) {
                continue;
            }
            if search.is_empty() || value.as_text().contains(search) {
                visible.push(VisibleNode::Option(OptionData::new(value.clone())));
            }
        }

        if !search.is_empty() {
            let exists = visible_leaves(&visible).any(|option| ctx.matches_exact(search, option));
            if !exists {
                visible.insert(0, VisibleNode::Option(OptionData::new(search)));
            }
        }
    }

    tracing::trace!(
        search,
        nodes = visible.len(),
        "recomputed visible options"
    );
    visible
}

fn visible_leaves(nodes: &[VisibleNode]) -> impl Iterator<Item = &OptionData> {
    nodes.iter().flat_map(|node| match node {
        VisibleNode::Option(option) => core::slice::from_ref(option),
        VisibleNode::Group { options, .. } => options.as_slice(),
    })
}

/// One row of the flattened dropdown list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlatItem {
    /// A group header. Never selectable.
    Group {
        /// Group key.
        key: String,
        /// Header label.
        label: String,
    },
    /// An option row.
    Option {
        /// The option.
        data: OptionData,
        /// `true` when the option sits inside a group.
        grouped: bool,
    },
}

impl FlatItem {
    /// Returns the option of an option row.
    #[must_use]
    pub fn option(&self) -> Option<&OptionData> {
        match self {
            Self::Option { data, .. } => Some(data),
            Self::Group { .. } => None,
        }
    }

    /// Returns `true` for option rows that can be activated.
    #[must_use]
    pub fn is_enabled_option(&self) -> bool {
        self.option().is_some_and(|o| !o.disabled)
    }
}

/// Flattens visible nodes into rows: each group header is followed by its options.
#[must_use]
pub fn flatten(nodes: &[VisibleNode]) -> Vec<FlatItem> {
    let mut items = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            VisibleNode::Option(data) => items.push(FlatItem::Option {
                data: data.clone(),
                grouped: false,
            }),
            VisibleNode::Group {
                key,
                label,
                options,
            } => {
                items.push(FlatItem::Group {
                    key: key.clone(),
                    label: label.clone(),
                });
                items.extend(options.iter().map(|data| FlatItem::Option {
                    data: data.clone(),
                    grouped: true,
                }));
            }
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::OptionGroup;
    use alloc::string::ToString;
    use alloc::vec;

    fn tree() -> Vec<OptionNode> {
        vec![
            OptionData::new("jack").label("Jack").into(),
            OptionGroup::new("Others")
                .option(OptionData::new("lucy").label("Lucy"))
                .option(OptionData::new("lucas").label("Lucas").disabled(true))
                .into(),
            OptionGroup::new("Empty")
                .option(OptionData::new("tom").label("Tom"))
                .into(),
        ]
    }

    fn values(nodes: &[VisibleNode]) -> Vec<String> {
        visible_leaves(nodes).map(|o| o.value.to_string()).collect()
    }

    #[test]
    fn empty_search_keeps_everything() {
        let policy = FilterPolicy::Default;
        let ctx = FilterContext::new(&policy, &OptionProp::Value);
        let visible = compute_visible("", &tree(), &ctx);
        assert_eq!(values(&visible), ["jack", "lucy", "lucas", "tom"]);
    }

    #[test]
    fn groups_without_matches_are_dropped() {
        let policy = FilterPolicy::Default;
        let ctx = FilterContext::new(&policy, &OptionProp::Label);
        let visible = compute_visible("LU", &tree(), &ctx);
        // `lucas` is disabled and never matches the default filter.
        assert_eq!(
            visible,
            vec![VisibleNode::Group {
                key: "Others".into(),
                label: "Others".into(),
                options: vec![OptionData::new("lucy").label("Lucy")],
            }]
        );
    }

    #[test]
    fn disabled_policy_keeps_everything() {
        let policy = FilterPolicy::Disabled;
        let ctx = FilterContext::new(&policy, &OptionProp::Value);
        assert_eq!(values(&compute_visible("zzz", &tree(), &ctx)).len(), 4);
    }

    #[test]
    fn custom_policy_is_consulted() {
        let policy = FilterPolicy::custom(|search, option| option.value.as_text().ends_with(search));
        let ctx = FilterContext::new(&policy, &OptionProp::Value);
        assert_eq!(values(&compute_visible("m", &tree(), &ctx)), ["tom"]);
    }

    #[test]
    fn backfill_preview_bypasses_filtering() {
        let policy = FilterPolicy::Default;
        let selected = [RawValue::from("tom")];
        let backfill = RawValue::from("tom");
        let ctx = FilterContext {
            selected: &selected,
            backfill: Some(&backfill),
            ..FilterContext::new(&policy, &OptionProp::Value)
        };
        assert_eq!(values(&compute_visible("xyz", &tree(), &ctx)).len(), 4);
    }

    #[test]
    fn tags_append_free_values_and_offer_search_text() {
        let policy = FilterPolicy::Default;
        let selected = [RawValue::from("jack"), RawValue::from("custom")];
        let ctx = FilterContext {
            selected: &selected,
            tags: true,
            ..FilterContext::new(&policy, &OptionProp::Value)
        };

        let visible = compute_visible("", &tree(), &ctx);
        assert_eq!(values(&visible), ["jack", "lucy", "lucas", "tom", "custom"]);

        let visible = compute_visible("cu", &tree(), &ctx);
        assert_eq!(values(&visible), ["cu", "custom"]);

        // An exact match suppresses the synthetic entry.
        let visible = compute_visible("custom", &tree(), &ctx);
        assert_eq!(values(&visible), ["custom"]);
        // Free values stay while their text contains the search.
        let visible = compute_visible("tom", &tree(), &ctx);
        assert_eq!(values(&visible), ["tom", "custom"]);
        let visible = compute_visible("jack", &tree(), &ctx);
        assert_eq!(values(&visible), ["jack"]);
    }

    #[test]
    fn flatten_inserts_group_headers() {
        let policy = FilterPolicy::Default;
        let ctx = FilterContext::new(&policy, &OptionProp::Value);
        let items = flatten(&compute_visible("", &tree(), &ctx));
        assert_eq!(items.len(), 6);
        assert!(matches!(items[1], FlatItem::Group { .. }));
        assert!(matches!(items[2], FlatItem::Option { grouped: true, .. }));
        assert!(!items[3].is_enabled_option());
        assert!(!items[1].is_enabled_option());
        assert!(items[0].is_enabled_option());
    }
}
