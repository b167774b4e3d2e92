// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered, duplicate-free storage for the selected raw values.
//!
//! [`SelectedValues`] keeps values in selection order (the order tags are shown in) and bumps a
//! revision counter only when the contents actually change, so observers can cheaply tell
//! whether a re-render is needed.

use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::value::RawValue;

/// The selected values of a select, in selection order.
#[derive(Clone, Debug, Default)]
pub struct SelectedValues {
    items: Vec<RawValue>,
    revision: u64,
}

impl SelectedValues {
    /// Creates an empty value list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            revision: 0,
        }
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of selected values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the selected values in selection order.
    #[must_use]
    pub fn items(&self) -> &[RawValue] {
        &self.items
    }

    /// Returns the most recently added value.
    #[must_use]
    pub fn last(&self) -> Option<&RawValue> {
        self.items.last()
    }

    /// Returns the current revision counter.
    ///
    /// Bumped only when the contents change; no-op mutations leave it untouched.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` if `value` is selected.
    #[must_use]
    pub fn contains(&self, value: &RawValue) -> bool {
        self.items.contains(value)
    }

    /// Returns a copy of the current values with `value` appended (if absent).
    #[must_use]
    pub fn with_appended(&self, value: &RawValue) -> Vec<RawValue> {
        let mut next = self.items.clone();
        if !self.contains(value) {
            next.push(value.clone());
        }
        next
    }

    /// Returns a copy of the current values without `value`.
    #[must_use]
    pub fn without(&self, value: &RawValue) -> Vec<RawValue> {
        self.items.iter().filter(|v| *v != value).cloned().collect()
    }

    /// Replaces the values with `values`, keeping the first occurrence of each duplicate.
    ///
    /// De-duplication is hash based, so this stays linear for large pasted or controlled
    /// value lists.
    pub fn replace_with<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = RawValue>,
    {
        let iter = values.into_iter();
        let (lower, _) = iter.size_hint();
        let mut seen: HashSet<RawValue> = HashSet::with_capacity(lower);
        let mut next = Vec::with_capacity(lower);
        for value in iter {
            if seen.insert(value.clone()) {
                next.push(value);
            }
        }
        self.replace_with_items(next);
    }

    fn replace_with_items(&mut self, next: Vec<RawValue>) {
        if next == self.items {
            return;
        }
        self.items = next;
        self.bump_revision();
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
