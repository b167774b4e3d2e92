// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active-item navigation over the flattened dropdown list.
//!
//! The active item is the keyboard-highlighted row. Navigation wraps around the list and
//! skips group headers and disabled options.

use alloc::borrow::ToOwned;
use alloc::string::String;

use crate::filter::FlatItem;

/// Finds the next enabled option row, starting at `current + offset` and stepping in the
/// direction of `offset` with wrap-around.
///
/// `current = None` behaves as the position just before the first row. A zero `offset` checks
/// `current + 0` first and then scans forward, so with `current = None` it starts at the last
/// row. Returns `None` when no row is enabled.
///
/// ```
/// use understory_select::filter::FlatItem;
/// use understory_select::navigator::next_enabled_index;
/// use understory_select::option::OptionData;
///
/// let row = |v: &str, disabled: bool| FlatItem::Option {
///     data: OptionData::new(v).disabled(disabled),
///     grouped: false,
/// };
/// let items = [row("a", false), row("b", true), row("c", false)];
/// assert_eq!(next_enabled_index(Some(0), 1, &items), Some(2));
/// assert_eq!(next_enabled_index(Some(2), 1, &items), Some(0));
/// assert_eq!(next_enabled_index(Some(0), -1, &items), Some(2));
/// ```
#[must_use]
pub fn next_enabled_index(current: Option<usize>, offset: isize, items: &[FlatItem]) -> Option<usize> {
    let len = isize::try_from(items.len()).ok()?;
    if len == 0 {
        return None;
    }
    let step: isize = if offset < 0 { -1 } else { 1 };
    let base = current.and_then(|c| isize::try_from(c).ok()).unwrap_or(-1);
    let mut at = base.saturating_add(offset);
    for _ in 0..len {
        let idx = usize::try_from(at.rem_euclid(len)).ok()?;
        if items[idx].is_enabled_option() {
            return Some(idx);
        }
        at = at.rem_euclid(len) + step;
    }
    None
}

/// Tracks the active row and resets it when the list it points into changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveItem {
    index: Option<usize>,
    len: usize,
    search: String,
}

impl ActiveItem {
    /// Creates a tracker with no active row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active row, if any.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Points at `index` directly. Out-of-range indices clear the active row.
    pub fn set(&mut self, index: Option<usize>) {
        self.index = index.filter(|&i| i < self.len);
    }

    /// Re-synchronizes after the list was recomputed.
    ///
    /// When the row count or the search text changed, the active row resets to the first
    /// enabled row (with `active_first`) or to nothing. Otherwise the current row is kept.
    pub fn sync(&mut self, items: &[FlatItem], search: &str, active_first: bool) {
        if items.len() == self.len && search == self.search {
            return;
        }
        self.len = items.len();
        search.clone_into(&mut self.search);
        self.index = if active_first {
            next_enabled_index(None, 1, items)
        } else {
            None
        };
    }

    /// Moves by `offset` enabled rows and returns the new active row.
    pub fn step(&mut self, items: &[FlatItem], offset: isize) -> Option<usize> {
        let next = next_enabled_index(self.index, offset, items);
        if next.is_some() {
            self.index = next;
        }
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::OptionData;
    use alloc::vec;
    use alloc::vec::Vec;

    fn rows(pattern: &str) -> Vec<FlatItem> {
        // `o` = enabled option, `x` = disabled option, `g` = group header.
        pattern
            .chars()
            .map(|c| match c {
                'g' => FlatItem::Group {
                    key: "g".into(),
                    label: "g".into(),
                },
                _ => FlatItem::Option {
                    data: OptionData::new("v").disabled(c == 'x'),
                    grouped: false,
                },
            })
            .collect()
    }

    #[test]
    fn skips_headers_and_disabled_rows() {
        let items = rows("gxoxo");
        assert_eq!(next_enabled_index(None, 1, &items), Some(2));
        assert_eq!(next_enabled_index(Some(2), 1, &items), Some(4));
        assert_eq!(next_enabled_index(Some(4), 1, &items), Some(2));
        assert_eq!(next_enabled_index(Some(2), -1, &items), Some(4));
    }

    #[test]
    fn zero_offset_starts_at_current() {
        let items = rows("gxoxo");
        assert_eq!(next_enabled_index(Some(2), 0, &items), Some(2));
        assert_eq!(next_enabled_index(Some(3), 0, &items), Some(4));
        // `None` sits just before the first row, which wraps to the last one.
        assert_eq!(next_enabled_index(None, 0, &items), Some(4));
    }

    #[test]
    fn no_enabled_rows() {
        assert_eq!(next_enabled_index(None, 1, &[]), None);
        assert_eq!(next_enabled_index(Some(0), -1, &rows("gxx")), None);
    }

    #[test]
    fn active_item_resets_on_list_change() {
        let items = rows("xoo");
        let mut active = ActiveItem::new();
        active.sync(&items, "", true);
        assert_eq!(active.index(), Some(1));
        assert_eq!(active.step(&items, 1), Some(2));

        // Same list, same search: kept.
        active.sync(&items, "", true);
        assert_eq!(active.index(), Some(2));

        // New search text: reset.
        active.sync(&items, "a", false);
        assert_eq!(active.index(), None);

        let shorter = vec![items[1].clone()];
        active.sync(&shorter, "a", true);
        assert_eq!(active.index(), Some(0));
        active.set(Some(5));
        assert_eq!(active.index(), None);
    }
}
