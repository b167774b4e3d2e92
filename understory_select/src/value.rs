// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value codec: raw option identifiers and the external value shapes built from them.
//!
//! Callers hand values to a select in several shapes (a scalar, a list, a labeled pair, a list
//! of labeled pairs). Internally the select only ever keeps an ordered `Vec<RawValue>`; this
//! module converts between the two.
//!
//! ```
//! use understory_select::value::{normalize_input, to_external_shape, LabeledValue, RawValue, SelectValue};
//!
//! let prop = SelectValue::LabeledMany(vec![
//!     LabeledValue::new("a", "Apple"),
//!     LabeledValue::new("b", "Banana"),
//! ]);
//! let raw = normalize_input(Some(&prop), None, false);
//! assert_eq!(raw, vec![RawValue::from("a"), RawValue::from("b")]);
//!
//! let out = to_external_shape(&raw, false, false, |v| v.to_string());
//! assert_eq!(out, Some(SelectValue::Raw(RawValue::from("a"))));
//! ```

use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;

/// Primitive identifier of an option.
///
/// Numbers and strings never compare equal to each other, even when they print the same:
/// `RawValue::Number(1)` and `RawValue::Text("1")` are distinct options.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum RawValue {
    /// A numeric identifier.
    Number(i64),
    /// A textual identifier. Tags created from user input are always textual.
    Text(String),
}

impl RawValue {
    /// Returns the identifier as text, borrowing when it already is text.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Number(n) => Cow::Owned(n.to_string()),
        }
    }

    /// Returns `true` for the empty string value.
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

/// A raw value paired with its display label.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabeledValue {
    /// The option identifier.
    pub key: RawValue,
    /// The resolved display label.
    pub label: String,
}

impl LabeledValue {
    /// Creates a labeled value.
    pub fn new(key: impl Into<RawValue>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Every shape a value can take on the outside of a select.
///
/// Used both for incoming `value`/`default_value` props and for outgoing notifications.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum SelectValue {
    /// A single raw value.
    Raw(RawValue),
    /// An ordered list of raw values.
    Many(Vec<RawValue>),
    /// An ordered list of labeled values.
    LabeledMany(Vec<LabeledValue>),
    /// A single labeled value.
    ///
    /// Declared last so untagged decoding never reads a two-element list as a labeled pair.
    Labeled(LabeledValue),
}

impl SelectValue {
    /// Extracts the raw keys, in order.
    ///
    /// Labeled shapes are unwrapped to their key regardless of whether the select runs in
    /// label-in-value mode, so a mismatched prop shape degrades gracefully instead of failing.
    #[must_use]
    pub fn keys(&self) -> Vec<RawValue> {
        match self {
            Self::Raw(raw) => Vec::from([raw.clone()]),
            Self::Labeled(labeled) => Vec::from([labeled.key.clone()]),
            Self::Many(raws) => raws.clone(),
            Self::LabeledMany(labeled) => labeled.iter().map(|l| l.key.clone()).collect(),
        }
    }

    /// Returns the label carried for `key`, if this is a labeled shape containing it.
    #[must_use]
    pub fn label_for(&self, key: &RawValue) -> Option<&str> {
        match self {
            Self::Labeled(labeled) if &labeled.key == key => Some(&labeled.label),
            Self::LabeledMany(labeled) => labeled
                .iter()
                .find(|l| &l.key == key)
                .map(|l| l.label.as_str()),
            _ => None,
        }
    }
}

impl From<RawValue> for SelectValue {
    fn from(value: RawValue) -> Self {
        Self::Raw(value)
    }
}

impl From<&str> for SelectValue {
    fn from(value: &str) -> Self {
        Self::Raw(value.into())
    }
}

impl From<LabeledValue> for SelectValue {
    fn from(value: LabeledValue) -> Self {
        Self::Labeled(value)
    }
}

impl<T: Into<RawValue>> FromIterator<T> for SelectValue {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Many(iter.into_iter().map(Into::into).collect())
    }
}

/// Reads the controlled value or the default value into the internal canonical list.
///
/// `use_default` picks the source; the two are never merged. A missing source yields an empty
/// list.
#[must_use]
pub fn normalize_input(
    value: Option<&SelectValue>,
    default_value: Option<&SelectValue>,
    use_default: bool,
) -> Vec<RawValue> {
    let source = if use_default { default_value } else { value };
    source.map(SelectValue::keys).unwrap_or_default()
}

/// Builds the externally observable shape of `values`.
///
/// - Single selects produce the first value (or `None` when empty).
/// - Multiple selects produce the whole ordered list, even when empty.
/// - With `label_in_value`, every value carries the label returned by `label_of`.
pub fn to_external_shape<F>(
    values: &[RawValue],
    label_in_value: bool,
    multiple: bool,
    label_of: F,
) -> Option<SelectValue>
where
    F: Fn(&RawValue) -> String,
{
    if multiple {
        let shape = if label_in_value {
            SelectValue::LabeledMany(
                values
                    .iter()
                    .map(|v| LabeledValue {
                        key: v.clone(),
                        label: label_of(v),
                    })
                    .collect(),
            )
        } else {
            SelectValue::Many(values.to_vec())
        };
        return Some(shape);
    }

    values
        .first()
        .map(|v| to_external_single(v, label_in_value, &label_of))
}

/// Builds the external shape of a single value, as carried by select/deselect notifications.
pub fn to_external_single<F>(value: &RawValue, label_in_value: bool, label_of: F) -> SelectValue
where
    F: Fn(&RawValue) -> String,
{
    if label_in_value {
        SelectValue::Labeled(LabeledValue {
            key: value.clone(),
            label: label_of(value),
        })
    } else {
        SelectValue::Raw(value.clone())
    }
}

/// Looks up the label attached to `key` inside a labeled value prop.
#[must_use]
pub fn label_from_prop(prop: Option<&SelectValue>, key: &RawValue) -> Option<String> {
    prop.and_then(|p| p.label_for(key)).map(ToString::to_string)
}

/// Returns `true` if `text` contains any of the (non-empty) separator tokens.
#[must_use]
pub fn includes_separator<S: AsRef<str>>(text: &str, separators: &[S]) -> bool {
    separators
        .iter()
        .map(AsRef::as_ref)
        .any(|sep| !sep.is_empty() && text.contains(sep))
}

/// Splits `text` at every occurrence of any separator token, dropping empty pieces.
///
/// When separators overlap, the earliest match wins; ties go to the separator listed first.
#[must_use]
pub fn split_by_separators<S: AsRef<str>>(text: &str, separators: &[S]) -> SmallVec<[String; 4]> {
    let mut pieces = SmallVec::new();
    let mut rest = text;
    loop {
        let next = separators
            .iter()
            .map(AsRef::as_ref)
            .filter(|sep| !sep.is_empty())
            .filter_map(|sep| rest.find(sep).map(|at| (at, sep.len())))
            .min_by_key(|&(at, _)| at);
        let Some((at, len)) = next else {
            if !rest.is_empty() {
                pieces.push(rest.to_string());
            }
            return pieces;
        };
        if at > 0 {
            pieces.push(rest[..at].to_string());
        }
        rest = &rest[at + len..];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn normalize_picks_exactly_one_source() {
        let value = SelectValue::from("a");
        let default = SelectValue::from("b");
        assert_eq!(
            normalize_input(Some(&value), Some(&default), false),
            vec![RawValue::from("a")]
        );
        assert_eq!(
            normalize_input(Some(&value), Some(&default), true),
            vec![RawValue::from("b")]
        );
        assert!(normalize_input(None, None, false).is_empty());
    }

    #[test]
    fn malformed_shape_still_yields_keys() {
        // A raw value handed to a label-in-value select is used as its own key.
        let prop = SelectValue::Many(vec![1.into(), 2.into()]);
        assert_eq!(prop.keys(), vec![RawValue::Number(1), RawValue::Number(2)]);
        assert_eq!(label_from_prop(Some(&prop), &RawValue::Number(1)), None);
    }

    #[test]
    fn external_shape_for_single_and_multiple() {
        let values = vec![RawValue::from("x"), RawValue::from("y")];
        let label = |v: &RawValue| alloc::format!("<{v}>");

        assert_eq!(
            to_external_shape(&values, true, false, label),
            Some(SelectValue::Labeled(LabeledValue::new("x", "<x>")))
        );
        assert_eq!(
            to_external_shape(&values, false, true, label),
            Some(SelectValue::Many(values.clone()))
        );
        assert_eq!(to_external_shape(&[], false, false, label), None);
        assert_eq!(
            to_external_shape(&[], false, true, label),
            Some(SelectValue::Many(Vec::new()))
        );
    }

    #[test]
    fn split_drops_empty_pieces() {
        let pieces = split_by_separators("a,b,", &[","]);
        assert_eq!(pieces.as_slice(), ["a", "b"]);

        let pieces = split_by_separators(",,a;; b", &[",", ";"]);
        assert_eq!(pieces.as_slice(), ["a", " b"]);

        let pieces = split_by_separators("a--b", &["--", "-"]);
        assert_eq!(pieces.as_slice(), ["a", "b"]);

        assert!(split_by_separators("", &[","]).is_empty());
        assert!(includes_separator("a,b", &[","]));
        assert!(!includes_separator("ab", &["", ","]));
    }

    #[test]
    fn raw_value_text_forms() {
        assert_eq!(RawValue::Number(7).as_text(), "7");
        assert_eq!(RawValue::from("seven").as_text(), "seven");
        assert!(RawValue::from("").is_empty_text());
        assert_ne!(RawValue::Number(1), RawValue::from("1"));
    }
}
