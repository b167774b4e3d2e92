// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading option sets and values from JSON with the `serde` feature.

#![cfg(feature = "serde")]

use understory_select::option::{OptionData, OptionGroup, OptionNode};
use understory_select::{LabeledValue, RawValue, SelectValue};

#[test]
fn option_tree_from_json() {
    let json = r#"[
        { "value": "nl", "label": "Netherlands" },
        { "label": "Numbers", "options": [ { "value": 1 }, { "value": 2, "disabled": true } ] }
    ]"#;
    let tree: Vec<OptionNode> = serde_json::from_str(json).unwrap();
    assert_eq!(
        tree,
        vec![
            OptionNode::from(OptionData::new("nl").label("Netherlands")),
            OptionNode::from(
                OptionGroup::new("Numbers")
                    .option(OptionData::new(1))
                    .option(OptionData::new(2).disabled(true))
            ),
        ]
    );
}

#[test]
fn value_shapes_are_untagged() {
    let single: SelectValue = serde_json::from_str("7").unwrap();
    assert_eq!(single, SelectValue::Raw(RawValue::Number(7)));

    let many: SelectValue = serde_json::from_str(r#"["a", 3]"#).unwrap();
    assert_eq!(
        many,
        SelectValue::Many(vec![RawValue::from("a"), RawValue::Number(3)])
    );

    let pair: SelectValue = serde_json::from_str(r#"["a", "b"]"#).unwrap();
    assert!(matches!(pair, SelectValue::Many(_)));

    let labeled: SelectValue = serde_json::from_str(r#"{ "key": "a", "label": "A" }"#).unwrap();
    assert_eq!(labeled, SelectValue::Labeled(LabeledValue::new("a", "A")));

    let out = serde_json::to_string(&SelectValue::Many(vec![RawValue::from("x")])).unwrap();
    assert_eq!(out, r#"["x"]"#);
}
