// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests: invariants that must hold for any sequence of user input.

use proptest::prelude::*;
use understory_select::filter::{FilterContext, FilterPolicy, VisibleNode, compute_visible};
use understory_select::index::OptionsIndex;
use understory_select::option::{OptionData, OptionGroup, OptionNode, OptionProp};
use understory_select::{
    Key, Mode, Modifiers, NoopHost, RawValue, Select, SelectConfig, SelectEvent, SelectProps,
};

#[derive(Clone, Debug)]
enum Op {
    Type(String),
    Click(usize),
    Press(Key),
    Clear,
    Toggle,
    Deselect(usize),
    Blur,
}

fn key() -> impl Strategy<Value = Key> {
    prop_oneof![
        Just(Key::Up),
        Just(Key::Down),
        Just(Key::Enter),
        Just(Key::Escape),
        Just(Key::Backspace),
        Just(Key::Space),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[abc,]{0,4}".prop_map(Op::Type),
        (0_usize..8).prop_map(Op::Click),
        key().prop_map(Op::Press),
        Just(Op::Clear),
        Just(Op::Toggle),
        (0_usize..4).prop_map(Op::Deselect),
        Just(Op::Blur),
    ]
}

fn mode() -> impl Strategy<Value = Mode> {
    prop_oneof![
        Just(Mode::Single),
        Just(Mode::Multiple),
        Just(Mode::Tags),
        Just(Mode::Combobox),
    ]
}

fn options() -> Vec<OptionNode> {
    vec![
        OptionData::new("a").into(),
        OptionData::new("ab").into(),
        OptionData::new("c").disabled(true).into(),
        OptionGroup::new("group")
            .option(OptionData::new("bc"))
            .option(OptionData::new("ca"))
            .into(),
    ]
}

fn apply(select: &mut Select<NoopHost>, op: &Op, now: &mut u64) {
    match op {
        Op::Type(text) => select.input_changed(text.clone()),
        Op::Click(idx) => select.click_option(*idx),
        Op::Press(key) => {
            select.key_down(*key, Modifiers::empty());
        }
        Op::Clear => select.clear(),
        Op::Toggle => select.toggle_open(),
        Op::Deselect(idx) => {
            if let Some(value) = select.values().get(*idx).cloned() {
                select.deselect_value(&value);
            }
        }
        Op::Blur => {
            select.focus_out(*now);
            *now += 100;
            select.advance_to(*now);
        }
    }
}

fn leaf_values(nodes: &[VisibleNode]) -> Vec<RawValue> {
    nodes
        .iter()
        .flat_map(|node| match node {
            VisibleNode::Option(o) => vec![o.value.clone()],
            VisibleNode::Group { options, .. } => options.iter().map(|o| o.value.clone()).collect(),
        })
        .collect()
}

proptest! {
    #[test]
    fn value_shape_holds_for_any_input(mode in mode(), ops in prop::collection::vec(op(), 0..24)) {
        let config = SelectConfig::default()
            .mode(mode)
            .token_separators([","]);
        let mut select = Select::new(config, SelectProps::with_options(options()), NoopHost::new());
        let mut now = 0;
        for op in &ops {
            apply(&mut select, op, &mut now);
            let values = select.values();
            if mode.is_single() {
                prop_assert!(values.len() <= 1, "single mode holds {values:?}");
            } else {
                for (i, v) in values.iter().enumerate() {
                    prop_assert!(!values[i + 1..].contains(v), "duplicate {v:?} in {values:?}");
                }
            }
        }
    }

    #[test]
    fn select_and_deselect_precede_change(mode in mode(), ops in prop::collection::vec(op(), 0..24)) {
        let config = SelectConfig::default()
            .mode(mode)
            .token_separators([","]);
        let mut select = Select::new(config, SelectProps::with_options(options()), NoopHost::new());
        let mut now = 0;
        for op in &ops {
            apply(&mut select, op, &mut now);
            let events = select.take_events();
            let first_change = events
                .iter()
                .position(|e| matches!(e, SelectEvent::Change { .. }));
            let last_pick = events
                .iter()
                .rposition(|e| matches!(e, SelectEvent::Select { .. } | SelectEvent::Deselect { .. }));
            if let (Some(change), Some(pick)) = (first_change, last_pick) {
                prop_assert!(pick < change, "{op:?} produced {events:?}");
            }
        }
    }

    #[test]
    fn longer_search_never_shows_more(prefix in "[a-c]{0,3}", extra in "[a-c]{1,2}") {
        let policy = FilterPolicy::Default;
        let ctx = FilterContext::new(&policy, &OptionProp::Value);
        let tree = options();
        let wide = leaf_values(&compute_visible(&prefix, &tree, &ctx));
        let narrow = leaf_values(&compute_visible(&format!("{prefix}{extra}"), &tree, &ctx));
        for value in &narrow {
            prop_assert!(wide.contains(value), "{value:?} appeared only for the longer search");
        }
    }

    #[test]
    fn labels_stable_across_option_replacement(keep in prop::collection::vec(0_i64..4, 0..4)) {
        let labeled: Vec<OptionNode> = (0..4_i64)
            .map(|i| OptionNode::from(OptionData::new(i).label(format!("label {i}"))))
            .collect();
        let first = OptionsIndex::rebuild(&labeled, &OptionProp::Label, None);
        let selected: Vec<RawValue> = keep.iter().copied().map(RawValue::Number).collect();
        let replaced = OptionsIndex::rebuild(&[], &OptionProp::Label, Some((&first, &selected[..])));
        for value in &selected {
            prop_assert_eq!(&replaced.lookup(value).label, &first.lookup(value).label);
        }
    }
}
