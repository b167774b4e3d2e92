// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_select::filter::{FilterContext, FilterPolicy, compute_visible, flatten};
use understory_select::index::OptionsIndex;
use understory_select::navigator::next_enabled_index;
use understory_select::option::{OptionData, OptionGroup, OptionNode, OptionProp};
use understory_select::value::RawValue;
use understory_select::{Key, Modifiers, NoopHost, Select, SelectConfig, SelectProps};

/// `len` options in groups of 32, every 7th one disabled.
fn option_tree(len: usize) -> Vec<OptionNode> {
    (0..len)
        .collect::<Vec<_>>()
        .chunks(32)
        .map(|chunk| {
            let mut group = OptionGroup::new(format!("group {}", chunk[0] / 32));
            for &i in chunk {
                group = group.option(
                    OptionData::new(format!("value-{i}"))
                        .label(format!("Option {i}"))
                        .disabled(i % 7 == 6),
                );
            }
            group.into()
        })
        .collect()
}

fn bench_index_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("select/index_rebuild");
    for len in [256_usize, 4_096, 32_768] {
        let tree = option_tree(len);
        let old = OptionsIndex::rebuild(&tree, &OptionProp::Label, None);
        let selected: Vec<RawValue> = (0..len)
            .step_by(97)
            .map(|i| RawValue::from(format!("value-{i}")))
            .collect();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("fresh", len), &tree, |b, tree| {
            b.iter(|| black_box(OptionsIndex::rebuild(tree, &OptionProp::Label, None)));
        });

        // Worst case for carrying: none of the selected values survive.
        group.bench_with_input(BenchmarkId::new("carry_forward", len), &selected, |b, sel| {
            b.iter(|| {
                black_box(OptionsIndex::rebuild(
                    &[],
                    &OptionProp::Label,
                    Some((&old, sel.as_slice())),
                ))
            });
        });
    }
    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("select/filter");
    let policy = FilterPolicy::Default;
    let ctx = FilterContext::new(&policy, &OptionProp::Label);
    for len in [256_usize, 4_096, 32_768] {
        let tree = option_tree(len);
        group.throughput(Throughput::Elements(len as u64));

        for search in ["", "option 1", "no match"] {
            group.bench_with_input(
                BenchmarkId::new(format!("search={search:?}"), len),
                &tree,
                |b, tree| {
                    b.iter(|| {
                        let visible = compute_visible(black_box(search), tree, &ctx);
                        black_box(flatten(&visible))
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("select/navigation");
    for len in [4_096_usize, 32_768] {
        let policy = FilterPolicy::Disabled;
        let ctx = FilterContext::new(&policy, &OptionProp::Label);
        let items = flatten(&compute_visible("", &option_tree(len), &ctx));

        group.bench_with_input(BenchmarkId::new("wrap_step", len), &items, |b, items| {
            let last = items.len() - 1;
            b.iter(|| black_box(next_enabled_index(Some(black_box(last)), 1, items)));
        });

        group.bench_with_input(
            BenchmarkId::new("key_down_sweep", len),
            &len,
            |b, &len| {
                let props = SelectProps::with_options(option_tree(len));
                let mut select = Select::new(SelectConfig::default(), props, NoopHost::new());
                select.open_dropdown();
                b.iter(|| {
                    for _ in 0..64 {
                        select.key_down(Key::Down, Modifiers::empty());
                    }
                    black_box(select.active_index())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_index_rebuild, bench_filter, bench_navigation);
criterion_main!(benches);
