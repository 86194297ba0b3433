use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;

use feedback_rank::clean::standardise_name;
use feedback_rank::rank::rows::rank_values;
use feedback_rank::{
    find_duplicated_rows, rank_tags, Column, Direction, FrameError, RankMethod, RankOptions,
    RecordSet, TagOffsets, Value,
};

fn any_method() -> impl Strategy<Value = RankMethod> {
    prop::sample::select(RankMethod::ALL.to_vec())
}

fn any_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Ascending), Just(Direction::Descending)]
}

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::from).collect()
}

proptest! {
    #[test]
    fn distinct_values_rank_as_a_permutation(
        set in prop::collection::btree_set(-1000i64..1000, 0..40),
        method in any_method(),
        direction in any_direction(),
    ) {
        // btree_set is sorted; interleave to avoid presorted input
        let mut values: Vec<i64> = set.into_iter().collect();
        values.reverse();
        let mid = values.len() / 2;
        values.rotate_left(mid);

        let mut ranks = rank_values(&ints(&values), RankOptions::new(method, direction));
        ranks.sort_by(f64::total_cmp);
        let expected: Vec<f64> = (1..=values.len()).map(|r| r as f64).collect();
        prop_assert_eq!(ranks, expected);
    }

    #[test]
    fn dense_ranks_have_no_gaps(
        values in prop::collection::vec(0i64..8, 1..50),
        direction in any_direction(),
    ) {
        let ranks = rank_values(&ints(&values), RankOptions::new(RankMethod::Dense, direction));
        let groups = values.iter().collect::<BTreeSet<_>>().len();
        let distinct: BTreeSet<u64> = ranks.iter().map(|&r| r as u64).collect();
        prop_assert_eq!(distinct, (1..=groups as u64).collect::<BTreeSet<_>>());
    }

    #[test]
    fn average_is_mean_of_min_and_max(
        values in prop::collection::vec(0i64..6, 1..50),
        direction in any_direction(),
    ) {
        let v = ints(&values);
        let avg = rank_values(&v, RankOptions::new(RankMethod::Average, direction));
        let min = rank_values(&v, RankOptions::new(RankMethod::Min, direction));
        let max = rank_values(&v, RankOptions::new(RankMethod::Max, direction));
        for i in 0..v.len() {
            prop_assert_eq!(avg[i], (min[i] + max[i]) / 2.0);
        }
    }

    #[test]
    fn first_breaks_ties_by_row_order(
        values in prop::collection::vec(0i64..5, 1..40),
        direction in any_direction(),
    ) {
        let ranks = rank_values(&ints(&values), RankOptions::new(RankMethod::First, direction));
        for i in 0..values.len() {
            for j in (i + 1)..values.len() {
                if values[i] == values[j] {
                    prop_assert!(ranks[i] < ranks[j]);
                }
            }
        }
    }

    #[test]
    fn descending_equals_ranking_the_negation(
        values in prop::collection::vec(-50i64..50, 0..40),
        method in any_method(),
    ) {
        let negated: Vec<i64> = values.iter().map(|v| -v).collect();
        let desc = rank_values(&ints(&values), RankOptions::new(method, Direction::Descending));
        let asc_neg = rank_values(&ints(&negated), RankOptions::new(method, Direction::Ascending));
        prop_assert_eq!(desc, asc_neg);
    }

    #[test]
    fn standardising_is_idempotent(name in "\\PC{0,24}") {
        let once = standardise_name(&name);
        prop_assert_eq!(standardise_name(&once), once.clone());
        prop_assert!(once.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        prop_assert!(!once.starts_with('_') && !once.ends_with('_') && !once.contains("__"));
    }

    #[test]
    fn duplicates_are_exactly_the_repeated_keys(
        keys in prop::collection::vec((0i64..4, 0i64..3), 0..30),
    ) {
        let (a, b): (Vec<i64>, Vec<i64>) = keys.iter().copied().unzip();
        let n = keys.len() as i64;
        let rs = RecordSet::with_index(
            (0..n).map(|i| i * 10).collect(),
            vec![
                Column::new("id", ints(&(0..n).collect::<Vec<_>>())),
                Column::new("col_a", ints(&a)),
                Column::new("col_b", ints(&b)),
            ],
        ).unwrap();

        let mut counts: HashMap<(i64, i64), usize> = HashMap::new();
        for k in &keys {
            *counts.entry(*k).or_default() += 1;
        }
        let expected: Vec<i64> = keys
            .iter()
            .enumerate()
            .filter(|(_, k)| counts[*k] > 1)
            .map(|(i, _)| i as i64 * 10)
            .collect();

        let dupes = find_duplicated_rows(&rs, &["col_a", "col_b"]).unwrap();
        prop_assert_eq!(dupes.index(), expected.as_slice());
        prop_assert_eq!(dupes.column_names(), rs.column_names());
    }

    #[test]
    fn short_base_ranks_always_fail(
        n in 1usize..30,
        cut in any::<prop::sample::Index>(),
    ) {
        let len = cut.index(n);
        let tags: Vec<Value> = (0..n).map(|i| Value::from(format!("t{}", i % 3))).collect();
        let rs = RecordSet::new(vec![Column::new("tag", tags)]).unwrap();
        let base: Vec<f64> = (1..=len).map(|r| r as f64).collect();
        let offsets = TagOffsets::from_iter([("t1", -1)]);

        let err = rank_tags(&rs, "tag", &base, &offsets).unwrap_err();
        prop_assert_eq!(&err, &FrameError::LengthMismatch { base_ranks: len, records: n });
        let expected_suffix = format!("{len} != {n}");
        prop_assert!(err.to_string().ends_with(&expected_suffix));
    }

    #[test]
    fn boosting_a_tag_never_costs_priority(
        base in prop::collection::vec(1u32..20, 4),
        boost in 1i64..10,
        other in -10i64..0,
    ) {
        let tags = (0..4).map(|i| Value::from(format!("t{i}"))).collect();
        let rs = RecordSet::new(vec![Column::new("tag", tags)]).unwrap();
        let base: Vec<f64> = base.into_iter().map(f64::from).collect();

        let before = TagOffsets::from_iter([("t0", other)]);
        let after = TagOffsets::from_iter([("t0", other), ("t1", -boost)]);
        let r_before = rank_tags(&rs, "tag", &base, &before).unwrap();
        let r_after = rank_tags(&rs, "tag", &base, &after).unwrap();

        // t1 is now ahead of every row that has no offset
        prop_assert!(r_after[1] < r_after[2] && r_after[1] < r_after[3]);
        // and rows without an offset keep their relative order
        prop_assert_eq!(
            r_before[2].total_cmp(&r_before[3]),
            r_after[2].total_cmp(&r_after[3])
        );
    }

    #[test]
    fn lowering_an_offset_never_worsens_order_against_plain_rows(
        base in prop::collection::vec(1u32..20, 4),
        from in -10i64..10,
        by in 1i64..10,
        other in -10i64..10,
    ) {
        let tags = (0..4).map(|i| Value::from(format!("t{i}"))).collect();
        let rs = RecordSet::new(vec![Column::new("tag", tags)]).unwrap();
        let base: Vec<f64> = base.into_iter().map(f64::from).collect();

        let before = TagOffsets::from_iter([("t0", from), ("t1", other)]);
        let after = TagOffsets::from_iter([("t0", from - by), ("t1", other)]);
        let r_before = rank_tags(&rs, "tag", &base, &before).unwrap();
        let r_after = rank_tags(&rs, "tag", &base, &after).unwrap();

        // t2 and t3 have no offset
        for plain in [2, 3] {
            if r_before[0] < r_before[plain] {
                prop_assert!(r_after[0] < r_after[plain]);
            }
            if r_before[0] <= r_before[plain] {
                prop_assert!(r_after[0] <= r_after[plain]);
            }
        }
    }
}
