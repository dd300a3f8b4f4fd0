use lpa_runtime::algorithms::label_propagation::{select_label, LabelFrequencies};
use proptest::prelude::*;
use std::collections::HashMap;

#[test]
fn test_majority_label_wins() {
    assert_eq!(select_label(5, vec![3, 3, 5]), 3);
}

#[test]
fn test_tie_goes_to_larger_label() {
    assert_eq!(select_label(5, vec![3, 3, 5, 5]), 5);
    assert_eq!(select_label(1, vec![3, 3, 5, 5]), 5);
    assert_eq!(select_label(9, vec![5, 5, 3, 3]), 5);
}

#[test]
fn test_no_messages_keeps_current_label() {
    assert_eq!(select_label(5, Vec::new()), 5);
    assert_eq!(select_label(-3, Vec::new()), -3);
}

#[test]
fn test_single_larger_message_is_adopted() {
    assert_eq!(select_label(1, vec![7]), 7);
}

#[test]
fn test_single_smaller_message_is_ignored() {
    assert_eq!(select_label(7, vec![1]), 7);
}

#[test]
fn test_current_label_seen_once_loses_to_larger_label_seen_once() {
    assert_eq!(select_label(5, vec![5, 9]), 9);
}

#[test]
fn test_frequency_above_one_beats_current_label() {
    assert_eq!(select_label(100, vec![-4, -4, 100]), -4);
}

#[test]
fn test_label_frequencies_counts() {
    let freq = LabelFrequencies::from_messages(vec![3, 3, 5, 8, 3]);
    assert_eq!(freq.len(), 3);
    assert!(!freq.is_empty());
    assert_eq!(freq.frequency(3), 3);
    assert_eq!(freq.frequency(5), 1);
    assert_eq!(freq.frequency(42), 0);
    assert_eq!(freq.most_frequent(0), 3);

    let empty = LabelFrequencies::from_messages(std::iter::empty());
    assert!(empty.is_empty());
    assert_eq!(empty.most_frequent(11), 11);
}

fn expected_label(current: i64, messages: &[i64]) -> i64 {
    let mut counts: HashMap<i64, u64> = HashMap::new();
    for m in messages {
        *counts.entry(*m).or_insert(0) += 1;
    }
    let top = counts.values().copied().max().unwrap_or(0);
    if top <= 1 {
        messages.iter().copied().fold(current, i64::max)
    } else {
        counts
            .iter()
            .filter(|(_, c)| **c == top)
            .map(|(l, _)| *l)
            .max()
            .unwrap()
    }
}

proptest! {
    #[test]
    fn prop_result_is_current_or_received(
        current in -20i64..20,
        messages in prop::collection::vec(-20i64..20, 0..40),
    ) {
        let label = select_label(current, messages.clone());
        prop_assert!(label == current || messages.contains(&label));
    }

    #[test]
    fn prop_message_order_does_not_matter(
        current in -20i64..20,
        messages in prop::collection::vec(-20i64..20, 0..40),
        rotation in 0usize..40,
    ) {
        let baseline = select_label(current, messages.clone());

        let reversed: Vec<i64> = messages.iter().rev().copied().collect();
        prop_assert_eq!(select_label(current, reversed), baseline);

        let mut sorted = messages.clone();
        sorted.sort_unstable();
        prop_assert_eq!(select_label(current, sorted), baseline);

        let mut rotated = messages.clone();
        if !rotated.is_empty() {
            let k = rotation % rotated.len();
            rotated.rotate_left(k);
        }
        prop_assert_eq!(select_label(current, rotated), baseline);
    }

    #[test]
    fn prop_matches_most_frequent_then_largest(
        current in -20i64..20,
        messages in prop::collection::vec(-20i64..20, 0..40),
    ) {
        let expected = expected_label(current, &messages);
        prop_assert_eq!(select_label(current, messages), expected);
    }

    #[test]
    fn prop_unanimous_neighbours_keep_label(current in any::<i64>(), n in 0usize..10) {
        prop_assert_eq!(select_label(current, vec![current; n]), current);
    }
}
