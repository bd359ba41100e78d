use pretty_assertions::assert_eq;
use proptest::prelude::*;

use osrb_tree::OSRBTree;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 10_000;

/// Generates values in a range narrow enough to force duplicate keys.
fn value_strategy() -> impl Strategy<Value = i64> {
    -5_000i64..5_000i64
}

// ─── A sorted-Vec model (BTreeSet cannot model duplicate keys) ───────────────

fn model_insert(model: &mut Vec<i64>, value: i64) {
    let at = model.partition_point(|&m| m <= value);
    model.insert(at, value);
}

fn model_take(model: &mut Vec<i64>, value: i64) -> Option<i64> {
    let at = model.iter().position(|&m| m == value)?;
    Some(model.remove(at))
}

fn model_rank(model: &[i64], value: i64) -> usize {
    model.partition_point(|&m| m < value) + 1
}

fn model_lower_bound(model: &[i64], value: i64) -> Option<i64> {
    model.get(model.partition_point(|&m| m < value)).copied()
}

fn model_upper_bound(model: &[i64], value: i64) -> Option<i64> {
    model.get(model.partition_point(|&m| m <= value)).copied()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(i64),
    Take(i64),
    Contains(i64),
    Rank(i64),
    Kth(usize),
    LowerBound(i64),
    UpperBound(i64),
    Count(i64),
    PopFirst,
    PopLast,
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        5 => value_strategy().prop_map(TreeOp::Insert),
        3 => value_strategy().prop_map(TreeOp::Take),
        2 => value_strategy().prop_map(TreeOp::Contains),
        2 => value_strategy().prop_map(TreeOp::Rank),
        2 => (0usize..TEST_SIZE).prop_map(TreeOp::Kth),
        1 => value_strategy().prop_map(TreeOp::LowerBound),
        1 => value_strategy().prop_map(TreeOp::UpperBound),
        1 => value_strategy().prop_map(TreeOp::Count),
        1 => Just(TreeOp::PopFirst),
        1 => Just(TreeOp::PopLast),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both OSRBTree and a sorted
    /// Vec model and asserts identical results at every step.
    #[test]
    fn tree_ops_match_sorted_model(ops in proptest::collection::vec(tree_op_strategy(), TEST_SIZE)) {
        let mut tree: OSRBTree<i64> = OSRBTree::new();
        let mut model: Vec<i64> = Vec::new();

        for op in &ops {
            match *op {
                TreeOp::Insert(v) => {
                    let node = tree.insert(v);
                    prop_assert_eq!(tree.key(node), &v);
                    model_insert(&mut model, v);
                }
                TreeOp::Take(v) => {
                    prop_assert_eq!(tree.take(&v), model_take(&mut model, v), "take({})", v);
                }
                TreeOp::Contains(v) => {
                    prop_assert_eq!(tree.contains(&v), model.binary_search(&v).is_ok(), "contains({})", v);
                }
                TreeOp::Rank(v) => {
                    prop_assert_eq!(tree.rank(&v), model_rank(&model, v), "rank({})", v);
                }
                TreeOp::Kth(k) => {
                    let expected = if k >= 1 { model.get(k - 1).copied() } else { None };
                    let actual = tree.find_kth(k).map(|node| *tree.key(node));
                    prop_assert_eq!(actual, expected, "find_kth({})", k);
                }
                TreeOp::LowerBound(v) => {
                    let actual = tree.lower_bound(&v).map(|node| *tree.key(node));
                    prop_assert_eq!(actual, model_lower_bound(&model, v), "lower_bound({})", v);
                }
                TreeOp::UpperBound(v) => {
                    let actual = tree.upper_bound(&v).map(|node| *tree.key(node));
                    prop_assert_eq!(actual, model_upper_bound(&model, v), "upper_bound({})", v);
                }
                TreeOp::Count(v) => {
                    let expected = model.iter().filter(|&&m| m == v).count();
                    prop_assert_eq!(tree.count(&v), expected, "count({})", v);
                }
                TreeOp::PopFirst => {
                    let expected = if model.is_empty() { None } else { Some(model.remove(0)) };
                    prop_assert_eq!(tree.pop_first(), expected, "pop_first()");
                }
                TreeOp::PopLast => {
                    prop_assert_eq!(tree.pop_last(), model.pop(), "pop_last()");
                }
            }
            prop_assert_eq!(tree.len(), model.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(tree.is_empty(), model.is_empty(), "is_empty mismatch after {:?}", op);
        }

        let collected: Vec<_> = tree.iter().copied().collect();
        prop_assert_eq!(&collected, &model, "final in-order contents mismatch");
    }

    /// Tests that iteration (forward, reverse, owning) yields the model's
    /// sorted order after random insertions.
    #[test]
    fn iteration_matches_sorted_model(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let tree: OSRBTree<i64> = values.iter().copied().collect();
        let mut model = values;
        model.sort_unstable();

        let forward: Vec<_> = tree.iter().copied().collect();
        prop_assert_eq!(&forward, &model, "iter() mismatch");

        let mut reversed: Vec<_> = tree.iter().rev().copied().collect();
        reversed.reverse();
        prop_assert_eq!(&reversed, &model, "iter().rev() mismatch");

        let owned: Vec<_> = tree.clone().into_iter().collect();
        prop_assert_eq!(&owned, &model, "into_iter() mismatch");

        let iter = tree.iter();
        prop_assert_eq!(iter.len(), tree.len(), "ExactSizeIterator len mismatch");
    }

    /// Walking successor links from the first node visits the same sequence
    /// as the iterator; predecessor links walk it backwards.
    #[test]
    fn navigation_agrees_with_iteration(values in proptest::collection::vec(value_strategy(), 1..500)) {
        let tree: OSRBTree<i64> = values.iter().copied().collect();

        let mut walked = Vec::new();
        let mut cursor = tree.first();
        while let Some(node) = cursor {
            walked.push(*tree.key(node));
            cursor = tree.successor(node);
        }
        let expected: Vec<_> = tree.iter().copied().collect();
        prop_assert_eq!(&walked, &expected, "successor walk mismatch");

        let mut walked_back = Vec::new();
        let mut cursor = tree.last();
        while let Some(node) = cursor {
            walked_back.push(*tree.key(node));
            cursor = tree.predecessor(node);
        }
        walked_back.reverse();
        prop_assert_eq!(&walked_back, &expected, "predecessor walk mismatch");
    }

    /// `rank` of the k-th smallest key points back at a node with that key,
    /// and `lower_bound`/`predecessor` bracket the probe value.
    #[test]
    fn order_statistic_round_trips(values in proptest::collection::vec(value_strategy(), 1..500), probe in value_strategy()) {
        let tree: OSRBTree<i64> = values.iter().copied().collect();

        for k in 1..=tree.len() {
            let key = *tree.key(tree.find_kth(k).unwrap());
            let rank = tree.rank(&key);
            // With duplicates the rank names the first equal position.
            prop_assert!(rank <= k, "rank({}) = {} exceeds position {}", key, rank, k);
            prop_assert_eq!(*tree.key(tree.find_kth(rank).unwrap()), key);
        }

        if let Some(node) = tree.lower_bound(&probe) {
            prop_assert!(*tree.key(node) >= probe);
            if let Some(previous) = tree.predecessor(node) {
                prop_assert!(*tree.key(previous) < probe);
            }
        } else {
            // No key reaches the probe, so the maximum stays below it.
            if let Some(node) = tree.last() {
                prop_assert!(*tree.key(node) < probe);
            }
        }
    }

    /// Inserting n keys and then removing them all leaves an empty tree.
    #[test]
    fn insert_remove_round_trip(values in proptest::collection::vec(value_strategy(), 1..500)) {
        let mut tree: OSRBTree<i64> = values.iter().copied().collect();

        for v in &values {
            let node = tree.find(v).expect("inserted key must be findable");
            prop_assert_eq!(tree.remove(node), *v);
        }
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.len(), 0);
        prop_assert!(tree.first().is_none());
    }
}

// ─── Concrete scenarios ──────────────────────────────────────────────────────

#[test]
fn seven_key_scenario() {
    let mut tree = OSRBTree::new();
    for key in [5, 3, 8, 1, 4, 7, 9] {
        tree.insert(key);
    }

    // Sorted order is [1, 3, 4, 5, 7, 8, 9]: four keys fall below 7.
    assert_eq!(tree.rank(&7), 5);
    assert_eq!(tree.key(tree.find_kth(3).unwrap()), &4);
    assert_eq!(tree.key(tree.upper_bound(&5).unwrap()), &7);

    let node = tree.find(&3).unwrap();
    assert_eq!(tree.remove(node), 3);
    assert_eq!(tree.len(), 6);
    assert!(tree.find(&3).is_none());
}

#[test]
fn empty_tree_reports_absent() {
    let tree: OSRBTree<i64> = OSRBTree::new();
    assert!(tree.find(&1).is_none());
    assert!(tree.lower_bound(&1).is_none());
    assert!(tree.upper_bound(&1).is_none());
    assert!(tree.find_kth(1).is_none());
    assert!(tree.first().is_none());
    assert!(tree.last().is_none());
    assert_eq!(tree.rank(&1), 1);
    assert_eq!(tree.count(&1), 0);
}

#[test]
fn duplicate_keys_resolve_deterministically() {
    let mut tree = OSRBTree::new();
    for key in [5, 5, 3, 5, 7] {
        tree.insert(key);
    }
    assert_eq!(tree.count(&5), 3);
    assert_eq!(tree.rank(&5), 2);
    assert_eq!(tree.key(tree.find_kth(4).unwrap()), &5);

    assert_eq!(tree.take(&5), Some(5));
    assert_eq!(tree.count(&5), 2);
    let keys: Vec<_> = tree.iter().copied().collect();
    assert_eq!(keys, [3, 5, 5, 7]);
}

#[test]
fn borrowed_key_queries() {
    let mut tree: OSRBTree<String> = OSRBTree::new();
    tree.insert("cherry".to_string());
    tree.insert("apple".to_string());
    tree.insert("banana".to_string());

    assert!(tree.contains("banana"));
    assert_eq!(tree.get("apple"), Some(&"apple".to_string()));
    assert_eq!(tree.rank("banana"), 2);
    let node = tree.lower_bound("b").unwrap();
    assert_eq!(tree.key(node), "banana");
    assert_eq!(tree.take("cherry"), Some("cherry".to_string()));
}

#[test]
#[should_panic(expected = "`handle` is invalid!")]
fn stale_node_ref_fails_loudly() {
    let mut tree = OSRBTree::new();
    let node = tree.insert(1);
    tree.remove(node);
    let _ = tree.key(node);
}
