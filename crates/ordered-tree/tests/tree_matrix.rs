mod common;

use ordered_tree::types::RbNodeLike;
use ordered_tree::RbTree;

fn is_black(tree: &RbTree<i32, i32>, node: u32) -> bool {
    tree.arena()[node].is_black()
}

fn build(keys: &[i32]) -> RbTree<i32, i32> {
    let mut tree = RbTree::new();
    for &k in keys {
        assert!(tree.try_insert(k, k * 10).unwrap());
        tree.check().unwrap();
    }
    tree
}

#[test]
fn ascending_triple_rebalances_around_middle_key() {
    common::init_logger();
    let tree = build(&[10, 20, 30]);

    let root = tree.root_index().unwrap();
    assert_eq!(*tree.key(root), 20);
    assert!(is_black(&tree, root));

    let left = tree.arena()[root].l.unwrap();
    let right = tree.arena()[root].r.unwrap();
    assert_eq!(*tree.key(left), 10);
    assert_eq!(*tree.key(right), 30);
    assert!(!is_black(&tree, left));
    assert!(!is_black(&tree, right));
    tree.check().unwrap();
    assert_eq!(tree.len(), 3);
}

#[test]
fn descending_and_zigzag_triples_match() {
    for keys in [[30, 20, 10], [10, 30, 20], [30, 10, 20]] {
        let tree = build(&keys);
        let root = tree.root_index().unwrap();
        assert_eq!(*tree.key(root), 20);
        assert_eq!(tree.height(), 2);
    }
}

#[test]
fn erase_internal_node_from_seven_keys() {
    common::init_logger();
    let mut tree = build(&[10, 20, 30, 40, 50, 60, 70]);
    let handles: Vec<(i32, u32)> = [10, 30, 40, 50, 60, 70]
        .iter()
        .map(|&k| (k, tree.find(&k).unwrap()))
        .collect();

    assert!(tree.erase(&20));
    tree.check().unwrap();
    assert_eq!(tree.len(), 6);
    let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec![10, 30, 40, 50, 60, 70]);

    // survivors keep their handles
    for (k, h) in handles {
        assert_eq!(tree.find(&k), Some(h));
        assert_eq!(*tree.value(h), k * 10);
    }
}

#[test]
fn bounds_over_odd_keys() {
    let tree = build(&[1, 3, 5, 7]);
    let key = |n: Option<u32>| n.map(|i| *tree.key(i));

    assert_eq!(key(tree.lower_bound(&4)), Some(5));
    assert_eq!(key(tree.lower_bound(&5)), Some(5));
    assert_eq!(key(tree.lower_bound(&8)), None);
    assert_eq!(key(tree.lower_bound(&0)), Some(1));

    assert_eq!(key(tree.upper_bound(&5)), Some(7));
    assert_eq!(key(tree.upper_bound(&7)), None);

    assert_eq!(key(tree.reverse_lower_bound(&4)), Some(3));
    assert_eq!(key(tree.reverse_lower_bound(&5)), Some(5));
    assert_eq!(key(tree.reverse_upper_bound(&5)), Some(3));
    assert_eq!(key(tree.reverse_upper_bound(&1)), None);
}

#[test]
fn duplicate_insert_is_rejected_without_change() {
    let mut tree = build(&[5]);
    let before = tree.arena().len();
    assert!(!tree.try_insert(5, 999).unwrap());
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.get(&5), Some(&50));
    assert_eq!(tree.arena().len(), before);
}

#[test]
fn create_then_insert_node_handle() {
    let mut tree: RbTree<i32, i32> = RbTree::new();
    let node = tree.create(4, 40).unwrap();
    assert!(tree.insert(node));
    assert_eq!(tree.find(&4), Some(node));

    let dup = tree.create(4, 41).unwrap();
    assert!(!tree.insert(dup));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.get(&4), Some(&40));
}

#[test]
fn erase_twice_and_erase_missing() {
    let mut tree = build(&[1, 2, 3]);
    assert!(tree.erase(&2));
    assert!(!tree.erase(&2));
    assert!(!tree.erase(&42));
    tree.check().unwrap();
    assert_eq!(tree.len(), 2);
}

#[test]
fn erase_everything_leaves_empty_tree() {
    let keys: Vec<i32> = (0..64).map(|i| (i * 37) % 64).collect();
    let mut tree = build(&keys);
    for k in &keys {
        assert!(tree.erase(k));
        tree.check().unwrap();
    }
    assert!(tree.is_empty());
    assert_eq!(tree.root_index(), None);
    assert_eq!(tree.first(), None);
    assert_eq!(tree.height(), 0);
}

#[test]
fn sequential_inserts_stay_logarithmic() {
    let keys: Vec<i32> = (0..1024).collect();
    let tree = build(&keys);
    // 2 * log2(n + 1)
    assert!(tree.height() <= 20, "height {}", tree.height());
}

#[test]
fn remove_range_drops_only_matching_keys() {
    let mut tree = build(&(0..20).collect::<Vec<_>>());
    assert_eq!(tree.remove_range(5..10), 5);
    assert_eq!(tree.remove_range(..=2), 3);
    assert_eq!(tree.remove_range(18..), 2);
    let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec![3, 4, 10, 11, 12, 13, 14, 15, 16, 17]);
    tree.check().unwrap();
}

#[test]
fn clear_then_reuse() {
    let mut tree = build(&[3, 1, 2]);
    tree.clear();
    assert!(tree.is_empty());
    assert!(tree.arena().is_empty());
    assert!(tree.try_insert(7, 70).unwrap());
    tree.check().unwrap();
    assert_eq!(tree.len(), 1);
}

#[test]
fn custom_comparator_reverses_order() {
    let mut tree = RbTree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    for k in [1, 4, 2, 3] {
        tree.try_insert(k, ()).unwrap();
    }
    let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec![4, 3, 2, 1]);
    assert_eq!(tree.lower_bound(&5).map(|i| *tree.key(i)), Some(4));
    tree.check().unwrap();
}

#[test]
fn created_but_unlinked_node_leaves_counts_consistent() {
    let mut tree: RbTree<i32, i32> = RbTree::new();
    let pending = tree.create(1, 10).unwrap();
    assert_eq!(tree.len(), 0);
    assert!(tree.is_empty());
    tree.check().unwrap();
    assert_eq!(tree.iter().len(), 0);

    assert!(tree.try_insert(2, 20).unwrap());
    assert_eq!(tree.len(), 1);
    tree.check().unwrap();

    assert!(tree.insert(pending));
    assert_eq!(tree.len(), 2);
    tree.check().unwrap();
}

#[test]
fn remove_span_matches_key_range() {
    let mut tree = build(&(0..30).collect::<Vec<_>>());
    let first = tree.lower_bound(&10);
    let last = tree.lower_bound(&20);
    assert_eq!(tree.remove_span(first, last), 10);
    let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, (0..10).chain(20..30).collect::<Vec<_>>());
    tree.check().unwrap();
    assert_eq!(tree.len(), 20);
}
