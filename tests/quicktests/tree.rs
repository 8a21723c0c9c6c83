use bst_rebuild::Tree;

use std::collections::{BTreeSet, HashSet};

use quickcheck_macros::quickcheck;

fn inserted(xs: &[i8]) -> Tree<i8> {
    let mut tree = Tree::new();
    for x in xs {
        tree.insert(*x);
    }

    tree
}

fn shape(tree: &Tree<i8>) -> Vec<i8> {
    tree.iter_pre_order().map(|n| *n.key()).collect()
}

#[quickcheck]
fn in_order_is_strictly_ascending(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = inserted(&xs);
    for delete in &deletes {
        tree.delete_item(delete);
    }

    let keys: Vec<_> = tree.keys().collect();
    keys.windows(2).all(|w| w[0] < w[1])
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree = inserted(&xs);

    xs.iter().all(|x| tree.find(x).map(|n| n.key()) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = Tree::build_tree(xs.iter().copied());
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = inserted(&xs);
    for delete in &deletes {
        let len = tree.len();
        let expected = tree.contains(delete).then_some(*delete);
        if tree.delete_item(delete) != expected {
            return false;
        }
        if tree.len() != len - usize::from(expected.is_some()) {
            return false;
        }
    }

    let still_present: BTreeSet<_> = xs.iter().filter(|x| !deletes.contains(*x)).collect();
    deletes.iter().all(|x| tree.find(x).is_none()) && tree.keys().eq(still_present)
}

#[quickcheck]
fn build_tree_round_trips_key_set(xs: Vec<i8>) -> bool {
    let tree = inserted(&xs);
    let rebuilt = Tree::build_tree(tree.keys().copied());

    rebuilt.keys().eq(tree.keys()) && rebuilt.is_balanced()
}

#[quickcheck]
fn duplicate_insert_keeps_shape(xs: Vec<i8>) -> bool {
    let mut tree = inserted(&xs);
    let before = shape(&tree);

    xs.iter().all(|x| !tree.insert(*x)) && shape(&tree) == before
}

#[quickcheck]
fn missing_delete_keeps_shape(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = inserted(&xs);
    let before = shape(&tree);

    deletes
        .iter()
        .filter(|x| !xs.contains(*x))
        .all(|x| tree.delete_item(x).is_none())
        && shape(&tree) == before
}

#[quickcheck]
fn rebalance_is_idempotent(xs: Vec<i8>) -> bool {
    let mut tree = inserted(&xs);
    let keys: Vec<_> = tree.keys().copied().collect();

    tree.rebalance();
    let once = shape(&tree);
    let balanced = tree.is_balanced();

    !tree.rebalance() && balanced && shape(&tree) == once && tree.keys().copied().eq(keys)
}
