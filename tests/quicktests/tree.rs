use std::collections::HashSet;

use arena_bst::{NodeRef, Tree};

use crate::Op;

/// Applies a set of operations to a tree and to a sorted `Vec` of the values
/// it should hold.
fn do_ops(ops: &[Op<i8>], tree: &mut Tree, model: &mut Vec<i64>) {
    for op in ops {
        match *op {
            Op::Insert(x) => {
                let x = i64::from(x);
                tree.insert(x);
                let pos = model.partition_point(|&m| m <= x);
                model.insert(pos, x);
            }
            Op::Remove(x) => {
                let x = i64::from(x);
                if let Ok(pos) = model.binary_search(&x) {
                    model.remove(pos);
                }
                tree.delete(x);
            }
        }
    }
}

/// Checks the ordering invariant through the public view only: every node is
/// within the bounds its ancestors set and every child points back at it.
fn ordered(tree: &Tree) -> bool {
    let Some(root) = tree.root() else {
        return tree.is_empty();
    };
    if root.parent().is_some() {
        return false;
    }

    let mut stack: Vec<(NodeRef<'_>, Option<i64>, Option<i64>)> = vec![(root, None, None)];
    while let Some((node, lower, upper)) = stack.pop() {
        if lower.map_or(false, |l| node.value() <= l) || upper.map_or(false, |u| node.value() > u) {
            return false;
        }
        for (child, lower, upper) in [
            (node.left(), lower, Some(node.value())),
            (node.right(), Some(node.value()), upper),
        ] {
            if let Some(child) = child {
                if child.parent() != Some(node) {
                    return false;
                }
                stack.push((child, lower, upper));
            }
        }
    }
    true
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut model = Vec::new();

        do_ops(&ops, &mut tree, &mut model);
        ordered(&tree)
            && tree.len() == model.len()
            && tree.values().eq(model.iter().copied())
    }
}

quickcheck::quickcheck! {
    fn round_trip_is_sorted_input(xs: Vec<i8>) -> bool {
        let tree: Tree = xs.iter().copied().map(i64::from).collect();
        let mut sorted: Vec<i64> = xs.into_iter().map(i64::from).collect();
        sorted.sort_unstable();

        tree.values().eq(sorted)
    }
}

quickcheck::quickcheck! {
    fn delete_removes_exactly_one_node(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: Tree = xs.into_iter().map(i64::from).collect();

        deletes.into_iter().map(i64::from).all(|x| {
            let before = tree.len();
            let present = tree.contains(x);
            let deleted = tree.delete(x);
            deleted == present
                && tree.len() == before - usize::from(deleted)
                && tree.validate().is_ok()
        })
    }
}

quickcheck::quickcheck! {
    fn delete_missing_leaves_dump_unchanged(xs: Vec<i8>, missing: i8) -> bool {
        let mut tree: Tree = xs
            .into_iter()
            .filter(|&x| x != missing)
            .map(i64::from)
            .collect();
        let before: Vec<String> = tree.dump().map(|n| n.to_string()).collect();

        !tree.delete(i64::from(missing))
            && tree.dump().map(|n| n.to_string()).eq(before)
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: Tree = xs.iter().copied().map(i64::from).collect();
        let deletes: HashSet<i64> = deletes.into_iter().map(i64::from).collect();

        // Delete every copy of each value.
        for &x in &deletes {
            while tree.delete(x) {}
        }

        deletes.iter().all(|&x| !tree.contains(x))
            && xs
                .into_iter()
                .map(i64::from)
                .filter(|x| !deletes.contains(x))
                .all(|x| tree.contains(x))
            && ordered(&tree)
    }
}

quickcheck::quickcheck! {
    fn repeated_duplicate_deletes_keep_chain_leftmost(copies: u8, others: Vec<i8>) -> bool {
        let copies = usize::from(copies % 16) + 1;
        let mut tree = Tree::new();
        tree.insert(0);
        tree.extend(others.into_iter().map(i64::from));
        for _ in 1..copies {
            tree.insert(0);
        }

        let mut expected = tree.values().filter(|&v| v == 0).count();
        while expected > 0 {
            let Some(found) = tree.search(0) else {
                return false;
            };
            if found.left().map_or(false, |l| l.value() == 0) {
                return false;
            }
            tree.delete(0);
            expected -= 1;
            if tree.values().filter(|&v| v == 0).count() != expected || !ordered(&tree) {
                return false;
            }
        }
        tree.search(0).is_none()
    }
}

#[test]
fn height_of_sorted_input_equals_len() {
    let tree: Tree = (1..=64).collect();

    assert_eq!(tree.height(), 64);
    assert_eq!(tree.len(), 64);
}

#[test]
fn dump_lines_match_display_format() {
    let mut tree: Tree = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    tree.delete(5);

    let lines: Vec<String> = tree.dump().map(|n| n.to_string()).collect();
    assert_eq!(
        lines,
        [
            "Value = 1; Parent = 3",
            "Value = 3; Parent = 4; Left Child = 1",
            "Value = 4; Left Child = 3; Right Child = 8",
            "Value = 7; Parent = 8",
            "Value = 8; Parent = 4; Left Child = 7; Right Child = 9",
            "Value = 9; Parent = 8",
        ]
    );
}
