//! Property tests for tree building, merging, and accessor generation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use rescat::*;

const SEGMENTS: &[&str] = &["a", "b", "Foo", "Foobar", "shared", "Shared"];
const LEAF_NAMES: &[&str] = &["Icon", "icon", "Logo", "logo", "a", "Shared", "---", "x y"];

fn catalog_root() -> PathBuf {
    PathBuf::from("/cat")
}

fn rel_path() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(SEGMENTS), 1..4).prop_map(|s| s.join("/"))
}

fn namespace_dirs() -> impl Strategy<Value = Vec<PathBuf>> {
    prop::collection::vec(rel_path(), 0..12)
        .prop_map(|rels| rels.iter().map(|r| catalog_root().join(r)).collect())
}

fn leaf_paths() -> impl Strategy<Value = Vec<PathBuf>> {
    prop::collection::vec((rel_path(), prop::sample::select(LEAF_NAMES)), 0..16).prop_map(
        |items| {
            items
                .into_iter()
                .map(|(dir, name)| catalog_root().join(dir).join(format!("{name}.imageset")))
                .collect()
        },
    )
}

/// Deepest inserted directory strictly containing `path`.
fn deepest_ancestor<'a>(path: &Path, dirs: &'a [PathBuf]) -> Option<&'a PathBuf> {
    dirs.iter()
        .filter(|d| is_strictly_within(path, d))
        .max_by_key(|d| d.components().count())
}

fn assert_parents(node: &NamespaceNode, parent: Option<&Path>, dirs: &[PathBuf]) {
    for child in node.children() {
        let expected = deepest_ancestor(child.origin(), dirs).map(PathBuf::as_path);
        assert_eq!(expected, parent, "wrong parent for {}", child.origin().display());
        assert_parents(child, Some(child.origin()), dirs);
    }
}

fn assert_unique_per_level(node: &AccessorNode) {
    let mut seen = HashSet::new();
    for leaf in &node.leaves {
        assert!(!leaf.symbol.is_empty());
        assert!(seen.insert(leaf.symbol.clone()), "duplicate leaf {}", leaf.symbol);
    }
    for child in &node.children {
        assert!(!child.name.is_empty());
        assert!(seen.insert(child.name.clone()), "duplicate entry {}", child.name);
        assert_unique_per_level(child);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Discovery order never changes the tree.
    #[test]
    fn tree_shape_ignores_discovery_order(
        (dirs, shuffled) in namespace_dirs().prop_flat_map(|d| (Just(d.clone()), Just(d).prop_shuffle())),
        leaves in leaf_paths(),
    ) {
        let a = build(&catalog_root(), &dirs, &leaves).unwrap();
        let b = build(&catalog_root(), &shuffled, &leaves).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Every node hangs under its deepest inserted ancestor.
    #[test]
    fn nodes_attach_to_deepest_ancestor(dirs in namespace_dirs()) {
        let tree = build(&catalog_root(), &dirs, &[]).unwrap();
        assert_parents(&tree, None, &dirs);
    }

    /// Leaves and namespaces never share an identifier on one level.
    #[test]
    fn generated_levels_are_collision_free(dirs in namespace_dirs(), leaves in leaf_paths()) {
        let tree = build(&catalog_root(), &dirs, &leaves).unwrap();
        let mut warnings = Vec::new();
        let out = generate(&tree, AccessLevel::Public, "", &mut warnings);
        assert_unique_per_level(&out);
    }

    /// Generation is a pure function of the tree.
    #[test]
    fn generation_is_stable(dirs in namespace_dirs(), leaves in leaf_paths()) {
        let tree = build(&catalog_root(), &dirs, &leaves).unwrap();
        let (mut w1, mut w2) = (Vec::new(), Vec::new());
        let first = generate(&tree, AccessLevel::Public, "images", &mut w1);
        let second = generate(&tree, AccessLevel::Public, "images", &mut w2);
        prop_assert_eq!(first, second);
        prop_assert_eq!(w1, w2);
    }

    /// Pairwise merge order does not matter under a fixed first-seen order.
    #[test]
    fn merge_is_associative(
        a in prop::collection::vec(prop::sample::select(LEAF_NAMES), 0..4),
        b in prop::collection::vec(prop::sample::select(LEAF_NAMES), 0..4),
        c in prop::collection::vec(prop::sample::select(LEAF_NAMES), 0..4),
    ) {
        let root = catalog_root();
        let dirs: Vec<PathBuf> = ["p1", "p2", "p3"].iter().map(|p| root.join(p).join("Shared")).collect();
        let mut leaves = Vec::new();
        for (dir, names) in dirs.iter().zip([&a, &b, &c]) {
            for name in names {
                leaves.push(dir.join(format!("{name}.imageset")));
            }
        }
        let siblings = || build(&root, &dirs, &leaves).unwrap().children().to_vec();
        let none = HashSet::new();

        let all = merge_namespaces(siblings(), &none).usable;

        let mut nodes = siblings();
        let third = nodes.pop().unwrap();
        let mut left = merge_namespaces(nodes, &none).usable;
        left.push(third);
        let left = merge_namespaces(left, &none).usable;

        let mut nodes = siblings();
        let first = nodes.remove(0);
        let mut right = vec![first];
        right.extend(merge_namespaces(nodes, &none).usable);
        let right = merge_namespaces(right, &none).usable;

        prop_assert_eq!(&all, &left);
        prop_assert_eq!(&all, &right);
        let expected: Vec<String> = a.iter().chain(&b).chain(&c).map(|s| s.to_string()).collect();
        prop_assert_eq!(all[0].leaf_resources(), expected.as_slice());
    }
}
