//! Merging of sibling namespaces that share an identifier.
//!
//! Namespaces with the same name can be discovered in unrelated branches
//! (`A/Shared`, `B/Shared`) or in different catalogs. At generation time they
//! are one level, so their contents are pooled into the first-seen node.

use std::collections::HashSet;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::ident::Identifier;
use crate::tree::NamespaceNode;

/// Result of merging one level of sibling namespaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedNamespaces {
    /// Merged nodes safe to generate, in first-seen order.
    pub usable: Vec<NamespaceNode>,
    /// Merged nodes whose identifier collides with a sibling leaf resource.
    pub conflicts: Vec<NamespaceNode>,
    /// Nodes whose name normalizes to an empty identifier.
    pub unnamed: Vec<NamespaceNode>,
}

/// Merge `siblings` by identifier and split off leaf-resource conflicts.
///
/// The first node of each identifier group is the representative; later
/// members' leaves and children are appended to it in encounter order. The
/// representative keeps its own paths.
pub fn merge_namespaces(
    siblings: Vec<NamespaceNode>,
    leaf_identifiers: &HashSet<Identifier>,
) -> MergedNamespaces {
    let mut groups: IndexMap<Identifier, NamespaceNode> = IndexMap::new();
    let mut unnamed = Vec::new();

    for node in siblings {
        let ident = node.identifier();
        if ident.is_empty() {
            unnamed.push(node);
            continue;
        }
        match groups.entry(ident) {
            Entry::Occupied(mut existing) => existing.get_mut().absorb(node),
            Entry::Vacant(slot) => {
                slot.insert(node);
            }
        }
    }

    let mut merged = MergedNamespaces {
        unnamed,
        ..MergedNamespaces::default()
    };
    for (ident, node) in groups {
        if leaf_identifiers.contains(&ident) {
            merged.conflicts.push(node);
        } else {
            merged.usable.push(node);
        }
    }
    merged
}
