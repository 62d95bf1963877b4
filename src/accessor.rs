//! Accessor tree generation.
//!
//! Turns a (raw) namespace tree into a declarative accessor tree: one node per
//! namespace level, each holding leaf accessors `(symbol, lookup key)` and
//! child nodes. Sibling namespaces are merged and every naming collision is
//! resolved here, level by level, so a renderer can emit the tree verbatim.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ident::{Identifier, join_segment};
use crate::merge::merge_namespaces;
use crate::report::{Reporter, ResourceKind, Warning};
use crate::tree::NamespaceNode;

/// Visibility the renderer applies to generated items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    #[default]
    Public,
    Crate,
    Private,
}

/// A single image accessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafAccessor {
    /// Generated symbol.
    pub symbol: Identifier,
    /// Base name of the asset the symbol was generated from.
    pub raw_name: String,
    /// Runtime lookup key: the owning node's resource path plus the symbol.
    pub lookup_key: String,
    pub access: AccessLevel,
}

/// One generated namespace level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessorNode {
    /// Identifier of this level (empty for a catalog root).
    pub name: Identifier,
    /// Dot-joined chain of identifiers, prefixed by the caller's qualifier.
    pub qualified_name: String,
    pub access: AccessLevel,
    /// Sorted by symbol.
    pub leaves: Vec<LeafAccessor>,
    /// Sorted by name.
    pub children: Vec<AccessorNode>,
}

impl AccessorNode {
    pub fn leaf(&self, symbol: &str) -> Option<&LeafAccessor> {
        self.leaves.iter().find(|l| l.symbol.as_str() == symbol)
    }

    pub fn child(&self, name: &str) -> Option<&AccessorNode> {
        self.children.iter().find(|c| c.name.as_str() == name)
    }

    /// Total leaf accessors in this subtree.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len() + self.children.iter().map(Self::leaf_count).sum::<usize>()
    }

    /// Depth-first iterator over this node and all descendants.
    pub fn iter(&self) -> impl Iterator<Item = &AccessorNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

/// Generate the accessor tree for `node`.
///
/// Output is deterministic for a fixed input tree: leaves and children are
/// sorted by identifier, and within a duplicate group the first-encountered
/// raw name is kept.
pub fn generate(
    node: &NamespaceNode,
    access: AccessLevel,
    qualified_prefix: &str,
    reporter: &mut dyn Reporter,
) -> AccessorNode {
    generate_owned(node.clone(), access, qualified_prefix, reporter)
}

pub(crate) fn generate_owned(
    node: NamespaceNode,
    access: AccessLevel,
    qualified_prefix: &str,
    reporter: &mut dyn Reporter,
) -> AccessorNode {
    let name = node.identifier();
    let qualified_name = if name.is_empty() {
        qualified_prefix.to_string()
    } else {
        join_segment(qualified_prefix, '.', name.as_str())
    };

    // 1. Leaf resources.
    let mut groups: IndexMap<Identifier, Vec<String>> = IndexMap::new();
    let mut unnamed = Vec::new();
    for raw in node.leaf_resources {
        let symbol = Identifier::new(&raw);
        if symbol.is_empty() {
            unnamed.push(raw);
        } else {
            groups.entry(symbol).or_default().push(raw);
        }
    }
    if !unnamed.is_empty() {
        reporter.report(Warning::EmptyIdentifier {
            scope: qualified_name.clone(),
            kind: ResourceKind::Image,
            names: unnamed,
        });
    }

    let mut leaves = Vec::with_capacity(groups.len());
    for (symbol, names) in groups {
        if names.len() > 1 {
            reporter.report(Warning::DuplicateIdentifier {
                scope: qualified_name.clone(),
                kind: ResourceKind::Image,
                identifier: symbol.clone(),
                names: names.clone(),
            });
        }
        let Some(raw_name) = names.into_iter().next() else {
            continue;
        };
        leaves.push(LeafAccessor {
            lookup_key: join_segment(&node.resource_path, '/', symbol.as_str()),
            symbol,
            raw_name,
            access,
        });
    }
    leaves.sort_by(|a, b| a.symbol.cmp(&b.symbol));

    // 2. Child namespaces, merged against this level's leaves.
    let leaf_ids: HashSet<Identifier> = leaves.iter().map(|l| l.symbol.clone()).collect();
    let merged = merge_namespaces(node.children, &leaf_ids);

    for conflict in &merged.conflicts {
        reporter.report(Warning::NamespaceConflict {
            scope: qualified_name.clone(),
            identifier: conflict.identifier(),
            namespace: conflict.name().to_string(),
        });
    }
    if !merged.unnamed.is_empty() {
        reporter.report(Warning::EmptyIdentifier {
            scope: qualified_name.clone(),
            kind: ResourceKind::Namespace,
            names: merged.unnamed.iter().map(|n| n.name().to_string()).collect(),
        });
    }

    let mut children = Vec::with_capacity(merged.usable.len());
    for child in merged.usable {
        children.push(generate_owned(child, access, &qualified_name, reporter));
    }
    children.sort_by(|a, b| a.name.cmp(&b.name));

    AccessorNode {
        name,
        qualified_name,
        access,
        leaves,
        children,
    }
}
