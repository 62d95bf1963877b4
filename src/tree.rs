//! Namespace tree built from walker output.
//!
//! Containment is derived from originating paths alone: a node contains every
//! path that has the node's origin as a strict, component-wise prefix. Each
//! insertion *dives* from the root into the first child containing the new
//! path, so a node always lands under its deepest inserted ancestor.
//!
//! ```text
//! Assets.xcassets/                     (root, paths "")
//! ├── Onboarding/      [namespace]     onboarding      onboarding
//! │   ├── Step1/       [namespace]     onboarding.step1 onboarding/step1
//! │   └── Logo.imageset                leaf "Logo" of onboarding
//! └── Plain/                           (not a namespace)
//!     └── Icon.imageset                leaf "Icon" of root
//! ```

use std::path::{Path, PathBuf};

use crate::error::{CatalogError, Result};
use crate::ident::{Identifier, join_segment};
use crate::walker::Discovery;

/// One namespace level: a namespace-providing directory, or the synthetic
/// catalog root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceNode {
    pub(crate) origin: PathBuf,
    pub(crate) name: String,
    pub(crate) logical_path: String,
    pub(crate) resource_path: String,
    pub(crate) leaf_resources: Vec<String>,
    pub(crate) children: Vec<NamespaceNode>,
}

impl NamespaceNode {
    /// Synthetic root for a catalog. Name and paths are empty.
    pub fn root(origin: impl Into<PathBuf>) -> Self {
        Self {
            origin: origin.into(),
            name: String::new(),
            logical_path: String::new(),
            resource_path: String::new(),
            leaf_resources: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Directory this node was discovered at.
    #[inline]
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// Raw final path segment (empty for the root).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn identifier(&self) -> Identifier {
        Identifier::new(&self.name)
    }

    /// Dot-joined identifiers from the root, e.g. `onboarding.step1`.
    #[inline]
    pub fn logical_path(&self) -> &str {
        &self.logical_path
    }

    /// Slash-joined identifiers from the root, e.g. `onboarding/step1`.
    #[inline]
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    /// Raw base names of leaf assets attached here, in insertion order.
    #[inline]
    pub fn leaf_resources(&self) -> &[String] {
        &self.leaf_resources
    }

    #[inline]
    pub fn children(&self) -> &[NamespaceNode] {
        &self.children
    }

    /// True if `path` lies strictly below this node's origin.
    pub fn contains(&self, path: &Path) -> bool {
        is_strictly_within(path, &self.origin)
    }

    /// Insert a namespace directory under the deepest child containing it.
    ///
    /// The new node's paths are derived from the level it is attached to and
    /// never change afterwards.
    pub fn insert_namespace(&mut self, dir: &Path) -> Result<()> {
        if let Some(parent) = self.children.iter_mut().find(|c| c.contains(dir)) {
            return parent.insert_namespace(dir);
        }

        let name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CatalogError::MissingFileName {
                path: dir.to_path_buf(),
            })?
            .to_string();
        let ident = Identifier::new(&name);

        self.children.push(NamespaceNode {
            origin: dir.to_path_buf(),
            logical_path: join_segment(&self.logical_path, '.', ident.as_str()),
            resource_path: join_segment(&self.resource_path, '/', ident.as_str()),
            name,
            leaf_resources: Vec::new(),
            children: Vec::new(),
        });
        Ok(())
    }

    /// Attach a leaf asset's base name to the deepest node containing it.
    pub fn insert_leaf(&mut self, path: &Path) -> Result<()> {
        if let Some(parent) = self.children.iter_mut().find(|c| c.contains(path)) {
            return parent.insert_leaf(path);
        }

        let base = path
            .file_stem()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CatalogError::MissingFileName {
                path: path.to_path_buf(),
            })?;
        self.leaf_resources.push(base.to_string());
        Ok(())
    }

    /// Append another node's leaves and children to this one.
    ///
    /// Paths of `self` are kept; `other`'s identity is discarded.
    pub(crate) fn absorb(&mut self, other: NamespaceNode) {
        self.leaf_resources.extend(other.leaf_resources);
        self.children.extend(other.children);
    }

    /// Look up a descendant by its logical path (`"a.b"`).
    ///
    /// Follows the first matching child per level; before merging, several
    /// siblings may share a logical path.
    pub fn descendant(&self, logical_path: &str) -> Option<&NamespaceNode> {
        let mut current = self;
        for segment in logical_path.split('.') {
            current = current
                .children
                .iter()
                .find(|c| c.identifier().as_str() == segment)?;
        }
        Some(current)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

/// Component-wise strict containment: `Foo` does not contain `Foobar`.
pub fn is_strictly_within(path: &Path, ancestor: &Path) -> bool {
    path != ancestor && path.starts_with(ancestor)
}

/// Build the namespace tree for one catalog.
///
/// Namespace directories are inserted in ascending full-path order, which
/// places every ancestor before its descendants; the result is therefore
/// independent of discovery order. Directories not strictly inside `root` are
/// ignored.
///
/// # Errors
///
/// [`CatalogError::MissingFileName`] if any inserted path has no usable final
/// component. The whole catalog is rejected.
pub fn build(
    root: &Path,
    namespace_dirs: &[PathBuf],
    leaf_candidates: &[PathBuf],
) -> Result<NamespaceNode> {
    let mut dirs: Vec<&PathBuf> = namespace_dirs
        .iter()
        .filter(|dir| {
            let inside = is_strictly_within(dir, root);
            if !inside {
                tracing::trace!(dir = %dir.display(), "namespace outside catalog root ignored");
            }
            inside
        })
        .collect();
    dirs.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    dirs.dedup();

    let mut tree = NamespaceNode::root(root);
    for dir in dirs {
        tree.insert_namespace(dir)?;
    }
    for leaf in leaf_candidates {
        tree.insert_leaf(leaf)?;
    }
    Ok(tree)
}

/// [`build`] from a walker [`Discovery`].
pub fn build_from(root: &Path, discovery: &Discovery) -> Result<NamespaceNode> {
    build(root, &discovery.namespace_dirs, &discovery.leaf_candidates)
}
