//! Catalog loading and the multi-catalog fan-in.
//!
//! Each catalog is walked and built independently (in parallel when several
//! are loaded). Merging compares siblings across catalogs, so generation only
//! starts once every catalog's root level has been collected.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::accessor::{AccessLevel, AccessorNode, generate_owned};
use crate::error::{CatalogError, Result};
use crate::report::Reporter;
use crate::tree::{self, NamespaceNode};
use crate::walker::{self, WalkRules};

/// A single loaded catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    root: PathBuf,
    name: String,
    tree: NamespaceNode,
}

impl Catalog {
    /// Walk and build one catalog.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::UnsupportedExtension`] if the root's extension is not
    ///   in `rules.catalog_extensions`
    /// - [`CatalogError::RootUnreadable`] if the root cannot be listed
    /// - [`CatalogError::MissingFileName`] if a discovered path has no name
    pub fn load(root: impl AsRef<Path>, rules: &WalkRules) -> Result<Self> {
        let root = root.as_ref();

        let extension = root.extension().and_then(|e| e.to_str()).unwrap_or_default();
        if !rules.catalog_extensions.contains(extension) {
            return Err(CatalogError::UnsupportedExtension {
                path: root.to_path_buf(),
                extension: extension.to_string(),
            });
        }

        let name = root
            .file_stem()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CatalogError::MissingFileName {
                path: root.to_path_buf(),
            })?
            .to_string();

        let discovery = walker::walk(root, rules)?;
        let tree = tree::build_from(root, &discovery)?;

        Ok(Self {
            root: root.to_path_buf(),
            name,
            tree,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File stem of the catalog root (`Assets` for `Assets.xcassets`).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tree(&self) -> &NamespaceNode {
        &self.tree
    }

    /// Accessor tree for this catalog alone.
    pub fn accessor_tree(
        &self,
        access: AccessLevel,
        qualified_prefix: &str,
        reporter: &mut dyn Reporter,
    ) -> AccessorNode {
        generate_owned(self.tree.clone(), access, qualified_prefix, reporter)
    }
}

/// A catalog that could not be loaded.
#[derive(Debug)]
pub struct CatalogFailure {
    pub root: PathBuf,
    pub error: CatalogError,
}

/// Every catalog of a project, loaded or failed, in input order.
#[derive(Debug, Default)]
pub struct CatalogSet {
    catalogs: Vec<Catalog>,
    failures: Vec<CatalogFailure>,
}

impl CatalogSet {
    pub fn catalogs(&self) -> &[Catalog] {
        &self.catalogs
    }

    pub fn failures(&self) -> &[CatalogFailure] {
        &self.failures
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// Synthetic root holding every catalog's root-level leaves and
    /// namespaces, in catalog order.
    pub fn combined_root(&self) -> NamespaceNode {
        let mut combined = NamespaceNode::root(PathBuf::new());
        for catalog in &self.catalogs {
            combined.absorb(catalog.tree.clone());
        }
        combined
    }

    /// Accessor tree across all loaded catalogs.
    pub fn accessor_tree(
        &self,
        access: AccessLevel,
        qualified_prefix: &str,
        reporter: &mut dyn Reporter,
    ) -> AccessorNode {
        generate_owned(self.combined_root(), access, qualified_prefix, reporter)
    }
}

/// Load several catalogs in parallel.
///
/// A failing catalog is recorded in [`CatalogSet::failures`] and does not
/// affect the others.
pub fn load_catalogs<P>(roots: &[P], rules: &WalkRules) -> CatalogSet
where
    P: AsRef<Path> + Sync,
{
    let results: Vec<(PathBuf, Result<Catalog>)> = roots
        .par_iter()
        .map(|root| (root.as_ref().to_path_buf(), Catalog::load(root, rules)))
        .collect();

    let mut set = CatalogSet::default();
    for (root, result) in results {
        match result {
            Ok(catalog) => set.catalogs.push(catalog),
            Err(error) => {
                tracing::debug!(root = %root.display(), %error, "catalog failed to load");
                set.failures.push(CatalogFailure { root, error });
            }
        }
    }
    set
}
