//! Catalog walker: recursive discovery of namespace markers and leaf assets.
//!
//! The walker only classifies entries; it builds no structure. Its output is
//! two flat lists that [`crate::tree::build`] turns into a namespace tree.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use walkdir::{DirEntry, WalkDir};

use crate::error::{CatalogError, MarkerError, Result};

/// Extension and marker rules applied during a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkRules {
    /// Extensions accepted on a catalog root (checked by [`crate::catalog::Catalog::load`]).
    pub catalog_extensions: HashSet<String>,
    /// Directories with these extensions are leaf assets.
    pub leaf_extensions: HashSet<String>,
    /// Directories with these extensions are never descended into.
    pub opaque_extensions: HashSet<String>,
    /// `(stem, extension)` pairs of files probed for `provides-namespace`.
    pub marker_files: HashSet<(String, String)>,
}

impl WalkRules {
    /// Rules for `.xcassets` image catalogs.
    ///
    /// `appiconset` is not loadable by name at runtime, so it is not a leaf.
    pub fn image_catalog() -> Self {
        Self {
            catalog_extensions: set(&["xcassets"]),
            leaf_extensions: set(&["launchimage", "imageset", "imagestack"]),
            opaque_extensions: set(&["brandassets", "imagestacklayer"]),
            marker_files: [("Contents".to_string(), "json".to_string())]
                .into_iter()
                .collect(),
        }
    }

    /// Classify one entry by its name alone.
    pub fn classify(&self, path: &Path) -> EntryClass {
        let stem = path.file_stem().and_then(|s| s.to_str());
        let ext = path.extension().and_then(|s| s.to_str());

        let Some(ext) = ext else {
            return EntryClass::default();
        };

        EntryClass {
            marker: stem.is_some_and(|stem| {
                self.marker_files
                    .iter()
                    .any(|(name, marker_ext)| name == stem && marker_ext == ext)
            }),
            leaf: self.leaf_extensions.contains(ext),
            opaque: self.opaque_extensions.contains(ext),
        }
    }
}

impl Default for WalkRules {
    fn default() -> Self {
        Self::image_catalog()
    }
}

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Classification of a single catalog entry.
///
/// Flags are independent: an entry may be both a leaf and opaque.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryClass {
    pub marker: bool,
    pub leaf: bool,
    pub opaque: bool,
}

impl EntryClass {
    pub fn is_unclassified(&self) -> bool {
        !(self.marker || self.leaf || self.opaque)
    }
}

/// Flat result of a catalog walk, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Directories whose marker file declares `provides-namespace: true`.
    pub namespace_dirs: Vec<PathBuf>,
    /// Paths of leaf assets (e.g. `Logo.imageset`).
    pub leaf_candidates: Vec<PathBuf>,
}

/// Walk `root` and collect namespace directories and leaf candidates.
///
/// Hidden entries (leading `.`) are skipped with their subtrees. Leaf and
/// opaque directories are never descended: nothing inside an asset is
/// recorded as a separate leaf or namespace.
///
/// # Errors
///
/// Returns [`CatalogError::RootUnreadable`] if `root` cannot be listed.
/// Failures below the root are skipped.
pub fn walk(root: &Path, rules: &WalkRules) -> Result<Discovery> {
    let _span = tracing::debug_span!("walk", root = %root.display()).entered();

    std::fs::read_dir(root).map_err(|e| CatalogError::root_unreadable(root, e))?;

    let mut discovery = Discovery::default();
    let mut entries = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    while let Some(next) = entries.next() {
        let entry = match next {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable catalog entry");
                continue;
            }
        };
        let path = entry.path();
        let class = rules.classify(path);

        if class.marker && entry.file_type().is_file() {
            match probe_marker(path) {
                Ok(true) => {
                    if let Some(parent) = path.parent() {
                        discovery.namespace_dirs.push(parent.to_path_buf());
                    }
                }
                Ok(false) => {}
                Err(err) => {
                    tracing::trace!(path = %path.display(), error = %err, "marker ignored");
                }
            }
        }

        if class.leaf {
            discovery.leaf_candidates.push(path.to_path_buf());
        }

        if (class.leaf || class.opaque) && entry.file_type().is_dir() {
            entries.skip_current_dir();
        }
    }

    tracing::debug!(
        namespaces = discovery.namespace_dirs.len(),
        leaves = discovery.leaf_candidates.len(),
        "catalog walked"
    );

    Ok(discovery)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

#[derive(Debug, Deserialize)]
struct MarkerContents {
    #[serde(default)]
    properties: Option<MarkerProperties>,
}

#[derive(Debug, Deserialize)]
struct MarkerProperties {
    #[serde(rename = "provides-namespace", default)]
    provides_namespace: Option<bool>,
}

/// Read a marker file and extract `properties.provides-namespace`.
///
/// `Ok(false)` when the key is absent. Any error means the file does not
/// provide a namespace; it never aborts a walk.
pub fn probe_marker(path: &Path) -> std::result::Result<bool, MarkerError> {
    let bytes = std::fs::read(path)?;
    let contents: MarkerContents = serde_json::from_slice(&bytes)?;
    Ok(contents
        .properties
        .and_then(|p| p.provides_namespace)
        .unwrap_or(false))
}
