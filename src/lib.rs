//! # Namespaced image catalogs (rescat)
//!
//! Discovers images in `.xcassets`-style catalogs and derives a collision-free
//! accessor hierarchy for code generation.
//!
//! ## Pipeline
//!
//! ```text
//! catalog dir ──walk──▶ (namespace dirs, leaf paths)
//!             ──build─▶ NamespaceNode tree         (per catalog, parallel)
//!             ──fan-in▶ combined root              (all catalogs)
//!             ──generate (merge per level)─▶ AccessorNode tree
//! ```
//!
//! A directory provides a namespace when it contains a `Contents.json` with
//! `properties.provides-namespace == true`. Images below it are addressed by
//! the namespace's resource path (`onboarding/logo`); everything else lands at
//! the top level.
//!
//! Naming problems (duplicate or empty symbols, a namespace shadowed by an
//! image) never abort processing; they are reported as [`Warning`]s through a
//! [`Reporter`].
//!
//! ```ignore
//! use rescat::{AccessLevel, TracingReporter, WalkRules, load_catalogs};
//!
//! let set = load_catalogs(&["Assets.xcassets"], &WalkRules::image_catalog());
//! for failure in set.failures() {
//!     eprintln!("{}", failure.error);
//! }
//! let tree = set.accessor_tree(AccessLevel::Public, "images", &mut TracingReporter);
//! ```

pub mod accessor;
pub mod catalog;
pub mod error;
pub mod ident;
pub mod merge;
pub mod report;
pub mod tree;
pub mod walker;

pub use accessor::{AccessLevel, AccessorNode, LeafAccessor, generate};
pub use catalog::{Catalog, CatalogFailure, CatalogSet, load_catalogs};
pub use error::{CatalogError, MarkerError, Result};
pub use ident::Identifier;
pub use merge::{MergedNamespaces, merge_namespaces};
pub use report::{CountingReporter, Reporter, ResourceKind, TracingReporter, Warning};
pub use tree::{NamespaceNode, build, is_strictly_within};
pub use walker::{Discovery, EntryClass, WalkRules, probe_marker, walk};
