//! Build-time utilities for rescat.
//!
//! This crate provides tools for:
//! - Parsing `rescat.toml` configuration files
//! - Loading the configured image catalogs
//! - Generating a Rust module of typed image accessors
//!
//! # Usage in build.rs
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     let out = std::path::Path::new(&std::env::var("OUT_DIR").unwrap()).join("images.rs");
//!     rescat_build::generate("rescat.toml", out).expect("Failed to generate image accessors");
//! }
//! ```
//!
//! ```ignore
//! // src/lib.rs
//! include!(concat!(env!("OUT_DIR"), "/images.rs"));
//!
//! let key: &str = images::onboarding::LOGO; // "onboarding/logo"
//! ```
//!
//! # Configuration
//!
//! ```toml
//! module_name = "images"     # default
//! access = "pub"             # "pub", "crate" or "private"
//! catalogs = ["Assets.xcassets", "Shared/Common.xcassets"]
//!
//! [rules]                    # optional overrides
//! leaf_extensions = ["imageset", "imagestack", "launchimage"]
//! ```
//!
//! # Diagnostics
//!
//! Naming collisions never fail the build. Each dropped accessor is reported
//! as a `cargo:warning`, and so is every catalog that could not be loaded.
//! Generation fails only when the config is invalid or no catalog loads.

mod codegen;
mod config;

pub use codegen::{const_ident, module_ident, render};
pub use config::{ConfigError, RescatConfig};

use std::path::{Path, PathBuf};

use rescat::{CountingReporter, Reporter, Warning, load_catalogs};
use thiserror::Error;

/// Main entry point for build.rs integration.
///
/// Reads `rescat.toml`, loads every listed catalog and writes the generated
/// module to `output_path`.
///
/// # Arguments
///
/// * `config_path` - Path to `rescat.toml`
/// * `output_path` - Path to output Rust file (e.g., `$OUT_DIR/images.rs`)
///
/// # Errors
///
/// Returns an error if:
/// - `rescat.toml` cannot be read or parsed
/// - None of the configured catalogs can be loaded
/// - Output file cannot be written
pub fn generate(
    config_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<GenerateReport, GenerateError> {
    let config_path = config_path.as_ref();
    println!("cargo:rerun-if-changed={}", config_path.display());

    let config = RescatConfig::from_file(config_path)?;
    generate_from_config(&config, output_path)
}

/// Generate from an already parsed config, forwarding warnings to cargo.
pub fn generate_from_config(
    config: &RescatConfig,
    output_path: impl AsRef<Path>,
) -> Result<GenerateReport, GenerateError> {
    generate_with_reporter(config, output_path, CargoReporter)
}

/// Generate from a parsed config, sending collision warnings to `reporter`
/// (pass `&mut sink` to keep the sink).
///
/// Catalog failures are still printed as `cargo:warning` lines.
pub fn generate_with_reporter<R: Reporter>(
    config: &RescatConfig,
    output_path: impl AsRef<Path>,
    reporter: R,
) -> Result<GenerateReport, GenerateError> {
    let output_path = output_path.as_ref();

    for catalog in &config.catalogs {
        println!("cargo:rerun-if-changed={}", catalog.display());
    }

    // 1. Load catalogs
    let set = load_catalogs(&config.catalogs, &config.rules);
    let failed: Vec<(PathBuf, String)> = set
        .failures()
        .iter()
        .map(|f| (f.root.clone(), f.error.to_string()))
        .collect();
    for (root, error) in &failed {
        println!(
            "cargo:warning=rescat: skipping catalog {}: {}",
            root.display(),
            error
        );
    }
    if set.is_empty() {
        return Err(GenerateError::NoCatalogs {
            details: format_failures(&failed),
        });
    }

    // 2. Build accessors
    let mut reporter = CountingReporter::new(reporter);
    let tree = set.accessor_tree(config.access, &config.module_name, &mut reporter);

    // 3. Render and write
    let code = render(&tree, &config.module_name);
    std::fs::write(output_path, code).map_err(|source| GenerateError::Io {
        path: output_path.to_path_buf(),
        source,
    })?;

    Ok(GenerateReport {
        catalogs: set.catalogs().iter().map(|c| c.root().to_path_buf()).collect(),
        failed,
        warnings: reporter.count(),
        images: tree.leaf_count(),
    })
}

fn format_failures(failed: &[(PathBuf, String)]) -> String {
    let mut msg = String::new();
    if failed.is_empty() {
        msg.push_str("  no catalogs configured\n");
    }
    for (root, error) in failed {
        msg.push_str(&format!("  - {}: {}\n", root.display(), error));
    }
    msg
}

/// Forwards warnings to cargo.
#[derive(Debug, Default, Clone, Copy)]
pub struct CargoReporter;

impl Reporter for CargoReporter {
    fn report(&mut self, warning: Warning) {
        println!("cargo:warning=rescat: {}", warning);
    }
}

/// Summary of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Catalogs that loaded, in config order
    pub catalogs: Vec<PathBuf>,
    /// Catalogs that were skipped, with the reason
    pub failed: Vec<(PathBuf, String)>,
    /// Number of collision warnings emitted
    pub warnings: usize,
    /// Number of generated image constants
    pub images: usize,
}

/// Errors that can occur during generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Failed to read or parse rescat.toml
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to write the output file
    #[error("IO error: failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every configured catalog failed to load
    #[error("rescat: no catalog could be loaded\n{details}")]
    NoCatalogs { details: String },
}
