//! Identifier normalization.
//!
//! Every name that ends up as a generated symbol (namespace directories, image
//! asset base names) is compared through its normalized form. Two raw names
//! collide iff their normalized identifiers are equal.
//!
//! ```text
//! "Icon"      → "icon"
//! "AppLogo"   → "app_logo"
//! "app-logo"  → "app_logo"
//! "2x"        → "_2x"
//! "---"       → ""          (empty, unusable)
//! ```

use std::fmt;

use serde::Serialize;

/// A normalized, collision-comparable identifier.
///
/// Lowercase words joined by `_`. Words are split on any non-alphanumeric
/// character and on lower→upper camel-case boundaries. A leading digit is
/// prefixed with `_`. May be empty when the raw name has no alphanumerics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Normalize a raw name.
    pub fn new(raw: &str) -> Self {
        let mut words: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut prev_lower = false;

        for c in raw.chars() {
            if !c.is_alphanumeric() {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                prev_lower = false;
                continue;
            }
            if c.is_uppercase() && prev_lower && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.extend(c.to_lowercase());
            prev_lower = c.is_lowercase() || c.is_numeric();
        }
        if !current.is_empty() {
            words.push(current);
        }

        let joined = words.join("_");
        if joined.starts_with(|c: char| c.is_numeric()) {
            Self(format!("_{joined}"))
        } else {
            Self(joined)
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the raw name had nothing usable in it.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Append `segment` to a joined path, omitting the separator on an empty base.
pub(crate) fn join_segment(base: &str, sep: char, segment: &str) -> String {
    if base.is_empty() {
        segment.to_string()
    } else {
        format!("{base}{sep}{segment}")
    }
}
