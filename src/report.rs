//! Warning side-channel.
//!
//! Naming problems never abort processing. They drop the offending item from
//! the generated output and emit a [`Warning`] through an injected
//! [`Reporter`].

use std::fmt;

use crate::ident::Identifier;

/// What kind of item a warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Image,
    Namespace,
}

impl ResourceKind {
    fn noun(self, count: usize) -> &'static str {
        match (self, count) {
            (Self::Image, 1) => "image",
            (Self::Image, _) => "images",
            (Self::Namespace, 1) => "namespace",
            (Self::Namespace, _) => "namespaces",
        }
    }
}

/// A recoverable naming problem found while generating accessors.
///
/// `scope` is the qualified name of the level the problem occurred at (empty
/// at the top level).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Several raw names normalize to one identifier; only `names[0]` is kept.
    DuplicateIdentifier {
        scope: String,
        kind: ResourceKind,
        identifier: Identifier,
        names: Vec<String>,
    },
    /// Raw names that normalize to nothing; all are dropped.
    EmptyIdentifier {
        scope: String,
        kind: ResourceKind,
        names: Vec<String>,
    },
    /// A namespace shares its identifier with a sibling image and is dropped.
    NamespaceConflict {
        scope: String,
        identifier: Identifier,
        namespace: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateIdentifier {
                scope,
                kind,
                identifier,
                names,
            } => {
                let skipped = names.len().saturating_sub(1);
                write!(
                    f,
                    "{}Skipping {} {} because symbol '{}' would be generated for all of these {}: {}",
                    scope_prefix(scope),
                    skipped,
                    kind.noun(skipped),
                    identifier,
                    kind.noun(names.len()),
                    names.join(", ")
                )
            }
            Self::EmptyIdentifier { scope, kind, names } => write!(
                f,
                "{}Skipping {} {} because no symbol could be generated for: {}",
                scope_prefix(scope),
                names.len(),
                kind.noun(names.len()),
                names.join(", ")
            ),
            Self::NamespaceConflict {
                scope,
                identifier,
                namespace,
            } => write!(
                f,
                "{}Skipping namespace '{}' because symbol '{}' would conflict with an image of the same name",
                scope_prefix(scope),
                namespace,
                identifier
            ),
        }
    }
}

fn scope_prefix(scope: &str) -> String {
    if scope.is_empty() {
        String::new()
    } else {
        format!("[{scope}] ")
    }
}

/// Sink for [`Warning`]s.
pub trait Reporter {
    fn report(&mut self, warning: Warning);
}

/// Collects warnings in order.
impl Reporter for Vec<Warning> {
    fn report(&mut self, warning: Warning) {
        self.push(warning);
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, warning: Warning) {
        (**self).report(warning);
    }
}

/// Logs each warning at `warn` level via `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, warning: Warning) {
        tracing::warn!(target: "rescat", "{warning}");
    }
}

/// Counts warnings while forwarding them to an inner reporter.
#[derive(Debug)]
pub struct CountingReporter<R> {
    inner: R,
    count: usize,
}

impl<R: Reporter> CountingReporter<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, count: 0 }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Reporter> Reporter for CountingReporter<R> {
    fn report(&mut self, warning: Warning) {
        self.count += 1;
        self.inner.report(warning);
    }
}
