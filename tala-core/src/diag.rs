//! Non-fatal conditions raised while compiling or rendering.
//!
//! Every diagnostic accompanies a fallback value; none of them aborts the
//! operation that raised it. By default diagnostics go to `tracing`; a
//! [`Translator`](crate::Translator) can route them to an observer instead.

use std::fmt;

use serde::Serialize;

/// A non-fatal compile- or render-time condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// `{#key}` pointed at a key the map does not contain.
    RefNotFound { key: String },
    /// A key references itself, directly or through other keys.
    RefCycle { key: String },
    /// `t`/`tu` was called with an id missing from the compiled map.
    NoTranslation { id: String },
    /// A tag segment had no handler in the params or the registry.
    NoTagHandler { id: String, tag: String },
    /// An `a-` tag's URL key is not in the URL map.
    NoUrl { id: String, url_key: String },
    /// `tu` was asked to uppercase a segmented entry.
    NotAString { id: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RefNotFound { key } => {
                write!(f, "reference \"{key}\" not found; using the key itself")
            }
            Self::RefCycle { key } => {
                write!(f, "reference cycle at \"{key}\"; using the key itself")
            }
            Self::NoTranslation { id } => {
                write!(f, "no translation for id \"{id}\"; returning the id")
            }
            Self::NoTagHandler { id, tag } => {
                write!(f, "no handler for tag <{tag}> in id \"{id}\"; returning its text")
            }
            Self::NoUrl { id, url_key } => {
                write!(f, "no URL map entry for \"{url_key}\" (in id \"{id}\")")
            }
            Self::NotAString { id } => {
                write!(f, "can't uppercase id \"{id}\": entry is segmented, not a string")
            }
        }
    }
}

/// Callback receiving every diagnostic a [`Translator`](crate::Translator)
/// raises. Without one, diagnostics are logged through `tracing`.
pub type DiagnosticObserver = Box<dyn Fn(&Diagnostic)>;
