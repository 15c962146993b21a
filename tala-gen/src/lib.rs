//! Collaborator tooling built on the tala-core template grammar.
//!
//! Consumes the core's reference resolver and tag segmenter without going
//! through the renderer: [`defs`] inspects resolved templates to describe
//! each id's parameters and return shape, [`pseudo`] rewrites a raw map for
//! pseudo-localized builds. Neither reads nor writes files; hosts own IO.

pub mod defs;
pub mod pseudo;

pub use defs::{ParamKind, ReturnShape, TemplateInfo, inspect};
pub use pseudo::generate_pseudo;
