//! Compile-once localization templates.
//!
//! A raw translation map (id → template string) is compiled eagerly when a
//! locale is installed: `{#key}` references are inlined, `<name>text</>` /
//! `<name/>` markup is split into segments, and globally configured
//! replacement rules are applied. Rendering (`t` / `tu` / `has`) then runs
//! against the compiled form with per-call parameters.
//!
//! Template syntax:
//! - reference: `{#identifier}` — inlines another entry's resolved value
//! - variable: `{paramName}` — substituted from render parameters
//! - paired tag: `<name>content</>`; self-closing tag: `<name/>`
//! - tag names starting with `a-` resolve against the URL map when no
//!   explicit handler is supplied

pub mod compile;
pub mod diag;
pub mod error;
pub mod render;
pub mod translator;

pub use compile::tags::{Segment, parse_tags};
pub use compile::{Entry, RawTranslationMap, TranslationMap};
pub use diag::Diagnostic;
pub use error::ConfigError;
pub use render::{Output, Params, Value};
pub use translator::{TagHandler, Translator};
