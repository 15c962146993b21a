//! The compile pipeline: reference resolution, tag segmentation, string
//! replacement — in that fixed order, over the whole map.

pub mod refs;
pub mod replace;
pub mod tags;

use std::collections::HashMap;

use serde::Serialize;

use crate::compile::replace::Replacement;
use crate::compile::tags::Segment;
use crate::diag::Diagnostic;

/// Map of raw ("uncompiled") strings for translation.
pub type RawTranslationMap = HashMap<String, String>;

/// Map of compiled strings, some broken into segments, ready for use.
pub type TranslationMap = HashMap<String, Entry>;

/// One compiled translation entry.
///
/// `Text` if and only if the resolved string contained no tag markup — the
/// renderer relies on this distinction to decide between returning a plain
/// string and a rendered segment sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Entry {
    Text(String),
    Segments(Vec<Segment>),
}

/// Prepares a raw translation map for use. Usually invoked via
/// [`Translator::set_locale`](crate::Translator::set_locale).
///
/// Keys are visited in sorted order so reference cycles break at the same
/// point regardless of map iteration order.
pub fn compile_translation(
    mut raw: RawTranslationMap,
    replacements: &[Replacement],
    diags: &mut Vec<Diagnostic>,
) -> TranslationMap {
    // iterating over a snapshot because reference resolution is recursive
    // and may insert fallback entries
    let mut keys: Vec<String> = raw.keys().cloned().collect();
    keys.sort_unstable();
    for key in &keys {
        refs::substitute_references(&mut raw, key, diags);
    }

    let mut compiled = tags::parse_all_tags(raw);
    replace::make_string_replacements(&mut compiled, replacements);
    compiled
}
