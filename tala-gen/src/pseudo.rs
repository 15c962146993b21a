//! Pseudo-localization scaffolding.
//!
//! Rewrites a raw translation map so translators and testers can spot
//! hard-coded strings: every value is wrapped in `[[!! … !!]]` markers and
//! its plain text runs pass through a caller-supplied transform (typically
//! a look-alike character substitution). Tag markup, `{var}` placeholders,
//! and `{#ref}` references are preserved so the result still compiles.

use std::sync::OnceLock;

use regex::Regex;

use tala_core::{RawTranslationMap, Segment, parse_tags};

const PREFIX: &str = "[[!!";
const SUFFIX: &str = "!!]]";

fn skip_regex() -> &'static Regex {
    // placeholders and references survive untouched; unlike the variable
    // grammar this also skips `{#ref}` so the output map still resolves
    static SKIP: OnceLock<Regex> = OnceLock::new();
    SKIP.get_or_init(|| Regex::new(r"\{#?[a-zA-Z0-9_-]+\}").expect("invalid skip pattern"))
}

/// Produces the pseudo-localized counterpart of `raw`, applying `transform`
/// to every plain text run.
pub fn generate_pseudo<F>(raw: &RawTranslationMap, transform: F) -> RawTranslationMap
where
    F: Fn(&str) -> String,
{
    raw.iter()
        .map(|(key, value)| {
            let body = pseudo_localize(value, &transform);
            (key.clone(), format!("{PREFIX} {body} {SUFFIX}"))
        })
        .collect()
}

fn pseudo_localize<F: Fn(&str) -> String>(value: &str, transform: &F) -> String {
    let Some(segments) = parse_tags(value) else {
        return transform_plain(value, transform);
    };

    segments
        .iter()
        .map(|seg| match seg {
            Segment::Text(s) => transform_plain(s, transform),
            Segment::Tag { name, text } if text.is_empty() => format!("<{name}/>"),
            Segment::Tag { name, text } => {
                format!("<{name}>{}</>", transform_plain(text, transform))
            }
        })
        .collect()
}

/// Applies the transform to the spans between placeholders/references.
fn transform_plain<F: Fn(&str) -> String>(s: &str, transform: &F) -> String {
    let mut out = String::with_capacity(s.len());
    let mut position = 0;
    for m in skip_regex().find_iter(s) {
        if m.start() > position {
            out.push_str(&transform(&s[position..m.start()]));
        }
        out.push_str(m.as_str());
        position = m.end();
    }
    if position < s.len() {
        out.push_str(&transform(&s[position..]));
    }
    out
}
