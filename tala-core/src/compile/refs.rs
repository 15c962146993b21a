//! Recursive `{#key}` reference inlining.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::compile::RawTranslationMap;
use crate::diag::Diagnostic;

fn ref_regex() -> &'static Regex {
    static REF: OnceLock<Regex> = OnceLock::new();
    REF.get_or_init(|| Regex::new(r"\{#([a-zA-Z0-9_]+)\}").expect("invalid reference pattern"))
}

/// For the given key, replaces every `{#otherKey}` in its template with the
/// fully resolved value of `otherKey`, recursing into referenced keys first.
/// Operates in place on the raw map.
///
/// A reference to a missing key raises [`Diagnostic::RefNotFound`] and
/// inserts the key's own name as its value, so the reference degrades to
/// literal text; because the fallback is inserted, the diagnostic fires at
/// most once per key. A reference back into a key currently being resolved
/// raises [`Diagnostic::RefCycle`] and degrades the same way.
pub fn substitute_references(
    map: &mut RawTranslationMap,
    key: &str,
    diags: &mut Vec<Diagnostic>,
) {
    let mut resolving = HashSet::new();
    resolve(map, key, &mut resolving, diags);
}

fn resolve(
    map: &mut RawTranslationMap,
    key: &str,
    resolving: &mut HashSet<String>,
    diags: &mut Vec<Diagnostic>,
) {
    let Some(template) = map.get(key).cloned() else {
        diags.push(Diagnostic::RefNotFound { key: key.to_string() });
        map.insert(key.to_string(), key.to_string());
        return;
    };

    resolving.insert(key.to_string());

    // unique referenced keys, in order of first appearance
    let mut referenced: Vec<String> = Vec::new();
    for caps in ref_regex().captures_iter(&template) {
        let name = caps[1].to_string();
        if !referenced.contains(&name) {
            referenced.push(name);
        }
    }

    let mut out = template;
    for name in referenced {
        let value = if resolving.contains(&name) {
            diags.push(Diagnostic::RefCycle { key: name.clone() });
            name.clone()
        } else {
            // resolve the target first so we never inline an unprocessed string
            resolve(map, &name, resolving, diags);
            map.get(&name).cloned().unwrap_or_else(|| name.clone())
        };
        out = out.replace(&format!("{{#{name}}}"), &value);
    }

    map.insert(key.to_string(), out);
    resolving.remove(key);
}
