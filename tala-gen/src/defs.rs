//! Template inspection: what parameters each id needs and what shape its
//! render result takes. Hosts turn this into generated declarations in
//! whatever format they emit; everything here is `Serialize`.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use tala_core::compile::refs::substitute_references;
use tala_core::{Diagnostic, RawTranslationMap, Segment, parse_tags};

/// Tags expected to have handlers registered ahead of time; templates using
/// them don't require a caller-provided parameter. Anchor (`a-*`) tags
/// don't either — they resolve through the URL map.
const PREDEFINED_TAGS: &[&str] = &["br", "i", "b"];

const MAX_SNIPPET_LENGTH: usize = 60;

/// What a template parameter must be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// `{name}` — a string or number substituted into the text.
    Scalar,
    /// `<name>text</>` — a handler receiving the tag's inner text.
    TextHandler,
    /// `<name/>` — a handler with no inner text.
    EmptyHandler,
}

/// Whether rendering the id yields a plain string or a segment sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnShape {
    Text,
    Segments,
}

/// Inspection result for one id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    /// Required parameters, sorted by name. Empty when the template takes
    /// none.
    pub params: BTreeMap<String, ParamKind>,
    pub returns: ReturnShape,
    /// Leading snippet of the resolved template, as a usage hint.
    pub snippet: String,
}

fn var_regex() -> &'static Regex {
    static VAR: OnceLock<Regex> = OnceLock::new();
    VAR.get_or_init(|| Regex::new(r"\{([a-zA-Z0-9_-]+)\}").expect("invalid variable pattern"))
}

/// Resolves references (they affect return shapes), then describes every
/// id's parameters and return shape. Operates in place on the raw map;
/// resolver diagnostics are returned alongside the result.
pub fn inspect(raw: &mut RawTranslationMap) -> (BTreeMap<String, TemplateInfo>, Vec<Diagnostic>) {
    let mut diags = Vec::new();
    let mut keys: Vec<String> = raw.keys().cloned().collect();
    keys.sort_unstable();
    for key in &keys {
        substitute_references(raw, key, &mut diags);
    }

    let infos = raw
        .iter()
        .map(|(id, template)| (id.clone(), inspect_template(template)))
        .collect();
    (infos, diags)
}

fn inspect_template(template: &str) -> TemplateInfo {
    let mut params = BTreeMap::new();

    let segments = parse_tags(template);
    let returns = match &segments {
        Some(_) => ReturnShape::Segments,
        None => ReturnShape::Text,
    };

    for seg in segments.unwrap_or_default() {
        let Segment::Tag { name, text } = seg else { continue };
        if name.starts_with("a-") || PREDEFINED_TAGS.contains(&name.as_str()) {
            continue;
        }
        let kind = if text.is_empty() { ParamKind::EmptyHandler } else { ParamKind::TextHandler };
        params.insert(name, kind);
    }

    // variables last: a same-named variable overrides a tag entry
    for caps in var_regex().captures_iter(template) {
        params.insert(caps[1].to_string(), ParamKind::Scalar);
    }

    TemplateInfo { params, returns, snippet: snippet_of(template) }
}

fn snippet_of(template: &str) -> String {
    let mut snippet: String = template.chars().take(MAX_SNIPPET_LENGTH).collect();
    if snippet.len() < template.len() {
        snippet.push('…');
    }
    snippet
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawTranslationMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn plain_template_needs_nothing() {
        let mut map = raw(&[("greet", "Hello")]);
        let (infos, diags) = inspect(&mut map);
        assert!(diags.is_empty());
        let info = &infos["greet"];
        assert!(info.params.is_empty());
        assert_eq!(info.returns, ReturnShape::Text);
        assert_eq!(info.snippet, "Hello");
    }

    #[test]
    fn variables_are_scalar_params() {
        let mut map = raw(&[("k", "one {two} and {three}")]);
        let (infos, _) = inspect(&mut map);
        let info = &infos["k"];
        assert_eq!(info.params["two"], ParamKind::Scalar);
        assert_eq!(info.params["three"], ParamKind::Scalar);
        assert_eq!(info.returns, ReturnShape::Text);
    }

    #[test]
    fn tags_are_handler_params() {
        let mut map = raw(&[("k", "head <wrap>x</> <mark/> tail")]);
        let (infos, _) = inspect(&mut map);
        let info = &infos["k"];
        assert_eq!(info.params["wrap"], ParamKind::TextHandler);
        assert_eq!(info.params["mark"], ParamKind::EmptyHandler);
        assert_eq!(info.returns, ReturnShape::Segments);
    }

    #[test]
    fn predefined_and_anchor_tags_need_no_param() {
        let mut map = raw(&[("k", "a<br/>b <b>c</> <a-signup>go</>")]);
        let (infos, _) = inspect(&mut map);
        let info = &infos["k"];
        assert!(info.params.is_empty());
        assert_eq!(info.returns, ReturnShape::Segments);
    }

    #[test]
    fn references_resolve_before_inspection() {
        let mut map = raw(&[("greet", "Hi {name}"), ("outer", "<b>{#greet}</>")]);
        let (infos, diags) = inspect(&mut map);
        assert!(diags.is_empty());
        let info = &infos["outer"];
        // the inlined reference brings its variable along
        assert_eq!(info.params["name"], ParamKind::Scalar);
        assert_eq!(info.returns, ReturnShape::Segments);
        assert_eq!(info.snippet, "<b>Hi {name}</>");
    }

    #[test]
    fn missing_reference_surfaces_as_a_diagnostic() {
        let mut map = raw(&[("k", "{#nope}")]);
        let (infos, diags) = inspect(&mut map);
        assert_eq!(diags, vec![Diagnostic::RefNotFound { key: "nope".into() }]);
        // the inserted fallback entry is inspected too
        assert_eq!(infos["nope"].snippet, "nope");
        assert_eq!(infos["k"].snippet, "nope");
    }

    #[test]
    fn long_templates_truncate_with_an_ellipsis() {
        let long = "x".repeat(80);
        let mut map = raw(&[("k", long.as_str())]);
        let (infos, _) = inspect(&mut map);
        let snippet = &infos["k"].snippet;
        assert_eq!(snippet.chars().count(), MAX_SNIPPET_LENGTH + 1);
        assert!(snippet.ends_with('…'));
    }

    #[test]
    fn info_serializes_for_host_emitters() {
        let mut map = raw(&[("k", "one {two}")]);
        let (infos, _) = inspect(&mut map);
        let json = serde_json::to_string(&infos["k"]).unwrap();
        assert_eq!(
            json,
            r#"{"params":{"two":"scalar"},"returns":"text","snippet":"one {two}"}"#
        );
    }
}
