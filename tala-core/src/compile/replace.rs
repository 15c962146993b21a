//! Global string replacement rules, applied after segmentation.

use regex::{NoExpand, RegexBuilder};

use crate::compile::{Entry, TranslationMap};
use crate::compile::tags::Segment;
use crate::error::ConfigError;

/// One pattern → literal replacement rule.
///
/// Rules are registered before any locale is installed and apply, in
/// registration order, to every subsequently compiled map.
pub struct Replacement {
    regex: regex::Regex,
    replacement: String,
}

impl Replacement {
    /// Compiles a rule. The pattern is a regex matched in multi-line mode;
    /// the replacement is literal (no `$` group expansion).
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, ConfigError> {
        let regex = RegexBuilder::new(pattern).multi_line(true).build()?;
        Ok(Self { regex, replacement: replacement.to_string() })
    }
}

/// Applies every rule, in order, to every entry of the compiled map: plain
/// entries directly, segmented entries per segment text. Segment boundaries
/// are never touched. No-op when the rule list is empty.
pub fn make_string_replacements(map: &mut TranslationMap, replacements: &[Replacement]) {
    if replacements.is_empty() {
        return;
    }
    for entry in map.values_mut() {
        match entry {
            Entry::Text(s) => *s = replace_one(s, replacements),
            Entry::Segments(segments) => {
                for seg in segments {
                    match seg {
                        Segment::Text(s) => *s = replace_one(s, replacements),
                        Segment::Tag { text, .. } => *text = replace_one(text, replacements),
                    }
                }
            }
        }
    }
}

fn replace_one(input: &str, replacements: &[Replacement]) -> String {
    let mut out = input.to_string();
    for rule in replacements {
        out = rule.regex.replace_all(&out, NoExpand(&rule.replacement)).into_owned();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(pairs: &[(&str, Entry)]) -> TranslationMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn replaces_all_matches_in_plain_entries() {
        let mut map = map_of(&[("k", Entry::Text("Peerio loves Peerio".into()))]);
        let rules = [Replacement::new("Peerio", "Krusty-O").unwrap()];
        make_string_replacements(&mut map, &rules);
        assert_eq!(map["k"], Entry::Text("Krusty-O loves Krusty-O".into()));
    }

    #[test]
    fn replaces_inside_segments_without_moving_boundaries() {
        let mut map = map_of(&[(
            "k",
            Entry::Segments(vec![
                Segment::Text("Peerio ".into()),
                Segment::Tag { name: "b".into(), text: "Peerio".into() },
            ]),
        )]);
        let rules = [Replacement::new("Peerio", "P").unwrap()];
        make_string_replacements(&mut map, &rules);
        assert_eq!(
            map["k"],
            Entry::Segments(vec![
                Segment::Text("P ".into()),
                Segment::Tag { name: "b".into(), text: "P".into() },
            ])
        );
    }

    #[test]
    fn rules_apply_in_registration_order() {
        let mut map = map_of(&[("k", Entry::Text("aaa".into()))]);
        let rules = [
            Replacement::new("a", "b").unwrap(),
            Replacement::new("bb", "c").unwrap(),
        ];
        make_string_replacements(&mut map, &rules);
        assert_eq!(map["k"], Entry::Text("cb".into()));
    }

    #[test]
    fn replacement_is_literal() {
        let mut map = map_of(&[("k", Entry::Text("price".into()))]);
        let rules = [Replacement::new("price", "$0 $1").unwrap()];
        make_string_replacements(&mut map, &rules);
        assert_eq!(map["k"], Entry::Text("$0 $1".into()));
    }

    #[test]
    fn invalid_pattern_is_a_config_error() {
        assert!(matches!(
            Replacement::new("(unclosed", "x"),
            Err(ConfigError::InvalidPattern(_))
        ));
    }

    #[test]
    fn empty_rule_list_is_a_no_op() {
        let mut map = map_of(&[("k", Entry::Text("unchanged".into()))]);
        make_string_replacements(&mut map, &[]);
        assert_eq!(map["k"], Entry::Text("unchanged".into()));
    }
}
