//! Tag segmentation: splits `<name>text</>` / `<name/>` markup into an
//! ordered sequence of plain-text and tag segments.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::compile::{Entry, RawTranslationMap, TranslationMap};

/// One piece of a segmented translation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Segment {
    /// An untouched span of the source string.
    Text(String),
    /// A tag span; `text` is the (resolved, not yet rendered) inner
    /// content. Self-closing tags have empty text.
    Tag { name: String, text: String },
}

fn tag_regex() -> &'static Regex {
    // Either a tag like <something>(text, or nothing)</> OR a self-closing
    // tag like <whatever/>. No support for nested or overlapping tags.
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| {
        Regex::new(r"<([a-zA-Z0-9_-]+)>(.*?)</>|<([a-zA-Z0-9_-]+)/>")
            .expect("invalid tag pattern")
    })
}

/// Splits a string containing tag markup into ordered segments, or returns
/// `None` when the string contains no recognizable tags.
///
/// The `None` case is load-bearing: entries without markup stay plain
/// strings, and the renderer returns them as such rather than as a
/// one-element sequence.
pub fn parse_tags(input: &str) -> Option<Vec<Segment>> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut position = 0;
    let mut matched = false;

    for caps in tag_regex().captures_iter(input) {
        matched = true;
        let whole = caps.get(0).expect("regex match has a whole-match group");
        let (name, text) = match caps.get(3) {
            Some(self_closing) => (self_closing.as_str(), ""),
            None => (&caps[1], caps.get(2).map_or("", |m| m.as_str())),
        };

        // flush the untouched span before this match, if any
        if whole.start() > position {
            segments.push(Segment::Text(input[position..whole.start()].to_string()));
        }
        segments.push(Segment::Tag { name: name.to_string(), text: text.to_string() });
        position = whole.end();
    }

    if !matched {
        return None;
    }
    // tail, if any
    if position < input.len() {
        segments.push(Segment::Text(input[position..].to_string()));
    }
    Some(segments)
}

/// Lifts a fully reference-resolved raw map into the compiled map,
/// segmenting every entry that contains tag markup.
pub fn parse_all_tags(raw: RawTranslationMap) -> TranslationMap {
    raw.into_iter()
        .map(|(key, value)| {
            let entry = match parse_tags(&value) {
                Some(segments) => Entry::Segments(segments),
                None => Entry::Text(value),
            };
            (key, entry)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str, text: &str) -> Segment {
        Segment::Tag { name: name.to_string(), text: text.to_string() }
    }

    fn text(s: &str) -> Segment {
        Segment::Text(s.to_string())
    }

    #[test]
    fn no_tags_stays_plain() {
        assert_eq!(parse_tags("no markup here"), None);
        assert_eq!(parse_tags(""), None);
        assert_eq!(parse_tags("{var} and {#ref} are not tags"), None);
    }

    #[test]
    fn whole_string_tag() {
        assert_eq!(parse_tags("<fullSeg>hello</>"), Some(vec![tag("fullSeg", "hello")]));
    }

    #[test]
    fn head_and_tail_flush_as_text() {
        assert_eq!(
            parse_tags("head <partSeg>hello</> tail"),
            Some(vec![text("head "), tag("partSeg", "hello"), text(" tail")])
        );
    }

    #[test]
    fn adjacent_tags_produce_no_empty_text_segment() {
        assert_eq!(
            parse_tags("head <a1>x</><a2>y</> tail"),
            Some(vec![text("head "), tag("a1", "x"), tag("a2", "y"), text(" tail")])
        );
    }

    #[test]
    fn self_closing_tag_has_empty_text() {
        assert_eq!(
            parse_tags("line<br/>break"),
            Some(vec![text("line"), tag("br", ""), text("break")])
        );
    }

    #[test]
    fn empty_paired_tag_content() {
        assert_eq!(parse_tags("<b></>"), Some(vec![tag("b", "")]));
    }

    #[test]
    fn tag_name_charset() {
        assert_eq!(
            parse_tags("<a-sign_up2>go</>"),
            Some(vec![tag("a-sign_up2", "go")])
        );
        // space is not a valid name character; no match
        assert_eq!(parse_tags("<not a tag>x</>"), None);
    }

    #[test]
    fn segments_reconstruct_the_source() {
        let src = "head <partSeg>hello</><br/> tail";
        let rebuilt: String = parse_tags(src)
            .unwrap()
            .iter()
            .map(|seg| match seg {
                Segment::Text(s) => s.clone(),
                Segment::Tag { name, text } if text.is_empty() => format!("<{name}/>"),
                Segment::Tag { name, text } => format!("<{name}>{text}</>"),
            })
            .collect();
        // self-closing and empty paired tags collapse to the same form
        assert_eq!(rebuilt, src);
    }
}
