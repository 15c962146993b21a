//! Rendering compiled entries against runtime parameters.

use std::collections::HashMap;

use crate::compile::Entry;
use crate::compile::tags::Segment;
use crate::diag::Diagnostic;
use crate::translator::Translator;

/// One render parameter: a scalar substituted into `{name}` placeholders,
/// or a handler taking priority over the registry for the same-named tag.
pub enum Value<'a, R = String> {
    Text(String),
    Handler(&'a dyn Fn(&str, Option<&str>) -> R),
}

impl<'a, R> Value<'a, R> {
    pub fn handler(f: &'a dyn Fn(&str, Option<&str>) -> R) -> Self {
        Self::Handler(f)
    }
}

impl<R> From<&str> for Value<'_, R> {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl<R> From<String> for Value<'_, R> {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

macro_rules! value_from_number {
    ($($ty:ty),*) => {
        $(impl<R> From<$ty> for Value<'_, R> {
            fn from(v: $ty) -> Self {
                Self::Text(v.to_string())
            }
        })*
    };
}
value_from_number!(i32, i64, u32, u64, f32, f64);

/// The per-call parameter map for [`Translator::t`] / [`Translator::tu`].
pub type Params<'a, R = String> = HashMap<&'a str, Value<'a, R>>;

/// Render result: a plain string for un-segmented entries, otherwise one
/// rendered value per segment, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output<R = String> {
    Text(String),
    Segments(Vec<R>),
}

impl<R> Output<R> {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Segments(_) => None,
        }
    }
}

/// Substitutes every non-handler parameter into `{name}` placeholders.
///
/// Each parameter is applied in a single pass: all occurrences are replaced
/// at once and the substituted text is never rescanned, so a value that
/// contains its own placeholder cannot loop. Placeholders with no matching
/// parameter are left verbatim.
fn replace_vars<R>(input: &str, params: Option<&Params<'_, R>>) -> String {
    let Some(params) = params else {
        return input.to_string();
    };
    let mut out = input.to_string();
    for (name, value) in params {
        let Value::Text(text) = value else { continue };
        let token = format!("{{{name}}}");
        if out.contains(&token) {
            out = out.replace(&token, text);
        }
    }
    out
}

impl<R: From<String>> Translator<R> {
    /// Renders the entry for `id`.
    ///
    /// A missing id raises [`Diagnostic::NoTranslation`] and returns the id
    /// itself. Plain entries interpolate to a string; segmented entries map
    /// each segment to a rendered value.
    pub fn t(&self, id: &str, params: Option<&Params<'_, R>>) -> Output<R> {
        let Some(entry) = self.entry(id) else {
            self.emit(&Diagnostic::NoTranslation { id: id.to_string() });
            return Output::Text(id.to_string());
        };

        match entry {
            Entry::Text(s) => Output::Text(replace_vars(s, params)),
            Entry::Segments(segments) => Output::Segments(
                segments
                    .iter()
                    .map(|seg| self.render_segment(id, seg, params))
                    .collect(),
            ),
        }
    }

    /// Like [`t`](Self::t), uppercased. Uppercasing is defined only for
    /// plain-string results; a segmented result is returned unchanged with
    /// a [`Diagnostic::NotAString`].
    pub fn tu(&self, id: &str, params: Option<&Params<'_, R>>) -> Output<R> {
        match self.t(id, params) {
            Output::Text(s) => Output::Text(s.to_uppercase()),
            segments => {
                self.emit(&Diagnostic::NotAString { id: id.to_string() });
                segments
            }
        }
    }

    fn render_segment(&self, id: &str, seg: &Segment, params: Option<&Params<'_, R>>) -> R {
        let (name, text) = match seg {
            Segment::Text(s) => return R::from(replace_vars(s, params)),
            Segment::Tag { name, text } => (name, text),
        };

        let content = replace_vars(text, params);

        // handler from parameters has priority over the registry
        if let Some(Value::Handler(handler)) = params.and_then(|p| p.get(name.as_str())) {
            return handler(&content, None);
        }
        if let Some(handler) = self.tag_handlers.get(name) {
            return handler(&content, None);
        }
        // anchor fallback: a-<key> renders through the "a" handler with the
        // URL map entry for <key>
        if let Some(url_key) = name.strip_prefix("a-")
            && let Some(anchor) = self.tag_handlers.get("a")
        {
            let url = self.url_map.get(url_key);
            if url.is_none() {
                self.emit(&Diagnostic::NoUrl {
                    id: id.to_string(),
                    url_key: url_key.to_string(),
                });
            }
            return anchor(&content, url.map(String::as_str));
        }

        self.emit(&Diagnostic::NoTagHandler { id: id.to_string(), tag: name.clone() });
        R::from(content)
    }
}
