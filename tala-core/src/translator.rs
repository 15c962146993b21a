//! Process-wide locale state, held as an owned context object.

use std::collections::HashMap;

use crate::compile::replace::Replacement;
use crate::compile::{self, RawTranslationMap, TranslationMap};
use crate::diag::{Diagnostic, DiagnosticObserver};
use crate::error::ConfigError;

/// A registered tag handler: receives the tag's interpolated inner text
/// and, for anchor tags, the resolved URL.
pub type TagHandler<R> = Box<dyn Fn(&str, Option<&str>) -> R>;

/// The locale context: currently installed compiled map plus the three
/// configuration registries (replacement rules, tag handlers, URL map).
///
/// `R` is the value tag handlers render to; it defaults to `String`, and
/// must be constructible from a plain string so un-handled tags and plain
/// segments can degrade to their text.
///
/// Configuration and `set_locale` are meant for an application's
/// single-threaded setup phase; there is no internal locking, so callers
/// that mutate a shared `Translator` while renders are in flight must
/// serialize access themselves. Multiple independent contexts can coexist
/// (there are no globals).
pub struct Translator<R = String> {
    locale: Option<String>,
    translation: TranslationMap,
    replacements: Vec<Replacement>,
    pub(crate) tag_handlers: HashMap<String, TagHandler<R>>,
    pub(crate) url_map: HashMap<String, String>,
    observer: Option<DiagnosticObserver>,
}

impl<R> Default for Translator<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Translator<R> {
    pub fn new() -> Self {
        Self {
            locale: None,
            translation: TranslationMap::new(),
            replacements: Vec::new(),
            tag_handlers: HashMap::new(),
            url_map: HashMap::new(),
            observer: None,
        }
    }

    /// Installs a locale: compiles the raw map (references → segments →
    /// replacements) and swaps in the compiled map and locale id together.
    /// No-op when `new_locale` is already installed. There is no uninstall.
    pub fn set_locale(&mut self, new_locale: &str, raw: RawTranslationMap) {
        if self.locale.as_deref() == Some(new_locale) {
            return;
        }
        let mut diags = Vec::new();
        let compiled = compile::compile_translation(raw, &self.replacements, &mut diags);
        for diag in &diags {
            self.emit(diag);
        }
        self.translation = compiled;
        self.locale = Some(new_locale.to_string());
        tracing::info!("installed locale: {new_locale}");
    }

    /// Configures a string replacement, eg. to replace all instances of
    /// "Peerio" with "Krusty-O" in all translation strings. Not recommended
    /// for complex use cases.
    ///
    /// Call before invoking [`set_locale`](Self::set_locale).
    pub fn set_string_replacement(
        &mut self,
        pattern: &str,
        replacement: &str,
    ) -> Result<(), ConfigError> {
        self.replacements.push(Replacement::new(pattern, replacement)?);
        Ok(())
    }

    /// Registers a tag handler, eg. a function that takes the contents of a
    /// tag like `head <b>hello</> tail` and returns some rendered value.
    /// Handlers persist across locale installs.
    pub fn set_tag_handler(
        &mut self,
        tag: impl Into<String>,
        handler: impl Fn(&str, Option<&str>) -> R + 'static,
    ) {
        self.tag_handlers.insert(tag.into(), Box::new(handler));
    }

    /// Configures the URL map used by `a-<key>` anchor tags.
    pub fn set_url_map(&mut self, map: HashMap<String, String>) {
        self.url_map = map;
    }

    /// Routes diagnostics to `observer` instead of the default `tracing`
    /// output.
    pub fn on_diagnostic(&mut self, observer: impl Fn(&Diagnostic) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// The currently installed locale id, if any.
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Whether `id` is present in the compiled map. Keys compiled to the
    /// empty string count as present; no fallback is triggered.
    pub fn has(&self, id: &str) -> bool {
        self.translation.contains_key(id)
    }

    pub(crate) fn entry(&self, id: &str) -> Option<&compile::Entry> {
        self.translation.get(id)
    }

    pub(crate) fn emit(&self, diag: &Diagnostic) {
        match &self.observer {
            Some(observer) => observer(diag),
            None => match diag {
                Diagnostic::NotAString { .. } => tracing::error!("{diag}"),
                _ => tracing::warn!("{diag}"),
            },
        }
    }
}
