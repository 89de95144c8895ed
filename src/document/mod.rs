//! Hosting document state.
//!
//! # Data Flow
//! ```text
//! server-rendered HTML
//!     → Document::from_html (named elements, <input> values)
//!     → SharedDocument (atomically replaceable, e.g. on token rotation)
//!     → gateway::token::DocumentToken (fresh lookup per request)
//! ```
//!
//! # Design Decisions
//! - Read-only from the gateway's point of view
//! - First element with a given name wins, like a document query
//! - Comments and script/style/template/textarea content are inert
//! - A field with an empty value counts as absent

mod shared;

pub use shared::SharedDocument;

use std::borrow::Cow;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

static START_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<([A-Za-z][A-Za-z0-9-]*)\b([^>]*)>").unwrap());

// Leftmost match wins, so a comment opener inside a script is script text.
static INERT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?is)<!--.*?(?:-->|\z)",
        r"|<script\b[^>]*>.*?(?:</script\s*>|\z)",
        r"|<style\b[^>]*>.*?(?:</style\s*>|\z)",
        r"|<template\b[^>]*>.*?(?:</template\s*>|\z)",
        r"|<textarea\b[^>]*>.*?(?:</textarea\s*>|\z)",
    ))
    .unwrap()
});

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .unwrap()
});

/// Named fields of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    fields: HashMap<String, String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_field(name, value);
        self
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn remove_field(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Value of the named field, or `None` if the field is missing or empty.
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Collect named fields from HTML.
    ///
    /// Every start tag with a `name` attribute claims that name, first
    /// element wins. Only `<input>` carries a value (its `value` attribute);
    /// any other element claims the name with no value, so a lookup of that
    /// name finds nothing. Comments and the content of `<script>`, `<style>`,
    /// `<template>` and `<textarea>` are not part of the document tree and
    /// are skipped. Entities in values are decoded for the common escapes
    /// only.
    pub fn from_html(html: &str) -> Self {
        let mut fields = HashMap::new();
        let html = strip_inert(html);

        for tag in START_TAG.captures_iter(&html) {
            let is_input = tag[1].eq_ignore_ascii_case("input");

            let mut name = None;
            let mut value = None;
            for attr in ATTRIBUTE.captures_iter(&tag[2]) {
                let text = attr
                    .get(2)
                    .or_else(|| attr.get(3))
                    .or_else(|| attr.get(4))
                    .map_or("", |m| m.as_str());
                let key = &attr[1];
                if key.eq_ignore_ascii_case("name") && name.is_none() {
                    name = Some(decode_entities(text));
                } else if is_input && key.eq_ignore_ascii_case("value") && value.is_none() {
                    value = Some(decode_entities(text));
                }
            }

            if let Some(name) = name {
                fields.entry(name).or_insert_with(|| value.unwrap_or_default());
            }
        }

        Self { fields }
    }
}

/// Remove markup that never becomes an element: comments and raw-text or
/// template content. Unterminated sections run to the end of input.
fn strip_inert(html: &str) -> Cow<'_, str> {
    INERT.replace_all(html, "")
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    raw.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_input_token() {
        let doc = Document::from_html(
            r#"<form method="post"><input type="hidden" name="csrfmiddlewaretoken" value="abc123"></form>"#,
        );
        assert_eq!(doc.field_value("csrfmiddlewaretoken"), Some("abc123"));
    }

    #[test]
    fn test_attribute_order_and_quoting() {
        let doc = Document::from_html(
            "<INPUT value='v1' type=hidden NAME=first /><input value=v2 name=\"second\">",
        );
        assert_eq!(doc.field_value("first"), Some("v1"));
        assert_eq!(doc.field_value("second"), Some("v2"));
    }

    #[test]
    fn test_meta_has_no_value() {
        let doc = Document::from_html(r#"<meta name="csrfmiddlewaretoken" content="m">"#);
        assert_eq!(doc.field_value("csrfmiddlewaretoken"), None);
    }

    #[test]
    fn test_first_named_element_wins_even_without_value() {
        let doc = Document::from_html(
            r#"<meta name="csrfmiddlewaretoken" content="m"><input name="csrfmiddlewaretoken" value="live">"#,
        );
        assert_eq!(doc.field_value("csrfmiddlewaretoken"), None);
    }

    #[test]
    fn test_commented_out_input_ignored() {
        let doc = Document::from_html(
            r#"<!-- <input name="csrfmiddlewaretoken" value="stale"> --><form><input name="csrfmiddlewaretoken" value="live"></form>"#,
        );
        assert_eq!(doc.field_value("csrfmiddlewaretoken"), Some("live"));
    }

    #[test]
    fn test_script_text_ignored() {
        let doc = Document::from_html(concat!(
            r#"<script>var t = "<input name='csrfmiddlewaretoken' value='tpl'>";</script>"#,
            r#"<input name="csrfmiddlewaretoken" value="live">"#,
        ));
        assert_eq!(doc.field_value("csrfmiddlewaretoken"), Some("live"));
    }

    #[test]
    fn test_template_style_and_textarea_content_ignored() {
        let doc = Document::from_html(concat!(
            r#"<template><input name="a" value="tpl"></template>"#,
            r#"<style>/* <input name="b" value="css"> */</style>"#,
            r#"<TEXTAREA><input name="c" value="typed"></TEXTAREA>"#,
            r#"<input name="a" value="1"><input name="b" value="2"><input name="c" value="3">"#,
        ));
        assert_eq!(doc.field_value("a"), Some("1"));
        assert_eq!(doc.field_value("b"), Some("2"));
        assert_eq!(doc.field_value("c"), Some("3"));
    }

    #[test]
    fn test_unterminated_comment_hides_rest() {
        let doc = Document::from_html(r#"<!-- <input name="t" value="x">"#);
        assert_eq!(doc.field_value("t"), None);
    }

    #[test]
    fn test_first_element_wins() {
        let doc = Document::from_html(
            r#"<input name="t" value="first"><input name="t" value="second">"#,
        );
        assert_eq!(doc.field_value("t"), Some("first"));
    }

    #[test]
    fn test_missing_or_empty_value_is_absent() {
        let doc = Document::from_html(r#"<input name="empty" value=""><input name="bare">"#);
        assert_eq!(doc.field_value("empty"), None);
        assert_eq!(doc.field_value("bare"), None);
        assert_eq!(doc.field_value("missing"), None);
    }

    #[test]
    fn test_entities_decoded() {
        let doc = Document::from_html(r#"<input name="t" value="a&amp;b&quot;c">"#);
        assert_eq!(doc.field_value("t"), Some("a&b\"c"));
    }

    #[test]
    fn test_builder() {
        let mut doc = Document::new().with_field("csrfmiddlewaretoken", "x");
        assert_eq!(doc.field_value("csrfmiddlewaretoken"), Some("x"));
        doc.remove_field("csrfmiddlewaretoken");
        assert_eq!(doc.field_value("csrfmiddlewaretoken"), None);
    }
}
