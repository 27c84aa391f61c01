//! View-context collaborator.
//!
//! Tables are rendered inside some host (a web framework's view layer, a
//! report job). The host hands the table a [`ViewContext`] which column
//! blocks, labels and action generators reach through the table helpers.
//! Spreadsheet presenters use it to strip markup when cleaning values.

use once_cell::sync::Lazy;
use regex::Regex;

// A `<` only opens a tag when a letter (or `/` and a letter) follows it.
static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!--.*?-->|</?[A-Za-z][^>]*>").expect("tag pattern is a valid regex")
});

/// Helpers a host exposes to table definitions.
///
/// Both methods have plain default implementations, so a host only
/// overrides what it renders differently.
///
/// ```rust
/// use dining_table::{DefaultViewContext, ViewContext};
///
/// let view = DefaultViewContext;
/// assert_eq!(view.link_to("Show", "#show"), "<a href=\"#show\">Show</a>");
/// assert_eq!(view.strip_tags("<b>bold</b> move"), "bold move");
/// ```
pub trait ViewContext {
    /// Builds a link. Text and URL are inserted as given.
    fn link_to(&self, text: &str, url: &str) -> String {
        format!("<a href=\"{}\">{}</a>", url, text)
    }

    /// Removes markup tags (and comments), keeping their text content.
    fn strip_tags(&self, markup: &str) -> String {
        TAG_PATTERN.replace_all(markup, "").into_owned()
    }
}

/// A view context using only the default helpers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultViewContext;

impl ViewContext for DefaultViewContext {}
