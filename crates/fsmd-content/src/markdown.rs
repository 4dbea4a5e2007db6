//! Markdown to HTML conversion.

use pulldown_cmark::{Options, Parser, html};

use crate::page::TrustedHtml;

/// Render a markdown body to HTML.
///
/// Standard CommonMark plus tables and strikethrough. Raw HTML in the source
/// is passed through untouched: the content store is trusted, request input
/// never reaches this function.
pub(crate) fn render(markdown: &str) -> TrustedHtml {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);

    TrustedHtml::from_rendered(out)
}
