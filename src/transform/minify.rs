//! Minifier adapters for CSS and whole HTML documents.
//!
//! Uses lightningcss for CSS and minify-html for documents. Both are
//! semantics-preserving; failures propagate as build errors.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

use crate::error::BuildError;

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Result<String, BuildError> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default())
        .map_err(|e| BuildError::Css(e.to_string()))?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| BuildError::Css(e.to_string()))?;
    Ok(result.code)
}

/// Minify a whole HTML document.
///
/// Collapses redundant whitespace; `strip_comments` controls comment removal.
pub fn minify_html(html: &str, strip_comments: bool) -> Result<String, BuildError> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = !strip_comments;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;

    let out = minify_html::minify(html.as_bytes(), &cfg);
    String::from_utf8(out).map_err(|e| BuildError::Html(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_css_strips_whitespace() {
        let out = minify_css(".used {\n  color: red;\n}\n").unwrap();
        assert_eq!(out, ".used{color:red}");
    }

    #[test]
    fn test_minify_css_invalid_is_error() {
        assert!(minify_css("ceci n'est pas du css }{").is_err());
    }

    #[test]
    fn test_minify_html_collapses_whitespace() {
        let html = "<html>\n  <head>\n  </head>\n  <body>\n    <p>Bonjour</p>\n  </body>\n</html>";
        let out = minify_html(html, true).unwrap();
        assert!(!out.contains("\n  "));
        assert!(out.contains("<p>Bonjour</p>"));
    }

    #[test]
    fn test_minify_html_strips_comments() {
        let html = "<html><head></head><body><!-- note --><p>a</p></body></html>";
        let out = minify_html(html, true).unwrap();
        assert!(!out.contains("note"));

        let out = minify_html(html, false).unwrap();
        assert!(out.contains("note"));
    }
}
