//! Asset minification for JS and CSS files.
//!
//! Uses oxc for JavaScript and lightningcss for CSS. Unlike the page
//! pipeline, asset minification is best-effort: a file that fails to parse
//! is copied as-is.

use std::path::Path;

use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use crate::transform::minify::minify_css;

/// Minify JavaScript source code.
pub fn minify_js(source: &str) -> Option<String> {
    let allocator = Allocator::default();
    let source_type = SourceType::mjs();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        return None;
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Some(code)
}

/// Minify content based on file extension.
///
/// Returns `Some(minified)` if minification succeeded, `None` otherwise.
pub fn minify_by_ext(path: &Path, content: &str) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    match ext {
        "js" => minify_js(content),
        "css" => minify_css(content).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_minify_js() {
        let out = minify_js("const answer = 1 + 1;\nconsole.log( answer );\n").unwrap();
        assert!(out.len() < 40);
        assert!(out.contains("console.log"));
    }

    #[test]
    fn test_minify_js_invalid_returns_none() {
        assert!(minify_js("const = pas du javascript ;;;{").is_none());
    }

    #[test]
    fn test_minify_by_ext() {
        assert!(minify_by_ext(&PathBuf::from("app.js"), "let x = 1 ;").is_some());
        assert_eq!(
            minify_by_ext(&PathBuf::from("a.css"), "a {\n color: red \n}").as_deref(),
            Some("a{color:red}")
        );
        assert!(minify_by_ext(&PathBuf::from("photo.jpg"), "...").is_none());
    }
}
