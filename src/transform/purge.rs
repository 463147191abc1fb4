//! CSS tree-shaking against a rendered page.
//!
//! Two halves:
//!
//! - [`PageSelectors::extract`] walks the page with the `tl` HTML parser and
//!   records every tag name, class, and id actually present.
//! - [`purge`] parses the site stylesheet with lightningcss and drops the
//!   style rules whose selectors cannot match the page. `@media` and
//!   `@supports` blocks are filtered recursively; other at-rules
//!   (`@font-face`, `@keyframes`, `@import`, ...) are kept as-is.
//!
//! Matching is conservative: a rule is kept when ANY of its selectors could
//! match, and selector parts this module does not model (attribute selectors,
//! functional pseudo-classes) never cause a drop.

use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::traits::ToCss;
use rustc_hash::FxHashSet;

use crate::error::BuildError;

// ============================================================================
// Selector Extraction
// ============================================================================

/// Tag names, classes, and ids present in one page.
#[derive(Debug, Default)]
pub struct PageSelectors {
    tags: FxHashSet<String>,
    classes: FxHashSet<String>,
    ids: FxHashSet<String>,
}

impl PageSelectors {
    /// Extract selectors from page HTML.
    pub fn extract(html: &str) -> Result<Self, BuildError> {
        let dom = tl::parse(html, tl::ParserOptions::default())
            .map_err(|e| BuildError::Html(e.to_string()))?;

        let mut selectors = Self::default();
        for node in dom.nodes() {
            let Some(tag) = node.as_tag() else { continue };

            selectors
                .tags
                .insert(tag.name().as_utf8_str().to_lowercase());

            for (key, value) in tag.attributes().iter() {
                let key: &str = key.as_ref();
                let Some(value) = value else { continue };
                match key {
                    "class" => {
                        for class in value.split_whitespace() {
                            selectors.classes.insert(class.to_string());
                        }
                    }
                    "id" => {
                        selectors.ids.insert(value.trim().to_string());
                    }
                    _ => {}
                }
            }
        }

        Ok(selectors)
    }

    fn has_tag(&self, name: &str) -> bool {
        // The universal selector and document roots always match
        matches!(name, "*" | "html" | "body") || self.tags.contains(&name.to_lowercase())
    }

    fn has_class(&self, name: &str) -> bool {
        self.classes.contains(name)
    }

    fn has_id(&self, name: &str) -> bool {
        self.ids.contains(name)
    }
}

// ============================================================================
// Stylesheet Filtering
// ============================================================================

/// Filter `css` down to the rules that can match the page.
///
/// Output is not minified; minification is a separate stage.
pub fn purge(css: &str, selectors: &PageSelectors) -> Result<String, BuildError> {
    let mut sheet = StyleSheet::parse(css, ParserOptions::default())
        .map_err(|e| BuildError::Css(e.to_string()))?;

    retain_rules(&mut sheet.rules.0, selectors);

    let out = sheet
        .to_css(PrinterOptions::default())
        .map_err(|e| BuildError::Css(e.to_string()))?;
    Ok(out.code)
}

fn retain_rules(rules: &mut Vec<CssRule>, selectors: &PageSelectors) {
    rules.retain_mut(|rule| match rule {
        CssRule::Style(style) => {
            let Ok(list) = style.selectors.to_css_string(PrinterOptions::default()) else {
                return true;
            };
            split_selector_list(&list)
                .iter()
                .any(|sel| selector_matches(sel, selectors))
        }
        CssRule::Media(media) => {
            retain_rules(&mut media.rules.0, selectors);
            !media.rules.0.is_empty()
        }
        CssRule::Supports(supports) => {
            retain_rules(&mut supports.rules.0, selectors);
            !supports.rules.0.is_empty()
        }
        _ => true,
    });
}

/// Split a serialized selector list on top-level commas.
fn split_selector_list(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0u32;
    let mut start = 0;

    for (i, c) in list.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(list[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(list[start..].trim());
    parts
}

/// Check whether one selector could match the page.
///
/// Every named part (element, `.class`, `#id`) must be present; pseudo
/// classes/elements, attribute selectors, and combinators impose no
/// requirement of their own.
fn selector_matches(selector: &str, selectors: &PageSelectors) -> bool {
    let mut chars = selector.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        match c {
            '.' | '#' => {
                let name = take_ident(&mut chars);
                if name.is_empty() {
                    continue;
                }
                let present = if c == '.' {
                    selectors.has_class(&name)
                } else {
                    selectors.has_id(&name)
                };
                if !present {
                    return false;
                }
            }
            ':' => {
                // Pseudo class/element: skip the name and any argument group
                while chars.next_if(|(_, c)| *c == ':').is_some() {}
                take_ident(&mut chars);
                if chars.peek().is_some_and(|(_, c)| *c == '(') {
                    skip_group(&mut chars, '(', ')');
                }
            }
            '[' => skip_group_after_open(&mut chars, '[', ']'),
            c if is_ident_start(c) => {
                let mut name = String::new();
                name.push(c);
                name.push_str(&take_ident(&mut chars));
                if !selectors.has_tag(&name) {
                    return false;
                }
            }
            // Combinators, universal selector, nesting: no requirement
            _ => {}
        }
    }

    true
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> String {
    let mut ident = String::new();
    while let Some((_, c)) = chars.next_if(|(_, c)| is_ident_char(*c)) {
        ident.push(c);
    }
    ident
}

fn skip_group(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    open: char,
    close: char,
) {
    if chars.next_if(|(_, c)| *c == open).is_some() {
        skip_group_after_open(chars, open, close);
    }
}

/// Skip a balanced group whose opening character was already consumed.
fn skip_group_after_open(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    open: char,
    close: char,
) {
    let mut depth = 1u32;
    for (_, c) in chars.by_ref() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
