//! French typography normalization.
//!
//! Applied to the whole rendered document, markup included. Substitutions run
//! in a fixed order:
//!
//! 1. `&nbsp;` replaces the plain space before `! ? : ; »`
//! 2. `&nbsp;` replaces the plain space after `«`
//! 3. `'` becomes `’` unless immediately preceded by `-` (keeps
//!    hyphenated slug segments intact)
//! 4. `oe` becomes the `œ` ligature
//! 5. `...` becomes `…`

use std::sync::LazyLock;

use regex::Regex;

const NBSP: &str = "&nbsp;";

static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ([!?:;»])").unwrap());

static STRAIGHT_APOSTROPHE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([^-])'").unwrap());

/// Apply all substitutions over `text`.
///
/// Re-running on its own output inserts nothing further: every rule consumes
/// the plain character it replaces.
pub fn normalize(text: &str) -> String {
    let text = SPACE_BEFORE_PUNCT.replace_all(text, format!("{NBSP}$1").as_str());
    let text = text.replace("« ", &format!("«{NBSP}"));
    let text = STRAIGHT_APOSTROPHE.replace_all(&text, "$1’");
    text.replace("oe", "œ").replace("...", "…")
}
