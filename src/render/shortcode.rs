//! Paired shortcode expansion.
//!
//! Shortcodes wrap a block of markdown in site-specific markup:
//!
//! - `{% tldr %}...{% endtldr %}`: summary box, default title "En résumé"
//! - `{% plusloin %}...{% endplusloin %}`: further-reading box, default
//!   title "Pour aller plus loin"
//! - `{% intro "photo.jpg" "alt text" %}...{% endintro %}`: intro block
//!   with a lead image
//!
//! An optional quoted argument overrides the default title. The body is left
//! as-is; markdown inside it renders normally as long as it is separated
//! from the wrapper by blank lines.

use std::sync::LazyLock;

use regex::Regex;

use crate::log;

/// Names of the paired shortcodes this site defines.
const SHORTCODES: [&str; 3] = ["tldr", "plusloin", "intro"];

/// `{% name args %}` on a single line (same delimiters as reference tags).
static OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{%[ \t]*([A-Za-z0-9_-]+)([^\n]*?)%\}").unwrap());

/// Expand all paired shortcodes in `source`.
///
/// Tags whose name is not a shortcode are left verbatim. An opening tag
/// without its closing counterpart is also left verbatim (with a warning):
/// a malformed template should be visible, not silently eaten.
pub fn expand_shortcodes(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(caps) = OPEN_RE.captures(rest) {
        let open = caps.get(0).expect("capture 0 always present");
        let name = caps.get(1).map_or("", |m| m.as_str());
        let after_open = &rest[open.end()..];

        if !SHORTCODES.contains(&name) {
            out.push_str(&rest[..open.end()]);
            rest = after_open;
            continue;
        }

        let args = parse_args(caps.get(2).map_or("", |m| m.as_str()));
        let Some(body_end) = find_close(after_open, name) else {
            log!("warning"; "unclosed shortcode `{{% {name} %}}`, expected `{{% end{name} %}}`");
            out.push_str(&rest[..open.end()]);
            rest = after_open;
            continue;
        };

        let body = &after_open[..body_end.0];
        out.push_str(&rest[..open.start()]);
        out.push_str(&render_shortcode(name, &args, body));
        rest = &after_open[body_end.1..];
    }

    out.push_str(rest);
    out
}

/// Find the closing tag for `name`. Returns (body length, end of close tag).
fn find_close(source: &str, name: &str) -> Option<(usize, usize)> {
    let close_re = Regex::new(&format!(r"\{{%[ \t]*end{name}[ \t]*%\}}")).ok()?;
    let m = close_re.find(source)?;
    Some((m.start(), m.end()))
}

/// Emit the wrapper markup for one shortcode.
fn render_shortcode(name: &str, args: &[String], body: &str) -> String {
    match name {
        "tldr" => {
            let title = args.first().map_or("En résumé", String::as_str);
            format!("<div id=\"tldr\"><h2>{title}</h2>\n{body}</div>")
        }
        "plusloin" => {
            let title = args.first().map_or("Pour aller plus loin", String::as_str);
            format!("<div id=\"plusloin\"><h2>{title}</h2>\n{body}</div>")
        }
        "intro" => {
            let file = args.first().map_or("", String::as_str);
            let alt = args.get(1).map_or("", String::as_str);
            // Lead image is above the fold: decode synchronously, no lazy hint
            let img = format!(
                "<img src=\"/img/{file}\" alt=\"{alt}\" sizes=\"512w\" width=\"512\" decoding=\"sync\">"
            );
            format!("<div id=\"intro\"><div>{body}</div>{img}</div>")
        }
        _ => body.to_string(),
    }
}

/// Split shortcode arguments, honoring single and double quotes.
fn parse_args(s: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        let mut arg = String::new();
        if c == '"' || c == '\'' {
            let quote = c;
            for c in chars.by_ref() {
                if c == quote {
                    break;
                }
                arg.push(c);
            }
        } else {
            arg.push(c);
            while let Some(&next) = chars.peek() {
                if next.is_whitespace() {
                    break;
                }
                arg.push(chars.next().expect("peeked"));
            }
        }
        args.push(arg);
    }

    args
}
