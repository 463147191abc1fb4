//! Tag expansion over page source.
//!
//! Scans markdown source for `{% name args %}` occurrences and replaces the
//! ones whose name matches a registered reference tag. Unknown names are left
//! untouched (paired shortcodes use the same delimiters and are expanded by
//! the render module).

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::{ReferenceTag, TagInvocation};
use crate::content::CollectionSet;
use crate::error::BuildError;

/// `{% name args %}` on a single line. Args may contain `%` but not `%}`.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{%[ \t]*([A-Za-z0-9_-]+)([^\n]*?)%\}").unwrap());

/// Expand all registered reference tags in `source`.
///
/// Runs the two phases separately: every invocation is parsed first, then
/// each is resolved in order. The first unresolvable reference aborts the
/// page build.
pub fn expand_references(
    source: &str,
    tags: &[ReferenceTag],
    collections: &CollectionSet,
) -> Result<String, BuildError> {
    struct Site<'a> {
        range: Range<usize>,
        tag: &'a ReferenceTag,
        invocation: TagInvocation,
    }

    // Parse phase: collect invocations without touching collection data.
    let mut sites = Vec::new();
    for caps in TAG_RE.captures_iter(source) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        let Some(tag) = tags.iter().find(|t| t.name() == name) else {
            continue;
        };
        sites.push(Site {
            range: caps.get(0).map_or(0..0, |m| m.range()),
            tag,
            invocation: TagInvocation::parse(caps.get(2).map_or("", |m| m.as_str()).trim()),
        });
    }

    if sites.is_empty() {
        return Ok(source.to_string());
    }

    // Render phase: resolve each site and splice the result in.
    let mut out = String::with_capacity(source.len());
    let mut last = 0;
    for site in sites {
        out.push_str(&source[last..site.range.start]);
        out.push_str(&site.tag.render(&site.invocation, collections)?);
        last = site.range.end;
    }
    out.push_str(&source[last..]);
    Ok(out)
}
