//! Parse phase of reference tags.

/// One use of a reference tag, captured at parse time.
///
/// Created while scanning page source, consumed once at render time.
/// No validation happens here: collection data is not available yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInvocation {
    /// First whitespace-delimited token of the argument text.
    pub slug: String,
    /// Everything after the first whitespace, verbatim. Absent when the
    /// argument text contains no whitespace (or nothing follows it).
    pub label: Option<String>,
}

impl TagInvocation {
    /// Split raw argument text at the first whitespace character.
    pub fn parse(args: &str) -> Self {
        match args.char_indices().find(|(_, c)| c.is_whitespace()) {
            Some((idx, ws)) => {
                let label = &args[idx + ws.len_utf8()..];
                Self {
                    slug: args[..idx].to_string(),
                    label: (!label.is_empty()).then(|| label.to_string()),
                }
            }
            None => Self {
                slug: args.to_string(),
                label: None,
            },
        }
    }
}
