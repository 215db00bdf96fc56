//! Scans a pattern string for `{name}`, `{name:regex}` and `{name:*}`
//! wild-path segments.
//!
//! A "segment" here is the `/`-delimited component that contains a `{`, not
//! necessarily the whole `{...}` token: `/prefix{a:[0-9]}_{b}suffix/more`
//! has one wild segment, `prefix{a:[0-9]}_{b}suffix`, built from two
//! captures wrapped in literal text. [`scan`] finds the next such segment
//! starting at or after a given offset and assembles it into a single
//! [`WildPath`] the tree inserts as one edge.

use crate::error::ClassifyError;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WildKind {
    Param,
    CatchAll,
}

/// One wild-path occurrence, already parsed and regex-compiled.
#[derive(Debug, Clone)]
pub(crate) struct WildPath {
    /// Literal text of the whole segment, as written in the pattern. Used
    /// verbatim as the node's edge label.
    pub path: String,
    /// Parameter names, in left-to-right order of appearance.
    pub keys: Vec<String>,
    /// Anchored regex over the whole segment text. `None` only for the fast
    /// path: a bare `{name}` with no user regex and no literal wrap.
    pub regex: Option<Regex>,
    pub kind: WildKind,
    /// Byte offset of the segment's first character within the string
    /// passed to [`scan`].
    pub start: usize,
    /// Byte offset just past the segment's last character.
    pub end: usize,
}

/// Find the next wild-path segment in `s` at or after `from`. Returns `None`
/// if the remainder of `s` is pure static text.
pub(crate) fn scan(s: &str, from: usize) -> Result<Option<WildPath>, ClassifyError> {
    let Some(rel) = s[from..].find('{') else {
        return Ok(None);
    };
    let brace = from + rel;
    let segment_start = s[..brace].rfind('/').map(|i| i + 1).unwrap_or(0);
    let segment_end = s[segment_start..]
        .find('/')
        .map(|i| segment_start + i)
        .unwrap_or(s.len());
    let segment = &s[segment_start..segment_end];
    let wp = parse_segment(segment)?;
    Ok(Some(WildPath {
        start: segment_start,
        end: segment_end,
        ..wp
    }))
}

enum Token<'a> {
    Literal(&'a str),
    Capture { name: &'a str, regex: Option<&'a str> },
}

fn tokenize(segment: &str) -> Result<Vec<Token<'_>>, ClassifyError> {
    let mut tokens = Vec::new();
    let bytes = segment.as_bytes();
    let mut i = 0;
    let mut literal_start = 0;
    while i < bytes.len() {
        if bytes[i] == b'{' {
            if i > literal_start {
                tokens.push(Token::Literal(&segment[literal_start..i]));
            }
            let close = segment[i..].find('}').map(|j| i + j).ok_or_else(|| {
                ClassifyError::UnbalancedBrace {
                    segment: segment.to_string(),
                }
            })?;
            let inner = &segment[i + 1..close];
            let (name, regex) = match inner.find(':') {
                Some(colon) => (&inner[..colon], Some(&inner[colon + 1..])),
                None => (inner, None),
            };
            if name.is_empty() {
                return Err(ClassifyError::EmptyName {
                    segment: segment.to_string(),
                });
            }
            tokens.push(Token::Capture { name, regex });
            i = close + 1;
            literal_start = i;
        } else {
            i += 1;
        }
    }
    if literal_start < bytes.len() {
        tokens.push(Token::Literal(&segment[literal_start..]));
    }
    Ok(tokens)
}

fn parse_segment(segment: &str) -> Result<WildPath, ClassifyError> {
    let tokens = tokenize(segment)?;

    let captures: Vec<_> = tokens
        .iter()
        .filter_map(|t| match t {
            Token::Capture { name, regex } => Some((*name, *regex)),
            _ => None,
        })
        .collect();

    // Catch-all: the whole segment is exactly one `{name:*}`, no wrap.
    if tokens.len() == 1 {
        if let Token::Capture { name, regex: Some("*") } = tokens[0] {
            return Ok(WildPath {
                path: segment.to_string(),
                keys: vec![name.to_string()],
                regex: None,
                kind: WildKind::CatchAll,
                start: 0,
                end: 0,
            });
        }
    }
    if captures.iter().any(|(_, r)| *r == Some("*")) {
        // a catch-all anywhere but alone in its segment is a misplaced wildcard
        return Err(ClassifyError::UnbalancedBrace {
            segment: segment.to_string(),
        });
    }

    // Fast path: a bare `{name}` occupying the entire segment, no regex, no wrap.
    if tokens.len() == 1 {
        if let Token::Capture { name, regex: None } = tokens[0] {
            return Ok(WildPath {
                path: segment.to_string(),
                keys: vec![name.to_string()],
                regex: None,
                kind: WildKind::Param,
                start: 0,
                end: 0,
            });
        }
    }

    // Everything else (single `{name:regex}`, or any wrap/compound segment)
    // compiles to one anchored regex over the full segment text.
    let mut pattern = String::from("^");
    let mut keys = Vec::with_capacity(captures.len());
    for token in &tokens {
        match token {
            Token::Literal(lit) => pattern.push_str(&regex::escape(lit)),
            Token::Capture { name, regex } => {
                keys.push((*name).to_string());
                pattern.push_str("(?P<");
                pattern.push_str(name);
                pattern.push('>');
                pattern.push_str(regex.unwrap_or("[^/]+?"));
                pattern.push(')');
            }
        }
    }
    pattern.push('$');
    let compiled = Regex::new(&pattern).map_err(|source| ClassifyError::InvalidRegex {
        name: keys.join(","),
        regex: pattern,
        source,
    })?;

    Ok(WildPath {
        path: segment.to_string(),
        keys,
        regex: Some(compiled),
        kind: WildKind::Param,
        start: 0,
        end: 0,
    })
}
