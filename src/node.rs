//! The radix tree itself: node layout, insertion, and lookup.
//!
//! Each [`Node`] is one compressed edge. `children` holds only static
//! (literal) edges, sorted so static matches are always tried before the
//! single dynamic slot. `param_children` holds the small number of
//! parameter/regex edges that can start at this position — usually one,
//! occasionally a few when literal wraps around the same capture
//! disambiguate them (`prefix{x}suffix` vs `prefix{x}`), or when distinctly
//! named bare parameters share a position (`{name}` vs `{status}`). Lookup
//! tries each in turn and backtracks on a downstream miss. `wildcard` is the
//! catch-all, which never gets a child node of its own: it terminates the
//! branch.

use crate::classify::{self, WildKind, WildPath};
use crate::error::AddError;
use crate::params::Params;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeType {
    Root,
    Static,
    Param,
}

pub(crate) struct Wildcard<V> {
    pub param_key: String,
    pub value: V,
}

pub(crate) struct Node<V> {
    pub node_type: NodeType,
    pub path: String,
    pub value: Option<V>,
    pub children: Vec<Node<V>>,
    pub param_children: Vec<Node<V>>,
    pub wildcard: Option<Box<Wildcard<V>>>,
    pub param_keys: Vec<String>,
    pub param_regex: Option<Regex>,
}

impl<V> Node<V> {
    pub(crate) fn root() -> Self {
        Node {
            node_type: NodeType::Root,
            path: String::new(),
            value: None,
            children: Vec::new(),
            param_children: Vec::new(),
            wildcard: None,
            param_keys: Vec::new(),
            param_regex: None,
        }
    }

    fn new_static(path: String) -> Self {
        Node {
            node_type: NodeType::Static,
            path,
            value: None,
            children: Vec::new(),
            param_children: Vec::new(),
            wildcard: None,
            param_keys: Vec::new(),
            param_regex: None,
        }
    }

    fn new_param(wp: &WildPath) -> Self {
        Node {
            node_type: NodeType::Param,
            path: wp.path.clone(),
            value: None,
            children: Vec::new(),
            param_children: Vec::new(),
            wildcard: None,
            param_keys: wp.keys.clone(),
            param_regex: wp.regex.clone(),
        }
    }
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}

fn sort_children<V>(children: &mut [Node<V>]) {
    children.sort_by_key(|c| std::cmp::Reverse(c.path.len()));
}

/// Split `node`'s edge at byte offset `at`: `node.path[..at]` stays on
/// `node`, `node.path[at..]` and everything `node` used to own moves onto a
/// fresh child. Must only be called on a `Static` node: a param node's path
/// is markup, not a plain byte run, and splitting it would be meaningless.
fn split_at<V>(node: &mut Node<V>, at: usize) {
    debug_assert_eq!(node.node_type, NodeType::Static);
    let suffix = node.path[at..].to_string();
    let prefix = node.path[..at].to_string();
    let moved = Node {
        node_type: NodeType::Static,
        path: suffix,
        value: node.value.take(),
        children: std::mem::take(&mut node.children),
        param_children: std::mem::take(&mut node.param_children),
        wildcard: node.wildcard.take(),
        param_keys: Vec::new(),
        param_regex: None,
    };
    node.path = prefix;
    node.children = vec![moved];
}

/// Walk/create static edges for literal text `s` starting at `node`,
/// returning the node reached once all of `s` has been consumed.
fn descend_static<'n, V>(node: &'n mut Node<V>, s: &str) -> &'n mut Node<V> {
    if s.is_empty() {
        return node;
    }
    let first = s.as_bytes()[0];
    if let Some(idx) = node
        .children
        .iter()
        .position(|c| c.path.as_bytes().first() == Some(&first))
    {
        let cp = common_prefix_len(s, &node.children[idx].path);
        if cp < node.children[idx].path.len() {
            split_at(&mut node.children[idx], cp);
        }
        return descend_static(&mut node.children[idx], &s[cp..]);
    }
    node.children.push(Node::new_static(s.to_string()));
    sort_children(&mut node.children);
    let idx = node
        .children
        .iter()
        .position(|c| c.path == s)
        .expect("just inserted");
    &mut node.children[idx]
}

/// Insert `pattern` (the remainder still to be consumed, relative to
/// `node`) with `value`, recursing through static runs and wild segments.
pub(crate) fn insert<V>(
    node: &mut Node<V>,
    pattern: &str,
    full_pattern: &str,
    value: V,
    mutable: bool,
) -> Result<(), AddError> {
    if pattern.is_empty() {
        return set_terminal(node, value, mutable, full_pattern);
    }
    match classify::scan(pattern, 0)? {
        None => {
            let leaf = descend_static(node, pattern);
            set_terminal(leaf, value, mutable, full_pattern)
        }
        Some(wp) if wp.start == 0 => insert_wild(node, &wp, pattern, full_pattern, value, mutable),
        Some(wp) => {
            let prefix = &pattern[..wp.start];
            let attach = descend_static(node, prefix);
            insert(attach, &pattern[wp.start..], full_pattern, value, mutable)
        }
    }
}

fn set_terminal<V>(
    node: &mut Node<V>,
    value: V,
    mutable: bool,
    full_pattern: &str,
) -> Result<(), AddError> {
    if node.value.is_some() {
        if mutable {
            node.value = Some(value);
            return Ok(());
        }
        return Err(AddError::DuplicateValue {
            pattern: full_pattern.to_string(),
        });
    }
    node.value = Some(value);
    Ok(())
}

fn insert_wild<V>(
    node: &mut Node<V>,
    wp: &WildPath,
    pattern: &str,
    full_pattern: &str,
    value: V,
    mutable: bool,
) -> Result<(), AddError> {
    let remainder = &pattern[wp.end..];
    match wp.kind {
        WildKind::CatchAll => {
            if !remainder.is_empty() {
                return Err(AddError::WildcardNotAtEnd {
                    pattern: full_pattern.to_string(),
                });
            }
            match &mut node.wildcard {
                Some(existing) if existing.param_key == wp.keys[0] => {
                    if mutable {
                        existing.value = value;
                        return Ok(());
                    }
                    Err(AddError::DuplicateWildcardValue {
                        pattern: full_pattern.to_string(),
                    })
                }
                Some(_) => {
                    Err(AddError::WildPathConflict {
                        pattern: full_pattern.to_string(),
                        new: wp.path.clone(),
                        existing: node
                            .wildcard
                            .as_ref()
                            .map(|w| w.param_key.clone())
                            .unwrap_or_default(),
                    })
                }
                None => {
                    if !node.children.is_empty() || !node.param_children.is_empty() {
                        return Err(AddError::WildcardConflict {
                            pattern: full_pattern.to_string(),
                        });
                    }
                    node.wildcard = Some(Box::new(Wildcard {
                        param_key: wp.keys[0].clone(),
                        value,
                    }));
                    Ok(())
                }
            }
        }
        WildKind::Param => {
            if let Some(existing) = node.param_children.iter().position(|c| c.path == wp.path) {
                return insert(&mut node.param_children[existing], remainder, full_pattern, value, mutable);
            }
            if node.wildcard.is_some() {
                return Err(AddError::WildcardConflict {
                    pattern: full_pattern.to_string(),
                });
            }
            // Distinctly-named or distinctly-wrapped parameter segments at
            // the same position (`{name}` vs `{status}`, or
            // `prefix{x}suffix` vs `prefix{x}`) are not a conflict: lookup
            // tries each in turn and backtracks, so they coexist as
            // siblings rather than requiring one canonical shape per
            // position.
            let mut child = Node::new_param(wp);
            insert(&mut child, remainder, full_pattern, value, mutable)?;
            node.param_children.push(child);
            // Try more specific (longer literal wrap) param children first.
            node.param_children
                .sort_by_key(|c| std::cmp::Reverse(c.path.len()));
            Ok(())
        }
    }
}

/// Lookup entry point: match `path` against the subtree rooted at `node`.
/// Returns the matched value and whether a trailing-slash variant exists.
pub(crate) fn get<'n: 'r, 'r, V>(
    node: &'n Node<V>,
    path: &'r str,
    mut params: Option<&mut Params<'r>>,
) -> (Option<&'n V>, bool) {
    if path.len() < node.path.len() {
        if node.path.len() == path.len() + 1
            && node.path.ends_with('/')
            && &node.path[..path.len()] == path
            && node.value.is_some()
        {
            return (None, true);
        }
        return (None, false);
    }
    if &path[..node.path.len()] != node.path.as_str() {
        return (None, false);
    }
    let rest = &path[node.path.len()..];
    continue_from(node, rest, reborrow(&mut params))
}

fn reborrow<'a, V>(params: &'a mut Option<&mut V>) -> Option<&'a mut V> {
    params.as_mut().map(|p| &mut **p)
}

fn continue_from<'n: 'r, 'r, V>(
    node: &'n Node<V>,
    rest: &'r str,
    mut params: Option<&mut Params<'r>>,
) -> (Option<&'n V>, bool) {
    if rest.is_empty() {
        if let Some(v) = node.value.as_ref() {
            return (Some(v), false);
        }
        if let Some(w) = node.wildcard.as_deref() {
            if let Some(p) = params.as_deref_mut() {
                p.insert(&w.param_key, "/");
            }
            return (Some(&w.value), false);
        }
        return (None, node_has_trailing_slash_value(node));
    }

    let mut tsr = false;
    if let Some(first) = rest.as_bytes().first().copied() {
        if let Some(child) = node
            .children
            .iter()
            .find(|c| c.path.as_bytes().first() == Some(&first))
        {
            let (v, t) = get(child, rest, reborrow(&mut params));
            if v.is_some() {
                return (v, false);
            }
            tsr |= t;
        }
    }
    for child in &node.param_children {
        let (v, t) = match_param(child, rest, reborrow(&mut params));
        if v.is_some() {
            return (v, false);
        }
        tsr |= t;
    }
    if let Some(w) = node.wildcard.as_deref() {
        if let Some(p) = params {
            p.insert(&w.param_key, rest);
        }
        return (Some(&w.value), false);
    }
    if !tsr && rest == "/" && node.value.is_some() {
        tsr = true;
    }
    (None, tsr)
}

fn match_param<'n: 'r, 'r, V>(
    node: &'n Node<V>,
    path: &'r str,
    mut params: Option<&mut Params<'r>>,
) -> (Option<&'n V>, bool) {
    let end = memchr::memchr(b'/', path.as_bytes()).unwrap_or(path.len());
    if end == 0 {
        return (None, false);
    }
    let seg = &path[..end];
    let mut bound: Vec<&str> = Vec::new();
    match &node.param_regex {
        Some(re) => match re.captures(seg) {
            Some(caps) => {
                if let Some(p) = params.as_deref_mut() {
                    for key in &node.param_keys {
                        if let Some(m) = caps.name(key) {
                            p.insert(key, m.as_str());
                            bound.push(key);
                        }
                    }
                }
            }
            None => return (None, false),
        },
        None => {
            if let Some(p) = params.as_deref_mut() {
                p.insert(&node.param_keys[0], seg);
                bound.push(&node.param_keys[0]);
            }
        }
    }
    let rest = &path[end..];
    let (v, tsr) = continue_from(node, rest, reborrow(&mut params));
    if v.is_none() {
        // This param child's shape matched the segment syntactically, but
        // nothing further down the path matched: undo the binding so a
        // sibling param child tried next (or the caller, on an overall
        // miss) doesn't see a stale key from this abandoned attempt.
        if let Some(p) = params {
            for key in bound {
                p.remove(key);
            }
        }
    }
    (v, tsr)
}

fn node_has_trailing_slash_value<V>(node: &Node<V>) -> bool {
    node.children
        .iter()
        .any(|c| c.path == "/" && c.value.is_some())
}
