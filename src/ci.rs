//! Case-insensitive path lookup with canonical-path reconstruction.
//!
//! Walks the tree the same way [`crate::node::get`] does, but compares
//! edges with Unicode case folding and writes the tree's own (canonical)
//! casing into the caller's buffer instead of the request's. Parameter and
//! catch-all segments are copied verbatim from the input since they are
//! caller data, not part of the route's fixed text.

use crate::node::Node;

pub(crate) fn find<V>(root: &Node<V>, path: &str, fix_trailing_slash: bool, buf: &mut String) -> bool {
    buf.clear();
    if match_node(root, path, fix_trailing_slash, buf) {
        true
    } else {
        buf.clear();
        false
    }
}

fn eq_fold(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Case-insensitively match `node`'s own edge label against a prefix of
/// `path`, then recurse. Returns false (leaving `buf` at its caller-saved
/// length) on any mismatch so the caller can try a sibling.
fn match_node<V>(node: &Node<V>, path: &str, fix_slash: bool, buf: &mut String) -> bool {
    let mut path_iter = path.char_indices();
    let mut consumed = 0usize;
    for nc in node.path.chars() {
        match path_iter.next() {
            Some((idx, pc)) if eq_fold(nc, pc) => {
                consumed = idx + pc.len_utf8();
            }
            Some(_) => return false,
            None => {
                // request ran out mid-edge: only a TSR candidate if the
                // single remaining character is the trailing slash.
                return fix_slash
                    && node.path.len() == consumed + 1
                    && node.path.ends_with('/')
                    && node.value.is_some()
                    && {
                        buf.push_str(&node.path);
                        true
                    };
            }
        }
    }
    buf.push_str(&node.path);
    continue_ci(node, &path[consumed..], fix_slash, buf)
}

fn continue_ci<V>(node: &Node<V>, rest: &str, fix_slash: bool, buf: &mut String) -> bool {
    if rest.is_empty() {
        if node.value.is_some() {
            return true;
        }
        if node.wildcard.is_some() {
            return true;
        }
        if fix_slash
            && node
                .children
                .iter()
                .any(|c| c.path == "/" && c.value.is_some())
        {
            buf.push('/');
            return true;
        }
        return false;
    }

    let saved = buf.len();
    for child in &node.children {
        if match_node(child, rest, fix_slash, buf) {
            return true;
        }
        buf.truncate(saved);
    }

    let end = memchr::memchr(b'/', rest.as_bytes()).unwrap_or(rest.len());
    if end > 0 {
        let seg = &rest[..end];
        for child in &node.param_children {
            let matches = match &child.param_regex {
                Some(re) => re.is_match(seg),
                None => true,
            };
            if matches {
                buf.push_str(seg);
                if continue_ci(child, &rest[end..], fix_slash, buf) {
                    return true;
                }
                buf.truncate(saved);
            }
        }
    }

    if node.wildcard.is_some() {
        buf.push_str(rest);
        return true;
    }

    if fix_slash && rest == "/" && node.value.is_some() {
        return true;
    }

    false
}
