//! RouteTree: a compressed radix tree for matching URL path patterns.
//!
//! Zero-allocation path matching against static segments, `{name}`
//! parameters, `{name:regex}` constrained parameters, and `{name:*}`
//! catch-alls, plus case-insensitive lookup with canonical-path
//! reconstruction and trailing-slash redirect hints.
//!
//! ```
//! use routetree::Tree;
//!
//! let mut tree = Tree::new();
//! tree.add("/users/{name}", "profile");
//! tree.add("/users/admin", "admin-panel");
//!
//! let (value, _tsr) = tree.get("/users/atreugo", None);
//! assert_eq!(value, Some(&"profile"));
//! ```
//!
//! Build the tree once at startup, then treat it as read-only: [`Tree::add`]
//! is not safe to call concurrently with itself or with lookups.

mod ci;
mod classify;
pub mod error;
mod node;
mod params;
mod tree;

pub use params::{ParamError, Params, ParamsIter};
pub use tree::Tree;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_beats_parameter() {
        let mut tree = Tree::new();
        tree.add("/users/{name}", 1u32);
        tree.add("/users/admin", 2u32);

        let mut params = Params::new();
        let (v, tsr) = tree.get("/users/admin", Some(&mut params));
        assert_eq!(v, Some(&2));
        assert!(!tsr);
        assert!(params.is_empty());

        let mut params = Params::new();
        let (v, _) = tree.get("/users/atreugo", Some(&mut params));
        assert_eq!(v, Some(&1));
        assert_eq!(params.get("name"), Some("atreugo"));
    }

    #[test]
    fn parameter_continues_past_segment() {
        let mut tree = Tree::new();
        tree.add("/users/{name}/jobs", 1u32);

        let mut params = Params::new();
        let (v, _) = tree.get("/users/atreugo/jobs", Some(&mut params));
        assert_eq!(v, Some(&1));
        assert_eq!(params.get("name"), Some("atreugo"));
    }

    #[test]
    fn catch_all_binds_remainder() {
        let mut tree = Tree::new();
        tree.add("/static/{filepath:*}", 1u32);

        let mut params = Params::new();
        let (v, _) = tree.get("/static/assets/js/main.js", Some(&mut params));
        assert_eq!(v, Some(&1));
        assert_eq!(params.get("filepath"), Some("assets/js/main.js"));
    }

    #[test]
    fn root_catch_all_binds_slash_for_root_path() {
        let mut tree = Tree::new();
        tree.add("/{filepath:*}", 1u32);

        let mut params = Params::new();
        let (v, _) = tree.get("/", Some(&mut params));
        assert_eq!(v, Some(&1));
        assert_eq!(params.get("filepath"), Some("/"));

        let mut params = Params::new();
        let (v, _) = tree.get("/js/main.js", Some(&mut params));
        assert_eq!(v, Some(&1));
        assert_eq!(params.get("filepath"), Some("js/main.js"));
    }

    #[test]
    fn trailing_slash_redirect_is_symmetric() {
        let mut tree_a = Tree::new();
        tree_a.add("/user/", 1u32);
        let (v, tsr) = tree_a.get("/user", None);
        assert_eq!(v, None);
        assert!(tsr);

        let mut tree_b = Tree::new();
        tree_b.add("/api", 1u32);
        let (v, tsr) = tree_b.get("/api/", None);
        assert_eq!(v, None);
        assert!(tsr);
    }

    #[test]
    fn regex_constrained_parameter_anchors_fully() {
        let mut tree = Tree::new();
        tree.add(
            "/api/prefix{version:V[0-9]}_{name:[a-z]+}_sufix/files",
            1u32,
        );

        let mut params = Params::new();
        let (v, _) = tree.get("/api/prefixV1_atreugo_sufix/files", Some(&mut params));
        assert_eq!(v, Some(&1));
        assert_eq!(params.get("version"), Some("V1"));
        assert_eq!(params.get("name"), Some("atreugo"));

        let (v, _) = tree.get("/api/prefixV1_1111_sufix/files", None);
        assert_eq!(v, None);
    }

    #[test]
    fn literal_suffix_wrap_resolves_the_dotjson_case() {
        let mut tree = Tree::new();
        tree.add("/api/{file}.json", 1u32);

        let mut params = Params::new();
        let (v, _) = tree.get("/api/name.json", Some(&mut params));
        assert_eq!(v, Some(&1));
        assert_eq!(params.get("file"), Some("name"));
    }

    #[test]
    fn distinct_wraps_around_same_capture_coexist() {
        let mut tree = Tree::new();
        tree.add("/prefix{name:[a-z]+}suffix/data", 1u32);
        tree.add("/prefix{name:[a-z]+}/data", 2u32);

        let (v, _) = tree.get("/prefixabcsuffix/data", None);
        assert_eq!(v, Some(&1));
        let (v, _) = tree.get("/prefixabc/data", None);
        assert_eq!(v, Some(&2));
    }

    #[test]
    fn distinct_bare_param_names_at_the_same_position_coexist() {
        let mut tree = Tree::new();
        tree.add("/users/{name}", 1u32);
        tree.add("/users/{status}/proc", 2u32);

        let mut params = Params::new();
        let (v, _) = tree.get("/users/atreugo", Some(&mut params));
        assert_eq!(v, Some(&1));
        assert_eq!(params.get("name"), Some("atreugo"));
        assert_eq!(params.get("status"), None);

        let mut params = Params::new();
        let (v, _) = tree.get("/users/active/proc", Some(&mut params));
        assert_eq!(v, Some(&2));
        assert_eq!(params.get("status"), Some("active"));
        assert_eq!(params.get("name"), None);
    }

    #[test]
    #[should_panic(expected = "value already set")]
    fn duplicate_add_panics_without_mutable() {
        let mut tree = Tree::new();
        tree.add("/users", 1u32);
        tree.add("/users", 2u32);
    }

    #[test]
    fn mutable_tree_allows_overwrite() {
        let mut tree = Tree::new();
        tree.mutable = true;
        tree.add("/users", 1u32);
        tree.add("/users", 2u32);
        let (v, _) = tree.get("/users", None);
        assert_eq!(v, Some(&2));
    }

    #[test]
    #[should_panic(expected = "begin with '/'")]
    fn pattern_must_start_with_slash() {
        let mut tree = Tree::new();
        tree.add("users", 1u32);
    }

    #[test]
    #[should_panic(expected = "catch-all conflicts")]
    fn catch_all_conflicts_with_sibling_children() {
        let mut tree = Tree::new();
        tree.add("/static/js", 1u32);
        tree.add("/static/{filepath:*}", 2u32);
    }
}
