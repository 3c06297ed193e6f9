//! Dotted path helpers shared by the build and description passes.

/// Prefixes whose fields live at the schema root.
const ROOT_PREFIXES: &[&str] = &["base"];

/// Strips a leading root prefix from `path`.
///
/// `"base.message"` becomes `"message"` and a bare `"base"` becomes the empty
/// string. Any other path is returned unchanged, so normalizing twice is the
/// same as normalizing once.
///
/// # Examples
///
/// ```
/// use fieldgen_core::normalize_path;
///
/// assert_eq!(normalize_path("base.message"), "message");
/// assert_eq!(normalize_path("base"), "");
/// assert_eq!(normalize_path("baseline.x"), "baseline.x");
/// ```
pub fn normalize_path(path: &str) -> &str {
    for root in ROOT_PREFIXES {
        if path == *root {
            return "";
        }
        if let Some(rest) = path.strip_prefix(root).and_then(|r| r.strip_prefix('.')) {
            return rest;
        }
    }
    path
}

/// Splits `path` on its last dot into `(name, parent)`.
///
/// A path without dots has an empty parent.
pub fn split_path(path: &str) -> (&str, &str) {
    match path.rfind('.') {
        Some(idx) => (&path[idx + 1..], &path[..idx]),
        None => (path, ""),
    }
}

/// Joins a parent prefix and a child key.
pub fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_is_idempotent() {
        for path in ["base.x", "x", "base", "process.pid", "baseline", ""] {
            let once = normalize_path(path);
            assert_eq!(normalize_path(once), once, "{path}");
        }
    }

    #[test]
    fn test_normalize_base_prefix() {
        assert_eq!(normalize_path("base.x"), normalize_path("x"));
        assert_eq!(normalize_path("x"), "x");
        assert_eq!(normalize_path("base"), "");
        assert_eq!(normalize_path("base."), "");
        assert_eq!(normalize_path("bases.x"), "bases.x");
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("a.b.c"), ("c", "a.b"));
        assert_eq!(split_path("a"), ("a", ""));
        assert_eq!(split_path(""), ("", ""));
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "a"), "a");
        assert_eq!(join_path("a.b", "c"), "a.b.c");
    }
}
