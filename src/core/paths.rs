// ─── Path Helpers ───
// Mod paths are game-root-relative, slash-separated strings regardless of the
// host OS, so these helpers work on strings rather than `std::path`.

/// Normalize a slash path: collapse `//`, resolve `.` and `..`.
///
/// An absolute path (leading `/`) clamps `..` at the root and therefore can
/// never escape it. A relative path keeps leading `..` segments.
pub fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut stack: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match stack.last() {
                Some(&last) if last != ".." => {
                    stack.pop();
                }
                _ if absolute => {} // clamp at root
                _ => stack.push(".."),
            },
            other => stack.push(other),
        }
    }

    let joined = stack.join("/");
    match (absolute, joined.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Join two slash paths and normalize the result.
pub fn join(base: &str, path: &str) -> String {
    if base.is_empty() {
        return normalize(path);
    }
    if path.is_empty() {
        return normalize(base);
    }
    normalize(&format!("{base}/{path}"))
}

/// Strip a single leading `/`, turning a root-absolute path into a
/// root-relative one.
pub fn strip_root(path: &str) -> String {
    path.strip_prefix('/').unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_dots_and_slashes() {
        assert_eq!(normalize("a//b/./c"), "a/b/c");
        assert_eq!(normalize("./a"), "a");
        assert_eq!(normalize("a/b/../c"), "a/c");
    }

    #[test]
    fn normalize_clamps_parent_segments_at_root() {
        assert_eq!(normalize("/.."), "/");
        assert_eq!(normalize("/../../etc"), "/etc");
        assert_eq!(normalize("/a/../../b"), "/b");
    }

    #[test]
    fn normalize_keeps_leading_parents_on_relative_paths() {
        assert_eq!(normalize("../a"), "../a");
        assert_eq!(normalize("a/../.."), "..");
    }

    #[test]
    fn join_is_rooted_join_plus_normalize() {
        assert_eq!(join("mods/example", "/main.js"), "mods/example/main.js");
        assert_eq!(join("/", "img/../snd/hit.ogg"), "/snd/hit.ogg");
        assert_eq!(join("mods/example", ""), "mods/example");
    }

    #[test]
    fn strip_root_removes_one_leading_slash() {
        assert_eq!(strip_root("/assets/img.png"), "assets/img.png");
        assert_eq!(strip_root("assets/img.png"), "assets/img.png");
    }
}
