//! Lexical path helpers
//!
//! Topology paths describe directories on remote hosts, so they are handled
//! as `/`-separated strings and never touch the local file system.

/// Root of per-user home directories on deployment hosts
pub const HOME_ROOT: &str = "/home";

/// Whether `path` starts with the path-root marker
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/')
}

/// Lexically clean a path: collapse repeated separators, drop `.` segments
/// and resolve `..` where possible.
///
/// An empty input stays empty; a relative input that cleans to nothing
/// becomes `.`.
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let rooted = is_absolute(path);
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            s => parts.push(s),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Join two path fragments and clean the result. Empty fragments are skipped.
pub fn join(parent: &str, child: &str) -> String {
    match (parent.is_empty(), child.is_empty()) {
        (true, true) => String::new(),
        (true, false) => clean(child),
        (false, true) => clean(parent),
        (false, false) => clean(&format!("{}/{}", parent, child)),
    }
}

/// Home directory of `user` on a deployment host
pub fn home_dir(user: &str) -> String {
    join(HOME_ROOT, user.trim())
}

/// Anchor a relative path at the home directory of `user`.
///
/// Absolute paths are only cleaned.
pub fn abs(user: &str, path: &str) -> String {
    let path = path.trim();
    if is_absolute(path) {
        clean(path)
    } else {
        join(&home_dir(user), path)
    }
}

/// Whether `path` equals `prefix` or lies below it, compared by segment.
///
/// `/test-data/data-1` is within `/test-data` but not within `/test-data/data`.
pub fn is_within(path: &str, prefix: &str) -> bool {
    if path == prefix {
        return true;
    }
    if prefix == "/" {
        return is_absolute(path);
    }
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('/'))
}
