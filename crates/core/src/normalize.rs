//! Repairs for schemeless input and dot-segment resolution.

use log::debug;

use crate::url::Url;

/// Scheme temporarily attached to schemeless input while it is reparsed.
const PLACEHOLDER_SCHEME: &str = "dummy";

/// Reinterprets schemeless input such as `example.com/path` as authority form.
///
/// The URL is re-serialized under a placeholder scheme, which makes the leading
/// segment come back as the host, and parsed again. If that reparse fails the
/// original parse is kept.
pub fn recover_schemeless(url: Url) -> Url {
    if !url.scheme.is_empty() {
        return url;
    }

    let mut placeholder = url.clone();
    placeholder.scheme = PLACEHOLDER_SCHEME.to_string();

    match Url::parse(&placeholder.to_string()) {
        Ok(mut recovered) => {
            debug!("Reparsed schemeless URL `{url}` as `{recovered}`");
            recovered.scheme.clear();
            recovered.opaque = url.opaque;
            recovered
        }
        Err(e) => {
            debug!("Keeping schemeless URL `{url}` as parsed: {e}");
            url
        }
    }
}

/// Resolves `url` as a reference against an empty base, which removes `.`
/// and `..` segments from its path.
pub fn resolve(url: &mut Url) {
    let is_absolute = !url.scheme.is_empty() || !url.host.is_empty() || !url.user.is_empty();

    if !is_absolute && !url.opaque.is_empty() {
        url.path.clear();
        return;
    }

    let resolved = remove_dot_segments(&url.escaped_path());
    if let Err(e) = url.set_path(&resolved) {
        debug!("Keeping unresolved path `{}`: {e}", url.path);
    }
}

/// Removes dot segments from an escaped path. Non-empty results are always rooted.
pub fn remove_dot_segments(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let mut resolved = String::from("/");
    let mut first = true;
    let mut last = "";

    for segment in path.split('/') {
        last = segment;
        match segment {
            "." => first = false,
            ".." => match resolved[1..].rfind('/') {
                Some(parent) => resolved.truncate(parent + 1),
                None => {
                    resolved.truncate(1);
                    first = true;
                }
            },
            _ => {
                if !first {
                    resolved.push('/');
                }
                resolved.push_str(segment);
                first = false;
            }
        }
    }

    if last == "." || last == ".." {
        resolved.push('/');
    }

    // The leading slash was written up front; don't double it.
    if resolved.len() > 1 && resolved.as_bytes()[1] == b'/' {
        resolved.remove(0);
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recovered(raw: &str) -> Url {
        recover_schemeless(Url::parse(raw).unwrap())
    }

    #[test]
    fn test_recover_host_and_path() {
        let url = recovered("example.com/path");

        assert!(url.scheme.is_empty());
        assert_eq!(url.host, "example.com");
        assert_eq!(url.path, "/path");
        assert_eq!(url.to_string(), "//example.com/path");
    }

    #[test]
    fn test_recover_userinfo() {
        let url = recovered("user@example.com/x");

        assert_eq!(url.user.username(), Some("user"));
        assert_eq!(url.host, "example.com");
        assert_eq!(url.path, "/x");
    }

    #[test]
    fn test_recover_absolute_path_keeps_empty_host() {
        let url = recovered("/a/b?q=1");

        assert!(url.host.is_empty());
        assert_eq!(url.path, "/a/b");
        assert_eq!(url.raw_query, "q=1");
        assert_eq!(url.to_string(), "/a/b?q=1");
    }

    #[test]
    fn test_recover_leaves_schemes_alone() {
        let url = recovered("localhost:8080/x");

        assert_eq!(url.scheme, "localhost");
        assert_eq!(url.opaque, "8080/x");
    }

    #[test]
    fn test_recover_falls_back_when_reparse_fails() {
        // `%41` is fine in a path but not in a host.
        let url = recovered("ex%41mple.com/x");

        assert!(url.host.is_empty());
        assert_eq!(url.path, "exAmple.com/x");
    }

    #[test]
    fn test_remove_dot_segments() {
        let cases = [
            ("", ""),
            ("/", "/"),
            ("/a/b/../c", "/a/c"),
            ("/a/./b/../../c", "/c"),
            ("/../a", "/a"),
            ("/a/b/..", "/a/"),
            ("/a/.", "/a/"),
            ("a/../b", "/b"),
            ("a/b", "/a/b"),
            ("/a//b", "/a//b"),
        ];

        for (input, expected) in cases {
            assert_eq!(remove_dot_segments(input), expected, "input: {input}");
        }
    }

    #[test]
    fn test_resolve_absolute_url() {
        let mut url = Url::parse("http://h.com/a/b/../c?x#y").unwrap();
        resolve(&mut url);

        assert_eq!(url.path, "/a/c");
        assert_eq!(url.to_string(), "http://h.com/a/c?x#y");
    }

    #[test]
    fn test_resolve_relative_path_becomes_rooted() {
        let mut url = recovered("/a/./b/../c");
        resolve(&mut url);

        assert_eq!(url.to_string(), "/a/c");
    }

    #[test]
    fn test_resolve_keeps_opaque() {
        let mut url = Url::parse("mailto:a@b.c").unwrap();
        resolve(&mut url);

        assert_eq!(url.opaque, "a@b.c");
        assert_eq!(url.to_string(), "mailto:a@b.c");
    }
}
