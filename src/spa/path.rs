//! Request path normalization
//!
//! A `RequestPath` is the single piece of data the resolver works on: a
//! percent-decoded path that always starts with `/`.

use percent_encoding::percent_decode_str;
use std::fmt;

/// Normalized request path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestPath {
    path: String,
    malformed: bool,
}

impl RequestPath {
    /// Build from the path component of a request URI.
    ///
    /// Percent-escapes are decoded. A `%` not followed by two hex digits is
    /// kept literally. When the decoded bytes are not UTF-8 the raw text is
    /// kept and the path is flagged as malformed instead of being rejected.
    pub fn from_uri_path(raw: &str) -> Self {
        match percent_decode_str(raw).decode_utf8() {
            Ok(decoded) => Self {
                path: ensure_leading_slash(decoded.into_owned()),
                malformed: false,
            },
            Err(_) => Self {
                path: ensure_leading_slash(raw.to_string()),
                malformed: true,
            },
        }
    }

    /// Build from a routing-matched prefix plus optional trailing path info.
    ///
    /// Absent path info is treated as empty.
    pub fn from_parts(matched: &str, rest: Option<&str>) -> Self {
        let mut joined = String::with_capacity(matched.len() + rest.map_or(0, str::len));
        joined.push_str(matched);
        joined.push_str(rest.unwrap_or_default());
        Self::from_uri_path(&joined)
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    pub const fn is_malformed(&self) -> bool {
        self.malformed
    }

    pub fn is_root(&self) -> bool {
        self.path == "/"
    }

    /// Substring after the last `/`
    pub fn last_segment(&self) -> &str {
        self.path
            .rfind('/')
            .map_or(self.path.as_str(), |i| &self.path[i + 1..])
    }

    /// True when the last segment contains a `.`, i.e. the path looks like an asset
    pub fn has_extension(&self) -> bool {
        self.last_segment().contains('.')
    }

    /// Extension of the last segment, without the dot
    pub fn extension(&self) -> Option<&str> {
        let segment = self.last_segment();
        segment.rfind('.').map(|i| &segment[i + 1..])
    }

    pub fn ends_with_slash(&self) -> bool {
        self.path.ends_with('/')
    }

    /// Append `index_file` when the path names a directory (ends in `/`).
    #[must_use]
    pub fn with_index_file(&self, index_file: &str) -> Self {
        if self.ends_with_slash() {
            Self {
                path: format!("{}{index_file}", self.path),
                malformed: self.malformed,
            }
        } else {
            self.clone()
        }
    }
}

impl fmt::Display for RequestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl PartialEq<str> for RequestPath {
    fn eq(&self, other: &str) -> bool {
        self.path == other
    }
}

impl PartialEq<&str> for RequestPath {
    fn eq(&self, other: &&str) -> bool {
        self.path == *other
    }
}

fn ensure_leading_slash(path: String) -> String {
    if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_slash() {
        assert_eq!(RequestPath::from_uri_path("").as_str(), "/");
        assert_eq!(RequestPath::from_uri_path("app").as_str(), "/app");
        assert_eq!(RequestPath::from_uri_path("/app").as_str(), "/app");
    }

    #[test]
    fn test_from_parts_absent_rest() {
        let path = RequestPath::from_parts("/app", None);
        assert_eq!(path, "/app");
        let path = RequestPath::from_parts("/app", Some("/users/42"));
        assert_eq!(path, "/app/users/42");
    }

    #[test]
    fn test_percent_decoding() {
        let path = RequestPath::from_uri_path("/docs/hello%20world.txt");
        assert_eq!(path, "/docs/hello world.txt");
        assert!(!path.is_malformed());
    }

    #[test]
    fn test_invalid_escape_kept_literally() {
        let path = RequestPath::from_uri_path("/users/%zz");
        assert!(!path.is_malformed());
        assert_eq!(path, "/users/%zz");

        let truncated = RequestPath::from_uri_path("/logo%2");
        assert!(!truncated.is_malformed());
        assert_eq!(truncated, "/logo%2");
    }

    #[test]
    fn test_non_utf8_escape_kept_raw() {
        let path = RequestPath::from_uri_path("/%ff%fe");
        assert!(path.is_malformed());
        assert_eq!(path, "/%ff%fe");

        let asset = RequestPath::from_uri_path("/img/%ff.png");
        assert!(asset.is_malformed());
        assert!(asset.has_extension());
    }

    #[test]
    fn test_last_segment_and_extension() {
        let asset = RequestPath::from_uri_path("/assets/logo.png");
        assert_eq!(asset.last_segment(), "logo.png");
        assert!(asset.has_extension());
        assert_eq!(asset.extension(), Some("png"));

        // A dot in a directory name does not make the request an asset
        let route = RequestPath::from_uri_path("/v1.2/users");
        assert!(!route.has_extension());
        assert_eq!(route.extension(), None);

        let dir = RequestPath::from_uri_path("/users/");
        assert_eq!(dir.last_segment(), "");
        assert!(!dir.has_extension());
    }

    #[test]
    fn test_with_index_file() {
        let dir = RequestPath::from_uri_path("/docs/");
        assert_eq!(dir.with_index_file("index.html"), "/docs/index.html");

        let file = RequestPath::from_uri_path("/docs");
        assert_eq!(file.with_index_file("index.html"), "/docs");
    }
}
