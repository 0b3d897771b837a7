use serde::{Deserialize, Serialize};
use std::fmt;

/// Path, query and fragment: the part of a URL the router cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    /// Query without the leading `?`.
    pub query: String,
    /// Fragment without the leading `#`.
    #[serde(default)]
    pub hash: String,
}

impl Location {
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: query.into(),
            hash: String::new(),
        }
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }

    /// Parses `/path?query#hash`, also accepting hash-mode hrefs such as `#/login?redirect=%2F`.
    pub fn parse(target: &str) -> Self {
        let target = target.strip_prefix('#').unwrap_or(target);
        let (rest, hash) = target.split_once('#').unwrap_or((target, ""));
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
        Self::new(path, query).with_hash(hash)
    }

    /// `path`, then `?query` and `#hash` when present.
    pub fn full_path(&self) -> String {
        let mut full = self.path.clone();
        if !self.query.is_empty() {
            full.push('?');
            full.push_str(&self.query);
        }
        if !self.hash.is_empty() {
            full.push('#');
            full.push_str(&self.hash);
        }
        full
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty() && self.query.is_empty() && self.hash.is_empty()
    }

    /// First value of a query parameter, percent-decoded.
    pub fn query_param(&self, name: &str) -> Option<String> {
        url::form_urlencoded::parse(self.query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}

/// Builds `<login_route>?<param>=<encoded target>`.
pub fn login_redirect_url(login_route: &str, param: &str, target: &str) -> String {
    format!("{}?{}={}", login_route, param, urlencoding::encode(target))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// What `/auth/login` and `/auth/register` hand back on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_query() {
        let location = Location::parse("/data-construction?tab=tasks&page=2");
        assert_eq!(location.path, "/data-construction");
        assert_eq!(location.query, "tab=tasks&page=2");
        assert_eq!(location.full_path(), "/data-construction?tab=tasks&page=2");
    }

    #[test]
    fn test_parse_hash_href() {
        let location = Location::parse("#/login?redirect=%2Freports");
        assert_eq!(location.path, "/login");
        assert_eq!(location.query_param("redirect").as_deref(), Some("/reports"));
    }

    #[test]
    fn test_fragment_split_with_and_without_query() {
        let with_query = Location::parse("/data-construction?x=1#frag");
        assert_eq!(with_query.path, "/data-construction");
        assert_eq!(with_query.query, "x=1");
        assert_eq!(with_query.hash, "frag");
        assert_eq!(with_query.full_path(), "/data-construction?x=1#frag");

        let without_query = Location::parse("/data-construction#frag");
        assert_eq!(without_query.path, "/data-construction");
        assert_eq!(without_query.query, "");
        assert_eq!(without_query.hash, "frag");
        assert_eq!(without_query.full_path(), "/data-construction#frag");
    }

    #[test]
    fn test_empty_location() {
        assert!(Location::default().is_empty());
        assert_eq!(Location::default().full_path(), "");
        assert!(!Location::parse("/").is_empty());
    }

    #[test]
    fn test_login_redirect_url_encodes_target() {
        assert_eq!(
            login_redirect_url("/login", "redirect", "/data-construction"),
            "/login?redirect=%2Fdata-construction"
        );
        assert_eq!(
            login_redirect_url("/login", "redirect", "/cron?expr=*/5 * * * *"),
            "/login?redirect=%2Fcron%3Fexpr%3D%2A%2F5%20%2A%20%2A%20%2A%20%2A"
        );
    }
}
