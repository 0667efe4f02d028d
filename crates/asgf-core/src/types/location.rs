//! Navigation locations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A navigable location: path, query string, and the optional location a
/// redirect originated from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Path component, always starting with `/`.
    pub path: String,
    /// Query string without the leading `?`. Empty when absent.
    pub query: String,
    /// Location the user was heading to before being redirected here.
    pub from: Option<String>,
}

impl Location {
    /// A location with the given path and no query.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: String::new(),
            from: None,
        }
    }

    /// Parse an `href` such as `/admin/login?expired=1`.
    pub fn parse(href: &str) -> Self {
        match href.split_once('?') {
            Some((path, query)) => Self {
                path: path.to_string(),
                query: query.to_string(),
                from: None,
            },
            None => Self::new(href),
        }
    }

    /// Append a `key=value` pair to the query.
    pub fn with_query_pair(mut self, pair: &str) -> Self {
        if !pair.is_empty() {
            if !self.query.is_empty() {
                self.query.push('&');
            }
            self.query.push_str(pair);
        }
        self
    }

    /// Attach the originating location.
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Whether the query contains exactly this `key=value` pair.
    pub fn has_query_pair(&self, pair: &str) -> bool {
        !pair.is_empty() && self.query.split('&').any(|p| p == pair)
    }

    /// Path plus query, as it would appear in the address bar.
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.href())
    }
}
