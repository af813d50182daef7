//! URI decomposition.

use crate::pattern::RoutePattern;

/// Normalizes a path or route: ensures a leading `/` and strips exactly one
/// trailing `/` (so `/a/b/` and `/a/b` are equivalent for matching). The
/// root path `/` is preserved.
pub(crate) fn normalize(raw: &str) -> String {
    let mut s = if raw.starts_with('/') {
        raw.to_string()
    } else {
        format!("/{raw}")
    };
    if s.len() > 1 && s.ends_with('/') {
        s.pop();
    }
    s
}

/// A URI decomposed against one route.
///
/// Ephemeral: computed fresh per (URI, route) pair, because `path_base`
/// depends on how many parameter segments that route declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUri {
    /// Normalized path, query string removed.
    pub path: String,
    /// The path with the route's trailing parameter segments dropped.
    pub path_base: String,
    /// Query string after the first `?`, if present and non-empty.
    pub querystring: Option<String>,
}

impl ParsedUri {
    /// Decomposes `uri` against `pattern`.
    ///
    /// The URI splits on the first `?`; the path side is normalized. For a
    /// parametrized route, as many trailing path segments as the route
    /// declares parameters are dropped to form `path_base`. A URI with fewer
    /// segments than the route expects yields a truncated base, which the
    /// evaluator rejects as a non-match.
    pub fn parse(uri: &str, pattern: &RoutePattern) -> Self {
        let (raw_path, raw_query) = match uri.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (uri, None),
        };

        let path = normalize(raw_path);
        let querystring = raw_query
            .filter(|qs| !qs.is_empty())
            .map(ToString::to_string);

        let path_base = if pattern.param_count() == 0 {
            path.clone()
        } else {
            let parts: Vec<&str> = path.split('/').collect();
            let keep = parts.len().saturating_sub(pattern.param_count());
            parts[..keep].join("/")
        };

        Self {
            path,
            path_base,
            querystring,
        }
    }

    /// Number of `/`-separated segments in the path (the normalized path
    /// always carries a leading empty segment).
    pub fn segment_count(&self) -> usize {
        self.path.split('/').count()
    }
}
