//! Route pattern compilation.

use regex::{Regex, RegexBuilder};

use crate::error::{Result, RouterError};
use crate::uri::normalize;

/// A compiled route pattern.
///
/// Holds the normalized route text, its literal base (every `:param`
/// segment removed), and the base compiled as a case-insensitive, fully
/// anchored regex. Route segments may themselves carry regex syntax
/// (`w{3}`, `\d+`, `get.+`, `shop(s)?`); these are preserved verbatim in
/// the base and participate in the anchored match.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    route: String,
    base: String,
    base_regex: Regex,
    param_count: usize,
    segment_count: usize,
}

impl RoutePattern {
    /// Compiles a declared route.
    ///
    /// A route whose embedded regex fails to compile is a configuration
    /// error, reported here at registration rather than swallowed.
    ///
    /// # Example
    ///
    /// ```
    /// use cobalt_router::RoutePattern;
    ///
    /// let pattern = RoutePattern::compile("/cli/register/:name/:year").unwrap();
    /// assert_eq!(pattern.base(), "/cli/register");
    /// assert_eq!(pattern.param_count(), 2);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] when the route's base does
    /// not compile as a regular expression.
    pub fn compile(route: &str) -> Result<Self> {
        let route = normalize(route);

        let param_count = route
            .split('/')
            .filter(|part| part.starts_with(':'))
            .count();
        let segment_count = route.split('/').count();

        let literals: Vec<&str> = route
            .split('/')
            .filter(|part| !part.is_empty() && !part.contains(':'))
            .collect();
        let base = format!("/{}", literals.join("/"));

        let base_regex = RegexBuilder::new(&format!("^{base}$"))
            .case_insensitive(true)
            .build()
            .map_err(|source| RouterError::InvalidPattern {
                route: route.clone(),
                source,
            })?;

        Ok(Self {
            route,
            base,
            base_regex,
            param_count,
            segment_count,
        })
    }

    /// The normalized route text.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// The literal base: the route with parameter segments removed.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Whether the route declares any `:param` segment.
    pub const fn has_params(&self) -> bool {
        self.param_count > 0
    }

    /// Number of declared `:param` segments.
    pub const fn param_count(&self) -> usize {
        self.param_count
    }

    /// Number of `/`-separated segments in the normalized route.
    pub const fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Anchored, case-insensitive match of the base against a path base.
    pub fn base_matches(&self, path_base: &str) -> bool {
        self.base_regex.is_match(path_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_without_params() {
        let pattern = RoutePattern::compile("/cli/list").unwrap();
        assert_eq!(pattern.base(), "/cli/list");
        assert_eq!(pattern.param_count(), 0);
        assert!(!pattern.has_params());
    }

    #[test]
    fn test_base_with_params() {
        let pattern = RoutePattern::compile("/register/:name/:age").unwrap();
        assert_eq!(pattern.base(), "/register");
        assert_eq!(pattern.param_count(), 2);
        assert_eq!(pattern.segment_count(), 4);
    }

    #[test]
    fn test_normalizes_route() {
        let pattern = RoutePattern::compile("cli/list/").unwrap();
        assert_eq!(pattern.route(), "/cli/list");
    }

    #[test]
    fn test_regex_segments_preserved() {
        let pattern = RoutePattern::compile("/cli/shop/\\d+/:name/:year").unwrap();
        assert_eq!(pattern.base(), "/cli/shop/\\d+");
        assert!(pattern.base_matches("/cli/shop/567"));
        assert!(!pattern.base_matches("/cli/shop/abc"));
    }

    #[test]
    fn test_base_match_case_insensitive() {
        let pattern = RoutePattern::compile("/cli/list").unwrap();
        assert!(pattern.base_matches("/CLI/List"));
    }

    #[test]
    fn test_base_match_anchored() {
        let pattern = RoutePattern::compile("/cli/list").unwrap();
        assert!(!pattern.base_matches("/cli/list/extra"));
        assert!(!pattern.base_matches("/prefix/cli/list"));
    }

    #[test]
    fn test_optional_group_segment() {
        let pattern = RoutePattern::compile("/cli/shop(s)?/w{3}/:name/:year").unwrap();
        assert!(pattern.base_matches("/cli/shop/www"));
        assert!(pattern.base_matches("/cli/shops/www"));
        assert!(!pattern.base_matches("/cli/shopz/www"));
    }

    #[test]
    fn test_malformed_regex_reported() {
        let err = RoutePattern::compile("/cli/shop([/:name").unwrap_err();
        assert!(matches!(err, RouterError::InvalidPattern { .. }));
        assert!(err.to_string().contains("invalid route pattern"));
    }
}
