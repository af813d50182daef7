//! Match evaluation.

use std::collections::HashMap;

use crate::coerce::{extract_params, Value};
use crate::pattern::RoutePattern;
use crate::uri::ParsedUri;

/// The outcome of evaluating one (URI, route) pair.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// The full route matches the full path with no parameter extraction.
    Exact,
    /// Named route segments bound to same-position path segments.
    Parametrized {
        /// Extracted, coerced parameters.
        params: HashMap<String, Value>,
    },
    /// The route does not match the path.
    NoMatch,
}

impl MatchOutcome {
    /// Whether this outcome is a match of either kind.
    pub const fn is_match(&self) -> bool {
        !matches!(self, Self::NoMatch)
    }
}

/// Evaluates one decomposed URI against one compiled route.
///
/// Precedence:
/// 1. Exact: the route equals the path verbatim, or the base regex matches
///    the path base, and the route declares no parameters.
/// 2. Parametrized: the route declares parameters, the path shares the
///    structural base (prefix or regex), and the segment counts are equal.
///    The segment-count guard keeps `/cli/users/55/extra` from satisfying
///    `/cli/users/:id`.
/// 3. No match otherwise.
///
/// Pure: no context is touched here; query and parameter mutations are the
/// dispatch stage's job. Evaluating the same pair twice yields the same
/// outcome.
pub fn evaluate(pattern: &RoutePattern, parsed: &ParsedUri) -> MatchOutcome {
    let base_match = pattern.base_matches(&parsed.path_base);

    if !pattern.has_params() {
        if pattern.route() == parsed.path || base_match {
            return MatchOutcome::Exact;
        }
        return MatchOutcome::NoMatch;
    }

    if (parsed.path.starts_with(pattern.base()) || base_match)
        && parsed.segment_count() == pattern.segment_count()
    {
        return MatchOutcome::Parametrized {
            params: extract_params(&parsed.path, pattern.route()),
        };
    }

    MatchOutcome::NoMatch
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(route: &str, uri: &str) -> MatchOutcome {
        let pattern = RoutePattern::compile(route).unwrap();
        let parsed = ParsedUri::parse(uri, &pattern);
        evaluate(&pattern, &parsed)
    }

    #[test]
    fn test_exact_match_slash_insensitive() {
        assert_eq!(eval("/cli/list", "/cli/list"), MatchOutcome::Exact);
        assert_eq!(eval("/cli/list", "cli/list/"), MatchOutcome::Exact);
        assert_eq!(eval("/cli/list/", "cli/list"), MatchOutcome::Exact);
    }

    #[test]
    fn test_exact_match_with_querystring() {
        assert_eq!(
            eval("/cli/login", "/cli/login?username=peter&password=pan"),
            MatchOutcome::Exact
        );
    }

    #[test]
    fn test_exact_regex_route() {
        assert_eq!(eval("/cli/get.+/[0-9]+", "/cli/getnames/12345"), MatchOutcome::Exact);
        assert_eq!(eval("/cli/get.+/[0-9]+", "/cli/getname/12"), MatchOutcome::Exact);
        assert_eq!(eval("/cli/get.+/[0-9]+", "/cli/getname/abc"), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_no_partial_exact_match() {
        assert_eq!(eval("/cli/list", "/cli/lis"), MatchOutcome::NoMatch);
        assert_eq!(eval("/cli/list", "/cli/list/bad"), MatchOutcome::NoMatch);
        assert_eq!(eval("/cli/list", "/cli"), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_parametrized_match() {
        let MatchOutcome::Parametrized { params } = eval("/cli/users/:id", "/cli/users/55") else {
            panic!("expected parametrized match");
        };
        assert_eq!(params.get("id"), Some(&Value::Int(55)));
    }

    #[test]
    fn test_parametrized_coercion() {
        let MatchOutcome::Parametrized { params } =
            eval("/cli/register/:name/:year/:employed", "/cli/register/john/23/true")
        else {
            panic!("expected parametrized match");
        };
        assert_eq!(params.get("name"), Some(&Value::Str("john".into())));
        assert_eq!(params.get("year"), Some(&Value::Int(23)));
        assert_eq!(params.get("employed"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_segment_count_mismatch() {
        assert_eq!(eval("/cli/users/:id", "/cli/users/55/extra"), MatchOutcome::NoMatch);
        assert_eq!(eval("/cli/users/:id", "/cli/users"), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_parametrized_regex_route() {
        let MatchOutcome::Parametrized { params } = eval(
            "/cli/shop/\\d+/:name/:year/:color",
            "/cli/shop/567/BetaShop/1978/red",
        ) else {
            panic!("expected parametrized match");
        };
        assert_eq!(params.get("name"), Some(&Value::Str("BetaShop".into())));
        assert_eq!(params.get("year"), Some(&Value::Int(1978)));
        assert_eq!(params.get("color"), Some(&Value::Str("red".into())));
        assert!(params.get("id").is_none());

        assert_eq!(
            eval("/cli/shop/\\d+/:name/:year/:color", "/cli/shop/abc/BetaShop/1978/red"),
            MatchOutcome::NoMatch
        );
    }

    #[test]
    fn test_short_uri_never_panics() {
        assert_eq!(
            eval("/cli/register/:name/:year/:employed", "/cli"),
            MatchOutcome::NoMatch
        );
        assert_eq!(eval("/cli/users/:id", "/"), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let pattern = RoutePattern::compile("/cli/register/:name/:year").unwrap();
        let parsed = ParsedUri::parse("/cli/register/john/23", &pattern);
        let first = evaluate(&pattern, &parsed);
        let second = evaluate(&pattern, &parsed);
        assert_eq!(first, second);
        assert!(first.is_match());
    }
}
