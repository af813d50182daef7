//! Query-string and parameter parsing with scalar coercion.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// A coerced scalar extracted from a query string or a path segment.
///
/// Raw segment text is coerced with a fixed precedence: integer, then
/// finite float, then boolean literal, else the string is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A whole number, e.g. `"123"` or `"-5"`.
    Int(i64),
    /// A finite floating-point number, e.g. `"12.5"` or `"1e3"`.
    Float(f64),
    /// The literal `"true"` or `"false"`.
    Bool(bool),
    /// Anything else, kept verbatim.
    Str(String),
}

impl Value {
    /// Returns the integer value, if this is an `Int`.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float value, if this is a `Float`.
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a `Bool`.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string value, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// Coerces raw segment text into a [`Value`].
///
/// Total over all inputs. Rules, first applicable wins:
/// 1. the whole string parses as `i64` (no decimal point),
/// 2. the whole string parses as a finite `f64` (`"NaN"`, `"inf"` and
///    `"infinity"` parse but are not finite, so they fall through),
/// 3. the literal `"true"` or `"false"`,
/// 4. otherwise the string itself.
pub fn coerce(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return Value::Int(n);
    }
    if let Ok(x) = raw.parse::<f64>() {
        if x.is_finite() {
            return Value::Float(x);
        }
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::Str(raw.to_string()),
    }
}

/// Parses a query string into coerced key/value pairs.
///
/// Pairs are split on `&`, each pair on the first `=`; a pair without `=`
/// maps to an empty string value.
///
/// # Example
///
/// ```
/// use cobalt_router::{parse_query, Value};
///
/// let query = parse_query("x=abc&y=123&z=true");
/// assert_eq!(query.get("x"), Some(&Value::Str("abc".into())));
/// assert_eq!(query.get("y"), Some(&Value::Int(123)));
/// assert_eq!(query.get("z"), Some(&Value::Bool(true)));
/// ```
pub fn parse_query(querystring: &str) -> HashMap<String, Value> {
    querystring
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (key.to_string(), coerce(value))
        })
        .collect()
}

/// Extracts named parameters by walking route segments in lockstep with
/// path segments.
///
/// For every route segment starting with `:`, the colon is stripped for the
/// parameter name and the same-position path segment becomes the coerced
/// value. The caller guarantees equal segment counts.
pub fn extract_params(path: &str, route: &str) -> HashMap<String, Value> {
    route
        .split('/')
        .zip(path.split('/'))
        .filter_map(|(route_part, path_part)| {
            route_part
                .strip_prefix(':')
                .map(|name| (name.to_string(), coerce(path_part)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_integers() {
        assert_eq!(coerce("123"), Value::Int(123));
        assert_eq!(coerce("-5"), Value::Int(-5));
        assert_eq!(coerce("0"), Value::Int(0));
    }

    #[test]
    fn test_coerce_floats() {
        assert_eq!(coerce("12.5"), Value::Float(12.5));
        assert_eq!(coerce("-0.25"), Value::Float(-0.25));
        // No decimal point, but a full float parse.
        assert_eq!(coerce("1e3"), Value::Float(1000.0));
    }

    #[test]
    fn test_coerce_booleans() {
        assert_eq!(coerce("true"), Value::Bool(true));
        assert_eq!(coerce("false"), Value::Bool(false));
        // Not the exact literals.
        assert_eq!(coerce("True"), Value::Str("True".into()));
        assert_eq!(coerce("FALSE"), Value::Str("FALSE".into()));
    }

    #[test]
    fn test_coerce_boundaries() {
        assert_eq!(coerce(""), Value::Str(String::new()));
        assert_eq!(coerce("abc"), Value::Str("abc".into()));
        // Non-finite parses stay strings.
        assert_eq!(coerce("NaN"), Value::Str("NaN".into()));
        assert_eq!(coerce("inf"), Value::Str("inf".into()));
        assert_eq!(coerce("infinity"), Value::Str("infinity".into()));
        // Whitespace is not trimmed.
        assert_eq!(coerce(" 5"), Value::Str(" 5".into()));
    }

    #[test]
    fn test_coerce_idempotent_display() {
        assert_eq!(coerce("12.5").to_string(), "12.5");
        assert_eq!(coerce("123").to_string(), "123");
        assert_eq!(coerce("true").to_string(), "true");
    }

    #[test]
    fn test_parse_query() {
        let query = parse_query("username=peter&password=pan");
        assert_eq!(query.get("username"), Some(&Value::Str("peter".into())));
        assert_eq!(query.get("password"), Some(&Value::Str("pan".into())));
    }

    #[test]
    fn test_parse_query_coercion() {
        let query = parse_query("x=123&y=abc&z=false&w=12.5");
        assert_eq!(query.get("x"), Some(&Value::Int(123)));
        assert_eq!(query.get("y"), Some(&Value::Str("abc".into())));
        assert_eq!(query.get("z"), Some(&Value::Bool(false)));
        assert_eq!(query.get("w"), Some(&Value::Float(12.5)));
    }

    #[test]
    fn test_parse_query_missing_value() {
        let query = parse_query("flag&key=");
        assert_eq!(query.get("flag"), Some(&Value::Str(String::new())));
        assert_eq!(query.get("key"), Some(&Value::Str(String::new())));
    }

    #[test]
    fn test_parse_query_value_with_equals() {
        // Only the first `=` splits the pair.
        let query = parse_query("token=a=b");
        assert_eq!(query.get("token"), Some(&Value::Str("a=b".into())));
    }

    #[test]
    fn test_extract_params() {
        let params = extract_params("/register/john/23", "/register/:name/:age");
        assert_eq!(params.get("name"), Some(&Value::Str("john".into())));
        assert_eq!(params.get("age"), Some(&Value::Int(23)));
    }

    #[test]
    fn test_extract_params_skips_literals() {
        let params = extract_params("/cli/users/55", "/cli/users/:id");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("id"), Some(&Value::Int(55)));
    }
}
