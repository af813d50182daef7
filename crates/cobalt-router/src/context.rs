//! The per-dispatch context object.

use std::collections::HashMap;

use crate::coerce::Value;

/// Request data carried through a dispatch cycle.
///
/// `params` and `query` start out absent and are populated by the engine
/// when a route matches; `body` is whatever payload the caller supplied.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Arbitrary payload supplied by the caller.
    pub body: serde_json::Value,
    /// Positional parameters, populated on a parametrized match.
    pub params: Option<HashMap<String, Value>>,
    /// Query parameters, populated when the URI carries a query string.
    pub query: Option<HashMap<String, Value>>,
}

/// Engine options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Opts {
    /// Emit per-evaluation trace events.
    pub debug: bool,
}

/// The context delivered to handlers.
///
/// One `Context` exists per dispatch cycle; the engine mutates
/// `req.params`/`req.query` in place when a route matches, and every
/// settled branch's handler receives a clone of the enriched context.
#[derive(Debug, Clone)]
pub struct Context {
    /// The raw incoming URI, e.g. `/cli/register/john/23/true?x=1`.
    pub uri: String,
    /// Request data.
    pub req: Request,
    /// Engine options.
    pub opts: Opts,
}

impl Context {
    /// Creates a context for the given URI with an empty body.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            req: Request::default(),
            opts: Opts::default(),
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.req.body = body;
        self
    }

    /// Enables per-evaluation trace events.
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.opts.debug = debug;
        self
    }

    /// Gets a positional parameter, if a parametrized match populated it.
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.req.params.as_ref().and_then(|p| p.get(name))
    }

    /// Gets a query parameter, if the URI carried a query string.
    pub fn query(&self, name: &str) -> Option<&Value> {
        self.req.query.as_ref().and_then(|q| q.get(name))
    }
}
