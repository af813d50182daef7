//! # cobalt-router
//!
//! URI route matching and dispatch for command-line front ends.
//!
//! Given an incoming URI-like command string (a path plus optional query
//! string) and a set of declared route patterns, this crate decides which
//! pattern matches, extracts positional and query parameters with automatic
//! scalar coercion, and delivers a populated [`Context`] to exactly one
//! handler.
//!
//! This crate provides:
//! - Path matching with `:name` parameter segments
//! - Inline regular-expression fragments inside route segments
//! - Automatic coercion of parameter and query values (int, float, bool,
//!   string)
//! - First-match-wins dispatch with a deterministic not-found fallback
//! - Per-branch success and error continuations
//!
//! ## Quick Start
//!
//! ```ignore
//! use cobalt_router::{Context, Dispatch};
//!
//! let ctx = Context::new("/cli/register/john/23/true?x=1")
//!     .body(serde_json::json!({"nick": "johnny"}));
//!
//! let mut cycle = Dispatch::new(ctx);
//!
//! cycle.when("/cli/list")?
//!     .then(|ctx| async move { /* ... */ Ok(()) })
//!     .catch(|err| async move { eprintln!("{err}") });
//!
//! cycle.when("/cli/register/:name/:year/:employed")?
//!     .then(|ctx| async move {
//!         println!("params: {:?}", ctx.req.params);
//!         println!("query:  {:?}", ctx.req.query);
//!         Ok(())
//!     })
//!     .catch(|err| async move { eprintln!("{err}") });
//!
//! // Runs iff no route above matched. Register after all `when` calls.
//! cycle.not_found().then(|ctx| async move {
//!     println!("no route for {}", ctx.uri);
//!     Ok(())
//! });
//!
//! // Runs for every URI.
//! cycle.do_always().then(|_ctx| async move { Ok(()) });
//!
//! // Handler bodies run only here, after all branches are registered.
//! cycle.run().await;
//! ```
//!
//! ## Route Syntax
//!
//! Routes are `/`-separated patterns. A segment starting with `:` binds the
//! same-position path segment as a named parameter:
//!
//! ```ignore
//! cycle.when("/cli/users/:id")?          // /cli/users/55  -> id = 55
//! ```
//!
//! Any segment (or the whole route) may be a regular-expression fragment,
//! matched case-insensitively and fully anchored against the path base:
//!
//! ```ignore
//! cycle.when("/cli/shop/\\d+/:name/:year/:color")?
//! cycle.when("/cli/get.+/[0-9]+")?
//! ```
//!
//! Leading slashes are added and a single trailing slash is stripped on
//! both sides, so `cli/list/` and `/cli/list` are equivalent.
//!
//! ## Coercion
//!
//! Parameter and query values coerce with a fixed precedence: integer,
//! finite float, boolean literal, else string.
//!
//! ```
//! use cobalt_router::{coerce, Value};
//!
//! assert_eq!(coerce("123"), Value::Int(123));
//! assert_eq!(coerce("12.5"), Value::Float(12.5));
//! assert_eq!(coerce("true"), Value::Bool(true));
//! assert_eq!(coerce("abc"), Value::Str("abc".into()));
//! ```

mod coerce;
mod context;
mod dispatch;
mod error;
mod matcher;
mod pattern;
mod uri;

pub use coerce::{coerce, extract_params, parse_query, Value};
pub use context::{Context, Opts, Request};
pub use dispatch::{BranchHandle, Dispatch, ErrorHandler, Handler};
pub use error::{Result, RouterError};
pub use matcher::{evaluate, MatchOutcome};
pub use pattern::RoutePattern;
pub use uri::ParsedUri;
