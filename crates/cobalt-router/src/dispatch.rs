//! Dispatch sequencing: branch registration and deferred handler execution.
//!
//! A [`Dispatch`] owns one cycle's [`Context`] and an ordered ledger of
//! branches. Registration (`when`/`do_always`/`not_found`) evaluates
//! synchronously and mutates the context on a match; handler bodies run
//! only inside [`Dispatch::run`], after every branch of the cycle has been
//! registered.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{debug, error};

use crate::coerce::parse_query;
use crate::context::Context;
use crate::error::{Result, RouterError};
use crate::matcher::{evaluate, MatchOutcome};
use crate::pattern::RoutePattern;
use crate::uri::ParsedUri;

/// A boxed success continuation, run with the enriched context.
pub type Handler = Arc<dyn Fn(Context) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// A boxed error continuation, run with a failed handler's error.
pub type ErrorHandler = Arc<dyn Fn(anyhow::Error) -> BoxFuture<'static, ()> + Send + Sync>;

struct Branch {
    /// What the branch was registered as, for trace output.
    label: String,
    /// A settled branch's success continuation fires in `run`; an unsettled
    /// branch's continuations never fire.
    settled: bool,
    handler: Option<Handler>,
    on_error: Option<ErrorHandler>,
}

/// One dispatch cycle: a context plus the branch ledger built against it.
///
/// Branches are evaluated in registration order; the first matching `when`
/// wins and later `when` calls are skipped without evaluation. The cycle's
/// bookkeeping lives entirely in this value, so repeated or interleaved
/// cycles cannot interfere with one another.
///
/// ```
/// use cobalt_router::{Context, Dispatch};
///
/// # futures::executor::block_on(async {
/// let mut cycle = Dispatch::new(Context::new("/cli/users/55"));
/// cycle
///     .when("/cli/users/:id")?
///     .then(|ctx| async move {
///         println!("user id: {}", ctx.param("id").unwrap());
///         Ok(())
///     })
///     .catch(|err| async move { eprintln!("{err}") });
/// cycle.not_found().then(|ctx| async move {
///     println!("no route for {}", ctx.uri);
///     Ok(())
/// });
/// cycle.run().await;
/// # Ok::<(), cobalt_router::RouterError>(())
/// # }).unwrap();
/// ```
pub struct Dispatch {
    ctx: Context,
    branches: Vec<Branch>,
    /// Settled `when` branches this cycle; reset by the fallback check.
    matched: usize,
}

impl Dispatch {
    /// Starts a dispatch cycle for the given context.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            branches: Vec::new(),
            matched: 0,
        }
    }

    /// The context as registered branches have left it so far.
    pub const fn context(&self) -> &Context {
        &self.ctx
    }

    /// Whether any `when` branch has matched since the last fallback check.
    pub const fn has_match(&self) -> bool {
        self.matched > 0
    }

    /// Registers a route branch.
    ///
    /// Compiles the route, decomposes the cycle's URI against it and
    /// evaluates. On a match the context is enriched in place (`req.query`
    /// when a query string is present, `req.params` on a parametrized
    /// match) and the branch settles. Once a `when` branch has settled,
    /// later `when` calls skip evaluation entirely: first match wins.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] when the route's embedded
    /// regex does not compile.
    pub fn when(&mut self, route: &str) -> Result<BranchHandle<'_>> {
        let pattern = RoutePattern::compile(route)?;

        let settled = if self.has_match() {
            if self.ctx.opts.debug {
                debug!(route = pattern.route(), "skipped, cycle already matched");
            }
            false
        } else {
            self.evaluate_branch(&pattern)
        };

        if settled {
            self.matched += 1;
        }
        let label = format!("when {}", pattern.route());
        Ok(self.push(label, settled))
    }

    /// Registers a branch that settles for every URI.
    ///
    /// Used for cross-cutting effects; does not count as a match.
    pub fn do_always(&mut self) -> BranchHandle<'_> {
        self.push("do".to_string(), true)
    }

    /// Registers the fallback branch.
    ///
    /// Settles iff no `when` branch has matched this cycle. The match
    /// bookkeeping is reset after the check, so the caller must register
    /// this after all `when` calls.
    pub fn not_found(&mut self) -> BranchHandle<'_> {
        let settled = self.matched == 0;
        self.matched = 0;
        if settled && self.ctx.opts.debug {
            debug!(uri = %self.ctx.uri, "no route matched");
        }
        self.push("notfound".to_string(), settled)
    }

    /// Runs the settled branches' continuations in registration order and
    /// returns the final context.
    ///
    /// A handler error is delivered to that branch's error continuation
    /// (or logged when none is attached) and never disturbs sibling
    /// branches. Unsettled branches are dropped here without their
    /// continuations ever firing.
    pub async fn run(mut self) -> Context {
        let branches = std::mem::take(&mut self.branches);
        for branch in branches {
            if !branch.settled {
                continue;
            }
            let Some(handler) = branch.handler else {
                continue;
            };
            if let Err(err) = handler(self.ctx.clone()).await {
                match branch.on_error {
                    Some(on_error) => on_error(err).await,
                    None => error!(branch = %branch.label, error = %err, "handler failed"),
                }
            }
        }
        self.ctx
    }

    /// Evaluates one pattern against the cycle's URI, applying context
    /// mutations on a match.
    fn evaluate_branch(&mut self, pattern: &RoutePattern) -> bool {
        let parsed = ParsedUri::parse(&self.ctx.uri, pattern);
        if self.ctx.opts.debug {
            debug!(
                uri = %self.ctx.uri,
                route = pattern.route(),
                base = pattern.base(),
                path = %parsed.path,
                path_base = %parsed.path_base,
                "evaluating route"
            );
        }

        match evaluate(pattern, &parsed) {
            MatchOutcome::Exact => {
                self.apply_query(&parsed);
                if self.ctx.opts.debug {
                    debug!(route = pattern.route(), "exact match");
                }
                true
            }
            MatchOutcome::Parametrized { params } => {
                self.apply_query(&parsed);
                self.ctx.req.params = Some(params);
                if self.ctx.opts.debug {
                    debug!(route = pattern.route(), "parametrized match");
                }
                true
            }
            MatchOutcome::NoMatch => {
                if self.ctx.opts.debug {
                    debug!(route = pattern.route(), "no match");
                }
                false
            }
        }
    }

    fn apply_query(&mut self, parsed: &ParsedUri) {
        if let Some(qs) = &parsed.querystring {
            self.ctx.req.query = Some(parse_query(qs));
        }
    }

    fn push(&mut self, label: String, settled: bool) -> BranchHandle<'_> {
        self.branches.push(Branch {
            label,
            settled,
            handler: None,
            on_error: None,
        });
        let index = self.branches.len() - 1;
        BranchHandle {
            dispatch: self,
            index,
        }
    }
}

/// A just-registered branch, ready for continuation attachment.
pub struct BranchHandle<'a> {
    dispatch: &'a mut Dispatch,
    index: usize,
}

impl std::fmt::Debug for BranchHandle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BranchHandle")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<'a> BranchHandle<'a> {
    /// Continues a matched branch under a different route.
    ///
    /// Re-enters evaluation for `new_route` against a synthetic URI formed
    /// from the target path plus the original query string, so the
    /// target's own match logic (including query re-parsing) applies; the
    /// branch then delivers the re-evaluated context. An unsettled branch
    /// is left unchanged, and later `when` registrations still evaluate
    /// the original URI.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] for an uncompilable target
    /// and [`RouterError::RedirectUnmatched`] for a target that declares
    /// parameters (no parameter values exist for a redirect).
    pub fn redirect(self, new_route: &str) -> Result<Self> {
        let pattern = RoutePattern::compile(new_route)?;
        if pattern.has_params() {
            return Err(RouterError::RedirectUnmatched {
                route: pattern.route().to_string(),
            });
        }

        if self.dispatch.branches[self.index].settled {
            if self.dispatch.ctx.opts.debug {
                debug!(target = pattern.route(), "redirect");
            }
            let target_uri = match self.dispatch.ctx.uri.split_once('?') {
                Some((_, qs)) if !qs.is_empty() => format!("{}?{qs}", pattern.route()),
                _ => pattern.route().to_string(),
            };
            let parsed = ParsedUri::parse(&target_uri, &pattern);
            if evaluate(&pattern, &parsed).is_match() {
                self.dispatch.apply_query(&parsed);
            }
        }

        Ok(self)
    }

    /// Attaches the success continuation: run with the enriched context
    /// once the branch settles.
    pub fn then<F, Fut>(self, handler: F) -> Self
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.dispatch.branches[self.index].handler =
            Some(Arc::new(move |ctx| Box::pin(handler(ctx))));
        self
    }

    /// Attaches the error continuation: run iff the success continuation
    /// fails. Exactly one of the two fires per settled branch.
    pub fn catch<F, Fut>(self, on_error: F) -> Self
    where
        F: Fn(anyhow::Error) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.dispatch.branches[self.index].on_error =
            Some(Arc::new(move |err| Box::pin(on_error(err))));
        self
    }
}
