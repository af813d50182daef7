//! cobalt CLI
//!
//! Demo command-line front end for the cobalt-router dispatch engine.
//! Takes one JSON envelope argument and dispatches its `cmd` URI against
//! the declared route table:
//!
//! ```text
//! cobalt '{"cmd": "/cli/list", "data": [{"id": 12}, {"id": 13}]}'
//! cobalt '{"cmd": "/cli/register/john/23/true?x=123&y=abc", "data": {"nick": "johnny"}}'
//! cobalt '{"cmd": "/cli/shop/567/BetaShop/1978/red", "data": {}}'
//! cobalt --verbose '{"cmd": "cli/users/55/", "data": [{"id": 55, "name": "Dean"}]}'
//! ```

use anyhow::Context as _;
use clap::Parser;
use serde::Deserialize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cobalt_router::{Context, Dispatch};

mod handlers;

/// URI route matching and dispatch for command-line front ends.
#[derive(Parser)]
#[command(name = "cobalt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON command envelope, e.g. '{"cmd": "/cli/list", "data": []}'.
    command: String,

    /// Enable verbose output (engine evaluation traces).
    #[arg(short, long)]
    verbose: bool,
}

/// The inbound command envelope.
#[derive(Debug, Deserialize)]
struct Command {
    cmd: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Malformed input is fatal at the boundary, never recovered downstream.
    let command: Command =
        serde_json::from_str(&cli.command).context("command is not a valid JSON envelope")?;

    let ctx = Context::new(command.cmd)
        .body(command.data)
        .debug(cli.verbose);

    dispatch(ctx).await?;
    Ok(())
}

/// Registers the demo route table and runs one dispatch cycle.
async fn dispatch(ctx: Context) -> cobalt_router::Result<()> {
    let mut cycle = Dispatch::new(ctx);

    // Exact matches.
    cycle
        .when("/cli/list")?
        .then(handlers::list)
        .catch(handlers::err_log);
    cycle
        .when("/cli/listall")?
        .redirect("/cli/list")?
        .then(handlers::list)
        .catch(handlers::err_log);
    cycle
        .when("/cli/getname/firstname/")?
        .then(handlers::getname)
        .catch(handlers::err_log);
    cycle
        .when("/cli/login")?
        .then(handlers::login)
        .catch(handlers::err_log);
    cycle
        .when("/cli/get.+/[0-9]+")?
        .then(handlers::getname)
        .catch(handlers::err_log);

    // Parametrized matches.
    cycle
        .when("/cli/users/:id")?
        .then(handlers::get_user_by_id)
        .catch(handlers::err_log);
    cycle
        .when("/cli/register/:name/:year/:employed")?
        .then(handlers::register)
        .catch(handlers::err_log);
    cycle
        .when("/cli/shop(s)?/w{3}/:name/:year")?
        .then(handlers::shop)
        .catch(handlers::err_log);
    cycle
        .when("/cli/shop/\\d+/:name/:year/:color")?
        .then(handlers::shop)
        .catch(handlers::err_log);

    // Fallback, after all `when` calls.
    cycle
        .not_found()
        .then(handlers::not_found)
        .catch(handlers::err_log);

    // Runs for every command.
    cycle
        .do_always()
        .then(handlers::always)
        .catch(handlers::err_log);

    cycle.run().await;
    Ok(())
}
