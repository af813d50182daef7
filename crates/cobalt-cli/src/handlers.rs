//! Demo handlers: print formatting and error logging only.

use anyhow::anyhow;
use tracing::{debug, error};

use cobalt_router::{Context, Value};

/// Prints the ids carried in the body payload.
pub async fn list(ctx: Context) -> anyhow::Result<()> {
    let items = ctx
        .req
        .body
        .as_array()
        .ok_or_else(|| anyhow!("list expects an array body"))?;
    for item in items {
        println!("id: {}", item["id"]);
    }
    Ok(())
}

/// Prints the name carried in the body payload.
pub async fn getname(ctx: Context) -> anyhow::Result<()> {
    let name = ctx.req.body["name"]
        .as_str()
        .ok_or_else(|| anyhow!("body carries no name"))?;
    println!("Name: {name}");
    Ok(())
}

/// Prints the credentials from the query string.
pub async fn login(ctx: Context) -> anyhow::Result<()> {
    let username = ctx
        .query("username")
        .ok_or_else(|| anyhow!("missing username"))?;
    let password = ctx
        .query("password")
        .ok_or_else(|| anyhow!("missing password"))?;
    println!("Logging in {username}:{password}");
    Ok(())
}

/// Looks up a user record in the body array by the `id` parameter.
pub async fn get_user_by_id(ctx: Context) -> anyhow::Result<()> {
    let id = ctx
        .param("id")
        .and_then(Value::as_int)
        .ok_or_else(|| anyhow!("missing id parameter"))?;
    let users = ctx
        .req
        .body
        .as_array()
        .ok_or_else(|| anyhow!("users expects an array body"))?;
    let user = users
        .iter()
        .find(|user| user["id"].as_i64() == Some(id))
        .ok_or_else(|| anyhow!("no user with id {id}"))?;
    println!("Selected user is: {}", user["name"].as_str().unwrap_or("?"));
    Ok(())
}

/// Dumps the registration parameters, query and body.
pub async fn register(ctx: Context) -> anyhow::Result<()> {
    println!("QUERY:  {:?}", ctx.req.query);
    println!("PARAMS: {:?}", ctx.req.params);
    println!("BODY:   {}", ctx.req.body);
    Ok(())
}

/// Prints the shop parameters.
pub async fn shop(ctx: Context) -> anyhow::Result<()> {
    let params = ctx
        .req
        .params
        .as_ref()
        .ok_or_else(|| anyhow!("shop expects parameters"))?;
    let name = params.get("name").ok_or_else(|| anyhow!("missing name"))?;
    let year = params.get("year").ok_or_else(|| anyhow!("missing year"))?;
    println!("Shop {name}, established {year}");
    if let Some(color) = params.get("color") {
        println!("Color: {color}");
    }
    Ok(())
}

/// Fallback for commands no route matches.
pub async fn not_found(ctx: Context) -> anyhow::Result<()> {
    println!("Error 404: no route matches {}", ctx.uri);
    Ok(())
}

/// Cross-cutting trace, runs for every command.
pub async fn always(ctx: Context) -> anyhow::Result<()> {
    debug!(uri = %ctx.uri, "command handled");
    Ok(())
}

/// Shared error continuation.
pub async fn err_log(err: anyhow::Error) {
    error!(error = %err, "handler error");
}
