use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use stk_server::{HttpServer, Router};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ServeArgs;
use crate::context::AppContext;

/// Handle `stk serve`. Runs until Ctrl-C.
pub async fn handle(
    args: &ServeArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let bind = resolve_bind(args, ctx)?;
    if !ctx.config.auth.is_configured() {
        tracing::warn!("no auth.users configured; every request will be rejected with 401");
    }

    let router = Router::new(Arc::clone(&ctx.service), Arc::clone(&ctx.tokens))
        .context("failed to build request router")?;
    let server = HttpServer::bind(
        &bind.to_string(),
        router,
        ctx.config.server.workers,
        ctx.config.server.max_body_bytes,
    )?;
    let handle = server.shutdown_handle();

    if !flags.quiet {
        let addr = server.local_addr().unwrap_or(bind);
        eprintln!("stockroom listening on http://{addr} (data: {})", ctx.data_dir.display());
    }

    let serving = tokio::task::spawn_blocking(move || server.run());
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    tracing::info!("shutting down");
    handle.shutdown();
    serving.await.context("server thread panicked")?;
    Ok(())
}

fn resolve_bind(args: &ServeArgs, ctx: &AppContext) -> anyhow::Result<SocketAddr> {
    match &args.bind {
        Some(bind) => bind
            .parse()
            .with_context(|| format!("invalid --bind '{bind}': expected host:port")),
        None => Ok(ctx.config.server.bind_addr()?),
    }
}
