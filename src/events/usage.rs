use crate::{Context, database::usage};
use tracing::{info, warn};

/// Logs the invocation and bumps the command's usage counter
pub async fn record(ctx: Context<'_>) {
    let command = ctx.command().qualified_name.clone();
    info!(
        command = %command,
        user = %ctx.author().name,
        guild = ?ctx.guild_id().map(|id| id.get()),
        "command invoked"
    );

    if ctx.author().bot {
        return;
    }

    if let Err(err) = usage::increment(&ctx.data().database, &command).await {
        warn!(command = %command, error = %err, "failed to record command usage");
    }
}
