use crate::{Context, Error, constants::icon, functions::format::pretty_message};
use std::time::{Duration, Instant};

/// Websocket and API latency
#[poise::command(slash_command, prefix_command, category = "Meta")]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let start = Instant::now();
    let reply = ctx.say(pretty_message(icon::TIMER, "Pinging...")).await?;
    let api_latency = start.elapsed();

    let websocket_latency = {
        let runners = ctx.data().shard_manager.runners.lock().await;
        runners
            .get(&ctx.serenity_context().shard_id)
            .and_then(|runner| runner.latency)
    };

    reply
        .edit(
            ctx,
            poise::CreateReply::default().content(latency_report(websocket_latency, api_latency)),
        )
        .await?;
    Ok(())
}

/// Websocket latency is unknown until the first heartbeat is acknowledged
fn latency_report(websocket: Option<Duration>, api: Duration) -> String {
    let websocket = websocket
        .map(|latency| format!("{} ms", latency.as_millis()))
        .unwrap_or_else(|| "unknown".to_string());
    format!(
        "Pong!\nWebSocket latency: {websocket}\nAPI latency: {} ms",
        api.as_millis()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_unknown_websocket_latency() {
        assert_eq!(
            latency_report(None, Duration::from_millis(42)),
            "Pong!\nWebSocket latency: unknown\nAPI latency: 42 ms"
        );
        assert!(latency_report(Some(Duration::from_millis(7)), Duration::ZERO).contains("7 ms"));
    }
}
