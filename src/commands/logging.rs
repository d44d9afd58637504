use crate::{
    Context, Error,
    constants::icon,
    database::logging,
    events::config_log::CONFIG_CATEGORY,
    functions::format::pretty_message,
};
use poise::serenity_prelude as serenity;

const WEBHOOK_PREFIXES: [&str; 3] = [
    "https://discord.com/api/webhooks/",
    "https://discordapp.com/api/webhooks/",
    "https://canary.discord.com/api/webhooks/",
];

/// Log configuration commands to a webhook
#[poise::command(
    prefix_command,
    slash_command,
    subcommands("config", "remove"),
    subcommand_required,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    category = "Configuration"
)]
pub async fn logging(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Send configuration command logs to this webhook
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    category = "Configuration"
)]
pub async fn config(
    ctx: Context<'_>,
    #[description = "Webhook URL"] url: String,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };

    if let poise::Context::Prefix(prefix) = ctx {
        let _ = prefix.msg.delete(ctx.serenity_context()).await;
    }

    let url = url.trim();
    let usable = is_webhook_url(url)
        && serenity::Webhook::from_url(ctx.serenity_context(), url)
            .await
            .is_ok();
    if !usable {
        ctx.send(
            poise::CreateReply::default()
                .content(pretty_message(icon::ERROR, "That is not a usable webhook URL."))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    logging::set_config_webhook(&ctx.data().database, guild_id.get() as i64, url).await?;
    ctx.say(pretty_message(
        icon::CHECK,
        format!("`{CONFIG_CATEGORY}` commands will be logged to the webhook."),
    ))
    .await?;
    Ok(())
}

/// Stop logging configuration commands
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    category = "Configuration"
)]
pub async fn remove(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };

    let removed =
        logging::remove_config_webhook(&ctx.data().database, guild_id.get() as i64).await?;
    let reply = match removed {
        0 => pretty_message(icon::ERROR, "No logging webhook was set."),
        _ => pretty_message(icon::MINUS, "Configuration commands are no longer logged."),
    };
    ctx.say(reply).await?;
    Ok(())
}

pub fn is_webhook_url(url: &str) -> bool {
    WEBHOOK_PREFIXES
        .iter()
        .filter_map(|prefix| url.strip_prefix(prefix))
        .any(|rest| {
            let mut parts = rest.split('/');
            let id = parts.next().unwrap_or_default();
            let token = parts.next().unwrap_or_default();
            !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) && !token.is_empty()
        })
}

#[cfg(test)]
mod tests {
    use super::is_webhook_url;

    #[test]
    fn only_discord_webhooks_are_accepted() {
        assert!(is_webhook_url("https://discord.com/api/webhooks/123/abc-DEF"));
        assert!(is_webhook_url("https://discordapp.com/api/webhooks/9/t"));
        assert!(!is_webhook_url("https://discord.com/api/webhooks/abc/token"));
        assert!(!is_webhook_url("https://discord.com/api/webhooks/123"));
        assert!(!is_webhook_url("https://example.com/api/webhooks/123/abc"));
    }
}
