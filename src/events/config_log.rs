use crate::{Context, Error, database::logging};
use poise::serenity_prelude as serenity;
use tracing::debug;

pub const CONFIG_CATEGORY: &str = "Configuration";

/// Commands whose arguments are secrets and never leave the guild
const SECRET_ARGUMENTS: [(&str, &str); 1] = [("logging config", "config")];
const REDACTED: &str = "[redacted]";

/// Mirrors completed configuration commands to the guild's logging webhook
pub async fn record(ctx: Context<'_>) {
    if ctx.command().category.as_deref() != Some(CONFIG_CATEGORY) {
        return;
    }

    if let Err(err) = post(ctx).await {
        debug!(error = %err, "config command log was not delivered");
    }
}

async fn post(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };

    let Some(url) = logging::config_webhook(&ctx.data().database, guild_id.get() as i64).await?
    else {
        return Ok(());
    };

    let content = match ctx {
        poise::Context::Prefix(prefix) => prefix.msg.content.clone(),
        poise::Context::Application(_) => ctx.invocation_string(),
    };

    let command = &ctx.command().qualified_name;
    let body = config_log_message(
        &ctx.author().name,
        ctx.author().id.get(),
        command,
        &redact_arguments(command, &content),
    );

    let serenity_ctx = ctx.serenity_context();
    let webhook = serenity::Webhook::from_url(serenity_ctx, &url).await?;
    webhook
        .execute(
            serenity_ctx,
            false,
            serenity::ExecuteWebhook::new()
                .content(body)
                .allowed_mentions(serenity::CreateAllowedMentions::new()),
        )
        .await?;

    Ok(())
}

/// Hides everything after the subcommand word for commands that take secrets
fn redact_arguments(command: &str, content: &str) -> String {
    let Some((_, last_word)) = SECRET_ARGUMENTS.iter().find(|(name, _)| *name == command) else {
        return content.to_string();
    };

    let words: Vec<&str> = content.split_whitespace().collect();
    match words.iter().position(|word| word.eq_ignore_ascii_case(last_word)) {
        Some(index) if index + 1 < words.len() => {
            format!("{} {REDACTED}", words[..=index].join(" "))
        }
        Some(_) => content.to_string(),
        None => REDACTED.to_string(),
    }
}

fn config_log_message(admin: &str, admin_id: u64, command: &str, content: &str) -> String {
    format!(
        "**On Config Command**\n\
         `Admin  :` **{admin}** (`{admin_id}`)\n\
         `Command:` **{command}**\n\
         `Content:` {content}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_admin_and_command() {
        let message =
            config_log_message("polly", 7, "telephone setup", "?telephone setup #calls");
        assert!(message.starts_with("**On Config Command**\n"));
        assert!(message.contains("**polly** (`7`)"));
        assert!(message.contains("**telephone setup**"));
        assert!(message.ends_with("?telephone setup #calls"));
    }

    #[test]
    fn webhook_url_never_reaches_the_log() {
        let url = "https://discord.com/api/webhooks/1/secret";
        assert_eq!(
            redact_arguments("logging config", &format!("?logging config {url}")),
            "?logging config [redacted]"
        );
        assert_eq!(
            redact_arguments("logging config", &format!("/logging config url: {url}")),
            "/logging config [redacted]"
        );
        assert_eq!(redact_arguments("logging config", "?logging config"), "?logging config");
        assert!(!redact_arguments("logging config", &format!("odd {url}")).contains("secret"));
    }

    #[test]
    fn other_commands_are_logged_verbatim() {
        assert_eq!(
            redact_arguments("telephone setup", "?telephone setup #calls"),
            "?telephone setup #calls"
        );
    }
}
