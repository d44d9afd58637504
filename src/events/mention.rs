use crate::{
    Data, Error,
    constants::{colors, links},
    functions::format::{
        discord::{inline_code, mention},
        human_join, indented_entry_to_code,
    },
};
use poise::{
    self, BoxFuture,
    serenity_prelude::{self as serenity, CreateActionRow, CreateButton, Mentionable},
};
use tokio::time::{Duration, sleep};

const AUTO_DELETE_AFTER: Duration = Duration::from_secs(30);

pub fn event_handler<'a>(
    ctx: &'a serenity::Context,
    framework: poise::FrameworkContext<'a, Data, Error>,
    event: &'a serenity::FullEvent,
) -> BoxFuture<'a, Result<(), Error>> {
    Box::pin(async move { handle_mention(ctx, framework, event).await })
}

async fn handle_mention(
    ctx: &serenity::Context,
    framework: poise::FrameworkContext<'_, Data, Error>,
    event: &serenity::FullEvent,
) -> Result<(), Error> {
    let serenity::FullEvent::Message { new_message } = event else {
        return Ok(());
    };

    if new_message.author.bot || new_message.guild_id.is_none() {
        return Ok(());
    }

    if !is_bare_mention(&new_message.content, framework.bot_id.get()) {
        return Ok(());
    }

    let literal_prefixes = collect_literal_prefixes(&framework.options.prefix_options);

    let version = env!("CARGO_PKG_VERSION");
    let rust_version = option_env!("PARROT_RUSTC_VERSION").unwrap_or("unknown");
    let serenity_version = option_env!("PARROT_SERENITY_VERSION").unwrap_or("unknown");
    let poise_version = option_env!("PARROT_POISE_VERSION").unwrap_or("unknown");
    let shard_count = framework.shard_manager().runners.lock().await.len();
    let cache = &ctx.cache;
    let guild_count = cache.guild_count();
    let user_count = cache.user_count();
    let avatar_url = {
        let current = cache.current_user();
        current
            .avatar_url()
            .unwrap_or_else(|| current.default_avatar_url())
    };

    let version_field = indented_entry_to_code(&[
        ("app", version),
        ("rust", rust_version),
        ("serenity", serenity_version),
        ("poise", poise_version),
    ]);

    let stats_field = indented_entry_to_code(&[
        ("servers", guild_count),
        ("users", user_count),
        ("shards", shard_count),
    ]);

    let description = format!(
        "Hey {}, {}\n{}\nHere are a few quick details:",
        new_message.author.mention(),
        prefix_sentence(&literal_prefixes),
        help_hint(&literal_prefixes),
    );

    let embed = serenity::CreateEmbed::new()
        .description(description)
        .thumbnail(avatar_url)
        .color(colors::PARROT)
        .field("Versions", version_field, false)
        .field("Statistics", stats_field, false)
        .footer(serenity::CreateEmbedFooter::new(
            "Automatic reply • removed in 30s",
        ));

    let row = vec![CreateActionRow::Buttons(vec![
        CreateButton::new_link(links::SOURCE_REPO).label("Source"),
    ])];

    let response = new_message
        .channel_id
        .send_message(
            ctx,
            serenity::CreateMessage::new().embed(embed).components(row),
        )
        .await?;

    let http = ctx.http.clone();
    let channel_id = response.channel_id;
    let message_id = response.id;
    tokio::spawn(async move {
        sleep(AUTO_DELETE_AFTER).await;
        let _ = channel_id.delete_message(&http, message_id).await;
    });

    Ok(())
}

fn is_bare_mention(content: &str, bot_id: u64) -> bool {
    let trimmed = content.trim();
    trimmed == mention(bot_id as i64) || trimmed == format!("<@!{bot_id}>")
}

fn collect_literal_prefixes(options: &poise::PrefixFrameworkOptions<Data, Error>) -> Vec<String> {
    let mut prefixes = Vec::new();

    if let Some(prefix) = options.prefix.as_deref() {
        prefixes.push(prefix.to_string());
    }

    for additional in &options.additional_prefixes {
        if let poise::Prefix::Literal(prefix) = additional {
            prefixes.push((*prefix).to_string());
        }
    }

    prefixes
}

fn prefix_sentence(prefixes: &[String]) -> String {
    let quoted: Vec<String> = prefixes.iter().map(inline_code).collect();
    match quoted.len() {
        0 => "I don't have any prefixes configured yet.".to_string(),
        1 => format!("my prefix is {}.", quoted[0]),
        _ => format!("my prefixes are {}.", human_join(&quoted)),
    }
}

fn help_hint(prefixes: &[String]) -> String {
    match prefixes.first() {
        Some(prefix) => format!(
            "Use {} or {} to see my commands.",
            inline_code(format!("{prefix}help")),
            inline_code("/help")
        ),
        None => format!("Use {} to see my commands.", inline_code("/help")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_a_bare_mention_triggers() {
        assert!(is_bare_mention(" <@42> ", 42));
        assert!(is_bare_mention("<@!42>", 42));
        assert!(!is_bare_mention("<@42> hello", 42));
        assert!(!is_bare_mention("<@43>", 42));
    }

    #[test]
    fn prefixes_read_as_a_sentence() {
        let prefixes: Vec<String> = ["?", "p!", "."].iter().map(|p| p.to_string()).collect();
        assert_eq!(
            prefix_sentence(&prefixes),
            "my prefixes are `?`, `p!`, and `.`."
        );
        assert_eq!(help_hint(&prefixes[..1]), "Use `?help` or `/help` to see my commands.");
        assert_eq!(prefix_sentence(&[]), "I don't have any prefixes configured yet.");
    }
}
