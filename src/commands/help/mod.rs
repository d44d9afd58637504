use crate::{
    Context, Error,
    constants::{colors, icon},
    functions::format::pretty_message,
};
use poise::serenity_prelude as serenity;
use serenity::builder::AutocompleteChoice;
use std::collections::BTreeMap;

pub mod command_finder;

const NO_DESCRIPTION: &str = "No description";
const NO_CATEGORY: &str = "Misc";

/// See what Parrot can do
#[poise::command(
    slash_command,
    prefix_command,
    track_edits,
    aliases("h", "commands"),
    category = "Meta"
)]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Command to describe"]
    #[autocomplete = "help_autocomplete"]
    #[rest]
    command: Option<String>,
) -> Result<(), Error> {
    match command {
        Some(name) => send_command_help(ctx, &name).await,
        None => send_overview(ctx).await,
    }
}

async fn send_overview(ctx: Context<'_>) -> Result<(), Error> {
    let commands = &ctx.framework().options().commands;

    let mut categories: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for command in command_finder::visible(commands) {
        let category = command.category.as_deref().unwrap_or(NO_CATEGORY);
        categories
            .entry(category)
            .or_default()
            .push(format!("`{}`", command.name));
    }

    let mut embed = serenity::CreateEmbed::new()
        .title(format!("{} Parrot commands", icon::BELL))
        .description(pretty_message(
            icon::QUESTION,
            format!(
                "Use `{}help <command>` for details about a command.",
                ctx.prefix()
            ),
        ))
        .colour(colors::MINT);

    for (category, names) in categories {
        embed = embed.field(category, names.join(", "), false);
    }

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}

async fn send_command_help(ctx: Context<'_>, name: &str) -> Result<(), Error> {
    let commands = &ctx.framework().options().commands;

    let Some(info) = command_finder::find(commands, name) else {
        let embed = serenity::CreateEmbed::new()
            .title(format!("{} Command not found", icon::ERROR))
            .description(format!("There is no command called `{name}`."))
            .colour(colors::DANGER);
        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        return Ok(());
    };

    let target = info.target();
    let description = target
        .help_text
        .as_deref()
        .or(target.description.as_deref())
        .unwrap_or(NO_DESCRIPTION);
    let category = target
        .category
        .as_deref()
        .or(info.command.category.as_deref())
        .unwrap_or(NO_CATEGORY);

    let mut embed = serenity::CreateEmbed::new()
        .title(format!("{} {}{}", icon::BELL, ctx.prefix(), info.full_name()))
        .description(description)
        .colour(colors::MOON)
        .field(format!("{} Category", icon::GEAR), format!("`{category}`"), true);

    if !target.aliases.is_empty() {
        let aliases = target
            .aliases
            .iter()
            .map(|alias| format!("`{alias}`"))
            .collect::<Vec<_>>()
            .join(", ");
        embed = embed.field(format!("{} Aliases", icon::HASTAG), aliases, true);
    }

    if !target.parameters.is_empty() {
        let params = target
            .parameters
            .iter()
            .map(|param| {
                let (open, close) = if param.required { ("<", ">") } else { ("[", "]") };
                let description = param.description.as_deref().unwrap_or(NO_DESCRIPTION);
                format!("`{open}{}{close}` {description}", param.name)
            })
            .collect::<Vec<_>>()
            .join("\n");
        embed = embed.field(format!("{} Parameters", icon::PLUS), params, false);
    }

    if !target.subcommands.is_empty() {
        let subs = target
            .subcommands
            .iter()
            .filter(|sub| !sub.hide_in_help)
            .map(|sub| format!("`{}`", sub.name))
            .collect::<Vec<_>>()
            .join(", ");
        embed = embed.field(format!("{} Subcommands", icon::CARET_RIGHT), subs, false);
    }

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}

async fn help_autocomplete(ctx: Context<'_>, partial: &str) -> Vec<AutocompleteChoice> {
    let partial = partial.to_ascii_lowercase();
    let matches = command_finder::all_names(&ctx.framework().options().commands)
        .into_iter()
        .filter(|name| name.to_ascii_lowercase().starts_with(&partial))
        .take(25);

    matches
        .map(|name| AutocompleteChoice::new(name.clone(), name))
        .collect()
}
