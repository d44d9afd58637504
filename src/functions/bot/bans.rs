use crate::{
    Context, Error,
    constants::{colors, icon},
    database::{BanModel, bans},
    functions::{
        format::{discord::mention, pretty_message},
        time,
    },
};
use poise::serenity_prelude as serenity;

/// Global command check that keeps banned users away from commands
pub async fn enforce_command_ban(ctx: Context<'_>) -> Result<bool, Error> {
    if ctx.author().bot {
        return Ok(true);
    }

    let user_id = ctx.author().id.get() as i64;
    let ban = bans::find_by_user_id(&ctx.data().database, user_id).await?;

    match ban {
        Some(ban) if ban.command => {
            tracing::debug!(user_id, "rejected command from banned user");
            send_ban_notice(ctx, &ban).await?;
            Ok(false)
        }
        _ => Ok(true),
    }
}

async fn send_ban_notice(ctx: Context<'_>, ban: &BanModel) -> Result<(), Error> {
    let registered_at =
        time::describe_relative_from_str(&ban.created_at).unwrap_or_else(|| ban.created_at.clone());

    let description = [
        pretty_message(icon::ERROR, "You are banned from using Parrot commands."),
        pretty_message(icon::HASTAG, format!("Reason: {}", ban.reason)),
        pretty_message(icon::HAMMER, format!("Moderator: {}", mention(ban.moderator_id))),
        pretty_message(icon::TIMER, format!("Banned {registered_at}")),
    ];

    let embed = serenity::CreateEmbed::new()
        .title(format!("{} Access blocked", icon::ERROR))
        .description(description.join("\n"))
        .colour(colors::DANGER);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
