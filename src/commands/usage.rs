use crate::{
    Context, Error,
    constants::colors,
    database::usage as usage_stats,
    functions::format::entry_to_code,
};
use poise::serenity_prelude as serenity;

const DEFAULT_LIMIT: i64 = 10;

/// Most used Parrot commands
#[poise::command(prefix_command, slash_command, category = "Meta")]
pub async fn usage(
    ctx: Context<'_>,
    #[description = "How many commands to show"]
    #[min = 1]
    #[max = 100]
    limit: Option<i64>,
) -> Result<(), Error> {
    let top = usage_stats::top(&ctx.data().database, limit.unwrap_or(DEFAULT_LIMIT)).await?;

    let description = if top.is_empty() {
        "No command has been used yet.".to_string()
    } else {
        entry_to_code(&top)
    };

    let embed = serenity::CreateEmbed::new()
        .title("Command usage")
        .description(description)
        .colour(colors::PARROT);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
