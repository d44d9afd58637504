use crate::{
    Context, Error,
    api::canvas::CanvasFilter,
    functions::format::truncate_chars,
};
use poise::serenity_prelude as serenity;

use super::http::report_api_error;

const STUPID_COMMENT_LIMIT: usize = 19;
const YT_COMMENT_LIMIT: usize = 999;
const YT_NAME_LIMIT: usize = 20;

/// Glass filter over a profile picture
#[poise::command(
    prefix_command,
    slash_command,
    required_bot_permissions = "ATTACH_FILES",
    broadcast_typing,
    category = "Fun"
)]
pub async fn glass(
    ctx: Context<'_>,
    #[description = "Whose avatar"] member: Option<serenity::User>,
) -> Result<(), Error> {
    send_filtered(ctx, CanvasFilter::Glass, member).await
}

/// Puts someone behind bars
#[poise::command(
    prefix_command,
    slash_command,
    required_bot_permissions = "ATTACH_FILES",
    broadcast_typing,
    category = "Fun"
)]
pub async fn jail(
    ctx: Context<'_>,
    #[description = "Whose avatar"] member: Option<serenity::User>,
) -> Result<(), Error> {
    send_filtered(ctx, CanvasFilter::Jail, member).await
}

/// WASTED, just like GTA:SA
#[poise::command(
    prefix_command,
    slash_command,
    required_bot_permissions = "ATTACH_FILES",
    broadcast_typing,
    category = "Fun"
)]
pub async fn wasted(
    ctx: Context<'_>,
    #[description = "Whose avatar"] member: Option<serenity::User>,
) -> Result<(), Error> {
    send_filtered(ctx, CanvasFilter::Wasted, member).await
}

/// Triggered!
#[poise::command(
    prefix_command,
    slash_command,
    aliases("trigger"),
    required_bot_permissions = "ATTACH_FILES",
    broadcast_typing,
    category = "Fun"
)]
pub async fn triggered(
    ctx: Context<'_>,
    #[description = "Whose avatar"] member: Option<serenity::User>,
) -> Result<(), Error> {
    send_filtered(ctx, CanvasFilter::Triggered, member).await
}

/// Simp card generator
#[poise::command(
    prefix_command,
    slash_command,
    required_bot_permissions = "ATTACH_FILES",
    broadcast_typing,
    category = "Fun"
)]
pub async fn simpcard(
    ctx: Context<'_>,
    #[description = "Whose avatar"] member: Option<serenity::User>,
) -> Result<(), Error> {
    send_filtered(ctx, CanvasFilter::SimpCard, member).await
}

/// Pride flag overlay
#[poise::command(
    prefix_command,
    slash_command,
    aliases("gay"),
    required_bot_permissions = "ATTACH_FILES",
    broadcast_typing,
    category = "Fun"
)]
pub async fn pride(
    ctx: Context<'_>,
    #[description = "Whose avatar"] member: Option<serenity::User>,
) -> Result<(), Error> {
    send_filtered(ctx, CanvasFilter::Pride, member).await
}

#[poise::command(
    prefix_command,
    slash_command,
    required_bot_permissions = "ATTACH_FILES",
    broadcast_typing,
    category = "Fun"
)]
pub async fn lolice(
    ctx: Context<'_>,
    #[description = "Whose avatar"] member: Option<serenity::User>,
) -> Result<(), Error> {
    send_filtered(ctx, CanvasFilter::Lolice, member).await
}

/// Horny license for a profile picture
#[poise::command(
    prefix_command,
    slash_command,
    required_bot_permissions = "ATTACH_FILES",
    broadcast_typing,
    category = "Fun"
)]
pub async fn horny(
    ctx: Context<'_>,
    #[description = "Whose avatar"] member: Option<serenity::User>,
) -> Result<(), Error> {
    send_filtered(ctx, CanvasFilter::Horny, member).await
}

/// "It's so stupid" meme with your avatar
#[poise::command(
    prefix_command,
    slash_command,
    aliases("its-so-stupid"),
    required_bot_permissions = "ATTACH_FILES",
    broadcast_typing,
    category = "Fun"
)]
pub async fn itssostupid(
    ctx: Context<'_>,
    #[description = "What the dog says"]
    #[rest]
    comment: String,
) -> Result<(), Error> {
    let avatar = avatar_png(ctx.author());
    let comment = truncate_chars(&comment, STUPID_COMMENT_LIMIT);

    match ctx.data().api.its_so_stupid(&avatar, &comment).await {
        Ok(image) => send_image(ctx, image, "itssostupid.png").await,
        Err(err) => report_api_error(ctx, err).await,
    }
}

/// Fake YouTube comment, best way to fool your friends
#[poise::command(
    prefix_command,
    slash_command,
    aliases("youtube-comment", "youtube_comment"),
    required_bot_permissions = "ATTACH_FILES",
    broadcast_typing,
    category = "Fun"
)]
pub async fn ytcomment(
    ctx: Context<'_>,
    #[description = "The comment"]
    #[rest]
    comment: String,
) -> Result<(), Error> {
    let author = ctx.author();
    let avatar = avatar_png(author);
    let name = truncate_chars(&author.name, YT_NAME_LIMIT);
    let comment = truncate_chars(&comment, YT_COMMENT_LIMIT);

    match ctx.data().api.youtube_comment(&avatar, &name, &comment).await {
        Ok(image) => send_image(ctx, image, "ytcomment.png").await,
        Err(err) => report_api_error(ctx, err).await,
    }
}

async fn send_filtered(
    ctx: Context<'_>,
    filter: CanvasFilter,
    member: Option<serenity::User>,
) -> Result<(), Error> {
    let target = member.as_ref().unwrap_or_else(|| ctx.author());
    let avatar = avatar_png(target);

    match ctx.data().api.canvas_filter(filter, &avatar).await {
        Ok(image) => send_image(ctx, image, filter.file_name()).await,
        Err(err) => report_api_error(ctx, err).await,
    }
}

async fn send_image(ctx: Context<'_>, image: Vec<u8>, file_name: &str) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .attachment(serenity::CreateAttachment::bytes(image, file_name))
            .reply(true),
    )
    .await?;
    Ok(())
}

/// The canvas endpoints only read PNG avatars
fn avatar_png(user: &serenity::User) -> String {
    png_url(&user.face())
}

fn png_url(url: &str) -> String {
    let (base, query) = match url.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (url, None),
    };
    let base = base
        .strip_suffix(".webp")
        .or_else(|| base.strip_suffix(".gif"))
        .map(|stem| format!("{stem}.png"))
        .unwrap_or_else(|| base.to_string());

    match query {
        Some(query) => format!("{base}?{query}"),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::png_url;

    #[test]
    fn avatars_are_requested_as_png() {
        assert_eq!(
            png_url("https://cdn.discordapp.com/avatars/1/abc.webp?size=1024"),
            "https://cdn.discordapp.com/avatars/1/abc.png?size=1024"
        );
        assert_eq!(
            png_url("https://cdn.discordapp.com/avatars/1/a_abc.gif"),
            "https://cdn.discordapp.com/avatars/1/a_abc.png"
        );
        assert_eq!(
            png_url("https://cdn.discordapp.com/embed/avatars/0.png"),
            "https://cdn.discordapp.com/embed/avatars/0.png"
        );
    }
}
