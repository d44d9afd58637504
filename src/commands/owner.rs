use crate::{
    Context, Error,
    constants::icon,
    database::bans::{self, BanScope},
    functions::{
        format::{discord::code_block, pretty_message, truncate_chars},
        messaging::send_decorated,
        reaction::confirm_reaction,
        wait::wait_for_message,
    },
};
use poise::serenity_prelude::{self as serenity, Mentionable};
use std::{path::Path, time::Duration};
use tracing::{info, warn};

const CONFIRM_TIMEOUT: Duration = Duration::from_secs(60);
const REPORT_LIMIT: usize = 1000;
const DEFAULT_BAN_REASON: &str = "No reason provided";

/// Make Parrot leave a server
#[poise::command(
    prefix_command,
    owners_only,
    hide_in_help,
    rename = "leaveguild",
    category = "Owner"
)]
pub async fn leave_guild(
    ctx: Context<'_>,
    #[description = "Server ID"] server: u64,
) -> Result<(), Error> {
    let guild_id = serenity::GuildId::new(server);
    let answer = confirm_reaction(
        ctx,
        ctx.channel_id(),
        ctx.author().id,
        &format!("Leave the server **{server}**?"),
        CONFIRM_TIMEOUT,
        true,
    )
    .await?;

    if answer != Some(true) {
        ctx.say(pretty_message(icon::ERROR, "Staying.")).await?;
        return Ok(());
    }

    ctx.say("Leaving Guild in a second!").await?;
    guild_id.leave(ctx.serenity_context()).await?;
    info!(guild = server, "left guild on owner request");
    Ok(())
}

/// Write a file into the temporary directory
#[poise::command(prefix_command, owners_only, hide_in_help, category = "Owner")]
pub async fn makefile(
    ctx: Context<'_>,
    #[description = "File name"] name: String,
    #[description = "File contents"]
    #[rest]
    text: String,
) -> Result<(), Error> {
    if !is_plain_file_name(&name) {
        send_decorated(
            ctx,
            &format!("[ERROR] `{name}` is not a plain file name"),
            true,
            false,
            false,
        )
        .await?;
        return Ok(());
    }

    let path = ctx.data().temp_dir.join(&name);
    let result = async {
        tokio::fs::create_dir_all(&ctx.data().temp_dir).await?;
        tokio::fs::write(&path, text.as_bytes()).await
    }
    .await;

    match result {
        Ok(()) => {
            info!(path = %path.display(), "file created");
            ctx.say(format!("[SUCCESS] File `{name}` created")).await?;
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "file creation failed");
            ctx.say(format!(
                "[ERROR] Could not create file `{name}`: {}",
                code_block(err.to_string(), None)
            ))
            .await?;
        }
    }
    Ok(())
}

/// Ban a user from Parrot
#[poise::command(prefix_command, owners_only, hide_in_help, category = "Owner")]
pub async fn banuser(
    ctx: Context<'_>,
    #[description = "User to ban"] user: serenity::User,
    #[description = "Ban from commands"] command: Option<bool>,
    #[description = "Ban from global chat"] chat: Option<bool>,
    #[description = "Ban everywhere"] global: Option<bool>,
    #[description = "Reason"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let scope = ban_scope(command, chat, global);
    let reason = reason.unwrap_or_else(|| DEFAULT_BAN_REASON.to_string());

    bans::upsert(
        &ctx.data().database,
        user.id.get() as i64,
        ctx.author().id.get() as i64,
        scope,
        &reason,
    )
    .await?;
    info!(user = user.id.get(), moderator = ctx.author().id.get(), "user banned");

    let notice = format!(
        "{} you are banned from Parrot bot. \
         From now on you can not use any command. Reason: {reason}",
        user.mention()
    );
    let _ = user
        .direct_message(ctx.serenity_context(), serenity::CreateMessage::new().content(notice))
        .await;

    ctx.say(pretty_message(icon::HAMMER, format!("**{}** banned.", user.name)))
        .await?;
    Ok(())
}

/// Lift a ban
#[poise::command(prefix_command, owners_only, hide_in_help, category = "Owner")]
pub async fn unbanuser(
    ctx: Context<'_>,
    #[description = "User to unban"] user: serenity::User,
) -> Result<(), Error> {
    let removed = bans::delete_by_user_id(&ctx.data().database, user.id.get() as i64).await?;
    if removed == 0 {
        ctx.say(pretty_message(icon::ERROR, format!("**{}** is not banned.", user.name)))
            .await?;
        return Ok(());
    }

    let _ = user
        .direct_message(
            ctx.serenity_context(),
            serenity::CreateMessage::new()
                .content(format!("{} you are unbanned from Parrot bot.", user.mention())),
        )
        .await;

    ctx.say(pretty_message(icon::CHECK, format!("**{}** unbanned.", user.name)))
        .await?;
    Ok(())
}

/// Report someone to the bot owners
#[poise::command(
    prefix_command,
    aliases("report", "report-user", "report_user", "ru"),
    category = "Misc"
)]
pub async fn reportuser(
    ctx: Context<'_>,
    #[description = "What happened"]
    #[rest]
    text: String,
) -> Result<(), Error> {
    let author = ctx.author().id;
    let channel = ctx.channel_id();

    ctx.say(format!(
        "{} are you sure? Abuse of this command will result in ban from parrot commands. \
         Type `YES` to continue",
        author.mention()
    ))
    .await?;

    let timeout_notice = format!("{} you didn't answer on time", author.mention());
    let answer = wait_for_message(
        ctx,
        move |message| message.author.id == author && message.channel_id == channel,
        CONFIRM_TIMEOUT,
        Some(timeout_notice.as_str()),
    )
    .await?;

    let Some(answer) = answer else {
        return Ok(());
    };
    if !is_report_confirmed(&answer.content) {
        return Ok(());
    }

    let Some(owner) = ctx.data().owners.first().copied() else {
        warn!("report received but no owner is configured");
        ctx.say(pretty_message(icon::ERROR, "Nobody is there to receive reports."))
            .await?;
        return Ok(());
    };

    owner
        .direct_message(
            ctx.serenity_context(),
            serenity::CreateMessage::new()
                .content(format!("{} {}", author.mention(), truncate_chars(&text, REPORT_LIMIT)))
                .allowed_mentions(serenity::CreateAllowedMentions::new()),
        )
        .await?;
    ctx.say(format!("{} reported", author.mention())).await?;
    Ok(())
}

pub fn ban_scope(command: Option<bool>, chat: Option<bool>, global: Option<bool>) -> BanScope {
    let default = BanScope::default();
    BanScope {
        command: command.unwrap_or(default.command),
        chat: chat.unwrap_or(default.chat),
        global: global.unwrap_or(default.global),
    }
}

/// Any casing of `YES` counts
pub fn is_report_confirmed(content: &str) -> bool {
    content.trim().eq_ignore_ascii_case("YES")
}

/// A single path component that stays inside the target directory
pub fn is_plain_file_name(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    if name.contains(['/', '\\']) {
        return false;
    }
    Path::new(name).file_name().is_some_and(|file| file == name)
}
