use crate::{
    Context, Error,
    constants::{colors, icon},
    database::{TelephoneLineModel, telephone},
    functions::{
        format::{
            discord::{channel_mention, mention, role_mention},
            escape_mentions, pretty_message,
        },
        wait::{self, WaitMode},
    },
};
use poise::serenity_prelude::{self as serenity, Mentionable};
use rand::seq::IndexedRandom;
use tokio::time::Instant;
use tracing::{info, warn};

pub mod call;

use call::{CallAction, DialFacts, EndReason, RingReply, Side};

const GREETINGS: [&str; 3] = ["hi", "hello", "heya"];

/// Configure this server's telephone line
#[poise::command(
    prefix_command,
    slash_command,
    subcommands("setup", "pingrole", "memberping", "block", "unblock", "info"),
    subcommand_required,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    category = "Configuration"
)]
pub async fn telephone(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Set the channel that receives calls
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    category = "Configuration"
)]
pub async fn setup(
    ctx: Context<'_>,
    #[description = "Channel used as the telephone line"] channel: serenity::GuildChannel,
) -> Result<(), Error> {
    let guild_id = guild_id(ctx)?;
    if channel.guild_id.get() != guild_id as u64 {
        ctx.reply(pretty_message(icon::ERROR, "That channel is not in this server."))
            .await?;
        return Ok(());
    }

    telephone::upsert_channel(&ctx.data().database, guild_id, channel.id.get() as i64).await?;
    ctx.reply(pretty_message(
        icon::PHONE,
        format!("Success! {} is now the telephone line of this server.", channel.mention()),
    ))
    .await?;
    Ok(())
}

/// Role pinged on incoming calls. Leave empty to clear it
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    category = "Configuration"
)]
pub async fn pingrole(
    ctx: Context<'_>,
    #[description = "Role to ping"] role: Option<serenity::Role>,
) -> Result<(), Error> {
    let guild_id = guild_id(ctx)?;
    let role_id = role.as_ref().map(|role| role.id.get() as i64);
    let updated = telephone::set_ping_role(&ctx.data().database, guild_id, role_id).await?;

    let reply = match (updated, role_id) {
        (0, _) => missing_line_message(),
        (_, Some(id)) => pretty_message(
            icon::BELL,
            format!("Incoming calls will ping {}.", role_mention(id)),
        ),
        (_, None) => pretty_message(icon::MINUS, "Incoming calls will not ping a role."),
    };
    send_quiet(ctx, reply).await
}

/// Member pinged on incoming calls. Leave empty to clear it
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    category = "Configuration"
)]
pub async fn memberping(
    ctx: Context<'_>,
    #[description = "Member to ping"] member: Option<serenity::User>,
) -> Result<(), Error> {
    let guild_id = guild_id(ctx)?;
    let member_id = member.as_ref().map(|user| user.id.get() as i64);
    let updated = telephone::set_member_ping(&ctx.data().database, guild_id, member_id).await?;

    let reply = match (updated, member_id) {
        (0, _) => missing_line_message(),
        (_, Some(id)) => pretty_message(
            icon::BELL,
            format!("Incoming calls will ping {}.", mention(id)),
        ),
        (_, None) => pretty_message(icon::MINUS, "Incoming calls will not ping a member."),
    };
    send_quiet(ctx, reply).await
}

/// Stop a server from calling this one
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    category = "Configuration"
)]
pub async fn block(
    ctx: Context<'_>,
    #[description = "Server ID to block"] server: String,
) -> Result<(), Error> {
    let guild_id = guild_id(ctx)?;
    let Some(server) = parse_server_id(ctx, &server).await? else {
        return Ok(());
    };
    if server as i64 == guild_id {
        ctx.reply(pretty_message(icon::ERROR, "You can't block your own server."))
            .await?;
        return Ok(());
    }

    let added = telephone::block(&ctx.data().database, guild_id, server as i64).await?;
    let reply = if added {
        pretty_message(icon::HAMMER, format!("Blocked **{server}**."))
    } else {
        pretty_message(icon::ERROR, format!("**{server}** is already blocked."))
    };
    ctx.reply(reply).await?;
    Ok(())
}

/// Allow a blocked server to call again
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    category = "Configuration"
)]
pub async fn unblock(
    ctx: Context<'_>,
    #[description = "Server ID to unblock"] server: String,
) -> Result<(), Error> {
    let guild_id = guild_id(ctx)?;
    let Some(server) = parse_server_id(ctx, &server).await? else {
        return Ok(());
    };
    let removed = telephone::unblock(&ctx.data().database, guild_id, server as i64).await?;
    let reply = if removed {
        pretty_message(icon::CHECK, format!("Unblocked **{server}**."))
    } else {
        pretty_message(icon::ERROR, format!("**{server}** was not blocked."))
    };
    ctx.reply(reply).await?;
    Ok(())
}

/// Show this server's line configuration
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    category = "Configuration"
)]
pub async fn info(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = guild_id(ctx)?;
    let pool = &ctx.data().database;
    let Some(line) = telephone::find_line(pool, guild_id).await? else {
        ctx.reply(missing_line_message()).await?;
        return Ok(());
    };
    let blocked = telephone::blocked_guilds(pool, guild_id).await?;

    let blocked = if blocked.is_empty() {
        "None".to_string()
    } else {
        blocked
            .iter()
            .map(|id| format!("`{id}`"))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let embed = serenity::CreateEmbed::new()
        .title(format!("{} Telephone line", icon::PHONE))
        .colour(colors::PARROT)
        .field("Channel", channel_mention(line.channel_id), true)
        .field(
            "Ping role",
            line.ping_role_id.map(role_mention).unwrap_or_else(|| "None".to_string()),
            true,
        )
        .field(
            "Member ping",
            line.member_ping_id.map(mention).unwrap_or_else(|| "None".to_string()),
            true,
        )
        .field("Line busy", line.is_line_busy.to_string(), true)
        .field("Blocked servers", blocked, false);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Dial another server. Do not misuse this
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    guild_cooldown = 30,
    category = "Fun"
)]
pub async fn dial(
    ctx: Context<'_>,
    #[description = "ID of the server to call"] server: String,
) -> Result<(), Error> {
    let caller_guild = guild_id(ctx)?;
    let Some(server) = parse_server_id(ctx, &server).await? else {
        return Ok(());
    };
    let target_guild = server as i64;
    let pool = &ctx.data().database;

    let caller_line = telephone::find_line(pool, caller_guild).await?;
    let target_line = match caller_guild == target_guild {
        true => None,
        false => telephone::find_line(pool, target_guild).await?,
    };
    let target_channel = target_line
        .as_ref()
        .map(|line| serenity::ChannelId::new(line.channel_id as u64));
    let target_reachable = match target_channel {
        Some(channel) => channel.to_channel(ctx.serenity_context()).await.is_ok(),
        None => false,
    };
    let blocked = telephone::is_blocked_between(pool, caller_guild, target_guild).await?;

    let caller_name = describe(ctx, caller_guild as u64);
    let target_name = describe(ctx, server);

    let facts = DialFacts {
        caller_guild,
        target_guild,
        caller_line: caller_line.as_ref(),
        target_line: target_line.as_ref(),
        target_reachable,
        blocked,
    };
    if let Err(rejection) = call::check_dial(&facts) {
        let caller_mention = ctx.author().mention().to_string();
        ctx.say(rejection.message(&caller_mention, &target_name)).await?;
        return Ok(());
    }
    let (Some(target_line), Some(target_channel)) = (target_line, target_channel) else {
        return Ok(());
    };

    if !telephone::reserve_pair(pool, caller_guild, target_guild).await? {
        ctx.say(call::DialRejection::TargetBusy.message("", &target_name))
            .await?;
        return Ok(());
    }

    info!(caller = caller_guild, target = target_guild, "telephone call started");
    let line = Line {
        caller_channel: ctx.channel_id(),
        target_channel,
        caller_name,
        target_name,
    };
    let outcome = ring_and_talk(ctx, &line, &target_line).await;

    if let Err(err) = telephone::release_pair(pool, caller_guild, target_guild).await {
        warn!(error = %err, "failed to release telephone lines");
    }
    info!(caller = caller_guild, target = target_guild, "telephone call finished");

    outcome
}

struct Line {
    caller_channel: serenity::ChannelId,
    target_channel: serenity::ChannelId,
    caller_name: String,
    target_name: String,
}

impl Line {
    fn channel(&self, side: Side) -> serenity::ChannelId {
        match side {
            Side::Caller => self.caller_channel,
            Side::Callee => self.target_channel,
        }
    }

    fn side_of(&self, channel: serenity::ChannelId) -> Side {
        if channel == self.target_channel {
            Side::Callee
        } else {
            Side::Caller
        }
    }

    /// Each side is told about the other server
    fn peer_name(&self, side: Side) -> &str {
        match side {
            Side::Caller => &self.target_name,
            Side::Callee => &self.caller_name,
        }
    }
}

async fn ring_and_talk(
    ctx: Context<'_>,
    line: &Line,
    target_line: &TelephoneLineModel,
) -> Result<(), Error> {
    let http = ctx.serenity_context();

    ctx.say(format!(
        "Calling to **{}** ... Waiting for the response ...",
        line.target_name
    ))
    .await?;
    line.target_channel
        .say(
            http,
            format!(
                "**Incoming call from {} ...**\n`{}` to pickup | `{}` to reject",
                line.caller_name,
                call::PICKUP,
                call::HANGUP
            ),
        )
        .await?;
    ping_target(ctx, line.target_channel, target_line).await;

    let waits = [line.caller_channel, line.target_channel]
        .into_iter()
        .map(|channel| {
            wait::wait_for_message_event(http, call::RING_TIMEOUT, move |message| {
                message.channel_id == channel
                    && !message.author.bot
                    && call::parse_ring_reply(&message.content).is_some()
            })
        })
        .collect();

    let reply = wait::wait_for_any(waits, WaitMode::FirstCompleted)
        .await
        .into_iter()
        .find_map(|(_, message)| message)
        .and_then(|message| call::parse_ring_reply(&message.content));

    match reply {
        None => return hang_up(ctx, line, EndReason::Inactive).await,
        Some(RingReply::Hangup) => return hang_up(ctx, line, EndReason::HungUp).await,
        Some(RingReply::Pickup) => {}
    }

    let (caller_channel, target_channel) = (line.caller_channel, line.target_channel);

    // One listener for the whole call, so nothing posted during a relay is lost
    let mut messages = wait::message_stream(http, move |message| {
        (message.channel_id == caller_channel || message.channel_id == target_channel)
            && !message.author.bot
    });

    for side in [Side::Caller, Side::Callee] {
        let greeting = GREETINGS.choose(&mut rand::rng()).copied().unwrap_or("hi");
        line.channel(side)
            .say(http, format!("Connected. Say {greeting}"))
            .await?;
    }

    let picked_up_at = Instant::now();

    loop {
        let message = wait::next_within(&mut messages, call::INACTIVITY_TIMEOUT).await;

        let Some(message) = message else {
            return hang_up(ctx, line, EndReason::Inactive).await;
        };

        let content = escape_mentions(&message.content_safe(http));
        let actions = call::on_call_message(
            line.side_of(message.channel_id),
            &message.author.name,
            &content,
            picked_up_at.elapsed(),
            call::MAX_CALL_DURATION,
        );

        for action in actions {
            match action {
                CallAction::Relay { to, text } => {
                    line.channel(to)
                        .send_message(
                            http,
                            serenity::CreateMessage::new()
                                .content(text)
                                .allowed_mentions(serenity::CreateAllowedMentions::new()),
                        )
                        .await?;
                }
                CallAction::End(reason) => return hang_up(ctx, line, reason).await,
            }
        }
    }
}

async fn hang_up(ctx: Context<'_>, line: &Line, reason: EndReason) -> Result<(), Error> {
    let http = ctx.serenity_context();
    line.target_channel
        .say(http, reason.notice(line.peer_name(Side::Callee)))
        .await?;
    line.caller_channel
        .say(http, reason.notice(line.peer_name(Side::Caller)))
        .await?;
    Ok(())
}

/// Pings the configured role and member, then removes the ping right away
async fn ping_target(ctx: Context<'_>, channel: serenity::ChannelId, line: &TelephoneLineModel) {
    let mentions: Vec<String> = line
        .ping_role_id
        .map(role_mention)
        .into_iter()
        .chain(line.member_ping_id.map(mention))
        .collect();
    if mentions.is_empty() {
        return;
    }

    let http = ctx.serenity_context();
    if let Ok(message) = channel.say(http, mentions.join(" ")).await {
        let _ = message.delete(http).await;
    }
}

fn guild_id(ctx: Context<'_>) -> Result<i64, Error> {
    ctx.guild_id()
        .map(|id| id.get() as i64)
        .ok_or_else(|| "command used outside of a server".into())
}

fn describe(ctx: Context<'_>, guild_id: u64) -> String {
    let name = ctx
        .cache()
        .guild(serenity::GuildId::new(guild_id))
        .map(|guild| guild.name.clone());
    call::describe_guild(guild_id, name.as_deref())
}

/// Server IDs arrive as text since snowflakes overflow slash command integers
async fn parse_server_id(ctx: Context<'_>, raw: &str) -> Result<Option<u64>, Error> {
    let id = call::parse_server_id(raw);
    if id.is_none() {
        ctx.reply(pretty_message(icon::ERROR, format!("`{raw}` is not a server ID.")))
            .await?;
    }
    Ok(id)
}

fn missing_line_message() -> String {
    pretty_message(
        icon::ERROR,
        "This server has no telephone line yet. Use `telephone setup <channel>` first.",
    )
}

/// Replies without pinging whoever is mentioned in the confirmation
async fn send_quiet(ctx: Context<'_>, content: String) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .content(content)
            .allowed_mentions(serenity::CreateAllowedMentions::new()),
    )
    .await?;
    Ok(())
}
