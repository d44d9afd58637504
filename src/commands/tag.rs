use crate::{
    Context, Error,
    constants::{colors, icon, links},
    database::{Rename, TagModel, tags},
    functions::{
        format::{discord::mention, pretty_message},
        interactions::target::{TargetValidationMessages, ensure_valid_target},
        messaging::{Outgoing, safe_send},
        time::describe_unix,
        ui::{
            pagination::paginate_lines,
            prompt::{ConfirmationOutcome, ConfirmationPromptOptions, confirmation_prompt},
        },
    },
};
use poise::serenity_prelude as serenity;
use tracing::debug;

const MAX_NAME_LENGTH: usize = 100;
const TAGS_PER_PAGE: usize = 12;

/// Names that would be shadowed by a subcommand
const RESERVED_NAMES: [&str; 10] = [
    "show", "create", "delete", "rename", "edit", "claim", "transfer", "nsfw", "info", "all",
];

/// Server tags. `tag <name>` shows one
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    subcommands(
        "show", "create", "delete", "rename", "edit", "claim", "transfer", "nsfw", "info", "all"
    ),
    category = "Tags"
)]
pub async fn tag(
    ctx: Context<'_>,
    #[description = "Tag to show"]
    #[rest]
    name: Option<String>,
) -> Result<(), Error> {
    match name {
        Some(name) => show_tag(ctx, &name).await,
        None => {
            ctx.reply(pretty_message(
                icon::QUESTION,
                format!("Usage: `{}tag <name>`", ctx.prefix()),
            ))
            .await?;
            Ok(())
        }
    }
}

/// Show a tag
#[poise::command(prefix_command, slash_command, guild_only, category = "Tags")]
pub async fn show(
    ctx: Context<'_>,
    #[description = "Tag name"]
    #[rest]
    name: String,
) -> Result<(), Error> {
    show_tag(ctx, &name).await
}

async fn show_tag(ctx: Context<'_>, name: &str) -> Result<(), Error> {
    let guild_id = guild_id(ctx)?;
    let name = normalize_name(name);
    let pool = &ctx.data().database;

    let Some(tag) = tags::find(pool, guild_id, &name).await? else {
        ctx.reply(not_found(&name)).await?;
        return Ok(());
    };

    if tag.nsfw && !in_nsfw_channel(ctx).await {
        let embed = serenity::CreateEmbed::new()
            .title("NSFW Channel Required")
            .description("This tag can only be shown in NSFW channels.")
            .colour(colors::DANGER)
            .image(links::NSFW_REQUIRED_GIF);
        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        return Ok(());
    }

    tags::increment_uses(pool, guild_id, &name).await?;
    debug!(guild = guild_id, tag = %name, "tag shown");

    if let poise::Context::Prefix(prefix) = ctx {
        if let Some(referenced) = &prefix.msg.referenced_message {
            let builder = Outgoing::plan(&tag.text)
                .into_message()
                .reference_message(&**referenced)
                .allowed_mentions(serenity::CreateAllowedMentions::new());
            prefix
                .msg
                .channel_id
                .send_message(ctx.serenity_context(), builder)
                .await?;
            return Ok(());
        }
    }

    safe_send(ctx, &tag.text).await
}

/// Create a tag
#[poise::command(prefix_command, slash_command, guild_only, category = "Tags")]
pub async fn create(
    ctx: Context<'_>,
    #[description = "Tag name"] name: String,
    #[description = "Tag text"]
    #[rest]
    text: String,
) -> Result<(), Error> {
    let guild_id = guild_id(ctx)?;
    let name = normalize_name(&name);
    if let Err(problem) = validate_name(&name) {
        ctx.reply(pretty_message(icon::ERROR, problem)).await?;
        return Ok(());
    }

    let pool = &ctx.data().database;
    if tags::find(pool, guild_id, &name).await?.is_some() {
        ctx.reply(name_taken(&name)).await?;
        return Ok(());
    }

    let prompt = confirmation_prompt(
        &ctx,
        ctx.author().id,
        ConfirmationPromptOptions::new(format!("Is the tag **{name}** NSFW?")),
    )
    .await?;
    let nsfw = match prompt {
        ConfirmationOutcome::Accepted => true,
        ConfirmationOutcome::Declined => false,
        ConfirmationOutcome::Timeout => {
            ctx.say(pretty_message(
                icon::TIMER,
                "No answer, the tag will be created as not NSFW.",
            ))
            .await?;
            false
        }
    };

    // Someone may have taken the name while the prompt was open
    let owner_id = ctx.author().id.get() as i64;
    let reply = match tags::insert(pool, guild_id, &name, &text, owner_id, nsfw).await? {
        Some(_) => pretty_message(icon::CHECK, format!("Tag **{name}** created.")),
        None => name_taken(&name),
    };
    ctx.reply(reply).await?;
    Ok(())
}

/// Delete one of your tags
#[poise::command(prefix_command, slash_command, guild_only, category = "Tags")]
pub async fn delete(
    ctx: Context<'_>,
    #[description = "Tag name"]
    #[rest]
    name: String,
) -> Result<(), Error> {
    let Some(tag) = owned_tag(ctx, &name).await? else {
        return Ok(());
    };

    tags::delete(&ctx.data().database, tag.guild_id, &tag.name).await?;
    ctx.reply(pretty_message(icon::CHECK, format!("Tag **{}** deleted.", tag.name)))
        .await?;
    Ok(())
}

/// Rename one of your tags
#[poise::command(prefix_command, slash_command, guild_only, category = "Tags")]
pub async fn rename(
    ctx: Context<'_>,
    #[description = "Current name"] name: String,
    #[description = "New name"]
    #[rest]
    new_name: String,
) -> Result<(), Error> {
    let new_name = normalize_name(&new_name);
    if let Err(problem) = validate_name(&new_name) {
        ctx.reply(pretty_message(icon::ERROR, problem)).await?;
        return Ok(());
    }

    let Some(tag) = owned_tag(ctx, &name).await? else {
        return Ok(());
    };

    let pool = &ctx.data().database;
    let reply = match tags::rename(pool, tag.guild_id, &tag.name, &new_name).await? {
        Rename::Done => pretty_message(
            icon::CHECK,
            format!("Tag **{}** renamed to **{new_name}**.", tag.name),
        ),
        Rename::NotFound => not_found(&tag.name),
        Rename::NameTaken => name_taken(&new_name),
    };
    ctx.reply(reply).await?;
    Ok(())
}

/// Change the text of one of your tags
#[poise::command(prefix_command, slash_command, guild_only, category = "Tags")]
pub async fn edit(
    ctx: Context<'_>,
    #[description = "Tag name"] name: String,
    #[description = "New text"]
    #[rest]
    text: String,
) -> Result<(), Error> {
    let Some(tag) = owned_tag(ctx, &name).await? else {
        return Ok(());
    };

    tags::update_text(&ctx.data().database, tag.guild_id, &tag.name, &text).await?;
    ctx.reply(pretty_message(icon::CHECK, format!("Tag **{}** updated.", tag.name)))
        .await?;
    Ok(())
}

/// Claim a tag whose owner left the server
#[poise::command(prefix_command, slash_command, guild_only, category = "Tags")]
pub async fn claim(
    ctx: Context<'_>,
    #[description = "Tag name"]
    #[rest]
    name: String,
) -> Result<(), Error> {
    let guild_id = guild_id(ctx)?;
    let name = normalize_name(&name);
    let pool = &ctx.data().database;

    let Some(tag) = tags::find(pool, guild_id, &name).await? else {
        ctx.reply(not_found(&name)).await?;
        return Ok(());
    };

    if tag.owner_id == ctx.author().id.get() as i64 {
        ctx.reply(pretty_message(icon::ERROR, "You already own this tag."))
            .await?;
        return Ok(());
    }
    if owner_is_member(ctx, &tag).await {
        ctx.reply(pretty_message(
            icon::ERROR,
            format!("The owner of **{name}** is still in this server."),
        ))
        .await?;
        return Ok(());
    }

    tags::set_owner(pool, guild_id, &name, ctx.author().id.get() as i64).await?;
    ctx.reply(pretty_message(icon::CHECK, format!("You now own the tag **{name}**.")))
        .await?;
    Ok(())
}

/// Give one of your tags to another member
#[poise::command(prefix_command, slash_command, guild_only, category = "Tags")]
pub async fn transfer(
    ctx: Context<'_>,
    #[description = "Tag name"] name: String,
    #[description = "New owner"] member: serenity::User,
) -> Result<(), Error> {
    let messages = TargetValidationMessages::new(
        "You already own this tag.",
        "Bots can't own tags.",
    );
    if !ensure_valid_target(&ctx, &member, messages).await? {
        return Ok(());
    }

    let Some(tag) = owned_tag(ctx, &name).await? else {
        return Ok(());
    };

    let prompt = confirmation_prompt(
        &ctx,
        member.id,
        ConfirmationPromptOptions::new(format!(
            "{} do you accept the tag **{}** from {}?",
            mention(member.id.get() as i64),
            tag.name,
            ctx.author().name
        )),
    )
    .await?;

    match prompt {
        ConfirmationOutcome::Accepted => {
            tags::set_owner(&ctx.data().database, tag.guild_id, &tag.name, member.id.get() as i64)
                .await?;
            ctx.say(pretty_message(
                icon::CHECK,
                format!("Tag **{}** now belongs to {}.", tag.name, member.name),
            ))
            .await?;
        }
        ConfirmationOutcome::Declined => {
            ctx.say(pretty_message(
                icon::ERROR,
                format!("{} declined the tag.", member.name),
            ))
            .await?;
        }
        ConfirmationOutcome::Timeout => {
            ctx.say(pretty_message(
                icon::TIMER,
                format!("{} did not answer in time.", member.name),
            ))
            .await?;
        }
    }
    Ok(())
}

/// Toggle the NSFW flag of one of your tags
#[poise::command(prefix_command, slash_command, guild_only, category = "Tags")]
pub async fn nsfw(
    ctx: Context<'_>,
    #[description = "Tag name"]
    #[rest]
    name: String,
) -> Result<(), Error> {
    let Some(tag) = owned_tag(ctx, &name).await? else {
        return Ok(());
    };

    let flag = !tag.nsfw;
    tags::set_nsfw(&ctx.data().database, tag.guild_id, &tag.name, flag).await?;
    let state = if flag { "NSFW" } else { "not NSFW" };
    ctx.reply(pretty_message(
        icon::CHECK,
        format!("Tag **{}** is now {state}.", tag.name),
    ))
    .await?;
    Ok(())
}

/// Details about a tag
#[poise::command(prefix_command, slash_command, guild_only, category = "Tags")]
pub async fn info(
    ctx: Context<'_>,
    #[description = "Tag name"]
    #[rest]
    name: String,
) -> Result<(), Error> {
    let guild_id = guild_id(ctx)?;
    let name = normalize_name(&name);

    let Some(tag) = tags::find(&ctx.data().database, guild_id, &name).await? else {
        ctx.reply(not_found(&name)).await?;
        return Ok(());
    };
    let claimable = !owner_is_member(ctx, &tag).await;

    let embed = serenity::CreateEmbed::new()
        .title(format!("Tag: {}", tag.name))
        .colour(colors::PARROT)
        .field("Owner", mention(tag.owner_id), true)
        .field("Created at", describe_unix(tag.created_at), true)
        .field("Text length", tag.text.chars().count().to_string(), true)
        .field("NSFW", yes_no(tag.nsfw), true)
        .field("Uses", tag.uses.to_string(), true)
        .field("Claimable", yes_no(claimable), true);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Every tag of this server
#[poise::command(prefix_command, slash_command, guild_only, category = "Tags")]
pub async fn all(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = guild_id(ctx)?;
    let names = tags::list_names(&ctx.data().database, guild_id).await?;

    if names.is_empty() {
        ctx.reply(pretty_message(icon::HASTAG, "This server has no tags yet."))
            .await?;
        return Ok(());
    }

    paginate_lines(ctx, "Tags", names, TAGS_PER_PAGE).await
}

/// Looks the tag up and makes sure the author owns it, replying otherwise
fn name_taken(name: &str) -> String {
    pretty_message(icon::ERROR, format!("A tag named **{name}** already exists."))
}

async fn owned_tag(ctx: Context<'_>, name: &str) -> Result<Option<TagModel>, Error> {
    let guild_id = guild_id(ctx)?;
    let name = normalize_name(name);

    let Some(tag) = tags::find(&ctx.data().database, guild_id, &name).await? else {
        ctx.reply(not_found(&name)).await?;
        return Ok(None);
    };

    if !is_owner(&tag, ctx.author().id) {
        ctx.reply(pretty_message(icon::ERROR, "You don't own this tag."))
            .await?;
        return Ok(None);
    }

    Ok(Some(tag))
}

async fn owner_is_member(ctx: Context<'_>, tag: &TagModel) -> bool {
    let guild = serenity::GuildId::new(tag.guild_id as u64);
    let owner = serenity::UserId::new(tag.owner_id as u64);
    guild.member(ctx.serenity_context(), owner).await.is_ok()
}

async fn in_nsfw_channel(ctx: Context<'_>) -> bool {
    ctx.guild_channel()
        .await
        .is_some_and(|channel| channel.nsfw)
}

fn guild_id(ctx: Context<'_>) -> Result<i64, Error> {
    ctx.guild_id()
        .map(|id| id.get() as i64)
        .ok_or_else(|| "tags only exist inside servers".into())
}

fn not_found(name: &str) -> String {
    pretty_message(icon::ERROR, format!("No tag named **{name}** in this server."))
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

pub fn is_owner(tag: &TagModel, user: serenity::UserId) -> bool {
    tag.owner_id == user.get() as i64
}

/// Tag names are case-insensitive and single-spaced
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Tag names can't be empty.".to_string());
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(format!("Tag names are limited to {MAX_NAME_LENGTH} characters."));
    }
    let first_word = name.split(' ').next().unwrap_or(name);
    if RESERVED_NAMES.contains(&first_word) {
        return Err(format!("**{first_word}** is reserved for tag commands."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_and_space_insensitive() {
        assert_eq!(normalize_name("  Server   RULES "), "server rules");
    }

    #[test]
    fn taken_name_reply_names_the_tag() {
        assert_eq!(name_taken("rules"), "❌ | A tag named **rules** already exists.");
    }

    #[test]
    fn reserved_and_oversized_names_are_refused() {
        assert!(validate_name("rules").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("info about me").is_err());
        assert!(validate_name(&"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn only_the_owner_manages_a_tag() {
        let tag = TagModel {
            id: 1,
            guild_id: 10,
            name: "rules".to_string(),
            text: "be nice".to_string(),
            owner_id: 42,
            nsfw: false,
            uses: 0,
            created_at: 0,
        };
        assert!(is_owner(&tag, serenity::UserId::new(42)));
        assert!(!is_owner(&tag, serenity::UserId::new(7)));
    }
}
