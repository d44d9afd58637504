use crate::{
    Context, Error,
    constants::{colors, icon},
    database::{Rename, todos},
    functions::{
        format::{discord::code_block, pretty_message},
        time::describe_unix,
        ui::pagination::paginate_lines,
    },
};
use poise::serenity_prelude as serenity;

const TODOS_PER_PAGE: usize = 12;

/// Your personal TODO lists
#[poise::command(
    prefix_command,
    slash_command,
    subcommands("create", "rename", "edit", "delete", "show", "list"),
    subcommand_required,
    category = "Todo"
)]
pub async fn todo(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Create a TODO list
#[poise::command(prefix_command, slash_command, category = "Todo")]
pub async fn create(
    ctx: Context<'_>,
    #[description = "List name"] name: String,
    #[description = "What needs doing"]
    #[rest]
    text: String,
) -> Result<(), Error> {
    let user_id = user_id(ctx);
    let pool = &ctx.data().database;

    let reply = match todos::insert(pool, user_id, &name, &text).await? {
        Some(_) => pretty_message(icon::CHECK, format!("TODO list **{name}** created.")),
        None => name_taken(&name),
    };
    ctx.reply(reply).await?;
    Ok(())
}

/// Rename a TODO list
#[poise::command(prefix_command, slash_command, category = "Todo")]
pub async fn rename(
    ctx: Context<'_>,
    #[description = "Current name"] name: String,
    #[description = "New name"]
    #[rest]
    new_name: String,
) -> Result<(), Error> {
    let user_id = user_id(ctx);
    let pool = &ctx.data().database;

    let reply = match todos::rename(pool, user_id, &name, &new_name).await? {
        Rename::Done => pretty_message(
            icon::CHECK,
            format!("Renamed **{name}** to **{new_name}**."),
        ),
        Rename::NotFound => missing(&name),
        Rename::NameTaken => name_taken(&new_name),
    };
    ctx.reply(reply).await?;
    Ok(())
}

/// Replace the text of a TODO list
#[poise::command(prefix_command, slash_command, category = "Todo")]
pub async fn edit(
    ctx: Context<'_>,
    #[description = "List name"] name: String,
    #[description = "New text"]
    #[rest]
    text: String,
) -> Result<(), Error> {
    let updated = todos::update_text(&ctx.data().database, user_id(ctx), &name, &text).await?;
    let reply = match updated {
        0 => missing(&name),
        _ => pretty_message(icon::CHECK, format!("TODO list **{name}** updated.")),
    };
    ctx.reply(reply).await?;
    Ok(())
}

/// Delete a TODO list
#[poise::command(prefix_command, slash_command, category = "Todo")]
pub async fn delete(
    ctx: Context<'_>,
    #[description = "List name"]
    #[rest]
    name: String,
) -> Result<(), Error> {
    let deleted = todos::delete(&ctx.data().database, user_id(ctx), &name).await?;
    let reply = match deleted {
        0 => missing(&name),
        _ => pretty_message(icon::CHECK, format!("TODO list **{name}** deleted.")),
    };
    ctx.reply(reply).await?;
    Ok(())
}

/// Show a TODO list
#[poise::command(prefix_command, slash_command, category = "Todo")]
pub async fn show(
    ctx: Context<'_>,
    #[description = "List name"]
    #[rest]
    name: String,
) -> Result<(), Error> {
    let Some(todo) = todos::find(&ctx.data().database, user_id(ctx), &name).await? else {
        ctx.reply(missing(&name)).await?;
        return Ok(());
    };

    let embed = serenity::CreateEmbed::new()
        .title(format!("TODO: {}", todo.name))
        .colour(colors::MINT)
        .description(code_block(&todo.text, None))
        .field("Created at", describe_unix(todo.created_at), false)
        .footer(serenity::CreateEmbedFooter::new(&ctx.author().name));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// All of your TODO lists
#[poise::command(prefix_command, slash_command, category = "Todo")]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    let names = todos::list_names(&ctx.data().database, user_id(ctx)).await?;
    if names.is_empty() {
        ctx.reply(pretty_message(icon::HASTAG, "You don't have any TODO list yet."))
            .await?;
        return Ok(());
    }

    let title = format!("{}'s TODO lists", ctx.author().name);
    paginate_lines(ctx, title, names, TODOS_PER_PAGE).await
}

fn user_id(ctx: Context<'_>) -> i64 {
    ctx.author().id.get() as i64
}

pub fn missing(name: &str) -> String {
    pretty_message(
        icon::ERROR,
        format!("You don't have any TODO list with name **{name}**."),
    )
}

fn name_taken(name: &str) -> String {
    pretty_message(
        icon::ERROR,
        format!("You already have a TODO list named **{name}**."),
    )
}

#[cfg(test)]
mod tests {
    use super::{missing, name_taken};

    #[test]
    fn taken_name_reply_names_the_list() {
        assert_eq!(
            name_taken("groceries"),
            "❌ | You already have a TODO list named **groceries**."
        );
    }

    #[test]
    fn missing_list_names_the_list() {
        assert_eq!(
            missing("groceries"),
            "❌ | You don't have any TODO list with name **groceries**."
        );
    }
}
