use crate::{
    Context, Data, Error,
    constants::{colors, icon, links},
    functions::{format::human_join, wait},
};
use poise::{FrameworkError, serenity_prelude as serenity};
use rand::seq::IndexedRandom;
use std::time::Duration;
use tracing::{error, warn};

const QUOTES: &str = include_str!("../../assets/quotes.txt");
const DELETE_WITH_ORIGIN_WINDOW: Duration = Duration::from_secs(10);

/// What went wrong, stripped of the framework context
#[derive(Debug, PartialEq)]
pub enum Failure {
    BotMissingPermissions(Vec<String>),
    Cooldown(Duration),
    UserMissingPermissions(Vec<String>),
    NsfwOnly,
    BadArgument(String),
    InvalidSyntax(String),
    CommandFailed(String),
}

/// Title, description and optional image of the error embed
#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    pub title: String,
    pub description: String,
    pub image: Option<&'static str>,
}

impl Failure {
    pub fn report(&self) -> ErrorReport {
        let (title, description, image) = match self {
            Failure::BotMissingPermissions(missing) => (
                "Bot Missing permissions",
                format!(
                    "Please provide the following permission(s) to the bot.```\n{}```",
                    human_join(missing)
                ),
                None,
            ),
            Failure::Cooldown(remaining) => (
                "Command On Cooldown",
                format!(
                    "You are on command cooldown, please retry in **{}**s",
                    remaining.as_secs_f64().ceil() as u64
                ),
                None,
            ),
            Failure::UserMissingPermissions(missing) => (
                "Missing permissions",
                format!(
                    "You need the following permission(s) to the run the command.```\n{}```",
                    human_join(missing)
                ),
                None,
            ),
            Failure::NsfwOnly => (
                "NSFW Channel Required",
                format!(
                    "This command will only run in NSFW marked channel. {}",
                    links::NSFW_REQUIRED_GIF
                ),
                Some(links::NSFW_REQUIRED_GIF),
            ),
            Failure::BadArgument(reason) => ("Bad Argument", reason.clone(), None),
            Failure::InvalidSyntax(usage) => (
                "Invalid Syntax",
                format!("Please use proper syntax.```\n{usage}```"),
                None,
            ),
            Failure::CommandFailed(command) => (
                "Well this is embarrassing!",
                format!(
                    "For some reason **{command}** is not working. If possible report this error."
                ),
                None,
            ),
        };

        ErrorReport {
            title: format!("{q} {title} {q}", q = icon::QUESTION),
            description,
            image,
        }
    }
}

/// Framework error handler: one embed per failure kind, silent for the rest
pub async fn on_error(error: FrameworkError<'_, Data, Error>) {
    let failure = match &error {
        FrameworkError::Setup { error, .. } => {
            error!(error = %error, "framework setup failed");
            return;
        }
        FrameworkError::EventHandler { error, .. } => {
            warn!(error = %error, "event handler failed");
            return;
        }
        FrameworkError::Command { error, ctx, .. } => {
            error!(
                command = %ctx.command().qualified_name,
                error = %error,
                "command failed"
            );
            Failure::CommandFailed(ctx.command().qualified_name.clone())
        }
        FrameworkError::CommandPanic { payload, ctx, .. } => {
            error!(
                command = %ctx.command().qualified_name,
                payload = ?payload,
                "command panicked"
            );
            Failure::CommandFailed(ctx.command().qualified_name.clone())
        }
        FrameworkError::MissingBotPermissions {
            missing_permissions,
            ..
        } => Failure::BotMissingPermissions(permission_names(*missing_permissions)),
        FrameworkError::CooldownHit {
            remaining_cooldown,
            ..
        } => Failure::Cooldown(*remaining_cooldown),
        FrameworkError::MissingUserPermissions {
            missing_permissions,
            ..
        } => Failure::UserMissingPermissions(
            missing_permissions.map(permission_names).unwrap_or_default(),
        ),
        FrameworkError::NsfwOnly { .. } => Failure::NsfwOnly,
        FrameworkError::ArgumentParse { error, ctx, .. } => {
            if error.is::<poise::TooFewArguments>() || error.is::<poise::TooManyArguments>() {
                Failure::InvalidSyntax(usage(*ctx))
            } else {
                Failure::BadArgument(error.to_string())
            }
        }
        FrameworkError::SubcommandRequired { ctx } => Failure::InvalidSyntax(usage(*ctx)),
        // checks reply on their own; owner, guild and DM restrictions stay silent
        _ => return,
    };

    let Some(ctx) = error.ctx() else {
        return;
    };

    if let Err(err) = send_report(ctx, &failure).await {
        warn!(error = %err, "could not deliver error report");
    }
}

async fn send_report(ctx: Context<'_>, failure: &Failure) -> Result<(), Error> {
    let report = failure.report();
    let mut embed = serenity::CreateEmbed::new()
        .title(report.title)
        .description(report.description)
        .colour(colors::DANGER);
    if let Some(image) = report.image {
        embed = embed.image(image);
    }

    let reply = ctx
        .send(
            poise::CreateReply::default()
                .content(random_quote())
                .embed(embed)
                .reply(true),
        )
        .await?;

    let poise::Context::Prefix(prefix) = ctx else {
        return Ok(());
    };

    let origin = (prefix.msg.channel_id, prefix.msg.id);
    let report_message = reply.message().await?;
    let report_id = report_message.id;
    let serenity_ctx = ctx.serenity_context().clone();

    tokio::spawn(async move {
        let deleted = wait::wait_for_message_delete(
            &serenity_ctx,
            origin.0,
            origin.1,
            DELETE_WITH_ORIGIN_WINDOW,
        )
        .await;
        if deleted {
            let _ = origin.0.delete_message(&serenity_ctx, report_id).await;
        }
    });

    Ok(())
}

fn permission_names(permissions: serenity::Permissions) -> Vec<String> {
    permissions
        .get_permission_names()
        .into_iter()
        .map(|name| name.replace("Guild", "Server"))
        .collect()
}

/// `prefix` + qualified name, aliases and parameters, e.g. `?tag|t <name>`
fn usage(ctx: Context<'_>) -> String {
    let command = ctx.command();
    let parameters: Vec<(&str, bool)> = command
        .parameters
        .iter()
        .map(|param| (param.name.as_str(), param.required))
        .collect();
    format_usage(ctx.prefix(), &command.qualified_name, &command.aliases, &parameters)
}

fn format_usage(
    prefix: &str,
    name: &str,
    aliases: &[String],
    parameters: &[(&str, bool)],
) -> String {
    let mut usage = format!("{prefix}{name}");
    for alias in aliases {
        usage.push('|');
        usage.push_str(alias);
    }
    for (param, required) in parameters {
        if *required {
            usage.push_str(&format!(" <{param}>"));
        } else {
            usage.push_str(&format!(" [{param}]"));
        }
    }
    usage
}

fn random_quote() -> String {
    let quotes: Vec<&str> = QUOTES.lines().filter(|line| !line.trim().is_empty()).collect();
    quotes
        .choose(&mut rand::rng())
        .map(|quote| quote.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_wrapped_in_question_marks() {
        let report = Failure::NsfwOnly.report();
        assert_eq!(report.title, "❓ NSFW Channel Required ❓");
        assert_eq!(report.image, Some(links::NSFW_REQUIRED_GIF));
    }

    #[test]
    fn cooldown_rounds_up() {
        let report = Failure::Cooldown(Duration::from_millis(4_100)).report();
        assert_eq!(
            report.description,
            "You are on command cooldown, please retry in **5**s"
        );
    }

    #[test]
    fn missing_permissions_are_listed() {
        let missing = vec![
            "Embed Links".to_string(),
            "Attach Files".to_string(),
            "Manage Messages".to_string(),
        ];
        let report = Failure::BotMissingPermissions(missing).report();
        assert!(report.description.contains("Embed Links, Attach Files, and Manage Messages"));
    }

    #[test]
    fn permission_names_say_server() {
        let names = permission_names(serenity::Permissions::MANAGE_GUILD);
        assert_eq!(names, vec!["Manage Server".to_string()]);
    }

    #[test]
    fn usage_lists_aliases_and_parameters() {
        let aliases = vec!["urban".to_string(), "def".to_string()];
        assert_eq!(
            format_usage("?", "urbandictionary", &aliases, &[("term", true)]),
            "?urbandictionary|urban|def <term>"
        );
        assert_eq!(
            format_usage("p!", "truth", &[], &[("member", false)]),
            "p!truth [member]"
        );
    }

    #[test]
    fn quotes_are_bundled() {
        assert!(!random_quote().is_empty());
    }
}
