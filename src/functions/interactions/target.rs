use crate::{Context, Error, constants::icon, functions::format::pretty_message};
use poise::serenity_prelude as serenity;

/// Replies used when a command targets another member
pub struct TargetValidationMessages<'a> {
    pub self_error: &'a str,
    pub bot_error: &'a str,
}

impl<'a> TargetValidationMessages<'a> {
    pub fn new(self_error: &'a str, bot_error: &'a str) -> Self {
        Self {
            self_error,
            bot_error,
        }
    }
}

/// Why a user cannot be the target of an action
#[derive(Debug, Eq, PartialEq)]
pub enum TargetRejection {
    IsAuthor,
    IsBot,
}

pub fn check_target(
    author: serenity::UserId,
    target: serenity::UserId,
    target_is_bot: bool,
) -> Option<TargetRejection> {
    if target == author {
        Some(TargetRejection::IsAuthor)
    } else if target_is_bot {
        Some(TargetRejection::IsBot)
    } else {
        None
    }
}

/// Ensures the target is not the command author and not a bot
pub async fn ensure_valid_target(
    ctx: &Context<'_>,
    target: &serenity::User,
    messages: TargetValidationMessages<'_>,
) -> Result<bool, Error> {
    let message = match check_target(ctx.author().id, target.id, target.bot) {
        None => return Ok(true),
        Some(TargetRejection::IsAuthor) => messages.self_error,
        Some(TargetRejection::IsBot) => messages.bot_error,
    };

    ctx.send(
        poise::CreateReply::default()
            .content(pretty_message(icon::ERROR, message))
            .ephemeral(true),
    )
    .await?;
    Ok(false)
}
