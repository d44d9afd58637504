use std::time::Duration;

use futures::future;
use poise::serenity_prelude as serenity;
use serenity::collector::ReactionCollector;

use crate::{Context, Error, constants::icon};

/// Reacts with every emoji concurrently
pub async fn bulk_add_reactions(
    ctx: &serenity::Context,
    message: &serenity::Message,
    reactions: &[serenity::ReactionType],
) -> Result<(), Error> {
    let pending = reactions
        .iter()
        .cloned()
        .map(|reaction| message.react(ctx, reaction));
    future::try_join_all(pending).await?;
    Ok(())
}

/// Posts `content` and waits for `user` to answer with 👍 or 👎.
///
/// `None` means the user did not answer in time.
pub async fn confirm_reaction(
    ctx: Context<'_>,
    channel_id: serenity::ChannelId,
    user_id: serenity::UserId,
    content: &str,
    timeout: Duration,
    delete_after: bool,
) -> Result<Option<bool>, Error> {
    let serenity_ctx = ctx.serenity_context();
    let message = channel_id.say(serenity_ctx, content).await?;

    bulk_add_reactions(
        serenity_ctx,
        &message,
        &[icon::THUMBS_UP.as_reaction(), icon::THUMBS_DOWN.as_reaction()],
    )
    .await?;

    let answer = ReactionCollector::new(serenity_ctx)
        .message_id(message.id)
        .author_id(user_id)
        .filter(|reaction| answer_for(&reaction.emoji).is_some())
        .timeout(timeout)
        .await
        .and_then(|reaction| answer_for(&reaction.emoji));

    if delete_after {
        let _ = message.delete(serenity_ctx).await;
    }

    Ok(answer)
}

fn answer_for(emoji: &serenity::ReactionType) -> Option<bool> {
    if *emoji == icon::THUMBS_UP.as_reaction() {
        Some(true)
    } else if *emoji == icon::THUMBS_DOWN.as_reaction() {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbs_map_to_answers() {
        assert_eq!(answer_for(&icon::THUMBS_UP.as_reaction()), Some(true));
        assert_eq!(answer_for(&icon::THUMBS_DOWN.as_reaction()), Some(false));
        assert_eq!(answer_for(&icon::BELL.as_reaction()), None);
    }
}
