use crate::constants::icon;
use crate::{Context, Error};
use poise::serenity_prelude as serenity;
use rand::Rng;
use serenity::builder::CreateInteractionResponseMessage;
use serenity::collector::ComponentInteractionCollector;
use serenity::{CreateActionRow, CreateButton};
use std::time::Duration;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfirmationOutcome {
    Accepted,
    Declined,
    Timeout,
}

pub struct ConfirmationPromptOptions {
    pub content: String,
    pub timeout: Duration,
}

impl ConfirmationPromptOptions {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Asks `target_user` a yes/no question with buttons.
///
/// Other users pressing the buttons get an ephemeral refusal and the prompt keeps waiting.
/// The prompt is deleted once answered or timed out.
pub async fn confirmation_prompt(
    ctx: &Context<'_>,
    target_user: serenity::UserId,
    options: ConfirmationPromptOptions,
) -> Result<ConfirmationOutcome, Error> {
    let base_id = format!("confirm_{}", rand::rng().random::<u64>());
    let accept_id = format!("{base_id}_yes");
    let deny_id = format!("{base_id}_no");

    let reply = ctx
        .send(
            poise::CreateReply::default()
                .content(&options.content)
                .components(create_buttons(&accept_id, &deny_id, false)),
        )
        .await?;
    let message = reply.message().await?;
    let message_id = message.id;
    let channel_id = message.channel_id;

    let mut outcome = ConfirmationOutcome::Timeout;
    while let Some(interaction) = ComponentInteractionCollector::new(ctx.serenity_context())
        .message_id(message_id)
        .timeout(options.timeout)
        .await
    {
        if interaction.user.id != target_user {
            super::component::send_ephemeral_response(
                ctx,
                &interaction,
                "This confirmation dialog is not for you.",
            )
            .await?;
            continue;
        }

        let accepted = interaction.data.custom_id == accept_id;
        let response = CreateInteractionResponseMessage::new()
            .content(&options.content)
            .components(create_buttons(&accept_id, &deny_id, true));
        interaction
            .create_response(
                ctx.serenity_context(),
                serenity::CreateInteractionResponse::UpdateMessage(response),
            )
            .await?;

        outcome = if accepted {
            ConfirmationOutcome::Accepted
        } else {
            ConfirmationOutcome::Declined
        };
        break;
    }

    let _ = channel_id
        .delete_message(ctx.serenity_context(), message_id)
        .await;

    Ok(outcome)
}

fn create_buttons(accept_id: &str, deny_id: &str, disabled: bool) -> Vec<CreateActionRow> {
    let accept = CreateButton::new(accept_id)
        .label("Yes")
        .style(serenity::ButtonStyle::Success)
        .disabled(disabled)
        .emoji(icon::CHECK.as_reaction());
    let deny = CreateButton::new(deny_id)
        .label("No")
        .style(serenity::ButtonStyle::Danger)
        .disabled(disabled)
        .emoji(icon::ERROR.as_reaction());

    vec![CreateActionRow::Buttons(vec![accept, deny])]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_share_one_row_and_can_be_disabled() {
        let rows = create_buttons("confirm_yes", "confirm_no", true);
        assert_eq!(rows.len(), 1);
        let CreateActionRow::Buttons(buttons) = &rows[0] else {
            panic!("expected a button row");
        };
        assert_eq!(buttons.len(), 2);
    }

    #[test]
    fn prompts_wait_a_minute_by_default() {
        let options = ConfirmationPromptOptions::new("Is the tag NSFW?");
        assert_eq!(options.timeout, Duration::from_secs(60));
        assert_eq!(options.content, "Is the tag NSFW?");
    }
}
