use poise::serenity_prelude as serenity;

use crate::{Context, Error};

use super::format::{MESSAGE_LIMIT, decorate, escape_mentions};

pub const OVERFLOW_FILE_NAME: &str = "message_too_long.txt";

/// What actually goes out for a given piece of text
#[derive(Debug, Eq, PartialEq)]
pub enum Outgoing {
    Inline(String),
    Attachment(Vec<u8>),
}

impl Outgoing {
    pub fn plan(content: &str) -> Self {
        let content = escape_mentions(content);
        if content.chars().count() > MESSAGE_LIMIT {
            Outgoing::Attachment(content.into_bytes())
        } else {
            Outgoing::Inline(content)
        }
    }

    pub fn into_reply(self) -> poise::CreateReply {
        match self {
            Outgoing::Inline(content) => poise::CreateReply::default().content(content),
            Outgoing::Attachment(bytes) => poise::CreateReply::default()
                .content("Message was too long to send, attached as a file.")
                .attachment(serenity::CreateAttachment::bytes(bytes, OVERFLOW_FILE_NAME)),
        }
    }

    /// Same content as [`Outgoing::into_reply`], for sending outside of a command reply
    pub fn into_message(self) -> serenity::CreateMessage {
        match self {
            Outgoing::Inline(content) => serenity::CreateMessage::new().content(content),
            Outgoing::Attachment(bytes) => serenity::CreateMessage::new()
                .content("Message was too long to send, attached as a file.")
                .add_file(serenity::CreateAttachment::bytes(bytes, OVERFLOW_FILE_NAME)),
        }
    }
}

/// Replies with mentions neutralised, falling back to a text file when the content is too long
pub async fn safe_send(ctx: Context<'_>, content: &str) -> Result<(), Error> {
    ctx.send(Outgoing::plan(content).into_reply()).await?;
    Ok(())
}

pub async fn send_decorated(
    ctx: Context<'_>,
    content: &str,
    bold: bool,
    italic: bool,
    underline: bool,
) -> Result<(), Error> {
    safe_send(ctx, &decorate(content, bold, italic, underline)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_sent_inline_and_escaped() {
        assert_eq!(
            Outgoing::plan("hi @everyone"),
            Outgoing::Inline("hi @\u{200b}everyone".to_string())
        );
    }

    #[test]
    fn long_content_becomes_an_attachment() {
        let long = "a".repeat(MESSAGE_LIMIT + 1);
        assert_eq!(Outgoing::plan(&long), Outgoing::Attachment(long.into_bytes()));
        let exact = "b".repeat(MESSAGE_LIMIT);
        assert_eq!(Outgoing::plan(&exact), Outgoing::Inline(exact.clone()));
    }
}
