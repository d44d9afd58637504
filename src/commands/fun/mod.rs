use crate::{
    Context, Error,
    constants::{colors, icon, links},
    functions::format::{discord::code_block, escape_mentions, pretty_message},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use poise::serenity_prelude::{self as serenity, Mentionable};
use rand::seq::IndexedRandom;

pub mod http;
pub mod images;

const TRUTHS: &str = include_str!("../../../assets/truth.txt");
const DARES: &str = include_str!("../../../assets/dare.txt");

pub const EIGHT_BALL_ANSWERS: [&str; 20] = [
    "All signs point to yes...",
    "Yes!",
    "My sources say nope.",
    "You may rely on it.",
    "Concentrate and ask again...",
    "Outlook not so good...",
    "It is decidedly so!",
    "Better not tell you.",
    "Very doubtful.",
    "Yes - Definitely!",
    "It is certain!",
    "Most likely.",
    "Ask again later.",
    "No!",
    "Outlook good.",
    "Don't count on it.",
    "Why not",
    "Probably",
    "Can't say",
    "Well well...",
];

/// 8ball magic, nothing much to say
#[poise::command(prefix_command, slash_command, rename = "8ball", category = "Fun")]
pub async fn eight_ball(
    ctx: Context<'_>,
    #[description = "What do you want to know?"]
    #[rest]
    question: String,
) -> Result<(), Error> {
    let answer = EIGHT_BALL_ANSWERS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or("Can't say");

    ctx.reply(format!(
        "Question: **{}**\nAnswer: **{}**",
        escape_mentions(&question),
        answer
    ))
    .await?;
    Ok(())
}

/// Can't decide? Let Parrot pick one of your comma separated options
#[poise::command(prefix_command, slash_command, category = "Fun")]
pub async fn choose(
    ctx: Context<'_>,
    #[description = "Options separated by commas"]
    #[rest]
    options: String,
) -> Result<(), Error> {
    let options = split_options(&options);
    let Some(choice) = options.choose(&mut rand::rng()) else {
        ctx.reply(pretty_message(
            icon::ERROR,
            "Give me at least one option, separated by commas.",
        ))
        .await?;
        return Ok(());
    };

    ctx.reply(format!(
        "{} I choose {}",
        ctx.author().mention(),
        escape_mentions(choice)
    ))
    .await?;
    Ok(())
}

/// Slap someone virtually
#[poise::command(
    prefix_command,
    slash_command,
    aliases("hit"),
    guild_only,
    required_bot_permissions = "MANAGE_MESSAGES",
    category = "Fun"
)]
pub async fn slap(
    ctx: Context<'_>,
    #[description = "Who deserves it"] member: serenity::Member,
    #[description = "Why"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    if let poise::Context::Prefix(prefix) = ctx {
        let _ = prefix.msg.delete(ctx.serenity_context()).await;
    }

    let reason = reason.unwrap_or_else(|| "for no reason".to_string());
    let author_name = match ctx.author_member().await {
        Some(member) => member.display_name().to_string(),
        None => ctx.author().name.clone(),
    };

    ctx.say(format!(
        "{} slapped {} {}!",
        author_name,
        member.mention(),
        escape_mentions(&reason)
    ))
    .await?;
    Ok(())
}

/// Truth: who is your crush?
#[poise::command(
    prefix_command,
    slash_command,
    required_bot_permissions = "EMBED_LINKS",
    category = "Fun"
)]
pub async fn truth(
    ctx: Context<'_>,
    #[description = "Who has to answer"] member: Option<serenity::User>,
) -> Result<(), Error> {
    let title = match &member {
        Some(user) => format!("{} reply!", user.name),
        None => "Truth".to_string(),
    };
    send_prompt(ctx, title, TRUTHS).await
}

/// I dare you to use this command
#[poise::command(
    prefix_command,
    slash_command,
    required_bot_permissions = "EMBED_LINKS",
    category = "Fun"
)]
pub async fn dare(
    ctx: Context<'_>,
    #[description = "Who gets the dare"] member: Option<serenity::User>,
) -> Result<(), Error> {
    let title = match &member {
        Some(user) => format!("{} Dared", user.name),
        None => "Dare".to_string(),
    };
    send_prompt(ctx, title, DARES).await
}

async fn send_prompt(ctx: Context<'_>, title: String, source: &str) -> Result<(), Error> {
    let prompt = random_line(source).unwrap_or("Nothing to see here.");
    let embed = serenity::CreateEmbed::new()
        .title(title)
        .description(prompt)
        .colour(colors::PARROT)
        .timestamp(serenity::Timestamp::now())
        .footer(serenity::CreateEmbedFooter::new(&ctx.author().name));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Encode text to Base64 and binary
#[poise::command(
    prefix_command,
    slash_command,
    required_bot_permissions = "EMBED_LINKS",
    category = "Fun"
)]
pub async fn encode(
    ctx: Context<'_>,
    #[description = "Text to encode"]
    #[rest]
    text: String,
) -> Result<(), Error> {
    let embed = serenity::CreateEmbed::new()
        .title("Encoding...")
        .colour(colors::DANGER)
        .timestamp(serenity::Timestamp::now())
        .field("Normal [string] text:", code_block(&text, None), false)
        .field("Encoded [base64]:", code_block(STANDARD.encode(&text), None), false)
        .field("Encoded [binary]:", code_block(to_binary(&text), None), false)
        .thumbnail(links::DECODE_THUMBNAIL)
        .footer(author_footer(ctx));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Decode Base64 back to text
#[poise::command(
    prefix_command,
    slash_command,
    required_bot_permissions = "EMBED_LINKS",
    category = "Fun"
)]
pub async fn decode(
    ctx: Context<'_>,
    #[description = "Base64 to decode"]
    #[rest]
    text: String,
) -> Result<(), Error> {
    let decoded = match decode_base64(&text) {
        Ok(decoded) => decoded,
        Err(reason) => {
            ctx.reply(pretty_message(icon::ERROR, reason)).await?;
            return Ok(());
        }
    };

    let embed = serenity::CreateEmbed::new()
        .title("Decoding...")
        .colour(colors::DANGER)
        .timestamp(serenity::Timestamp::now())
        .field("Encoded text:", code_block(text.trim(), None), false)
        .field("Decoded text:", code_block(decoded, None), false)
        .thumbnail(links::DECODE_THUMBNAIL)
        .footer(author_footer(ctx));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

fn author_footer(ctx: Context<'_>) -> serenity::CreateEmbedFooter {
    serenity::CreateEmbedFooter::new(&ctx.author().name).icon_url(ctx.author().face())
}

pub fn split_options(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .collect()
}

/// Every character's code point in binary, concatenated without padding
pub fn to_binary(text: &str) -> String {
    text.chars().map(|c| format!("{:b}", c as u32)).collect()
}

pub fn decode_base64(text: &str) -> Result<String, &'static str> {
    let bytes = STANDARD
        .decode(text.trim())
        .map_err(|_| "That is not valid Base64.")?;
    String::from_utf8(bytes).map_err(|_| "The decoded bytes are not readable text.")
}

fn random_line(source: &str) -> Option<&str> {
    let lines: Vec<&str> = source.lines().filter(|line| !line.trim().is_empty()).collect();
    lines.choose(&mut rand::rng()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_are_trimmed_and_empty_ones_dropped() {
        assert_eq!(split_options(" tea, coffee ,, water "), vec!["tea", "coffee", "water"]);
        assert!(split_options(" , ").is_empty());
    }

    #[test]
    fn binary_is_unpadded_code_points() {
        assert_eq!(to_binary("AB"), "10000011000010");
        assert_eq!(to_binary("é"), "11101001");
    }

    #[test]
    fn base64_decoding_reports_bad_input() {
        assert_eq!(decode_base64(" cGFycm90 ").as_deref(), Ok("parrot"));
        assert!(decode_base64("not base64!").is_err());
        assert!(decode_base64(&STANDARD.encode([0xff, 0xfe])).is_err());
    }

    #[test]
    fn bundled_prompts_are_available() {
        assert!(random_line(TRUTHS).is_some());
        assert!(random_line(DARES).is_some());
        assert_eq!(random_line("\n \n"), None);
    }

    #[test]
    fn eight_ball_answers_are_unique() {
        let mut answers = EIGHT_BALL_ANSWERS.to_vec();
        answers.sort();
        answers.dedup();
        assert_eq!(answers.len(), 20);
    }
}
