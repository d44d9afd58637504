use crate::{
    Context, Error,
    api::{
        ApiError,
        animals::Animal,
        color::{ColorInfo, normalize_hex},
        translate::language_name,
        urban::Definition,
    },
    constants::{colors, icon, links},
    functions::{
        format::{discord::code_block, escape_mentions, pretty_message, truncate_chars},
        ui::pagination,
    },
};
use poise::serenity_prelude::{self as serenity, Mentionable};
use std::time::Duration;
use tracing::warn;

const URBAN_PAGE_TIMEOUT: Duration = Duration::from_secs(60);

/// Colour information for a hexadecimal code
#[poise::command(
    prefix_command,
    slash_command,
    aliases("colour", "colours"),
    required_bot_permissions = "EMBED_LINKS",
    broadcast_typing,
    category = "Fun"
)]
pub async fn color(
    ctx: Context<'_>,
    #[description = "Hex code, like #1abc9c or fa0"] hex: String,
) -> Result<(), Error> {
    let Some(hex) = normalize_hex(&hex) else {
        ctx.reply(pretty_message(
            icon::ERROR,
            format!(
                "`{}` is not a hex colour. Use 3 or 6 hex digits, with or without `#`.",
                escape_mentions(&hex)
            ),
        ))
        .await?;
        return Ok(());
    };

    let api = &ctx.data().api;
    let info = match api.color(&hex).await {
        Ok(info) => info,
        Err(err) => return report_api_error(ctx, err).await,
    };

    let embed = color_embed(&info)
        .thumbnail(api.color_viewer_url(&hex))
        .footer(serenity::CreateEmbedFooter::new(&ctx.author().name));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

fn color_embed(info: &ColorInfo) -> serenity::CreateEmbed {
    let rgb = &info.rgb;
    let hsl = &info.hsl;
    let hsv = &info.hsv;

    serenity::CreateEmbed::new()
        .title("Parrot colour prompt")
        .timestamp(serenity::Timestamp::now())
        .colour(serenity::Colour::from_rgb(rgb.r, rgb.g, rgb.b))
        .description(format!(
            "Colour name: `{}` | Close Hex code: `{}` | Having exact name? `{}` | Distance: `{}`",
            info.name.value,
            info.name.closest_named_hex,
            info.name.exact_match_name,
            info.name.distance
        ))
        .field(
            "RGB value (fraction)",
            format!(
                "Red: `{}` (`{:.2}`)\nGreen: `{}` (`{:.2}`)\nBlue: `{}` (`{:.2}`)",
                rgb.r, rgb.fraction.r, rgb.g, rgb.fraction.g, rgb.b, rgb.fraction.b
            ),
            true,
        )
        .field(
            "HSL value (fraction)",
            format!(
                "Hue: `{}` (`{:.2}`)\nSaturation: `{}` (`{:.2}`)\nLightness: `{}` (`{:.2}`)",
                hsl.h, hsl.fraction.h, hsl.s, hsl.fraction.s, hsl.l, hsl.fraction.l
            ),
            true,
        )
        .field(
            "HSV value (fraction)",
            format!(
                "Hue: `{}` (`{:.2}`)\nSaturation: `{}` (`{:.2}`)\nValue: `{}` (`{:.2}`)",
                hsv.h, hsv.fraction.h, hsv.s, hsv.fraction.s, hsv.v, hsv.fraction.v
            ),
            true,
        )
}

/// A random animal fact. Useless, I know
#[poise::command(
    prefix_command,
    slash_command,
    required_bot_permissions = "EMBED_LINKS",
    broadcast_typing,
    category = "Fun"
)]
pub async fn fact(
    ctx: Context<'_>,
    #[description = "dog, cat, panda, fox, bird or koala"] animal: String,
) -> Result<(), Error> {
    let Some(animal) = Animal::parse(&animal) else {
        ctx.reply(format!(
            "{} no facts are available for that animal. Available animals: {}",
            ctx.author().mention(),
            available_animals()
        ))
        .await?;
        return Ok(());
    };

    let api = &ctx.data().api;
    let image = match api.animal_image(animal).await {
        Ok(link) => Some(link),
        Err(err) => {
            warn!(%animal, error = %err, "animal image unavailable");
            None
        }
    };

    let fact = match api.animal_fact(animal).await {
        Ok(fact) => fact,
        Err(err) => return report_api_error(ctx, err).await,
    };

    let mut embed = serenity::CreateEmbed::new()
        .title(format!("{animal} fact"))
        .description(fact)
        .colour(colors::PARROT);
    if let Some(image) = image {
        embed = embed.image(image);
    }

    ctx.send(poise::CreateReply::default().embed(embed).reply(true))
        .await?;
    Ok(())
}

fn available_animals() -> String {
    Animal::ALL
        .iter()
        .map(|animal| format!("`{}`", animal.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Insult your enemy, ugh!
#[poise::command(
    prefix_command,
    slash_command,
    aliases("insult"),
    broadcast_typing,
    category = "Fun"
)]
pub async fn roast(
    ctx: Context<'_>,
    #[description = "Who to roast"] member: Option<serenity::User>,
) -> Result<(), Error> {
    let target = member.as_ref().unwrap_or_else(|| ctx.author());
    let insult = match ctx.data().api.insult().await {
        Ok(insult) => insult,
        Err(err) => return report_api_error(ctx, err).await,
    };

    ctx.reply(format!("**{}** {}", target.name, escape_mentions(&insult)))
        .await?;
    Ok(())
}

/// Random meme generator
#[poise::command(
    prefix_command,
    slash_command,
    required_bot_permissions = "EMBED_LINKS",
    broadcast_typing,
    category = "Fun"
)]
pub async fn meme(ctx: Context<'_>) -> Result<(), Error> {
    let meme = match ctx.data().api.meme().await {
        Ok(meme) => meme,
        Err(err) => return report_api_error(ctx, err).await,
    };

    let embed = serenity::CreateEmbed::new()
        .title(meme.title)
        .description(meme.subreddit)
        .image(meme.image)
        .colour(colors::PARROT)
        .timestamp(serenity::Timestamp::now())
        .footer(serenity::CreateEmbedFooter::new(format!(
            "UP(s): {} | DOWN(s): {}",
            meme.ups, meme.downs
        )));

    ctx.send(poise::CreateReply::default().embed(embed).reply(true))
        .await?;
    Ok(())
}

/// Fake identity generator
#[poise::command(
    prefix_command,
    slash_command,
    required_bot_permissions = "EMBED_LINKS",
    broadcast_typing,
    category = "Fun"
)]
pub async fn fakepeople(ctx: Context<'_>) -> Result<(), Error> {
    let identity = match ctx.data().api.fake_identity().await {
        Ok(Some(identity)) => identity,
        Ok(None) => {
            ctx.reply(pretty_message(icon::ERROR, "Nobody came back this time, try again."))
                .await?;
            return Ok(());
        }
        Err(err) => return report_api_error(ctx, err).await,
    };

    let embed = serenity::CreateEmbed::new()
        .title(identity.full_name())
        .description(code_block(
            format!("{} {}", identity.address(), identity.coordinates()),
            None,
        ))
        .colour(colors::PARROT)
        .timestamp(serenity::Timestamp::now())
        .field("Timezone", identity.timezone(), false)
        .field(
            "Email & Password",
            format!(
                "**Username:** {}\n**Email:** {}\n**Password:** {}",
                identity.login.username, identity.email, identity.login.password
            ),
            false,
        )
        .field("Age", identity.dob.age.to_string(), false)
        .field("Phone", format!("{}, {}", identity.phone, identity.cell), false)
        .thumbnail(&identity.picture.large)
        .footer(serenity::CreateEmbedFooter::new(&ctx.author().name));

    ctx.send(poise::CreateReply::default().embed(embed).reply(true))
        .await?;
    Ok(())
}

/// Translate text, or the message you reply to
#[poise::command(
    prefix_command,
    slash_command,
    aliases("trans"),
    required_bot_permissions = "EMBED_LINKS",
    broadcast_typing,
    category = "Fun"
)]
pub async fn translate(
    ctx: Context<'_>,
    #[description = "Target language code, like en or es"] to: String,
    #[description = "Text to translate"]
    #[rest]
    text: Option<String>,
) -> Result<(), Error> {
    let text = text.or_else(|| replied_content(ctx));
    let Some(text) = text.filter(|text| !text.trim().is_empty()) else {
        ctx.reply(format!(
            "{} you must provide the message reference or message for translation",
            ctx.author().mention()
        ))
        .await?;
        return Ok(());
    };

    let translation = match ctx.data().api.translate(&text.to_lowercase(), &to).await {
        Ok(Some(translation)) => translation,
        Ok(None) => {
            ctx.reply(format!(
                "{} Can not translate **{}** to **{}**",
                ctx.author().mention(),
                escape_mentions(&truncate_chars(&text, 1000)),
                language_name(&to)
            ))
            .await?;
            return Ok(());
        }
        Err(err) => return report_api_error(ctx, err).await,
    };

    let pronunciation = translation
        .pronunciation
        .clone()
        .unwrap_or_else(|| "-".to_string());

    let embed = serenity::CreateEmbed::new()
        .title("Translated")
        .description(code_block(&translation.text, None))
        .colour(colors::PARROT)
        .timestamp(serenity::Timestamp::now())
        .field(
            "Info",
            format!(
                "Translated from **{}** to **{}**",
                language_name(&translation.source_lang),
                language_name(&translation.lang)
            ),
            false,
        )
        .field("Pronunciation", code_block(pronunciation, None), false)
        .thumbnail(links::TRANSLATE_THUMBNAIL)
        .footer(serenity::CreateEmbedFooter::new(&ctx.author().name));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

fn replied_content(ctx: Context<'_>) -> Option<String> {
    match ctx {
        poise::Context::Prefix(prefix) => prefix
            .msg
            .referenced_message
            .as_ref()
            .map(|message| message.content.clone()),
        poise::Context::Application(_) => None,
    }
}

/// Look a term up on Urban Dictionary
#[poise::command(
    prefix_command,
    slash_command,
    aliases("urban", "def"),
    required_bot_permissions = "EMBED_LINKS",
    broadcast_typing,
    category = "Fun"
)]
pub async fn urbandictionary(
    ctx: Context<'_>,
    #[description = "Term to look up"]
    #[rest]
    term: String,
) -> Result<(), Error> {
    let definitions = match ctx.data().api.define(&term).await {
        Ok(definitions) => definitions,
        Err(err) => return report_api_error(ctx, err).await,
    };

    if definitions.is_empty() {
        ctx.reply(format!(
            "{} **{}** means nothing. Try something else",
            ctx.author().mention(),
            escape_mentions(&term)
        ))
        .await?;
        return Ok(());
    }

    pagination::paginate(
        ctx,
        definitions.len(),
        URBAN_PAGE_TIMEOUT,
        false,
        0,
        |page, total| (definition_embed(&definitions[page], page, total), Vec::new()),
    )
    .await
}

fn definition_embed(definition: &Definition, page: usize, total: usize) -> serenity::CreateEmbed {
    let example = definition.clean_example();
    let example = if example.trim().is_empty() {
        "No example".to_string()
    } else {
        truncate_chars(&example, 1024)
    };

    serenity::CreateEmbed::new()
        .title(capitalize(&definition.word))
        .url(&definition.permalink)
        .description(truncate_chars(&definition.clean_definition(), 4096))
        .colour(colors::PARROT)
        .timestamp(serenity::Timestamp::now())
        .field("Example", example, false)
        .author(serenity::CreateEmbedAuthor::new(format!(
            "Author: {}",
            definition.author
        )))
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Page {}/{} | UP(s) {}, DOWN(s) {}",
            page + 1,
            total,
            definition.thumbs_up,
            definition.thumbs_down
        )))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Short reply for a failed external call; the command itself still succeeds
pub async fn report_api_error(ctx: Context<'_>, err: ApiError) -> Result<(), Error> {
    warn!(command = %ctx.command().qualified_name, error = %err, "external API call failed");

    let message = match err.status() {
        Some(status) => format!(
            "{} API returned a {} status.",
            ctx.author().mention(),
            status.as_u16()
        ),
        None => format!(
            "{} Something not right! The service did not answer properly.",
            ctx.author().mention()
        ),
    };

    ctx.reply(message).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_capitalized() {
        assert_eq!(capitalize("yEET"), "Yeet");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn animals_are_listed_for_unknown_input() {
        assert_eq!(
            available_animals(),
            "`dog`, `cat`, `panda`, `fox`, `bird`, `koala`"
        );
    }
}
