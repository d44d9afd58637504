use poise::serenity_prelude::utils::MessageBuilder;
use std::fmt::Display;

pub const MESSAGE_LIMIT: usize = 2000;

/// Builds a lightweight "emoji | message" string used across embeds/responses.
pub fn pretty_message(emoji: impl Display, message: impl Display) -> String {
    format!("{} | {}", emoji, message)
}

/// Applies markdown emphasis in the same order the flags are listed.
pub fn decorate(content: &str, bold: bool, italic: bool, underline: bool) -> String {
    let mut content = content.to_string();
    if bold {
        content = format!("**{content}**");
    }
    if italic {
        content = format!("*{content}*");
    }
    if underline {
        content = format!("__{content}__");
    }
    content
}

/// Neutralises `@everyone`, `@here` and user/role mentions with a zero-width space.
pub fn escape_mentions(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(at) = rest.find('@') {
        let (before, after) = rest.split_at(at);
        escaped.push_str(before);

        let tail = &after[1..];
        let is_mass = tail.starts_with("everyone") || tail.starts_with("here");
        let is_mention = before.ends_with('<')
            && tail
                .trim_start_matches(['!', '&'])
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit());

        escaped.push('@');
        if is_mass || is_mention {
            escaped.push('\u{200b}');
        }
        rest = tail;
    }

    escaped.push_str(rest);
    escaped
}

/// Cuts text to at most `max` characters without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Joins words as `a`, `a and b` or `a, b, and c`.
pub fn human_join(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [head @ .., last] => format!("{}, and {}", head.join(", "), last),
    }
}

/// Renders `name: value` pairs inside a code block with the names left aligned.
pub fn entry_to_code<N: Display, V: Display>(entries: &[(N, V)]) -> String {
    aligned_entries(entries, false)
}

/// Like [`entry_to_code`] but with the names right aligned.
pub fn indented_entry_to_code<N: Display, V: Display>(entries: &[(N, V)]) -> String {
    aligned_entries(entries, true)
}

fn aligned_entries<N: Display, V: Display>(entries: &[(N, V)], right: bool) -> String {
    let names: Vec<String> = entries.iter().map(|(name, _)| name.to_string()).collect();
    let width = names.iter().map(|name| name.chars().count()).max().unwrap_or(0);

    let mut output = vec!["```".to_string()];
    for (name, (_, value)) in names.iter().zip(entries) {
        if right {
            output.push(format!("\u{200b}{name:>width$}: {value}"));
        } else {
            output.push(format!("{name:<width$}: {value}"));
        }
    }
    output.push("```".to_string());
    output.join("\n")
}

/// Helper functions to format Discord messages with Markdown safely.
pub mod discord {

    use super::MessageBuilder;
    use poise::serenity_prelude::{ChannelId, RoleId, UserId};

    /// Formats a raw Discord user mention (`<@id>`).
    pub fn mention(id: impl Into<i64>) -> String {
        build(|builder| {
            let user_id = UserId::new(id.into() as u64);
            builder.mention(&user_id);
        })
    }

    /// Formats a role mention (`<@&id>`).
    pub fn role_mention(id: impl Into<i64>) -> String {
        build(|builder| {
            let role_id = RoleId::new(id.into() as u64);
            builder.mention(&role_id);
        })
    }

    /// Formats a channel mention (`<#id>`).
    pub fn channel_mention(id: impl Into<i64>) -> String {
        build(|builder| {
            let channel_id = ChannelId::new(id.into() as u64);
            builder.mention(&channel_id);
        })
    }

    /// Wraps text with inline code markers (`` `text` ``).
    pub fn inline_code(text: impl AsRef<str>) -> String {
        build(|builder| {
            builder.push_mono_safe(text.as_ref());
        })
    }

    /// Formats text as a code block (```text```), optionally adding a language hint.
    pub fn code_block(text: impl AsRef<str>, language: Option<&str>) -> String {
        build(|builder| {
            builder.push_codeblock_safe(text.as_ref(), language);
        })
    }

    fn build(apply: impl FnOnce(&mut MessageBuilder)) -> String {
        let mut builder = MessageBuilder::new();
        apply(&mut builder);
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decorate_nests_in_order() {
        assert_eq!(decorate("hi", true, true, true), "__***hi***__");
        assert_eq!(decorate("hi", false, false, false), "hi");
    }

    #[test]
    fn mass_and_direct_mentions_are_escaped() {
        assert_eq!(escape_mentions("@everyone hi"), "@\u{200b}everyone hi");
        assert_eq!(escape_mentions("ping <@123>"), "ping <@\u{200b}123>");
        assert_eq!(escape_mentions("<@!42> <@&7>"), "<@\u{200b}!42> <@\u{200b}&7>");
        assert_eq!(escape_mentions("mail me@example.com"), "mail me@example.com");
    }

    #[test]
    fn human_join_matches_english_lists() {
        let words = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(human_join(&words(&[])), "");
        assert_eq!(human_join(&words(&["Embed Links"])), "Embed Links");
        assert_eq!(
            human_join(&words(&["Embed Links", "Attach Files"])),
            "Embed Links and Attach Files"
        );
        assert_eq!(
            human_join(&words(&["A", "B", "C"])),
            "A, B, and C"
        );
    }

    #[test]
    fn entries_are_aligned() {
        let entries = [("id", "1"), ("name", "polly")];
        assert_eq!(entry_to_code(&entries), "```\nid  : 1\nname: polly\n```");
        assert_eq!(
            indented_entry_to_code(&entries),
            "```\n\u{200b}  id: 1\n\u{200b}name: polly\n```"
        );
    }

    #[test]
    fn discord_mentions_use_the_raw_syntax() {
        assert_eq!(discord::mention(42_i64), "<@42>");
        assert_eq!(discord::role_mention(7_i64), "<@&7>");
        assert_eq!(discord::channel_mention(9_i64), "<#9>");
        assert_eq!(discord::inline_code("p!help"), "`p!help`");
    }

    #[test]
    fn truncation_respects_characters() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("ab", 10), "ab");
    }
}
