use std::time::Duration;

use poise::serenity_prelude as serenity;
use serenity::collector::ComponentInteractionCollector;
use serenity::{ButtonStyle, CreateActionRow, CreateButton, CreateEmbedFooter};

use crate::{Context, Error, constants::colors};

use super::component::update_component_message;

pub const DEFAULT_PAGE_TIMEOUT: Duration = Duration::from_secs(120);

/// Provides a generic paginator that can be reused across commands
pub async fn paginate<F>(
    ctx: Context<'_>,
    total_pages: usize,
    timeout: Duration,
    ephemeral: bool,
    initial_page: usize,
    mut build_page: F,
) -> Result<(), Error>
where
    F: FnMut(usize, usize) -> (serenity::CreateEmbed, Vec<CreateActionRow>),
{
    if total_pages == 0 {
        return Ok(());
    }

    let mut current_page = initial_page.min(total_pages - 1);
    let buttons = PaginationButtons::new(ctx.id());

    let (embed, mut components) = build_page(current_page, total_pages);
    if total_pages > 1 {
        components.push(build_navigation_row(&buttons, current_page, total_pages));
    }

    let reply = ctx
        .send(
            poise::CreateReply::default()
                .embed(embed)
                .components(components)
                .ephemeral(ephemeral),
        )
        .await?;

    if total_pages == 1 {
        return Ok(());
    }

    let message = reply.message().await?;

    while let Some(interaction) = ComponentInteractionCollector::new(ctx.serenity_context())
        .author_id(ctx.author().id)
        .message_id(message.id)
        .timeout(timeout)
        .await
    {
        let custom_id = &interaction.data.custom_id;
        let Some(next_index) = buttons.target_page(custom_id, current_page, total_pages) else {
            continue;
        };

        current_page = next_index;
        let (embed, mut components) = build_page(current_page, total_pages);
        components.push(build_navigation_row(&buttons, current_page, total_pages));
        update_component_message(ctx.serenity_context(), &interaction, embed, components).await?;
    }

    let (embed, components) = build_page(current_page, total_pages);
    let _ = reply
        .edit(
            ctx,
            poise::CreateReply::default()
                .embed(embed)
                .components(components),
        )
        .await;

    Ok(())
}

/// Paginates numbered lines under a title, `per_page` lines per embed
pub async fn paginate_lines(
    ctx: Context<'_>,
    title: impl Into<String>,
    lines: Vec<String>,
    per_page: usize,
) -> Result<(), Error> {
    let title = title.into();
    let pages = chunk_lines(&lines, per_page);

    paginate(
        ctx,
        pages.len(),
        DEFAULT_PAGE_TIMEOUT,
        false,
        0,
        move |current_page, total_pages| {
            let embed = serenity::CreateEmbed::new()
                .title(title.clone())
                .colour(colors::PARROT)
                .description(pages[current_page].clone())
                .footer(CreateEmbedFooter::new(format!(
                    "Page {}/{}",
                    current_page + 1,
                    total_pages
                )));
            (embed, Vec::new())
        },
    )
    .await
}

/// Numbers the lines from 1 and groups them into page bodies
pub fn chunk_lines(lines: &[String], per_page: usize) -> Vec<String> {
    let per_page = per_page.max(1);
    lines
        .chunks(per_page)
        .enumerate()
        .map(|(page_idx, chunk)| {
            chunk
                .iter()
                .enumerate()
                .map(|(idx, line)| format!("`{}` {}", page_idx * per_page + idx + 1, line))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect()
}

fn build_navigation_row(
    buttons: &PaginationButtons,
    current_page: usize,
    total_pages: usize,
) -> CreateActionRow {
    let disable_back = total_pages <= 1 || current_page == 0;
    let disable_forward = total_pages <= 1 || current_page + 1 >= total_pages;

    let row = vec![
        CreateButton::new(buttons.first.clone())
            .style(ButtonStyle::Secondary)
            .emoji(crate::constants::icon::CARET_DOUBLE_LEFT.as_reaction())
            .disabled(disable_back),
        CreateButton::new(buttons.prev.clone())
            .style(ButtonStyle::Secondary)
            .emoji(crate::constants::icon::CARET_LEFT.as_reaction())
            .disabled(disable_back),
        CreateButton::new(buttons.home.clone())
            .style(ButtonStyle::Secondary)
            .emoji(crate::constants::icon::HOUSE.as_reaction())
            .disabled(current_page == 0),
        CreateButton::new(buttons.next.clone())
            .style(ButtonStyle::Secondary)
            .emoji(crate::constants::icon::CARET_RIGHT.as_reaction())
            .disabled(disable_forward),
        CreateButton::new(buttons.last.clone())
            .style(ButtonStyle::Secondary)
            .emoji(crate::constants::icon::CARET_DOUBLE_RIGHT.as_reaction())
            .disabled(disable_forward),
    ];

    CreateActionRow::Buttons(row)
}

struct PaginationButtons {
    first: String,
    prev: String,
    home: String,
    next: String,
    last: String,
}

impl PaginationButtons {
    fn new(ctx_id: u64) -> Self {
        Self {
            first: format!("{ctx_id}_pg_first"),
            prev: format!("{ctx_id}_pg_prev"),
            home: format!("{ctx_id}_pg_home"),
            next: format!("{ctx_id}_pg_next"),
            last: format!("{ctx_id}_pg_last"),
        }
    }

    fn target_page(
        &self,
        custom_id: &str,
        current_page: usize,
        total_pages: usize,
    ) -> Option<usize> {
        let last_index = total_pages.saturating_sub(1);
        match custom_id {
            id if id == self.first || id == self.home => Some(0),
            id if id == self.prev => Some(current_page.saturating_sub(1)),
            id if id == self.next => Some((current_page + 1).min(last_index)),
            id if id == self.last => Some(last_index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_numbered_across_pages() {
        let lines: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let pages = chunk_lines(&lines, 2);
        assert_eq!(pages, vec!["`1` a\n`2` b".to_string(), "`3` c".to_string()]);
    }

    #[test]
    fn navigation_is_clamped() {
        let buttons = PaginationButtons::new(9);
        assert_eq!(buttons.target_page("9_pg_prev", 0, 3), Some(0));
        assert_eq!(buttons.target_page("9_pg_next", 2, 3), Some(2));
        assert_eq!(buttons.target_page("9_pg_last", 0, 3), Some(2));
        assert_eq!(buttons.target_page("9_pg_home", 2, 3), Some(0));
        assert_eq!(buttons.target_page("other", 1, 3), None);
    }
}
