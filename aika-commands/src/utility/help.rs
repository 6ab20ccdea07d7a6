use std::sync::Arc;

use twilight_model::gateway::payload::incoming::{InteractionCreate, MessageCreate};

use crate::utility::embeds::{
    grouped_help_description, page_out_of_range_message, unknown_category_message,
};
use crate::{COMMANDS, CommandMeta};
use aika_core::Context;
use aika_utils::embed::build_paginated_embed;
use aika_utils::pagination::{
    NavAction, NavInteractionValidation, Pager, SIMPLE_TIMEOUT_SECS, build_simple_nav_components,
    delete_paginated_message, page_window, send_paginated_message, total_pages,
    update_paginated_interaction_message, validate_nav_interaction,
};
use aika_utils::pagination::respond::respond_invalid;

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [page|category]",
};

const HELP_COMMANDS_PER_PAGE: usize = 6;
const HELP_TITLE: &str = "Available Commands";

/// Render the command catalog, optionally filtered by category or page.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, rest: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let arg = rest.and_then(|value| value.split_whitespace().next());
    let parsed_page = arg.and_then(|raw| raw.parse::<usize>().ok().filter(|page| *page >= 1));
    let category = match (arg, parsed_page) {
        (Some(raw), None) => Some(raw),
        _ => None,
    };

    if let Some(wanted_category) = category {
        let mut categories: Vec<&str> = COMMANDS.iter().map(|c| c.category).collect();
        categories.sort_unstable();
        categories.dedup();

        if !categories.contains(&wanted_category) {
            let out = unknown_category_message(wanted_category, &categories);
            http.create_message(msg.channel_id).content(&out).await?;
            return Ok(());
        }

        // Categories are small; a single static embed covers each one.
        let commands = sorted_commands(Some(wanted_category));
        let description = grouped_help_description(&commands);
        let embed = build_paginated_embed(HELP_TITLE, description, 1, 1)?;
        http.create_message(msg.channel_id).embeds(&[embed]).await?;
        return Ok(());
    }

    let commands = sorted_commands(None);
    let total = total_pages(commands.len(), HELP_COMMANDS_PER_PAGE);
    let requested_page = parsed_page.unwrap_or(1);

    if requested_page > total {
        let out = page_out_of_range_message(requested_page, total);
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let (start, end) = page_window(commands.len(), HELP_COMMANDS_PER_PAGE, requested_page);
    let description = grouped_help_description(&commands[start..end]);
    let embed = build_paginated_embed(HELP_TITLE, description, requested_page, total)?;

    let mut pager = Pager::new(total, Some(msg.author.id.get()));
    pager.seek(requested_page - 1);
    let components = build_simple_nav_components(META.name, &pager, SIMPLE_TIMEOUT_SECS);

    send_paginated_message(
        Arc::clone(&ctx.http),
        &ctx.cleanup,
        msg.channel_id,
        embed,
        components,
        total,
        SIMPLE_TIMEOUT_SECS,
    )
    .await?;

    Ok(())
}

/// Handle navigation button presses for the `help` command.
///
/// The catalog is static, so every press re-renders from the token alone;
/// no per-message session state is involved.
pub async fn handle_pagination_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<bool> {
    let http = &ctx.http;
    let (actor_id, token) = match validate_nav_interaction(http, &interaction, META.name).await? {
        NavInteractionValidation::NotForCommand => return Ok(false),
        NavInteractionValidation::HandledInvalid => return Ok(true),
        NavInteractionValidation::Valid {
            actor_user_id,
            token,
        } => (actor_user_id, token),
    };

    match token.action {
        NavAction::Close => {
            if let Some(message) = interaction.message.as_ref() {
                ctx.cleanup.cancel(message.id).await;
            }
            delete_paginated_message(http, &interaction).await?;
            return Ok(true);
        }
        // The simple variant renders no jump button; a jump token here is forged.
        NavAction::Jump => {
            respond_invalid(http, &interaction).await?;
            return Ok(true);
        }
        NavAction::Prev | NavAction::Next => {}
    }

    let commands = sorted_commands(None);
    let total = total_pages(commands.len(), HELP_COMMANDS_PER_PAGE);
    let target_page = token.page.min(total);

    let (start, end) = page_window(commands.len(), HELP_COMMANDS_PER_PAGE, target_page);
    let description = grouped_help_description(&commands[start..end]);
    let embed = build_paginated_embed(HELP_TITLE, description, target_page, total)?;

    let mut pager = Pager::new(total, Some(actor_id));
    pager.seek(target_page - 1);
    let components = build_simple_nav_components(META.name, &pager, SIMPLE_TIMEOUT_SECS);

    update_paginated_interaction_message(
        Arc::clone(&ctx.http),
        &ctx.cleanup,
        &interaction,
        embed,
        components,
        total,
        SIMPLE_TIMEOUT_SECS,
    )
    .await?;

    Ok(true)
}

fn sorted_commands(category: Option<&str>) -> Vec<&'static CommandMeta> {
    let mut filtered: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|cmd| match category {
            Some(wanted) => cmd.category == wanted,
            None => true,
        })
        .collect();

    filtered.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_commands_orders_by_category_then_name() {
        let commands = sorted_commands(None);
        assert_eq!(commands.len(), COMMANDS.len());

        let keys: Vec<(&str, &str)> = commands
            .iter()
            .map(|cmd| (cmd.category, cmd.name))
            .collect();
        let mut expected = keys.clone();
        expected.sort_unstable();
        assert_eq!(keys, expected);
    }

    #[test]
    fn category_filter_keeps_only_that_category() {
        let commands = sorted_commands(Some("search"));
        assert!(!commands.is_empty());
        assert!(commands.iter().all(|cmd| cmd.category == "search"));
    }
}
