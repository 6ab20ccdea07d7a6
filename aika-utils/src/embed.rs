use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x02_A9_FF;

/// Footer text for one position in a paginated sequence.
pub fn page_footer(page: usize, total_pages: usize) -> String {
    format!("Page {}/{}", page.max(1), total_pages.max(1))
}

/// Build a standard paginated embed with consistent styling.
///
/// Single-page embeds get no footer; the page label only appears when there
/// is something to navigate.
pub fn build_paginated_embed(
    title: &str,
    description: impl Into<String>,
    page: usize,
    total_pages: usize,
) -> anyhow::Result<Embed> {
    let builder = EmbedBuilder::new()
        .title(title)
        .color(DEFAULT_EMBED_COLOR)
        .description(description);

    let embed = if total_pages > 1 {
        let footer = EmbedFooterBuilder::new(page_footer(page, total_pages)).build();
        builder.footer(footer).validate()?.build()
    } else {
        builder.validate()?.build()
    };

    Ok(embed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_page_embeds_carry_a_position_footer() {
        let embed = build_paginated_embed("Results", "body", 2, 5).unwrap();
        assert_eq!(embed.footer.unwrap().text, "Page 2/5");
    }

    #[test]
    fn single_page_embeds_have_no_footer() {
        let embed = build_paginated_embed("Results", "body", 1, 1).unwrap();
        assert!(embed.footer.is_none());
    }
}
