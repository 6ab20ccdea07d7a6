//! Message and description templates for utility commands.

use crate::CommandMeta;

pub fn usage_message(usage: &str) -> String {
    format!("Usage: `{usage}`")
}

pub fn guild_only_message() -> &'static str {
    "This command only works in servers."
}

pub fn page_out_of_range_message(requested: usize, total: usize) -> String {
    format!("Page {requested} does not exist. Available pages: 1-{total}.")
}

pub fn unknown_category_message(wanted: &str, categories: &[&str]) -> String {
    format!(
        "Unknown category: `{wanted}`. Available categories: {}.",
        categories.join(", ")
    )
}

/// Build a help description for a slice of commands, grouped by category.
///
/// Assumes the slice is already sorted by category; each category gets a
/// bold header followed by its command lines.
pub fn grouped_help_description(commands: &[&CommandMeta]) -> String {
    let mut description = String::new();
    let mut current_category: Option<&str> = None;

    for command in commands {
        if current_category != Some(command.category) {
            if !description.is_empty() {
                description.push('\n');
            }
            description.push_str(&format!("**{}**\n", command.category));
            current_category = Some(command.category);
        }
        description.push_str(&format!("`{}` · {}\n", command.name, command.desc));
    }

    description
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: CommandMeta = CommandMeta {
        name: "anime",
        desc: "Search anime.",
        category: "search",
        usage: "!anime <title>",
    };
    const SECOND: CommandMeta = CommandMeta {
        name: "manga",
        desc: "Search manga.",
        category: "search",
        usage: "!manga <title>",
    };
    const THIRD: CommandMeta = CommandMeta {
        name: "ping",
        desc: "Replies with Pong!",
        category: "utility",
        usage: "!ping",
    };

    #[test]
    fn descriptions_group_commands_under_category_headers() {
        let description = grouped_help_description(&[&FIRST, &SECOND, &THIRD]);

        assert_eq!(
            description,
            "**search**\n`anime` · Search anime.\n`manga` · Search manga.\n\n**utility**\n`ping` · Replies with Pong!\n"
        );
    }

    #[test]
    fn empty_command_slice_renders_nothing() {
        assert!(grouped_help_description(&[]).is_empty());
    }
}
