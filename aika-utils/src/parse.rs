//! Pure text-shaping helpers for user-supplied and API-supplied content.

/// Neutralize mention triggers in user- or API-supplied text.
pub fn sanitize_mentions(text: &str) -> String {
    text.replace('@', "@\u{200B}")
}

/// Flatten an HTML-flavored description into plain Discord text.
///
/// AniList descriptions mix HTML line breaks, inline markup, entities, and
/// `~!spoiler!~` blocks. Spoilers are dropped entirely, tags are stripped,
/// and the result is truncated to `max_chars` on a character boundary.
pub fn clean_description(raw: &str, max_chars: usize) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut rest = raw;

    // Drop spoiler blocks before any other processing.
    while let Some(start) = rest.find("~!") {
        text.push_str(&rest[..start]);
        match rest[start + 2..].find("!~") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => {
                rest = "";
                break;
            }
        }
    }
    text.push_str(rest);

    let text = text
        .replace("<br>", "\n")
        .replace("<br/>", "\n")
        .replace("<br />", "\n");

    let mut flat = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => flat.push(ch),
            _ => {}
        }
    }

    let flat = flat
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'");

    let mut collapsed = String::with_capacity(flat.len());
    let mut blank_run = 0_usize;
    for line in flat.lines() {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        if !collapsed.is_empty() {
            collapsed.push('\n');
        }
        collapsed.push_str(line.trim_end());
    }
    let collapsed = collapsed.trim().to_owned();

    truncate_chars(&collapsed, max_chars)
}

/// Truncate to at most `max_chars` characters, appending an ellipsis when
/// anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }

    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentions_are_neutralized() {
        assert_eq!(sanitize_mentions("@everyone"), "@\u{200B}everyone");
    }

    #[test]
    fn html_markup_is_flattened() {
        let raw = "An <i>epic</i> tale.<br><br>Second &amp; final paragraph.";
        assert_eq!(
            clean_description(raw, 200),
            "An epic tale.\n\nSecond & final paragraph."
        );
    }

    #[test]
    fn spoiler_blocks_are_dropped() {
        let raw = "The hero wins. ~!The villain was the mentor all along.!~ The end.";
        assert_eq!(clean_description(raw, 200), "The hero wins.  The end.");
    }

    #[test]
    fn unterminated_spoilers_drop_the_rest() {
        let raw = "Setup. ~!everything after is hidden";
        assert_eq!(clean_description(raw, 200), "Setup.");
    }

    #[test]
    fn long_text_is_truncated_with_an_ellipsis() {
        let out = truncate_chars("abcdefgh", 5);
        assert_eq!(out, "abcd…");
        assert_eq!(truncate_chars("abc", 5), "abc");
    }

    #[test]
    fn blank_runs_collapse_to_one_blank_line() {
        let raw = "a<br><br><br><br>b";
        assert_eq!(clean_description(raw, 200), "a\n\nb");
    }
}
