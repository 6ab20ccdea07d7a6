//! Stateless navigation token encoding, parsing, and validation.
//!
//! Every navigation button carries its full session state (command, action,
//! target page, owner, expiry) in the component custom ID, so a button press
//! can be validated without server-side lookup.

use crate::time::now_unix_secs;

const TOKEN_PREFIX: &str = "nav";
const MODAL_TOKEN_PREFIX: &str = "navm";

/// Navigation action encoded in a button custom ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Go to the previous page.
    Prev,
    /// Go to the next page.
    Next,
    /// Open the jump-to-page modal.
    Jump,
    /// Delete the paginated message.
    Close,
}

impl NavAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Next => "next",
            Self::Jump => "jump",
            Self::Close => "close",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "prev" => Some(Self::Prev),
            "next" => Some(Self::Next),
            "jump" => Some(Self::Jump),
            "close" => Some(Self::Close),
            _ => None,
        }
    }
}

/// Parsed navigation token data from a button custom ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavToken {
    /// Logical command name (e.g. `anime`).
    pub command: String,
    /// Requested navigation action.
    pub action: NavAction,
    /// Target page number, 1-based.
    pub page: usize,
    /// Total page count.
    pub total_pages: usize,
    /// User ID that owns this paginated view.
    pub owner_id: u64,
    /// Expiry timestamp (unix seconds).
    pub expires_at: u64,
}

/// Parsed jump-modal token data from a modal custom ID.
#[derive(Debug, Clone)]
pub struct NavModalToken {
    /// Logical command name (e.g. `anime`).
    pub command: String,
    /// Total page count at modal-open time.
    pub total_pages: usize,
    /// User ID that owns this paginated view.
    pub owner_id: u64,
    /// Expiry timestamp (unix seconds).
    pub expires_at: u64,
}

/// Validation outcome for navigation button presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavValidationError {
    /// Token failed to parse or carried an unknown action.
    Invalid,
    /// Token belongs to a different command's view.
    WrongCommand,
    /// Actor is not the owner of the view.
    WrongUser,
    /// Token expired; the view is inert.
    Expired,
    /// Target page fell outside the token's own page count.
    OutOfRange,
}

/// Build a compact custom ID carrying stateless navigation state.
pub fn build_custom_id(
    command: &str,
    action: NavAction,
    target_page: usize,
    total_pages: usize,
    owner_id: u64,
    expires_at: u64,
) -> String {
    format!(
        "{TOKEN_PREFIX}:{command}:{action}:{target_page}:{total_pages}:{owner_id}:{expires_at}",
        action = action.as_str()
    )
}

/// Custom-ID prefix for a command's navigation buttons (routing key).
pub fn command_button_prefix(command: &str) -> String {
    format!("{TOKEN_PREFIX}:{command}:")
}

/// Custom-ID prefix for a command's jump modal (routing key).
pub fn command_modal_prefix(command: &str) -> String {
    format!("{MODAL_TOKEN_PREFIX}:{command}:")
}

/// Parse a navigation custom ID.
pub fn parse_custom_id(custom_id: &str) -> Option<NavToken> {
    let mut parts = custom_id.split(':');

    let prefix = parts.next()?;
    if prefix != TOKEN_PREFIX {
        return None;
    }

    let command = parts.next()?.to_owned();
    let action = NavAction::parse(parts.next()?)?;
    let page = parts.next()?.parse::<usize>().ok()?;
    let total_pages = parts.next()?.parse::<usize>().ok()?;
    let owner_id = parts.next()?.parse::<u64>().ok()?;
    let expires_at = parts.next()?.parse::<u64>().ok()?;

    if parts.next().is_some() {
        return None;
    }

    Some(NavToken {
        command,
        action,
        page,
        total_pages,
        owner_id,
        expires_at,
    })
}

/// Validate a navigation token for command, owner, expiry, and page bounds.
pub fn validate_custom_id(
    custom_id: &str,
    expected_command: &str,
    actor_user_id: u64,
) -> Result<NavToken, NavValidationError> {
    validate_custom_id_at(custom_id, expected_command, actor_user_id, now_unix_secs())
}

fn validate_custom_id_at(
    custom_id: &str,
    expected_command: &str,
    actor_user_id: u64,
    now_secs: u64,
) -> Result<NavToken, NavValidationError> {
    let token = parse_custom_id(custom_id).ok_or(NavValidationError::Invalid)?;

    if token.command != expected_command {
        return Err(NavValidationError::WrongCommand);
    }

    if token.owner_id != actor_user_id {
        return Err(NavValidationError::WrongUser);
    }

    if now_secs > token.expires_at {
        return Err(NavValidationError::Expired);
    }

    if token.page == 0 || token.page > token.total_pages {
        return Err(NavValidationError::OutOfRange);
    }

    Ok(token)
}

/// Build a modal custom ID carrying the owning view's state.
pub fn build_modal_custom_id(
    command: &str,
    total_pages: usize,
    owner_id: u64,
    expires_at: u64,
) -> String {
    format!("{MODAL_TOKEN_PREFIX}:{command}:{total_pages}:{owner_id}:{expires_at}")
}

/// Parse a jump-modal custom ID.
pub fn parse_modal_custom_id(custom_id: &str) -> Option<NavModalToken> {
    let mut parts = custom_id.split(':');

    let prefix = parts.next()?;
    if prefix != MODAL_TOKEN_PREFIX {
        return None;
    }

    let command = parts.next()?.to_owned();
    let total_pages = parts.next()?.parse::<usize>().ok()?;
    let owner_id = parts.next()?.parse::<u64>().ok()?;
    let expires_at = parts.next()?.parse::<u64>().ok()?;

    if parts.next().is_some() {
        return None;
    }

    Some(NavModalToken {
        command,
        total_pages,
        owner_id,
        expires_at,
    })
}

/// Whether the provided unix timestamp is already expired.
pub fn is_expired(expires_at: u64) -> bool {
    now_unix_secs() > expires_at
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_id_round_trips() {
        let custom_id = build_custom_id("anime", NavAction::Next, 3, 9, 42, 1_000);
        let token = parse_custom_id(&custom_id).unwrap();

        assert_eq!(token.command, "anime");
        assert_eq!(token.action, NavAction::Next);
        assert_eq!(token.page, 3);
        assert_eq!(token.total_pages, 9);
        assert_eq!(token.owner_id, 42);
        assert_eq!(token.expires_at, 1_000);
    }

    #[test]
    fn modal_custom_id_round_trips() {
        let custom_id = build_modal_custom_id("manga", 7, 11, 2_000);
        let token = parse_modal_custom_id(&custom_id).unwrap();

        assert_eq!(token.command, "manga");
        assert_eq!(token.total_pages, 7);
        assert_eq!(token.owner_id, 11);
        assert_eq!(token.expires_at, 2_000);
    }

    #[test]
    fn malformed_custom_ids_do_not_parse() {
        for raw in [
            "",
            "nav",
            "nav:anime:next:3:9:42",
            "nav:anime:next:3:9:42:1000:extra",
            "nav:anime:sideways:3:9:42:1000",
            "nav:anime:next:x:9:42:1000",
            "other:anime:next:3:9:42:1000",
        ] {
            assert!(parse_custom_id(raw).is_none(), "parsed {raw:?}");
        }
    }

    #[test]
    fn validation_accepts_the_owner_in_time() {
        let custom_id = build_custom_id("anime", NavAction::Prev, 2, 9, 42, 500);
        let token = validate_custom_id_at(&custom_id, "anime", 42, 400).unwrap();
        assert_eq!(token.page, 2);
    }

    #[test]
    fn validation_rejects_other_users() {
        let custom_id = build_custom_id("anime", NavAction::Prev, 2, 9, 42, 500);
        assert_eq!(
            validate_custom_id_at(&custom_id, "anime", 43, 400),
            Err(NavValidationError::WrongUser)
        );
    }

    #[test]
    fn validation_rejects_expired_tokens() {
        let custom_id = build_custom_id("anime", NavAction::Prev, 2, 9, 42, 500);
        assert_eq!(
            validate_custom_id_at(&custom_id, "anime", 42, 501),
            Err(NavValidationError::Expired)
        );
    }

    #[test]
    fn validation_rejects_foreign_commands_and_bad_pages() {
        let custom_id = build_custom_id("anime", NavAction::Prev, 2, 9, 42, 500);
        assert_eq!(
            validate_custom_id_at(&custom_id, "manga", 42, 400),
            Err(NavValidationError::WrongCommand)
        );

        let zero_page = build_custom_id("anime", NavAction::Prev, 0, 9, 42, 500);
        assert_eq!(
            validate_custom_id_at(&zero_page, "anime", 42, 400),
            Err(NavValidationError::OutOfRange)
        );

        let past_end = build_custom_id("anime", NavAction::Next, 10, 9, 42, 500);
        assert_eq!(
            validate_custom_id_at(&past_end, "anime", 42, 400),
            Err(NavValidationError::OutOfRange)
        );
    }
}
