//! Stable facade for the paginated-view controller.

/// Inactivity timeout for simple previous/next views.
pub const SIMPLE_TIMEOUT_SECS: u64 = 600;
/// Inactivity timeout for views carrying the jump-to-page affordance.
pub const JUMP_TIMEOUT_SECS: u64 = 300;

mod components;
pub mod interaction;
pub mod lazy;
mod pager;
pub mod respond;
pub mod token;

pub use components::{build_nav_components, build_simple_nav_components};
pub use interaction::{
    NavInteractionValidation, NavModalValidation, validate_jump_modal, validate_nav_interaction,
};
pub use lazy::{ChunkFetcher, LazySession, PagerSessions};
pub use pager::{NavState, OutOfRangeError, Pager, page_window, total_pages};
pub use respond::{
    CleanupScheduler, delete_paginated_message, open_jump_modal_from_token,
    respond_ephemeral_message, send_paginated_message, update_paginated_interaction_message,
};
pub use token::{NavAction, NavToken, build_custom_id, command_button_prefix, command_modal_prefix};
