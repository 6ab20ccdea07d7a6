//! Interaction response plumbing and inactivity cleanup for paginated views.

use std::{collections::HashMap, sync::Arc, time::Duration};

use twilight_http::Client;
use twilight_model::{
    channel::message::{
        MessageFlags,
        component::{ActionRow, Component, TextInput, TextInputStyle},
        embed::Embed,
    },
    gateway::payload::incoming::InteractionCreate,
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker},
    },
};
use twilight_util::builder::InteractionResponseDataBuilder;

use super::token::{NavToken, build_modal_custom_id};

/// Notice shown when a navigation interaction belongs to another user.
pub const NAV_WRONG_USER_MESSAGE: &str = "This paginated view belongs to another user.";
/// Notice shown when a navigation interaction has expired.
pub const NAV_EXPIRED_MESSAGE: &str = "This paginated view expired. Run the command again.";
/// Notice shown when a navigation interaction payload is invalid.
pub const NAV_INVALID_MESSAGE: &str = "Invalid navigation interaction.";

/// One-shot inactivity timers that strip controls from idle paginated views.
///
/// One timer exists per message; scheduling again for the same message aborts
/// and replaces the pending timer, so every successful navigation pushes the
/// cleanup out by a full timeout. The timer's only effect is detaching the
/// components from the still-visible message.
#[derive(Default)]
pub struct CleanupScheduler {
    tasks: tokio::sync::Mutex<HashMap<u64, tokio::task::JoinHandle<()>>>,
}

impl CleanupScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the inactivity timer for a paginated message.
    pub async fn schedule(
        self: &Arc<Self>,
        http: Arc<Client>,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        timeout_secs: u64,
    ) {
        let delay_secs = timeout_secs.saturating_sub(1);
        let message_key = message_id.get();
        let scheduler = Arc::clone(self);

        let mut tasks = self.tasks.lock().await;
        if let Some(existing_task) = tasks.remove(&message_key) {
            existing_task.abort();
        }

        let cleanup_task = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(delay_secs)).await;

            let empty_components: [Component; 0] = [];
            let _ = http
                .update_message(channel_id, message_id)
                .components(Some(&empty_components))
                .await;

            let mut tasks = scheduler.tasks.lock().await;
            tasks.remove(&message_key);
        });

        tasks.insert(message_key, cleanup_task);
    }

    /// Abort the pending timer for a message, if any.
    pub async fn cancel(&self, message_id: Id<MessageMarker>) {
        let mut tasks = self.tasks.lock().await;
        if let Some(task) = tasks.remove(&message_id.get()) {
            task.abort();
        }
    }
}

/// Respond to a component interaction with an in-place message update.
pub async fn respond_update_message(
    http: &Client,
    interaction: &InteractionCreate,
    embeds: &[Embed],
    components: &[Component],
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::UpdateMessage,
        data: Some(
            InteractionResponseDataBuilder::new()
                .embeds(embeds.to_vec())
                .components(components.to_vec())
                .build(),
        ),
    };

    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}

/// Respond to an interaction with a private, ephemeral message.
pub async fn respond_ephemeral_message(
    http: &Client,
    interaction: &InteractionCreate,
    content: &str,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(
            InteractionResponseDataBuilder::new()
                .content(content)
                .flags(MessageFlags::EPHEMERAL)
                .build(),
        ),
    };

    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}

/// Respond with the standard wrong-owner notice.
pub async fn respond_wrong_user(
    http: &Client,
    interaction: &InteractionCreate,
) -> anyhow::Result<()> {
    respond_ephemeral_message(http, interaction, NAV_WRONG_USER_MESSAGE).await
}

/// Respond with the standard expired-view notice.
pub async fn respond_expired(http: &Client, interaction: &InteractionCreate) -> anyhow::Result<()> {
    respond_ephemeral_message(http, interaction, NAV_EXPIRED_MESSAGE).await
}

/// Respond with the standard invalid-interaction notice.
pub async fn respond_invalid(http: &Client, interaction: &InteractionCreate) -> anyhow::Result<()> {
    respond_ephemeral_message(http, interaction, NAV_INVALID_MESSAGE).await
}

/// Open a modal prompting for a page number.
pub async fn respond_jump_modal(
    http: &Client,
    interaction: &InteractionCreate,
    modal_custom_id: &str,
    total_pages: usize,
) -> anyhow::Result<()> {
    let page_input = Component::TextInput(TextInput {
        id: None,
        custom_id: "page".to_owned(),
        label: Some("Page Number".to_owned()),
        max_length: Some(6),
        min_length: Some(1),
        placeholder: Some(format!("Enter a page from 1 to {total_pages}")),
        required: Some(true),
        style: TextInputStyle::Short,
        value: None,
    });

    let modal_components = vec![Component::ActionRow(ActionRow {
        id: None,
        components: vec![page_input],
    })];

    let response = InteractionResponse {
        kind: InteractionResponseType::Modal,
        data: Some(InteractionResponseData {
            components: Some(modal_components),
            custom_id: Some(modal_custom_id.to_owned()),
            title: Some("Jump to Page".to_owned()),
            ..InteractionResponseData::default()
        }),
    };

    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}

/// Open a jump modal from a validated navigation token.
pub async fn open_jump_modal_from_token(
    http: &Client,
    interaction: &InteractionCreate,
    token: &NavToken,
    total_pages: usize,
) -> anyhow::Result<()> {
    let modal_id =
        build_modal_custom_id(&token.command, total_pages, token.owner_id, token.expires_at);
    respond_jump_modal(http, interaction, &modal_id, total_pages).await
}

/// Acknowledge a close press and delete the paginated message.
pub async fn delete_paginated_message(
    http: &Client,
    interaction: &InteractionCreate,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::DeferredUpdateMessage,
        data: None,
    };

    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    if let Some(message) = interaction.message.as_ref() {
        http.delete_message(message.channel_id, message.id).await?;
    }

    Ok(())
}

/// Send a new paginated message and arm its inactivity timer.
///
/// Returns the created message's ID so callers can register session state
/// against it. Single-page sends get no timer because they carry no controls.
pub async fn send_paginated_message(
    http: Arc<Client>,
    cleanup: &Arc<CleanupScheduler>,
    channel_id: Id<ChannelMarker>,
    embed: Embed,
    components: Vec<Component>,
    total_pages: usize,
    timeout_secs: u64,
) -> anyhow::Result<Id<MessageMarker>> {
    let created_message = http
        .create_message(channel_id)
        .embeds(&[embed])
        .components(&components)
        .await?
        .model()
        .await?;

    if total_pages > 1 {
        cleanup
            .schedule(
                Arc::clone(&http),
                created_message.channel_id,
                created_message.id,
                timeout_secs,
            )
            .await;
    }

    Ok(created_message.id)
}

/// Update an existing paginated message in place and re-arm its timer.
pub async fn update_paginated_interaction_message(
    http: Arc<Client>,
    cleanup: &Arc<CleanupScheduler>,
    interaction: &InteractionCreate,
    embed: Embed,
    components: Vec<Component>,
    total_pages: usize,
    timeout_secs: u64,
) -> anyhow::Result<()> {
    respond_update_message(&http, interaction, &[embed], &components).await?;

    if total_pages > 1
        && let Some(message) = interaction.message.as_ref()
    {
        cleanup
            .schedule(
                Arc::clone(&http),
                message.channel_id,
                message.id,
                timeout_secs,
            )
            .await;
    }

    Ok(())
}
