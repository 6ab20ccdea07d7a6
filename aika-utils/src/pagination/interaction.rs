//! Interaction validation orchestration for navigation handlers.

use twilight_http::Client;
use twilight_model::gateway::payload::incoming::InteractionCreate;

use super::respond::{respond_expired, respond_invalid, respond_wrong_user};
use super::token::{
    NavModalToken, NavToken, NavValidationError, command_button_prefix, is_expired,
    parse_modal_custom_id, validate_custom_id,
};

/// Outcome when validating whether an interaction drives a command's view.
#[derive(Debug, Clone)]
pub enum NavInteractionValidation {
    /// Interaction does not target the given command's navigation buttons.
    NotForCommand,
    /// Interaction was invalid and already acknowledged with a private notice.
    HandledInvalid,
    /// Interaction is valid and carries parsed navigation data.
    Valid {
        actor_user_id: u64,
        token: NavToken,
    },
}

/// Outcome when validating a jump-modal submit interaction.
#[derive(Debug, Clone)]
pub enum NavModalValidation {
    /// Interaction does not target the given command's jump modal.
    NotForCommand,
    /// Interaction was invalid and already acknowledged with a private notice.
    HandledInvalid,
    /// Interaction is valid; `entered` is the raw page input to validate
    /// against the live page count.
    Valid {
        actor_user_id: u64,
        token: NavModalToken,
        entered: String,
    },
}

/// Validate a component interaction against a command's navigation buttons.
///
/// Returns:
/// - `NotForCommand` when the interaction should be ignored by this handler,
/// - `HandledInvalid` when it was invalid and already acknowledged,
/// - `Valid` when parsing and validation succeeded.
pub async fn validate_nav_interaction(
    http: &Client,
    interaction: &InteractionCreate,
    command: &str,
) -> anyhow::Result<NavInteractionValidation> {
    let Some(twilight_model::application::interaction::InteractionData::MessageComponent(
        component_data,
    )) = interaction.data.as_ref()
    else {
        return Ok(NavInteractionValidation::NotForCommand);
    };

    if !component_data
        .custom_id
        .starts_with(&command_button_prefix(command))
    {
        return Ok(NavInteractionValidation::NotForCommand);
    }

    let Some(actor_user_id) = interaction.author_id().map(|id| id.get()) else {
        respond_invalid(http, interaction).await?;
        return Ok(NavInteractionValidation::HandledInvalid);
    };

    match validate_custom_id(&component_data.custom_id, command, actor_user_id) {
        Ok(token) => Ok(NavInteractionValidation::Valid {
            actor_user_id,
            token,
        }),
        Err(NavValidationError::WrongUser) => {
            respond_wrong_user(http, interaction).await?;
            Ok(NavInteractionValidation::HandledInvalid)
        }
        Err(NavValidationError::Expired) => {
            respond_expired(http, interaction).await?;
            Ok(NavInteractionValidation::HandledInvalid)
        }
        Err(_) => {
            respond_invalid(http, interaction).await?;
            Ok(NavInteractionValidation::HandledInvalid)
        }
    }
}

/// Validate a jump-modal submit interaction for a command.
pub async fn validate_jump_modal(
    http: &Client,
    interaction: &InteractionCreate,
    command: &str,
) -> anyhow::Result<NavModalValidation> {
    let Some(twilight_model::application::interaction::InteractionData::ModalSubmit(modal_data)) =
        interaction.data.as_ref()
    else {
        return Ok(NavModalValidation::NotForCommand);
    };

    let Some(token) = parse_modal_custom_id(&modal_data.custom_id) else {
        return Ok(NavModalValidation::NotForCommand);
    };

    if token.command != command {
        return Ok(NavModalValidation::NotForCommand);
    }

    let Some(actor_user_id) = interaction.author_id().map(|id| id.get()) else {
        respond_invalid(http, interaction).await?;
        return Ok(NavModalValidation::HandledInvalid);
    };

    if token.owner_id != actor_user_id {
        respond_wrong_user(http, interaction).await?;
        return Ok(NavModalValidation::HandledInvalid);
    }

    if is_expired(token.expires_at) {
        respond_expired(http, interaction).await?;
        return Ok(NavModalValidation::HandledInvalid);
    }

    let Some(entered) = modal_page_input(interaction) else {
        respond_invalid(http, interaction).await?;
        return Ok(NavModalValidation::HandledInvalid);
    };

    Ok(NavModalValidation::Valid {
        actor_user_id,
        token,
        entered,
    })
}

/// Extract the raw `page` text-input value from a modal submit interaction.
///
/// Numeric validation happens later against the live page count, so the raw
/// string is returned as typed.
pub fn modal_page_input(interaction: &InteractionCreate) -> Option<String> {
    let twilight_model::application::interaction::InteractionData::ModalSubmit(modal_data) =
        interaction.data.as_ref()?
    else {
        return None;
    };

    for component in &modal_data.components {
        if let twilight_model::application::interaction::modal::ModalInteractionComponent::ActionRow(
            row,
        ) = component
        {
            for nested in &row.components {
                if let twilight_model::application::interaction::modal::ModalInteractionComponent::TextInput(
                    text_input,
                ) = nested
                    && text_input.custom_id == "page"
                {
                    return Some(text_input.value.trim().to_owned());
                }
            }
        }
    }

    None
}
