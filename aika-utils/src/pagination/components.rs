//! Navigation component builders (previous/jump/next/close buttons).

use twilight_model::channel::message::component::{ActionRow, Button, ButtonStyle, Component};

use super::pager::Pager;
use super::token::{NavAction, build_custom_id};
use crate::time::now_unix_secs;

/// Build the full navigation row: previous, jump-to-page, next, close.
///
/// Returns no components for a single-page view.
pub fn build_nav_components(command: &str, pager: &Pager, timeout_secs: u64) -> Vec<Component> {
    build_components(command, pager, timeout_secs, true)
}

/// Build the simple navigation row without the jump-to-page affordance.
pub fn build_simple_nav_components(
    command: &str,
    pager: &Pager,
    timeout_secs: u64,
) -> Vec<Component> {
    build_components(command, pager, timeout_secs, false)
}

fn build_components(
    command: &str,
    pager: &Pager,
    timeout_secs: u64,
    with_jump: bool,
) -> Vec<Component> {
    if pager.is_single_page() {
        return vec![];
    }

    let controls = pager.controls();
    let current_page = pager.current_page();
    let total_pages = pager.len();
    let owner_id = pager.owner().unwrap_or(0);
    let expires_at = now_unix_secs().saturating_add(timeout_secs);

    let prev_target = current_page.saturating_sub(1).max(1);
    let next_target = current_page.saturating_add(1).min(total_pages);

    let mut buttons = vec![nav_button(
        build_custom_id(
            command,
            NavAction::Prev,
            prev_target,
            total_pages,
            owner_id,
            expires_at,
        ),
        "◀ Prev".to_owned(),
        controls.prev_disabled,
        ButtonStyle::Secondary,
    )];

    if with_jump {
        buttons.push(nav_button(
            build_custom_id(
                command,
                NavAction::Jump,
                current_page,
                total_pages,
                owner_id,
                expires_at,
            ),
            controls.label.clone(),
            false,
            ButtonStyle::Secondary,
        ));
    }

    buttons.push(nav_button(
        build_custom_id(
            command,
            NavAction::Next,
            next_target,
            total_pages,
            owner_id,
            expires_at,
        ),
        "Next ▶".to_owned(),
        controls.next_disabled,
        ButtonStyle::Secondary,
    ));

    buttons.push(nav_button(
        build_custom_id(
            command,
            NavAction::Close,
            current_page,
            total_pages,
            owner_id,
            expires_at,
        ),
        "✕".to_owned(),
        false,
        ButtonStyle::Danger,
    ));

    vec![Component::ActionRow(ActionRow {
        id: None,
        components: buttons,
    })]
}

fn nav_button(custom_id: String, label: String, disabled: bool, style: ButtonStyle) -> Component {
    Component::Button(Button {
        id: None,
        custom_id: Some(custom_id),
        disabled,
        emoji: None,
        label: Some(label),
        style,
        url: None,
        sku_id: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_buttons(components: &[Component]) -> Vec<&Button> {
        let Some(Component::ActionRow(row)) = components.first() else {
            panic!("expected an action row");
        };
        row.components
            .iter()
            .map(|component| {
                let Component::Button(button) = component else {
                    panic!("expected a button");
                };
                button
            })
            .collect()
    }

    #[test]
    fn single_page_views_carry_no_components() {
        let pager = Pager::new(1, Some(1));
        assert!(build_nav_components("anime", &pager, 300).is_empty());
    }

    #[test]
    fn first_page_disables_only_prev() {
        let pager = Pager::new(3, Some(1));
        let components = build_nav_components("anime", &pager, 300);
        let buttons = row_buttons(&components);

        assert_eq!(buttons.len(), 4);
        assert!(buttons[0].disabled, "prev enabled on first page");
        assert!(!buttons[1].disabled);
        assert!(!buttons[2].disabled);
        assert!(!buttons[3].disabled);
        assert_eq!(buttons[1].label.as_deref(), Some("1/3"));
    }

    #[test]
    fn last_page_disables_only_next() {
        let mut pager = Pager::new(3, Some(1));
        pager.seek(2);
        let components = build_nav_components("anime", &pager, 300);
        let buttons = row_buttons(&components);

        assert!(!buttons[0].disabled);
        assert!(buttons[2].disabled, "next enabled on last page");
        assert_eq!(buttons[1].label.as_deref(), Some("3/3"));
    }

    #[test]
    fn simple_variant_has_no_jump_button() {
        let pager = Pager::new(3, Some(1));
        let components = build_simple_nav_components("help", &pager, 600);
        let buttons = row_buttons(&components);

        assert_eq!(buttons.len(), 3);
        for button in buttons {
            let custom_id = button.custom_id.as_deref().unwrap();
            assert!(!custom_id.contains(":jump:"), "jump button in {custom_id}");
        }
    }

    #[test]
    fn button_targets_point_at_adjacent_pages() {
        let mut pager = Pager::new(5, Some(9));
        pager.seek(2);
        let components = build_nav_components("manga", &pager, 300);
        let buttons = row_buttons(&components);

        let prev_id = buttons[0].custom_id.as_deref().unwrap();
        let next_id = buttons[2].custom_id.as_deref().unwrap();
        assert!(prev_id.starts_with("nav:manga:prev:2:5:9:"), "{prev_id}");
        assert!(next_id.starts_with("nav:manga:next:4:5:9:"), "{next_id}");
    }
}
