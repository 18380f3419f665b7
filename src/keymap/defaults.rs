//! Default keybindings for the grid
//!
//! The defaults ship as `keymap.yaml` embedded at compile time, with a
//! hardcoded copy as fallback.

use std::path::Path;

use super::binding::Keybinding;
use super::command::Command;
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::context::Condition;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Load the embedded defaults merged with the user's keymap.yaml, if any
pub fn load_default_keymap() -> Vec<Keybinding> {
    let bindings = embedded_bindings();
    match crate::config_paths::keymap_file() {
        Some(path) => merge_user_keymap(bindings, &path),
        None => bindings,
    }
}

/// Parse the embedded keymap, falling back to the hardcoded defaults
pub fn embedded_bindings() -> Vec<Keybinding> {
    match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(b) => {
            tracing::info!("Loaded embedded default keymap ({} bindings)", b.len());
            b
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    }
}

/// Merge the keymap file at `path` over `base`; a missing or broken file
/// leaves `base` untouched
pub fn merge_user_keymap(base: Vec<Keybinding>, path: &Path) -> Vec<Keybinding> {
    if !path.exists() {
        return base;
    }
    match load_keymap_file(path) {
        Ok(user_bindings) => {
            tracing::info!(
                "Merging user keymap from {} ({} bindings)",
                path.display(),
                user_bindings.len()
            );
            merge_bindings(base, user_bindings)
        }
        Err(e) => {
            tracing::warn!("Failed to load user keymap from {}: {}", path.display(), e);
            base
        }
    }
}

/// Merge user bindings into base bindings
///
/// - same keystroke and conditions: the user binding replaces the base one
/// - command `Unbound`: every base binding on that keystroke is removed
/// - otherwise the user binding is added
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.command == Command::Unbound {
            result.retain(|b| b.keystroke != user_binding.keystroke);
            continue;
        }

        let existing_idx = result
            .iter()
            .position(|b| b.keystroke == user_binding.keystroke && b.when == user_binding.when);

        match existing_idx {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Hardcoded default keybindings for the current platform
pub fn default_bindings() -> Vec<Keybinding> {
    use Condition::*;

    let cmd = Modifiers::cmd();
    let alt = Modifiers::ALT;
    let alt_shift = Modifiers::ALT | Modifiers::SHIFT;
    let none = Modifiers::NONE;

    vec![
        bind(KeyCode::Up, none, Command::FocusUp, &[NotEditing]),
        bind(KeyCode::Down, none, Command::FocusDown, &[NotEditing]),
        bind(KeyCode::Left, none, Command::FocusLeft, &[NotEditing]),
        bind(KeyCode::Right, none, Command::FocusRight, &[NotEditing]),
        bind(KeyCode::Home, none, Command::FocusRowStart, &[NotEditing]),
        bind(KeyCode::End, none, Command::FocusRowEnd, &[NotEditing]),
        bind(KeyCode::Home, cmd, Command::FocusFirstCell, &[NotEditing]),
        bind(KeyCode::End, cmd, Command::FocusLastCell, &[NotEditing]),
        bind(KeyCode::PageUp, none, Command::PageUp, &[NotEditing]),
        bind(KeyCode::PageDown, none, Command::PageDown, &[NotEditing]),
        bind(KeyCode::Enter, none, Command::CommitEdit, &[Editing]),
        bind(KeyCode::Enter, none, Command::StartEdit, &[NotEditing, HasFocus]),
        bind(KeyCode::F(2), none, Command::StartEdit, &[NotEditing, HasFocus]),
        bind(KeyCode::Escape, none, Command::CancelEdit, &[Editing]),
        bind(KeyCode::Escape, none, Command::ClearFocus, &[NotEditing, HasFocus]),
        bind(KeyCode::Char('z'), cmd, Command::Undo, &[NotEditing]),
        bind(KeyCode::Char('s'), alt, Command::SortFocusedColumn, &[NotEditing, HasFocus]),
        bind(
            KeyCode::Char('s'),
            alt_shift,
            Command::SortFocusedColumnMulti,
            &[NotEditing, HasFocus],
        ),
    ]
}

fn bind(key: KeyCode, mods: Modifiers, command: Command, when: &[Condition]) -> Keybinding {
    let binding = Keybinding::new(Keystroke::new(key, mods), command);
    if when.is_empty() {
        binding
    } else {
        binding.when(when.to_vec())
    }
}
