//! YAML configuration parsing for keymaps
//!
//! Parses keymap.yaml files into Keybinding structs.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use super::binding::Keybinding;
use super::command::Command;
use super::context::Condition;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub command: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub when: Option<Vec<String>>,
}

/// Load keybindings from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<Vec<Keybinding>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_keymap_yaml(&content)
}

/// Parse keybindings from YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<Keybinding>, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let current_platform = current_platform();
    let mut bindings = Vec::with_capacity(config.bindings.len());

    for entry in config.bindings {
        if let Some(ref platform) = entry.platform {
            if platform != current_platform {
                continue;
            }
        }

        let keystroke = parse_key_string(&entry.key)?;
        let command = Command::from_str(&entry.command)
            .map_err(|_| KeymapError::InvalidCommand(entry.command.clone()))?;

        let mut binding = Keybinding::new(keystroke, command);
        if let Some(conditions) = &entry.when {
            let conditions = conditions
                .iter()
                .map(|c| parse_condition(c))
                .collect::<Result<Vec<_>, _>>()?;
            binding = binding.when(conditions);
        }
        bindings.push(binding);
    }

    Ok(bindings)
}

/// Parse a key string like "cmd+shift+s" into a Keystroke
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeymapError> {
    let mut mods = Modifiers::NONE;
    let mut key_part = None;

    for part in key_str.split('+') {
        let part_lower = part.trim().to_lowercase();
        match part_lower.as_str() {
            "cmd" => mods = mods | Modifiers::cmd(),
            "ctrl" | "control" => mods = mods | Modifiers::CTRL,
            "shift" => mods = mods | Modifiers::SHIFT,
            "alt" | "option" | "opt" => mods = mods | Modifiers::ALT,
            "meta" | "super" | "win" => mods = mods | Modifiers::META,
            _ => {
                if key_part.is_some() {
                    return Err(KeymapError::InvalidKey(format!(
                        "Multiple keys in binding: {}",
                        key_str
                    )));
                }
                key_part = Some(parse_key_code(&part_lower)?);
            }
        }
    }

    let key = key_part
        .ok_or_else(|| KeymapError::InvalidKey(format!("No key found in binding: {}", key_str)))?;

    Ok(Keystroke::new(key, mods))
}

fn parse_key_code(key: &str) -> Result<KeyCode, KeymapError> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c.to_ascii_lowercase()));
    }

    match key {
        "enter" | "return" => Ok(KeyCode::Enter),
        "escape" | "esc" => Ok(KeyCode::Escape),
        "tab" => Ok(KeyCode::Tab),
        "space" => Ok(KeyCode::Space),

        "up" | "arrowup" => Ok(KeyCode::Up),
        "down" | "arrowdown" => Ok(KeyCode::Down),
        "left" | "arrowleft" => Ok(KeyCode::Left),
        "right" | "arrowright" => Ok(KeyCode::Right),

        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdown" | "pgdn" => Ok(KeyCode::PageDown),

        _ => match key.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            Some(n @ 1..=24) => Ok(KeyCode::F(n)),
            _ => Err(KeymapError::InvalidKey(format!("Unknown key: {}", key))),
        },
    }
}

fn parse_condition(cond: &str) -> Result<Condition, KeymapError> {
    match cond.to_lowercase().as_str() {
        "editing" => Ok(Condition::Editing),
        "not_editing" | "notediting" => Ok(Condition::NotEditing),
        "has_focus" | "hasfocus" | "focused" => Ok(Condition::HasFocus),
        "no_focus" | "nofocus" => Ok(Condition::NoFocus),
        "can_undo" | "canundo" => Ok(Condition::CanUndo),
        _ => Err(KeymapError::InvalidCondition(cond.to_string())),
    }
}

fn current_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else {
        "linux"
    }
}

/// Errors that can occur when parsing keymaps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
    InvalidCommand(String),
    InvalidCondition(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeymapError::InvalidCommand(c) => write!(f, "Invalid command: {}", c),
            KeymapError::InvalidCondition(c) => write!(f, "Invalid condition: {}", c),
        }
    }
}

impl std::error::Error for KeymapError {}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FocusUp" => Ok(Command::FocusUp),
            "FocusDown" => Ok(Command::FocusDown),
            "FocusLeft" => Ok(Command::FocusLeft),
            "FocusRight" => Ok(Command::FocusRight),
            "FocusRowStart" => Ok(Command::FocusRowStart),
            "FocusRowEnd" => Ok(Command::FocusRowEnd),
            "FocusFirstCell" => Ok(Command::FocusFirstCell),
            "FocusLastCell" => Ok(Command::FocusLastCell),
            "PageUp" => Ok(Command::PageUp),
            "PageDown" => Ok(Command::PageDown),
            "ClearFocus" => Ok(Command::ClearFocus),
            "StartEdit" => Ok(Command::StartEdit),
            "CommitEdit" => Ok(Command::CommitEdit),
            "CancelEdit" => Ok(Command::CancelEdit),
            "Undo" => Ok(Command::Undo),
            "SortFocusedColumn" => Ok(Command::SortFocusedColumn),
            "SortFocusedColumnMulti" => Ok(Command::SortFocusedColumnMulti),
            "Unbound" => Ok(Command::Unbound),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_with_modifiers() {
        let stroke = parse_key_string("ctrl+shift+s").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('s'));
        assert!(stroke.mods.ctrl());
        assert!(stroke.mods.shift());
    }

    #[test]
    fn test_parse_cmd_modifier() {
        let stroke = parse_key_string("cmd+z").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('z'));
        assert!(stroke.mods.has_cmd());
    }

    #[test]
    fn test_parse_named_and_function_keys() {
        assert_eq!(parse_key_string("enter").unwrap().key, KeyCode::Enter);
        assert_eq!(parse_key_string("esc").unwrap().key, KeyCode::Escape);
        assert_eq!(parse_key_string("PageDown").unwrap().key, KeyCode::PageDown);
        assert_eq!(parse_key_string("f2").unwrap().key, KeyCode::F(2));
        assert!(parse_key_string("f99").is_err());
        assert!(parse_key_string("a+b").is_err());
        assert!(parse_key_string("shift").is_err());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
bindings:
  - key: "enter"
    command: CommitEdit
    when: [editing]
  - key: "cmd+z"
    command: Undo
"#;

        let bindings = parse_keymap_yaml(yaml).unwrap();
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].command, Command::CommitEdit);
        assert_eq!(bindings[0].when, Some(vec![Condition::Editing]));
        assert_eq!(bindings[1].command, Command::Undo);
    }

    #[test]
    fn test_parse_yaml_errors() {
        let bad_command = "bindings:\n  - key: enter\n    command: Explode\n";
        assert_eq!(
            parse_keymap_yaml(bad_command).unwrap_err(),
            KeymapError::InvalidCommand("Explode".into())
        );

        let bad_condition = "bindings:\n  - key: enter\n    command: Undo\n    when: [sideways]\n";
        assert_eq!(
            parse_keymap_yaml(bad_condition).unwrap_err(),
            KeymapError::InvalidCondition("sideways".into())
        );
    }

    #[test]
    fn test_parse_yaml_with_platform() {
        let yaml = r#"
bindings:
  - key: "cmd+z"
    command: Undo
  - key: "meta+left"
    command: FocusRowStart
    platform: macos
"#;

        let bindings = parse_keymap_yaml(yaml).unwrap();

        #[cfg(target_os = "macos")]
        assert_eq!(bindings.len(), 2);

        #[cfg(not(target_os = "macos"))]
        assert_eq!(bindings.len(), 1);
    }
}
