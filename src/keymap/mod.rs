//! Configurable keyboard mapping
//!
//! Maps decoded keystrokes to grid commands, with conditions on grid state
//! (editing or not, focus present or not) and user overrides from YAML.
//!
//! # Architecture
//!
//! ```text
//! Keystroke → Keymap::lookup_with_context() → Command → Msg
//! ```
//!
//! # Loading Keymaps
//!
//! ```ignore
//! // Embedded defaults merged with ~/.config/datagrid/keymap.yaml
//! let keymap = Keymap::with_bindings(load_default_keymap());
//! ```

mod binding;
mod command;
mod config;
mod context;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use command::Command;
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError};
pub use context::{Condition, KeyContext};
pub use defaults::{
    default_bindings, embedded_bindings, get_default_keymap_yaml, load_default_keymap,
    merge_bindings, merge_user_keymap,
};
pub use keymap::Keymap;
pub use types::{KeyCode, Keystroke, Modifiers};

#[cfg(test)]
mod tests;
