//! Context system for conditional keybindings
//!
//! Enables bindings that only activate in some grid states, such as "Enter
//! commits while editing, opens an editor otherwise".

use serde::Deserialize;

/// Grid state relevant to keybinding evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    /// An edit session is open
    pub editing: bool,
    /// A cell has focus
    pub has_focus: bool,
    /// The undo history is non-empty
    pub can_undo: bool,
}

/// Conditions that can be attached to keybindings
///
/// Multiple conditions on a binding are ANDed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Editing,
    NotEditing,
    HasFocus,
    NoFocus,
    CanUndo,
}

impl Condition {
    pub fn evaluate(self, ctx: &KeyContext) -> bool {
        match self {
            Condition::Editing => ctx.editing,
            Condition::NotEditing => !ctx.editing,
            Condition::HasFocus => ctx.has_focus,
            Condition::NoFocus => !ctx.has_focus,
            Condition::CanUndo => ctx.can_undo,
        }
    }

    /// Evaluate all conditions (AND logic)
    pub fn evaluate_all(conditions: &[Condition], ctx: &KeyContext) -> bool {
        conditions.iter().all(|c| c.evaluate(ctx))
    }
}
