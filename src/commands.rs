//! Command types for the Elm-style architecture
//!
//! Commands are the side effects a host performs after an update.

use crate::grid::edit::ValidationTicket;
use crate::model::Row;

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// The visible window changed and should be redrawn
    Redraw,
    /// The dataset changed (commit, rollback or undo); the host persists or
    /// propagates the new rows
    DataChanged(Vec<Row>),
    /// A validator answered `Pending`; the host must eventually send
    /// `EditMsg::ValidationResolved` with this ticket
    ValidationPending(ValidationTicket),
    /// Execute multiple commands in order
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::DataChanged(_) => true,
            // The verdict arrives as a message which triggers its own redraw
            Cmd::ValidationPending(_) => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Flatten nested batches into a list of leaf commands, dropping `None`
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }
}

// Allow converting Option<Cmd> to Cmd
impl From<Option<Cmd>> for Cmd {
    fn from(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_redraw() {
        assert!(!Cmd::None.needs_redraw());
        assert!(Cmd::Redraw.needs_redraw());
        assert!(!Cmd::ValidationPending(ValidationTicket(1)).needs_redraw());
        assert!(Cmd::batch(vec![Cmd::None, Cmd::DataChanged(vec![])]).needs_redraw());
    }

    #[test]
    fn test_flatten() {
        let cmd = Cmd::batch(vec![
            Cmd::None,
            Cmd::batch(vec![Cmd::Redraw, Cmd::ValidationPending(ValidationTicket(2))]),
        ]);
        assert_eq!(
            cmd.flatten(),
            vec![Cmd::Redraw, Cmd::ValidationPending(ValidationTicket(2))]
        );
    }
}
