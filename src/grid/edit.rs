//! Edit/undo engine
//!
//! A small state machine coordinating single-cell edit sessions:
//!
//! ```text
//! idle --start--> editing --commit--> (validating) --resolve--> idle
//!                    |
//!                    +--cancel--> idle
//! ```
//!
//! Commit is two-phase. Phase one applies the change to the working rows and
//! pushes the pre-change snapshot onto the history, then hands out a
//! [`ValidationTicket`]. Phase two settles that ticket: accepted, or rolled
//! back with a per-cell error. Tickets are keyed by cell; a newer commit on the
//! same cell supersedes the older ticket, and any ticket settles at most once.
//!
//! Row indices here are always source indices (positions in the unsorted
//! row collection).

use std::collections::HashMap;
use std::fmt;

use crate::model::{CellValue, Row};

use super::history::SnapshotHistory;

/// Address of a cell in the source row collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub row: usize,
    pub column_id: String,
}

impl CellKey {
    pub fn new(row: usize, column_id: &str) -> Self {
        Self {
            row,
            column_id: column_id.to_string(),
        }
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column_id)
    }
}

/// The single open edit
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    /// Source row index
    pub row: usize,
    pub column_id: String,
    /// Working value, updated on every keystroke
    pub value: CellValue,
    /// Value when the session opened
    pub original: CellValue,
}

impl EditSession {
    pub fn key(&self) -> CellKey {
        CellKey::new(self.row, &self.column_id)
    }

    pub fn is_dirty(&self) -> bool {
        self.value != self.original
    }
}

/// Handle for one commit's validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValidationTicket(pub u64);

impl fmt::Display for ValidationTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a validator gets to look at
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRequest {
    pub ticket: ValidationTicket,
    pub key: CellKey,
    /// The committed value
    pub value: CellValue,
    /// The row as it looks after the optimistic apply
    pub row: Row,
}

/// A validator's verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(String),
    /// The host finishes validation later and reports back with the ticket
    Pending,
}

/// Host-supplied validation of committed values
pub trait Validator {
    fn validate(&self, request: &ValidationRequest) -> ValidationOutcome;
}

/// Any `Fn(column_id, value, row) -> Option<error>` is a synchronous validator
impl<F> Validator for F
where
    F: Fn(&str, &CellValue, &Row) -> Option<String>,
{
    fn validate(&self, request: &ValidationRequest) -> ValidationOutcome {
        match self(&request.key.column_id, &request.value, &request.row) {
            Some(error) => ValidationOutcome::Invalid(error),
            None => ValidationOutcome::Valid,
        }
    }
}

/// Result of phase one of a commit
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// No session was open
    Idle,
    /// The working value equals the original; session discarded, nothing recorded
    Unchanged,
    /// Applied optimistically; the request must be settled through `resolve`
    Applied(ValidationRequest),
}

/// Result of settling a ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Unknown, superseded or already settled ticket
    Stale,
    Accepted,
    /// The cell was restored and flagged with the error
    RolledBack(String),
}

#[derive(Debug, Clone)]
struct PendingValidation {
    ticket: ValidationTicket,
    original: CellValue,
    /// Sequence number of the snapshot this commit pushed
    snapshot_seq: u64,
}

#[derive(Debug, Clone, Default)]
pub struct EditEngine {
    session: Option<EditSession>,
    history: SnapshotHistory,
    errors: HashMap<CellKey, String>,
    pending: HashMap<CellKey, PendingValidation>,
    next_ticket: u64,
    pop_history_on_rollback: bool,
}

impl EditEngine {
    pub fn new(history_limit: usize, pop_history_on_rollback: bool) -> Self {
        Self {
            history: SnapshotHistory::with_max_size(history_limit),
            pop_history_on_rollback,
            ..Self::default()
        }
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// Open a session on a cell
    ///
    /// Refused while a different cell is being edited. Reopening the same cell
    /// restarts the session from `current`. Clears the cell's stale error.
    pub fn start(&mut self, row: usize, column_id: &str, current: CellValue) -> bool {
        if let Some(session) = &self.session {
            if session.row != row || session.column_id != column_id {
                return false;
            }
        }
        let key = CellKey::new(row, column_id);
        self.errors.remove(&key);
        self.session = Some(EditSession {
            row,
            column_id: key.column_id,
            value: current.clone(),
            original: current,
        });
        true
    }

    /// Update the working value; the dataset is not touched
    pub fn set_value(&mut self, value: CellValue) -> bool {
        match &mut self.session {
            Some(session) => {
                session.value = value;
                true
            }
            None => false,
        }
    }

    /// Close the session with no dataset or history effect
    pub fn cancel(&mut self) -> bool {
        self.session.take().is_some()
    }

    /// Phase one: apply the working value to `rows` and record history
    ///
    /// The session closes in every case.
    pub fn commit(&mut self, rows: &mut [Row]) -> CommitOutcome {
        let Some(session) = self.session.take() else {
            return CommitOutcome::Idle;
        };
        if !session.is_dirty() {
            return CommitOutcome::Unchanged;
        }
        if session.row >= rows.len() {
            tracing::warn!(row = session.row, "edit session row no longer exists");
            return CommitOutcome::Unchanged;
        }

        let snapshot_seq = self.history.push(rows.to_vec());
        rows[session.row].set(&session.column_id, session.value.clone());

        self.next_ticket += 1;
        let ticket = ValidationTicket(self.next_ticket);
        let key = session.key();
        self.pending.insert(
            key.clone(),
            PendingValidation {
                ticket,
                original: session.original,
                snapshot_seq,
            },
        );

        CommitOutcome::Applied(ValidationRequest {
            ticket,
            key,
            value: session.value,
            row: rows[session.row].clone(),
        })
    }

    /// Phase two: settle a ticket with the validator's verdict
    pub fn resolve(
        &mut self,
        ticket: ValidationTicket,
        error: Option<String>,
        rows: &mut [Row],
    ) -> Resolution {
        let Some(key) = self
            .pending
            .iter()
            .find(|(_, p)| p.ticket == ticket)
            .map(|(key, _)| key.clone())
        else {
            return Resolution::Stale;
        };
        let Some(pending) = self.pending.remove(&key) else {
            return Resolution::Stale;
        };

        let Some(error) = error else {
            return Resolution::Accepted;
        };

        if let Some(row) = rows.get_mut(key.row) {
            row.set(&key.column_id, pending.original);
        }
        // Only drop the entry while it is still this commit's snapshot
        let own_snapshot_on_top = self.history.newest_seq() == Some(pending.snapshot_seq);
        if self.pop_history_on_rollback && own_snapshot_on_top {
            self.history.pop();
        }
        self.errors.insert(key, error.clone());
        Resolution::RolledBack(error)
    }

    /// Restore `rows` to the newest snapshot. Returns false on empty history.
    pub fn undo(&mut self, rows: &mut Vec<Row>) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                *rows = snapshot;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Forget everything tied to the current row indices: the open session,
    /// history, cell errors and pending tickets
    ///
    /// Tickets handed out before the reset resolve as stale.
    pub fn reset(&mut self) {
        self.session = None;
        self.history.clear();
        self.errors.clear();
        self.pending.clear();
    }

    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    /// Validation error recorded for a cell
    pub fn error_at(&self, row: usize, column_id: &str) -> Option<&str> {
        self.errors
            .get(&CellKey::new(row, column_id))
            .map(String::as_str)
    }

    pub fn errors(&self) -> &HashMap<CellKey, String> {
        &self.errors
    }

    /// Tickets still awaiting a verdict
    pub fn pending_tickets(&self) -> Vec<ValidationTicket> {
        let mut tickets: Vec<_> = self.pending.values().map(|p| p.ticket).collect();
        tickets.sort();
        tickets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Row> {
        vec![
            Row::new("1").with("name", "Alice").with("age", 30i64),
            Row::new("2").with("name", "Bob").with("age", 25i64),
        ]
    }

    fn applied(outcome: CommitOutcome) -> ValidationRequest {
        match outcome {
            CommitOutcome::Applied(request) => request,
            other => panic!("expected Applied, got {:?}", other),
        }
    }

    #[test]
    fn test_single_session_invariant() {
        let mut engine = EditEngine::default();
        assert!(engine.start(0, "name", CellValue::from("Alice")));
        assert!(!engine.start(1, "name", CellValue::from("Bob")));
        assert_eq!(engine.session().unwrap().row, 0);

        // Same cell reopens
        assert!(engine.start(0, "name", CellValue::from("Alice")));
    }

    #[test]
    fn test_unchanged_commit_is_free() {
        let mut engine = EditEngine::default();
        let mut data = rows();
        engine.start(0, "name", CellValue::from("Alice"));
        assert_eq!(engine.commit(&mut data), CommitOutcome::Unchanged);
        assert_eq!(engine.history_depth(), 0);
        assert!(!engine.is_editing());
        assert_eq!(data, rows());
    }

    #[test]
    fn test_commit_applies_and_pushes() {
        let mut engine = EditEngine::default();
        let mut data = rows();
        engine.start(1, "age", CellValue::from(25i64));
        engine.set_value(CellValue::from(26i64));
        let request = applied(engine.commit(&mut data));

        assert_eq!(request.key, CellKey::new(1, "age"));
        assert_eq!(request.row.get("age"), &CellValue::from(26i64));
        assert_eq!(data[1].get("age"), &CellValue::from(26i64));
        assert_eq!(engine.history_depth(), 1);
        assert_eq!(engine.resolve(request.ticket, None, &mut data), Resolution::Accepted);
        assert_eq!(engine.resolve(request.ticket, None, &mut data), Resolution::Stale);
    }

    #[test]
    fn test_rollback_keeps_history_by_default() {
        let mut engine = EditEngine::default();
        let mut data = rows();
        engine.start(0, "name", CellValue::from("Alice"));
        engine.set_value(CellValue::from(""));
        let request = applied(engine.commit(&mut data));

        let resolution = engine.resolve(request.ticket, Some("required".into()), &mut data);
        assert_eq!(resolution, Resolution::RolledBack("required".into()));
        assert_eq!(data, rows());
        assert_eq!(engine.error_at(0, "name"), Some("required"));
        assert_eq!(engine.history_depth(), 1);

        // A new edit on the cell clears the error
        engine.start(0, "name", CellValue::from("Alice"));
        assert_eq!(engine.error_at(0, "name"), None);
    }

    #[test]
    fn test_rollback_can_pop_history() {
        let mut engine = EditEngine::new(10, true);
        let mut data = rows();
        engine.start(0, "name", CellValue::from("Alice"));
        engine.set_value(CellValue::from("A"));
        let request = applied(engine.commit(&mut data));
        engine.resolve(request.ticket, Some("too short".into()), &mut data);
        assert_eq!(engine.history_depth(), 0);
    }

    #[test]
    fn test_rollback_pop_skipped_when_not_newest() {
        let mut engine = EditEngine::new(10, true);
        let mut data = rows();
        engine.start(0, "name", CellValue::from("Alice"));
        engine.set_value(CellValue::from("A"));
        let first = applied(engine.commit(&mut data));

        engine.start(1, "name", CellValue::from("Bob"));
        engine.set_value(CellValue::from("Bobby"));
        applied(engine.commit(&mut data));

        engine.resolve(first.ticket, Some("bad".into()), &mut data);
        assert_eq!(engine.history_depth(), 2);
        assert_eq!(data[0].get("name"), &CellValue::from("Alice"));
        assert_eq!(data[1].get("name"), &CellValue::from("Bobby"));
    }

    #[test]
    fn test_rollback_keeps_entry_pushed_after_undo() {
        let mut engine = EditEngine::new(10, true);
        let mut data = rows();
        engine.start(0, "name", CellValue::from("Alice"));
        engine.set_value(CellValue::from("A"));
        let first = applied(engine.commit(&mut data));
        assert!(engine.undo(&mut data));

        engine.start(1, "name", CellValue::from("Bob"));
        engine.set_value(CellValue::from("Bobby"));
        let second = applied(engine.commit(&mut data));
        assert_eq!(engine.resolve(second.ticket, None, &mut data), Resolution::Accepted);

        engine.resolve(first.ticket, Some("bad".into()), &mut data);
        assert_eq!(engine.history_depth(), 1);
        assert!(engine.undo(&mut data));
        assert_eq!(data, rows());
    }

    #[test]
    fn test_rollback_keeps_entry_when_own_snapshot_evicted() {
        let mut engine = EditEngine::new(1, true);
        let mut data = rows();
        engine.start(0, "name", CellValue::from("Alice"));
        engine.set_value(CellValue::from("A"));
        let first = applied(engine.commit(&mut data));

        engine.start(1, "name", CellValue::from("Bob"));
        engine.set_value(CellValue::from("Bobby"));
        let second = applied(engine.commit(&mut data));
        engine.resolve(second.ticket, None, &mut data);

        engine.resolve(first.ticket, Some("bad".into()), &mut data);
        assert_eq!(engine.history_depth(), 1);
        assert_eq!(data[0].get("name"), &CellValue::from("Alice"));
        assert_eq!(data[1].get("name"), &CellValue::from("Bobby"));
    }

    #[test]
    fn test_reset_drops_history_errors_and_tickets() {
        let mut engine = EditEngine::default();
        let mut data = rows();
        engine.start(0, "name", CellValue::from("Alice"));
        engine.set_value(CellValue::from(""));
        let rejected = applied(engine.commit(&mut data));
        engine.resolve(rejected.ticket, Some("required".into()), &mut data);

        engine.start(1, "age", CellValue::from(25i64));
        engine.set_value(CellValue::from(26i64));
        let pending = applied(engine.commit(&mut data));
        engine.start(1, "name", CellValue::from("Bob"));

        engine.reset();
        assert!(!engine.is_editing());
        assert!(!engine.can_undo());
        assert!(engine.errors().is_empty());
        assert!(engine.pending_tickets().is_empty());
        assert_eq!(
            engine.resolve(pending.ticket, Some("x".into()), &mut data),
            Resolution::Stale
        );
        assert_eq!(data[1].get("age"), &CellValue::from(26i64));
    }

    #[test]
    fn test_newer_commit_supersedes_ticket() {
        let mut engine = EditEngine::default();
        let mut data = rows();
        engine.start(0, "age", CellValue::from(30i64));
        engine.set_value(CellValue::from(31i64));
        let first = applied(engine.commit(&mut data));

        engine.start(0, "age", CellValue::from(31i64));
        engine.set_value(CellValue::from(32i64));
        let second = applied(engine.commit(&mut data));

        assert_eq!(engine.resolve(first.ticket, Some("x".into()), &mut data), Resolution::Stale);
        assert_eq!(data[0].get("age"), &CellValue::from(32i64));
        assert_eq!(engine.pending_tickets(), vec![second.ticket]);
    }

    #[test]
    fn test_cancel_and_undo() {
        let mut engine = EditEngine::default();
        let mut data = rows();
        assert!(!engine.undo(&mut data));

        engine.start(0, "name", CellValue::from("Alice"));
        engine.set_value(CellValue::from("Zed"));
        assert!(engine.cancel());
        assert_eq!(data, rows());
        assert_eq!(engine.history_depth(), 0);

        engine.start(0, "name", CellValue::from("Alice"));
        engine.set_value(CellValue::from("Zed"));
        engine.commit(&mut data);
        assert!(engine.undo(&mut data));
        assert_eq!(data, rows());
        assert!(!engine.can_undo());
    }

    #[test]
    fn test_closure_validator() {
        let validator = |column: &str, value: &CellValue, _row: &Row| {
            (column == "name" && value.is_null()).then(|| "required".to_string())
        };
        let request = ValidationRequest {
            ticket: ValidationTicket(1),
            key: CellKey::new(0, "name"),
            value: CellValue::Null,
            row: Row::new("1"),
        };
        assert_eq!(
            validator.validate(&request),
            ValidationOutcome::Invalid("required".into())
        );
    }
}
