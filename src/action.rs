//! Action definitions
//!
//! One action is one invocation of the database: the CLI parses its
//! arguments into an `Action` and hands it to `Store::execute`.

use crate::record::Record;
use crate::store::OpenMode;

/// Operations a caller can request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Allocate a fresh table and write it out
    Create { field_width: u32, row_count: u32 },

    /// Fetch one present row
    Get { id: i64 },

    /// Fill an unset row and write the table
    Set { id: i64, name: String, email: String },

    /// Clear a row and write the table
    Delete { id: i64 },

    /// Every present row in id order
    List,
}

impl Action {
    /// How the backing file must be opened for this action
    pub fn open_mode(&self) -> OpenMode {
        match self {
            Action::Create { .. } => OpenMode::CreateNew,
            _ => OpenMode::ReadUpdate,
        }
    }

    /// True if the action changes the table and must be written back
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Action::Create { .. } | Action::Set { .. } | Action::Delete { .. }
        )
    }
}

/// Result of a successful action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The table was changed and written
    Done,

    Record(Record),

    Records(Vec<Record>),
}
