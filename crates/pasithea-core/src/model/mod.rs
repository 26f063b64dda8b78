//! Data model: issues, status columns, priorities, and board state.

mod issue;

pub use issue::{
    now_rfc3339, BoardState, Issue, IssueDraft, ParseEnumError, Priority, Status,
};
