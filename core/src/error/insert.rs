//! Contains the error for the insert() function.

use std::error::Error;
use std::fmt;

/// Custom error type for Inserts.
/// A failed insert never changes the table so the table remains usable after either error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    /// Probed every slot without finding an empty one.
    TableFull {
        /// Capacity of the table that was full.
        capacity: usize,
    },
    /// String is already in the table and duplicates are not allowed.
    DuplicateKey,
}

impl Error for InsertError {}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            Self::TableFull { capacity } => write!(f, "table full ({} slots)", capacity),
            Self::DuplicateKey => write!(f, "string is already in table"),
        }
    }
}
