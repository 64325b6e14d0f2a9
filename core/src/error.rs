//! Errors for the string hash table.

pub mod insert;

use std::error::Error;
use std::fmt;

/// Error building a table from a config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// The table would have no slots to store anything in.
    ZeroCapacity,
}

impl Error for BuildError {}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            Self::ZeroCapacity => write!(f, "capacity must be greater than zero"),
        }
    }
}
