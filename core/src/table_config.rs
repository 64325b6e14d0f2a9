//! Define the configuration used to create a StringHashTable.

use crate::error::BuildError;
use crate::string_hash::CaseFolding;
use crate::table::StringHashTable;

/// Capacity used when none is set.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Configuration for a table.
#[derive(Clone, Debug)]
pub struct TableConfig {
    pub(crate) capacity: usize,
    pub(crate) case_folding: CaseFolding,
    pub(crate) allow_duplicate_inserts: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TableConfig {
    /// Create a new config.
    /// Defaults to DEFAULT_CAPACITY slots, case-insensitive hashing and duplicate inserts allowed.
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            case_folding: CaseFolding::Insensitive,
            allow_duplicate_inserts: true,
        }
    }

    /// Set the number of slots.  This is fixed for the life of the table.
    /// Zero is accepted here but build() will fail with it.
    pub fn set_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Hash strings exactly as given.
    pub fn case_sensitive(mut self) -> Self {
        self.case_folding = CaseFolding::Sensitive;
        self
    }

    /// Fold ASCII letters to uppercase before hashing (the default).
    pub fn case_insensitive(mut self) -> Self {
        self.case_folding = CaseFolding::Insensitive;
        self
    }

    /// Fail inserts of strings already in the table with DuplicateKey instead of using another slot.
    pub fn reject_duplicates(mut self) -> Self {
        self.allow_duplicate_inserts = false;
        self
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Configured case policy.
    pub fn case_folding(&self) -> CaseFolding {
        self.case_folding
    }

    /// True if inserting a string twice uses two slots.
    pub fn allows_duplicate_inserts(&self) -> bool {
        self.allow_duplicate_inserts
    }

    /// Consumes the config and builds a table.
    pub fn build(self) -> Result<StringHashTable, BuildError> {
        StringHashTable::from_config(self)
    }
}
