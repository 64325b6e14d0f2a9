#![deny(missing_docs)]

//! Provide thread safe wrappers around StringHashTable.
//! The crypt table is read only after construction but inserts mutate slots that any probe may
//! touch, so a table is guarded as a whole.  ShardedStringHashTable splits the table to reduce
//! contention between inserts.

pub mod sharded_table;

pub use crate::sharded_table::ShardedStringHashTable;

use parking_lot::RwLock;
use strhash_core::error::insert::InsertError;
use strhash_core::error::BuildError;
use strhash_core::string_hash::HashType;
use strhash_core::table::StringHashTable;
use strhash_core::table_config::TableConfig;

/// A StringHashTable behind a single read/write lock.
/// Inserts take the write lock, all queries take the read lock so they run concurrently with each
/// other but never observe a half finished insert.  All methods take &self so wrap this in an Arc
/// to share it.
#[derive(Debug, Default)]
pub struct SharedStringHashTable {
    table: RwLock<StringHashTable>,
}

impl SharedStringHashTable {
    /// Build a shared table from config.
    pub fn open(config: TableConfig) -> Result<Self, BuildError> {
        Ok(Self::from_table(config.build()?))
    }

    /// Wrap an existing table.
    pub fn from_table(table: StringHashTable) -> Self {
        Self {
            table: RwLock::new(table),
        }
    }

    /// Unwrap the table.
    pub fn into_inner(self) -> StringHashTable {
        self.table.into_inner()
    }

    /// Insert text, see StringHashTable::insert().
    pub fn insert(&self, text: &str) -> Result<usize, InsertError> {
        self.table.write().insert(text)
    }

    /// True if text has been inserted.
    pub fn contains(&self, text: &str) -> bool {
        self.table.read().contains(text)
    }

    /// Slot holding text if inserted.
    pub fn position(&self, text: &str) -> Option<usize> {
        self.table.read().position(text)
    }

    /// Hash text with the table's hasher.
    pub fn hash_string(&self, text: &str, hash_type: HashType) -> u32 {
        self.table.read().hasher().hash_string(text, hash_type)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.table.read().capacity()
    }

    /// Empty every slot.
    pub fn clear(&self) {
        self.table.write().clear()
    }
}
