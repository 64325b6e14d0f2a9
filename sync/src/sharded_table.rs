//! Shards a string set over several StringHashTables to reduce lock contention between inserts.

use log::debug;
use parking_lot::Mutex;
use strhash_core::error::insert::InsertError;
use strhash_core::error::BuildError;
use strhash_core::string_hash::{HashType, StringHasher};
use strhash_core::table::StringHashTable;
use strhash_core::table_config::TableConfig;

/// 2^shard_bits StringHashTables, each behind its own lock.
/// A string always goes to the same shard (chosen from its TagB hash) so membership behaves as it
/// does for a single table, except a shard can fill up before the others do.
#[derive(Debug)]
pub struct ShardedStringHashTable {
    shards: Vec<Mutex<StringHashTable>>,
    // Routing only.  Same seed and case policy as the shards' hashers.
    router: StringHasher,
    shard_mask: u32,
}

impl ShardedStringHashTable {
    /// Build a sharded table, the config capacity is split evenly between 2^shard_bits shards.
    /// Any remainder of the capacity is dropped.  Fails if a shard would get no slots.
    /// Panics if shard_bits is not less than usize::BITS.
    pub fn open(config: TableConfig, shard_bits: u32) -> Result<Self, BuildError> {
        let shards = 1_usize << shard_bits;
        let shard_capacity = config.capacity() / shards;
        if shard_capacity == 0 {
            return Err(BuildError::ZeroCapacity);
        }
        debug!(
            "building {} shards of {} slots each",
            shards, shard_capacity
        );
        let router = StringHasher::new(config.case_folding());
        let mut tables = Vec::with_capacity(shards);
        for _ in 0..shards {
            let shard = config.clone().set_capacity(shard_capacity).build()?;
            tables.push(Mutex::new(shard));
        }
        Ok(Self {
            shards: tables,
            router,
            shard_mask: (shards - 1) as u32,
        })
    }

    /// Shard index for text.
    pub fn shard(&self, text: &str) -> usize {
        (self.router.hash_string(text, HashType::TagB) & self.shard_mask) as usize
    }

    /// Number of shards.
    pub fn shards(&self) -> usize {
        self.shards.len()
    }

    /// Insert text into its shard.  Returns the slot within that shard.
    /// TableFull means the shard for text is full, other shards may still have room.
    pub fn insert(&self, text: &str) -> Result<usize, InsertError> {
        self.shards[self.shard(text)].lock().insert(text)
    }

    /// True if text has been inserted.
    pub fn contains(&self, text: &str) -> bool {
        self.shards[self.shard(text)].lock().contains(text)
    }

    /// Occupied slots over all shards.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    /// Are all shards empty?
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    /// Total slots over all shards.
    pub fn capacity(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().capacity()).sum()
    }
}
