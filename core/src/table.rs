//! Fixed capacity open addressed string table.
//!
//! Strings are never stored.  Each string is reduced to three hashes, the first picks the slot to
//! start probing at and the other two are stored in the slot as tags to recognise the string later.
//! Collisions are resolved with linear probing that wraps at the end of the slots.
//!
//! Lookups stop at the first empty slot.  This is only correct because slots are never emptied
//! once occupied (clear() empties every slot at once which is fine).  Removing single strings would
//! require tombstone slots (occupied but deleted) that probing skips over rather than stopping at.
//!
//! Two different strings with the same offset and tags are indistinguishable, contains() will
//! report true for the second even if only the first was inserted.  With 64 bits of tag this is
//! rare but not impossible so do not use this with adversarial inputs.

use crate::error::insert::InsertError;
use crate::error::BuildError;
use crate::string_hash::{CaseFolding, HashTriple, StringHasher};
use crate::table_config::TableConfig;
use log::{debug, trace, warn};
use std::fmt;

/// One slot of the table.  Tags are only meaningful when occupied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    tag_a: u32,
    tag_b: u32,
    occupied: bool,
}

impl Slot {
    /// An unused slot.
    pub const EMPTY: Slot = Slot {
        tag_a: 0,
        tag_b: 0,
        occupied: false,
    };

    fn occupy(tag_a: u32, tag_b: u32) -> Self {
        Self {
            tag_a,
            tag_b,
            occupied: true,
        }
    }

    /// Does this slot hold a string?
    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// True if this slot is occupied by a string with these tags.
    pub fn matches(&self, tag_a: u32, tag_b: u32) -> bool {
        self.occupied && self.tag_a == tag_a && self.tag_b == tag_b
    }

    /// The tags stored in this slot if occupied.
    pub fn tags(&self) -> Option<(u32, u32)> {
        if self.occupied {
            Some((self.tag_a, self.tag_b))
        } else {
            None
        }
    }
}

/// Result of walking a probe sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Probe {
    /// Slot holding the tags.
    Found(usize),
    /// First empty slot on the sequence.
    Vacant(usize),
    /// Went all the way around without a match or an empty slot.
    Exhausted,
}

/// Hash table that records which strings have been inserted.
pub struct StringHashTable {
    hasher: StringHasher,
    slots: Vec<Slot>,
    len: usize,
    allow_duplicate_inserts: bool,
}

impl Default for StringHashTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringHashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringHashTable")
            .field("capacity", &self.capacity())
            .field("len", &self.len)
            .field("case_folding", &self.hasher.case_folding())
            .field("allow_duplicate_inserts", &self.allow_duplicate_inserts)
            .finish()
    }
}

impl StringHashTable {
    /// New table with the default config (1024 slots).
    pub fn new() -> Self {
        Self::build_unchecked(TableConfig::new())
    }

    /// New table with capacity slots and otherwise default config.
    pub fn with_capacity(capacity: usize) -> Result<Self, BuildError> {
        Self::from_config(TableConfig::new().set_capacity(capacity))
    }

    /// Build a table from config.
    pub fn from_config(config: TableConfig) -> Result<Self, BuildError> {
        if config.capacity == 0 {
            return Err(BuildError::ZeroCapacity);
        }
        Ok(Self::build_unchecked(config))
    }

    fn build_unchecked(config: TableConfig) -> Self {
        debug!(
            "building string hash table: capacity {}, {:?}, duplicates allowed: {}",
            config.capacity, config.case_folding, config.allow_duplicate_inserts
        );
        Self {
            hasher: StringHasher::new(config.case_folding),
            slots: vec![Slot::EMPTY; config.capacity],
            len: 0,
            allow_duplicate_inserts: config.allow_duplicate_inserts,
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if every slot is occupied, any further insert will fail.
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Fraction of slots occupied.
    pub fn load_factor(&self) -> f32 {
        self.len as f32 / self.slots.len() as f32
    }

    /// Case policy strings are hashed with.
    pub fn case_folding(&self) -> CaseFolding {
        self.hasher.case_folding()
    }

    /// The hasher used to place strings.
    pub fn hasher(&self) -> &StringHasher {
        &self.hasher
    }

    /// Read only view of the slots.
    pub fn slots(&self) -> &[Slot] {
        &self.slots[..]
    }

    /// Slot index probing for text starts at.
    pub fn slot_base(&self, text: &str) -> usize {
        self.base_of(&self.hasher.hash_triple(text))
    }

    #[inline]
    fn base_of(&self, triple: &HashTriple) -> usize {
        triple.offset as usize % self.slots.len()
    }

    /// Walk the probe sequence for triple, visiting at most capacity slots.
    /// If stop_on_match is false occupied slots are always skipped (used for plain inserts).
    fn probe(&self, triple: &HashTriple, stop_on_match: bool) -> Probe {
        let capacity = self.slots.len();
        let start = self.base_of(triple);
        for step in 0..capacity {
            let pos = (start + step) % capacity;
            let slot = &self.slots[pos];
            if !slot.is_occupied() {
                return Probe::Vacant(pos);
            }
            if stop_on_match && slot.matches(triple.tag_a, triple.tag_b) {
                return Probe::Found(pos);
            }
        }
        Probe::Exhausted
    }

    /// Insert text, returning the slot it was stored in.
    /// Fails with TableFull if no empty slot exists, and with DuplicateKey if the table was
    /// configured to reject duplicates and text is already present.  On error nothing is changed.
    pub fn insert(&mut self, text: &str) -> Result<usize, InsertError> {
        let triple = self.hasher.hash_triple(text);
        match self.probe(&triple, !self.allow_duplicate_inserts) {
            Probe::Vacant(pos) => {
                self.slots[pos] = Slot::occupy(triple.tag_a, triple.tag_b);
                self.len += 1;
                trace!("inserted {:?} at slot {}", text, pos);
                Ok(pos)
            }
            Probe::Found(pos) => {
                trace!("duplicate insert of {:?} (slot {})", text, pos);
                Err(InsertError::DuplicateKey)
            }
            Probe::Exhausted => {
                warn!(
                    "insert of {:?} failed, all {} slots occupied",
                    text,
                    self.capacity()
                );
                Err(InsertError::TableFull {
                    capacity: self.capacity(),
                })
            }
        }
    }

    /// Slot holding text, None if text was never inserted.
    pub fn position(&self, text: &str) -> Option<usize> {
        let triple = self.hasher.hash_triple(text);
        match self.probe(&triple, true) {
            Probe::Found(pos) => Some(pos),
            Probe::Vacant(pos) => {
                trace!("{:?} not found, empty slot {}", text, pos);
                None
            }
            Probe::Exhausted => None,
        }
    }

    /// True if text was inserted (or collides completely with a string that was).
    pub fn contains(&self, text: &str) -> bool {
        self.position(text).is_some()
    }

    /// Empty every slot.  Capacity and hasher are kept.
    pub fn clear(&mut self) {
        self.slots.fill(Slot::EMPTY);
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string_hash::HashType;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Find a string (from a numbered family) whose probing starts at base.
    fn string_with_base(table: &StringHashTable, prefix: &str, base: usize) -> String {
        (0..1_000_000)
            .map(|i| format!("{}{}", prefix, i))
            .find(|s| table.slot_base(s) == base)
            .unwrap()
    }

    #[test]
    fn test_empty_table() {
        init_logging();
        let table = StringHashTable::new();
        assert_eq!(table.capacity(), 1024);
        assert!(table.is_empty());
        assert!(!table.is_full());
        for text in ["", "a", "hello", "ZZ", "arr\\units.dat"] {
            assert!(!table.contains(text));
            assert_eq!(table.position(text), None);
        }
    }

    #[test]
    fn test_insert_contains() {
        init_logging();
        let mut table = StringHashTable::with_capacity(256).unwrap();
        let words: Vec<String> = (0..100).map(|i| format!("word {}", i)).collect();
        for (i, word) in words.iter().enumerate() {
            let pos = table.insert(word).unwrap();
            assert_eq!(table.position(word), Some(pos));
            assert_eq!(table.len(), i + 1);
            // Everything inserted so far is still there.
            for earlier in &words[..=i] {
                assert!(table.contains(earlier), "lost {}", earlier);
            }
        }
        for i in 100..200 {
            assert!(!table.contains(&format!("word {}", i)));
        }
        assert!((table.load_factor() - 100.0 / 256.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_capacity_four() {
        init_logging();
        let mut table = StringHashTable::with_capacity(4).unwrap();
        for text in ["AA", "BB", "CC", "DD"] {
            table.insert(text).unwrap();
        }
        assert!(table.is_full());
        assert_eq!(
            table.insert("EE"),
            Err(InsertError::TableFull { capacity: 4 })
        );
        assert_eq!(table.len(), 4);
        assert!(table.contains("AA"));
        assert!(table.contains("DD"));
        assert!(!table.contains("ZZ"));
        assert!(!table.contains("EE"));
    }

    #[test]
    fn test_overfill() {
        let capacity = 64;
        let mut table = StringHashTable::with_capacity(capacity).unwrap();
        let mut failures = 0;
        for i in 0..=capacity {
            if table.insert(&format!("key_{}", i)).is_err() {
                failures += 1;
            }
        }
        assert_eq!(failures, 1);
        assert_eq!(table.len(), capacity);
        let before: Vec<Slot> = table.slots().to_vec();
        assert!(table.insert("one more").is_err());
        assert_eq!(table.slots(), &before[..]);
    }

    #[test]
    fn test_wrap_around() {
        init_logging();
        let capacity = 8;
        let mut table = StringHashTable::with_capacity(capacity).unwrap();
        let first = string_with_base(&table, "first", capacity - 1);
        let second = string_with_base(&table, "second", capacity - 1);
        assert_eq!(table.insert(&first), Ok(capacity - 1));
        // Collides with the last slot and must wrap to slot 0.
        assert_eq!(table.insert(&second), Ok(0));
        assert_eq!(table.position(&first), Some(capacity - 1));
        assert_eq!(table.position(&second), Some(0));
        let third = string_with_base(&table, "third", capacity - 1);
        assert!(!table.contains(&third));
        assert_eq!(table.insert(&third), Ok(1));
    }

    #[test]
    fn test_empty_string() {
        let mut table = StringHashTable::with_capacity(16).unwrap();
        assert!(!table.contains(""));
        table.insert("").unwrap();
        assert!(table.contains(""));
        assert_eq!(
            table.hasher().hash_string("", HashType::Offset),
            0x7FED_7FED
        );
    }

    #[test]
    fn test_case_insensitive_default() {
        let mut table = StringHashTable::new();
        table.insert("Units\\Human\\Footman.mdx").unwrap();
        assert!(table.contains("UNITS\\HUMAN\\FOOTMAN.MDX"));
        assert!(table.contains("units\\human\\footman.mdx"));
    }

    #[test]
    fn test_case_sensitive() {
        let mut table = TableConfig::new().case_sensitive().build().unwrap();
        assert_eq!(table.case_folding(), CaseFolding::Sensitive);
        table.insert("Hello").unwrap();
        assert!(table.contains("Hello"));
        assert!(!table.contains("hello"));
    }

    #[test]
    fn test_duplicates() {
        let mut table = StringHashTable::with_capacity(8).unwrap();
        let p1 = table.insert("dup").unwrap();
        let p2 = table.insert("dup").unwrap();
        assert_ne!(p1, p2);
        assert_eq!(table.len(), 2);
        // The first copy is found first.
        assert_eq!(table.position("dup"), Some(p1));

        let mut table = TableConfig::new()
            .set_capacity(8)
            .reject_duplicates()
            .build()
            .unwrap();
        let p1 = table.insert("dup").unwrap();
        assert_eq!(table.insert("dup"), Err(InsertError::DuplicateKey));
        assert_eq!(table.insert("DUP"), Err(InsertError::DuplicateKey));
        assert_eq!(table.len(), 1);
        assert_eq!(table.position("dup"), Some(p1));
    }

    #[test]
    fn test_full_table_duplicate_check() {
        // A full table still finds strings that are present.
        let mut table = TableConfig::new()
            .set_capacity(2)
            .reject_duplicates()
            .build()
            .unwrap();
        table.insert("a").unwrap();
        table.insert("b").unwrap();
        assert_eq!(table.insert("a"), Err(InsertError::DuplicateKey));
        assert_eq!(
            table.insert("c"),
            Err(InsertError::TableFull { capacity: 2 })
        );
    }

    #[test]
    fn test_capacity_one() {
        let mut table = StringHashTable::with_capacity(1).unwrap();
        assert_eq!(table.slot_base("anything"), 0);
        assert_eq!(table.insert("x"), Ok(0));
        assert!(table.contains("x"));
        assert!(!table.contains("y"));
        assert!(table.insert("y").is_err());
    }

    #[test]
    fn test_zero_capacity() {
        assert_eq!(
            StringHashTable::with_capacity(0).unwrap_err(),
            BuildError::ZeroCapacity
        );
    }

    #[test]
    fn test_deterministic_placement() {
        let mut t1 = StringHashTable::with_capacity(128).unwrap();
        let mut t2 = StringHashTable::with_capacity(128).unwrap();
        for i in 0..50 {
            let text = format!("path/{}/file.txt", i);
            assert_eq!(t1.insert(&text), t2.insert(&text));
        }
        assert_eq!(t1.slots(), t2.slots());
    }

    #[test]
    fn test_slot_tags() {
        let mut table = StringHashTable::with_capacity(32).unwrap();
        let pos = table.insert("tagged").unwrap();
        let triple = table.hasher().hash_triple("tagged");
        let slot = table.slots()[pos];
        assert!(slot.is_occupied());
        assert!(slot.matches(triple.tag_a, triple.tag_b));
        assert_eq!(slot.tags(), Some((triple.tag_a, triple.tag_b)));
        assert_eq!(Slot::EMPTY.tags(), None);
        assert!(!Slot::EMPTY.matches(0, 0));
    }

    #[test]
    fn test_clear() {
        let mut table = StringHashTable::with_capacity(4).unwrap();
        for text in ["a", "b", "c", "d"] {
            table.insert(text).unwrap();
        }
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 4);
        assert!(!table.contains("a"));
        table.insert("e").unwrap();
        assert!(table.contains("e"));
    }
}
