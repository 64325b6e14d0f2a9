//! Multi-hash string hashing over a crypt table.
//! One crypt table supports several independent hash functions selected by HashType, the table uses
//! one for the slot offset and two more as verification tags.

use crate::crypt_table::CryptTable;

const SEED1: u32 = 0x7FED_7FED;
const SEED2: u32 = 0xEEEE_EEEE;

/// Selects which of the independent hash functions to compute.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HashType {
    /// Hash used to pick the first slot to probe.
    Offset,
    /// First verification tag.
    TagA,
    /// Second verification tag.
    TagB,
}

impl HashType {
    /// The numeric selector (row of the crypt table) for this hash type.
    pub fn index(self) -> usize {
        match self {
            Self::Offset => 0,
            Self::TagA => 1,
            Self::TagB => 2,
        }
    }
}

/// How letters are treated when hashing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum CaseFolding {
    /// ASCII letters are uppercased before hashing so "abc" and "ABC" are the same string.
    /// Non-ASCII bytes are never folded.
    #[default]
    Insensitive,
    /// Bytes are hashed unchanged.
    Sensitive,
}

impl CaseFolding {
    #[inline(always)]
    fn fold(self, byte: u8) -> u8 {
        match self {
            Self::Insensitive => byte.to_ascii_uppercase(),
            Self::Sensitive => byte,
        }
    }
}

/// The three hashes that identify a string in a table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HashTriple {
    /// Offset hash, reduce modulo capacity for the first slot.
    pub offset: u32,
    /// First verification tag.
    pub tag_a: u32,
    /// Second verification tag.
    pub tag_b: u32,
}

/// Hashes strings with a crypt table.  Cloning copies the table.
#[derive(Clone, Debug, Default)]
pub struct StringHasher {
    table: CryptTable,
    folding: CaseFolding,
}

impl StringHasher {
    /// Build a hasher (generates the crypt table).
    pub fn new(folding: CaseFolding) -> Self {
        Self {
            table: CryptTable::new(),
            folding,
        }
    }

    /// The case policy in use.
    pub fn case_folding(&self) -> CaseFolding {
        self.folding
    }

    /// The crypt table backing this hasher.
    pub fn crypt_table(&self) -> &CryptTable {
        &self.table
    }

    /// Hash text (as UTF-8 bytes) with the function selected by hash_type.
    /// The empty string hashes to the initial seed for every hash type.
    pub fn hash_string(&self, text: &str, hash_type: HashType) -> u32 {
        self.hash_bytes(text.as_bytes(), hash_type)
    }

    /// Hash raw bytes, text hashing is defined in terms of this.
    pub fn hash_bytes(&self, bytes: &[u8], hash_type: HashType) -> u32 {
        let row = hash_type.index();
        let mut seed1 = SEED1;
        let mut seed2 = SEED2;
        for &byte in bytes {
            let ch = self.folding.fold(byte);
            seed1 = self.table.entry(row, ch) ^ seed1.wrapping_add(seed2);
            seed2 = (ch as u32)
                .wrapping_add(seed1)
                .wrapping_add(seed2)
                .wrapping_add(seed2 << 5)
                .wrapping_add(3);
        }
        seed1
    }

    /// Compute all three hashes for text.
    pub fn hash_triple(&self, text: &str) -> HashTriple {
        HashTriple {
            offset: self.hash_string(text, HashType::Offset),
            tag_a: self.hash_string(text, HashType::TagA),
            tag_b: self.hash_string(text, HashType::TagB),
        }
    }
}
