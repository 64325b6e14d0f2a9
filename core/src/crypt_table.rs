//! The dispersion (crypt) table used to scramble input bytes into hash state.
//! It is generated from a fixed seed so every table built by any process is identical, this is what
//! makes a string hash to the same values across table instances and across runs.

/// Number of entries in a crypt table: 256 byte values for each of 5 hash types.
pub const CRYPT_TABLE_LEN: usize = 0x500;

/// Hash types the table holds constants for (only the first three are used for hashing).
pub(crate) const TABLE_HASH_TYPES: usize = 5;

const INITIAL_STATE: u32 = 0x0010_0001;
const MULTIPLIER: u32 = 125;
const INCREMENT: u32 = 3;
const MODULUS: u32 = 0x2A_AAAB;

/// Advance the generator state.  The state is always below MODULUS so the product fits in u32.
#[inline(always)]
fn advance(state: u32) -> u32 {
    (state * MULTIPLIER + INCREMENT) % MODULUS
}

/// Immutable table of 1280 pseudo-random u32 values indexed by (hash_type * 256 + byte).
#[derive(Clone)]
pub struct CryptTable {
    entries: Box<[u32; CRYPT_TABLE_LEN]>,
}

impl CryptTable {
    /// Generate the table.
    pub fn new() -> Self {
        let mut entries = Box::new([0_u32; CRYPT_TABLE_LEN]);
        let mut state = INITIAL_STATE;
        for byte in 0..256 {
            for hash_type in 0..TABLE_HASH_TYPES {
                state = advance(state);
                let high = (state & 0xFFFF) << 16;
                state = advance(state);
                let low = state & 0xFFFF;
                entries[hash_type * 256 + byte] = high | low;
            }
        }
        Self { entries }
    }

    /// Return the entry at index (hash_type * 256 + byte).
    /// Panics if index >= CRYPT_TABLE_LEN.
    #[inline(always)]
    pub fn get(&self, index: usize) -> u32 {
        self.entries[index]
    }

    /// Dispersion constant for byte under hash_type.
    #[inline(always)]
    pub(crate) fn entry(&self, hash_type: usize, byte: u8) -> u32 {
        self.entries[(hash_type << 8) + byte as usize]
    }

    /// All the entries in index order.
    pub fn as_slice(&self) -> &[u32] {
        &self.entries[..]
    }
}

impl Default for CryptTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CryptTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptTable")
            .field("len", &CRYPT_TABLE_LEN)
            .field("first", &self.entries[0])
            .finish()
    }
}
