#![deny(missing_docs)]

//! Crate to implement a fixed capacity string set that never stores the strings themselves.
//! Every string is reduced to three independent 32 bit hashes computed from a single
//! pseudo-random crypt table: one picks the slot to start at and the other two are stored in the
//! slot as verification tags.  Collisions are handled with linear probing.
//!
//! The hashes are stable, the crypt table is generated from a fixed seed so a string hashes to the
//! same values in every table and every process.  They are NOT cryptographic and two strings that
//! agree on all three hashes can not be told apart.
//!
//! There is no resizing and no removal of single strings.  See the table module for why removal
//! would need tombstones.

pub mod crypt_table;
pub mod error;
pub mod string_hash;
pub mod table;
pub mod table_config;

pub use crate::error::insert::InsertError;
pub use crate::error::BuildError;
pub use crate::string_hash::{CaseFolding, HashTriple, HashType, StringHasher};
pub use crate::table::{Slot, StringHashTable};
pub use crate::table_config::TableConfig;
