#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// A HashMap implementation using separate chaining.
///
/// This module provides a `HashMap` that wraps the `HashTable` and provides
/// a standard key-value map interface with configurable hashers.
pub mod hash_map;

/// The chained hash table core.
///
/// This module provides the hash-agnostic `HashTable`, an array of buckets
/// each holding a singly linked chain of entries. Callers supply hashes and
/// equality predicates; the map and set wrappers layer key hashing on top.
pub mod hash_table;

/// A hash set implementation using separate chaining.
///
/// This module provides a `HashSet` that wraps the `HashTable` and provides
/// a standard set interface with configurable hashers.
pub mod hash_set;

pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_set::HashSet;
pub use hash_table::HashTable;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The default hash builder, [`foldhash::fast::RandomState`].
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The default hash builder, the standard library's `RandomState`.
        pub type DefaultHashBuilder = std::collections::hash_map::RandomState;
    } else {
        /// Placeholder hash builder when no default hasher is available.
        ///
        /// With both the `foldhash` and `std` features disabled there is no
        /// hasher to default to. This type cannot be constructed; supply a
        /// `BuildHasher` explicitly via `with_hasher`.
        #[derive(Clone, Copy, Debug)]
        pub enum DefaultHashBuilder {}
    }
}
