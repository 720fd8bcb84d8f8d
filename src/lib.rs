#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Bucket chains: singly linked lists of entries kept in a per-bucket arena.
pub mod chain;

/// Validated construction parameters for tables.
pub mod config;

/// The key/value node stored in a chain.
pub mod entry;

/// Errors reported when constructing a table.
pub mod error;

/// A HashMap implementation using separate chaining.
///
/// This module provides a `HashMap` that wraps the `HashTable` and provides
/// a key-value map interface with configurable key hashing.
pub mod hash_map;

/// A hash set implementation using separate chaining.
///
/// This module provides a `HashSet` that wraps the `HashTable` and provides
/// a standard set interface with configurable key hashing.
pub mod hash_set;

/// The bucket array shared by `HashMap` and `HashSet`.
pub mod hash_table;

/// Key hashing strategies and the default polynomial string hash.
pub mod hasher;

pub use chain::Chain;
pub use config::DEFAULT_CAPACITY;
pub use config::DEFAULT_LOAD_FACTOR;
pub use config::TableConfig;
pub use entry::Entry;
pub use error::ConfigError;
pub use hash_map::HashMap;
pub use hash_set::HashSet;
pub use hash_table::HashTable;
pub use hasher::KeyHasher;
pub use hasher::Polynomial31;
pub use hasher::StdHasher;
