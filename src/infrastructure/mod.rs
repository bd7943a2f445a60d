//! Adapters implementing the domain ports.

pub mod bincodes;
pub mod in_memory;
pub mod key_file;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
