//! Adapters for the domain ports: storage backends and rate providers.

pub mod http_rate;
pub mod in_memory;
pub mod local_rate;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
