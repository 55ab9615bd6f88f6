//! Local caching module for offline catalog access.
//!
//! Each identifier gets one durable slot holding the raw JSON text of
//! the last successful fetch. Slots are written only on fetch success
//! and read only when a fetch fails; they are never proactively expired.

pub mod store;

pub use store::{CacheStore, FsCache};
