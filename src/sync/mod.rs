//! Catalog synchronization pipeline.
//!
//! One call to `Synchronizer::synchronize` runs the full flow: build the
//! request URL, fetch, persist the raw payload on success, fall back to
//! the cached slot on failure, and parse whichever payload won. The
//! caller only ever sees the terminal `SyncResult`.

pub mod parser;
pub mod synchronizer;

pub use parser::{parse_catalog, ParseError};
pub use synchronizer::{build_request_url, SyncResult, SyncStatus, Synchronizer};
