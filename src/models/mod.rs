//! Data models for the world catalog.
//!
//! A synchronization produces an ordered list of `World` records; the
//! list mirrors the order of the remote JSON array and keeps duplicate
//! identifiers if the source contains them.

pub mod world;

pub use world::{World, WorldSortColumn};
