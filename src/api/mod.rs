//! HTTP fetch boundary for the world catalog.
//!
//! The remote endpoint serves a JSON array of world records at a URL
//! built from a configurable template and a player identifier. No
//! authentication is involved.

pub mod client;
pub mod error;

pub use client::{CatalogClient, CatalogSource};
pub use error::ApiError;
