use tracing::{debug, info, warn};

use crate::api::CatalogSource;
use crate::cache::CacheStore;
use crate::models::World;

use super::parser::{parse_catalog, ParseError};

/// Placeholder in the URL template that the player identifier replaces.
pub const URL_ID_PLACEHOLDER: &str = "{id}";

/// Where the worlds of a `SyncResult` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Fetched and parsed from the network.
    Fresh,
    /// Fetch failed, served from the cached payload.
    Cached,
    /// Fetch failed with no usable cache, or nothing to synchronize.
    Empty,
}

impl SyncStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SyncStatus::Fresh => "fresh",
            SyncStatus::Cached => "cached",
            SyncStatus::Empty => "empty",
        }
    }
}

/// Terminal outcome of one synchronization.
#[derive(Debug, Clone)]
pub struct SyncResult {
    /// Ordered catalog, matching the source array. Never a mix of sources.
    pub worlds: Vec<World>,
    pub status: SyncStatus,
    /// Why the fetch failed, when the result was not served fresh.
    pub failure: Option<String>,
}

impl SyncResult {
    fn empty(failure: Option<String>) -> Self {
        Self {
            worlds: Vec::new(),
            status: SyncStatus::Empty,
            failure,
        }
    }
}

/// Instantiate the URL template with a player identifier.
///
/// Returns None when there is nothing to request: an empty identifier,
/// or a template without the `{id}` placeholder.
pub fn build_request_url(template: &str, player_id: &str) -> Option<String> {
    if player_id.is_empty() || !template.contains(URL_ID_PLACEHOLDER) {
        return None;
    }
    Some(template.replace(URL_ID_PLACEHOLDER, player_id))
}

/// Orchestrates one catalog synchronization: fetch, persist on success,
/// fall back to the cache slot on failure, parse whichever payload won.
pub struct Synchronizer<F, C> {
    fetcher: F,
    cache: C,
}

impl<F: CatalogSource, C: CacheStore> Synchronizer<F, C> {
    pub fn new(fetcher: F, cache: C) -> Self {
        Self { fetcher, cache }
    }

    /// Run one full synchronization for `player_id`.
    ///
    /// The only error that escapes is a parse failure on a freshly
    /// fetched body - the payload could not be trusted and silently
    /// discarding it would hide a live data problem. Network failures
    /// are absorbed into `Cached`/`Empty` results, and a corrupt cache
    /// degrades to `Empty`.
    pub async fn synchronize(
        &self,
        player_id: &str,
        url_template: &str,
    ) -> Result<SyncResult, ParseError> {
        let url = match build_request_url(url_template, player_id) {
            Some(url) => url,
            None => {
                warn!("Player id or catalog URL template not set");
                return Ok(SyncResult::empty(None));
            }
        };

        match self.fetcher.fetch(&url).await {
            Ok(body) => {
                // Persist before parsing, so the payload survives even if
                // parsing fails or the process dies in between.
                if let Err(e) = self.cache.write(player_id, &body) {
                    warn!(error = %e, "Failed to cache catalog payload");
                }

                let worlds = parse_catalog(Some(&body))?;
                info!(count = worlds.len(), "Catalog synchronized from network");
                Ok(SyncResult {
                    worlds,
                    status: SyncStatus::Fresh,
                    failure: None,
                })
            }
            Err(e) => {
                warn!(error = %e, "Catalog fetch failed, falling back to cache");
                let reason = e.to_string();

                match self.cache.read(player_id) {
                    Some(payload) => match parse_catalog(Some(&payload)) {
                        Ok(worlds) => {
                            debug!(count = worlds.len(), "Catalog served from cache");
                            Ok(SyncResult {
                                worlds,
                                status: SyncStatus::Cached,
                                failure: Some(reason),
                            })
                        }
                        Err(parse_err) => {
                            warn!(error = %parse_err, "Cached catalog is corrupt, treating as absent");
                            Ok(SyncResult::empty(Some(reason)))
                        }
                    },
                    None => Ok(SyncResult::empty(Some(reason))),
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
