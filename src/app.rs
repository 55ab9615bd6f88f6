//! Application state management for Worldcards.
//!
//! This module contains the core `App` struct that owns the configuration,
//! the catalog synchronizer, the currently displayed catalog, and the
//! background refresh channel the UI event loop drains.

use std::cmp::Ordering;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::api::CatalogClient;
use crate::cache::{CacheStore, FsCache};
use crate::config::Config;
use crate::models::{World, WorldSortColumn};
use crate::sync::{parse_catalog, SyncResult, SyncStatus, Synchronizer};
use crate::utils::{cmp_ignore_case, contains_ignore_case};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background refresh channel.
/// One synchronization produces one message, so a small buffer suffices.
const CHANNEL_BUFFER_SIZE: usize = 8;

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingHelp,
    Quitting,
}

/// Outcome of a background refresh task.
enum RefreshOutcome {
    /// Synchronization reached a terminal result (fresh, cached or empty)
    Synced(SyncResult),
    /// The freshly fetched payload could not be parsed
    Failed(String),
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    sync: Arc<Synchronizer<CatalogClient, FsCache>>,
    cache: FsCache,

    // Catalog state
    pub worlds: Vec<World>,
    pub sync_status: Option<SyncStatus>,
    pub cache_age: Option<String>,

    // UI state
    pub state: AppState,
    pub selection: usize,
    pub search_query: String,
    pub sort_column: WorldSortColumn,
    pub sort_ascending: bool,
    pub status_message: Option<String>,

    // Background refresh channel
    refresh_rx: mpsc::Receiver<RefreshOutcome>,
    refresh_tx: mpsc::Sender<RefreshOutcome>,
    refresh_in_flight: bool,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Result<Self> {
        let mut config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        config.apply_env_overrides();

        // Scaffold the config file on first run so there is something to edit
        if config.player_id.is_none() {
            if let Err(e) = config.save() {
                warn!(error = %e, "Failed to write default config");
            }
        }

        let cache_dir = config.cache_dir().unwrap_or_else(|_| PathBuf::from("./cache"));
        let cache = FsCache::new(cache_dir)?;

        let client = CatalogClient::new(Duration::from_secs(config.request_timeout_secs))?;
        let sync = Arc::new(Synchronizer::new(client, cache.clone()));

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Ok(Self {
            config,
            sync,
            cache,

            worlds: Vec::new(),
            sync_status: None,
            cache_age: None,

            state: AppState::Normal,
            selection: 0,
            search_query: String::new(),
            sort_column: WorldSortColumn::Name,
            sort_ascending: true,
            status_message: None,

            refresh_rx: rx,
            refresh_tx: tx,
            refresh_in_flight: false,
        })
    }

    pub fn player_id(&self) -> Option<&str> {
        self.config.player_id.as_deref().filter(|id| !id.is_empty())
    }

    // =========================================================================
    // Catalog Loading
    // =========================================================================

    /// Paint whatever the cache slot holds, without touching the network.
    /// Used at startup so the UI is populated while the first refresh runs.
    pub fn load_from_cache(&mut self) {
        let Some(player_id) = self.player_id().map(str::to_string) else {
            return;
        };

        if let Some(payload) = self.cache.read(&player_id) {
            match parse_catalog(Some(&payload)) {
                Ok(worlds) => {
                    info!(count = worlds.len(), "Loaded catalog from cache");
                    self.worlds = worlds;
                }
                Err(e) => {
                    warn!(error = %e, "Cached catalog is corrupt, starting empty");
                }
            }
        }
        self.cache_age = self.cache.age_display(&player_id);
    }

    /// Run a synchronization on a background task.
    /// Ignored while a previous refresh is still in flight.
    pub fn refresh(&mut self) {
        if self.refresh_in_flight {
            return;
        }

        let Some(player_id) = self.player_id().map(str::to_string) else {
            self.status_message = Some("No player id configured".to_string());
            return;
        };

        let sync = Arc::clone(&self.sync);
        let tx = self.refresh_tx.clone();
        let template = self.config.url_template.clone();

        tokio::spawn(async move {
            let outcome = match sync.synchronize(&player_id, &template).await {
                Ok(result) => RefreshOutcome::Synced(result),
                Err(e) => RefreshOutcome::Failed(e.to_string()),
            };
            if let Err(e) = tx.send(outcome).await {
                error!(error = %e, "Failed to send refresh outcome - channel closed");
            }
        });

        self.refresh_in_flight = true;
        self.status_message = Some("Refreshing catalog...".to_string());
    }

    /// Drain completed background work; called once per event-loop tick.
    pub fn check_background_tasks(&mut self) {
        while let Ok(outcome) = self.refresh_rx.try_recv() {
            self.process_refresh_outcome(outcome);
        }
    }

    fn process_refresh_outcome(&mut self, outcome: RefreshOutcome) {
        self.refresh_in_flight = false;

        match outcome {
            RefreshOutcome::Synced(result) => {
                self.worlds = result.worlds;
                self.sync_status = Some(result.status);
                self.status_message = match (result.status, result.failure) {
                    (SyncStatus::Cached, Some(reason)) => {
                        Some(format!("Offline - showing cached data ({})", reason))
                    }
                    (SyncStatus::Empty, Some(reason)) => Some(format!("Error: {}", reason)),
                    _ => None,
                };
                if let Some(id) = self.player_id().map(str::to_string) {
                    self.cache_age = self.cache.age_display(&id);
                }
                self.clamp_selection();
            }
            RefreshOutcome::Failed(msg) => {
                // Keep the previous catalog on display; only report the failure
                error!(error = %msg, "Synchronization failed");
                self.status_message = Some(format!("Error: {}", msg));
            }
        }
    }

    // =========================================================================
    // Filtering & Sorting
    // =========================================================================

    fn world_matches_search(world: &World, query: &str) -> bool {
        contains_ignore_case(&world.name, query)
            || contains_ignore_case(&world.author, query)
            || contains_ignore_case(&world.id, query)
            || world.tags.iter().any(|t| contains_ignore_case(t, query))
    }

    /// Get worlds sorted by current sort settings, filtered by search query
    pub fn get_sorted_worlds(&self) -> Vec<&World> {
        let mut sorted: Vec<&World> = self.worlds.iter().collect();

        if !self.search_query.is_empty() {
            sorted.retain(|w| Self::world_matches_search(w, &self.search_query));
        }

        sorted.sort_by(|a, b| {
            let cmp = compare_worlds(a, b, self.sort_column);
            if self.sort_ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        sorted
    }

    /// Toggle sort column - if already sorting by this column, flip direction;
    /// otherwise switch to it. Count columns start descending (biggest first).
    pub fn toggle_sort(&mut self, column: WorldSortColumn) {
        if self.sort_column == column {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_column = column;
            self.sort_ascending =
                matches!(column, WorldSortColumn::Name | WorldSortColumn::Updated);
        }
        self.selection = 0;
    }

    pub fn selected_world(&self) -> Option<&World> {
        self.get_sorted_worlds().get(self.selection).copied()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn move_selection_up(&mut self, amount: usize) {
        self.selection = self.selection.saturating_sub(amount);
    }

    pub fn move_selection_down(&mut self, amount: usize) {
        let len = self.get_sorted_worlds().len();
        if len > 0 {
            self.selection = (self.selection + amount).min(len - 1);
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.get_sorted_worlds().len();
        if len == 0 {
            self.selection = 0;
        } else if self.selection >= len {
            self.selection = len - 1;
        }
    }
}

/// Ordering for one sort column; ties fall back to the display name.
fn compare_worlds(a: &World, b: &World, column: WorldSortColumn) -> Ordering {
    let name_cmp = |x: &World, y: &World| cmp_ignore_case(x.display_name(), y.display_name());

    match column {
        WorldSortColumn::Name => name_cmp(a, b),
        WorldSortColumn::Visits => a.visits.cmp(&b.visits).then_with(|| name_cmp(a, b)),
        WorldSortColumn::Favorites => a.favorites.cmp(&b.favorites).then_with(|| name_cmp(a, b)),
        // lastUpdate is opaque text; lexicographic works for the ISO
        // timestamps the endpoint emits and is harmless otherwise
        WorldSortColumn::Updated => a
            .last_update
            .cmp(&b.last_update)
            .then_with(|| name_cmp(a, b)),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn world(id: &str, name: &str, visits: u64) -> World {
        World {
            id: id.to_string(),
            name: name.to_string(),
            author: "ann".to_string(),
            image_url: String::new(),
            description: String::new(),
            tags: vec!["game".to_string()],
            visits,
            favorites: 0,
            last_update: String::new(),
        }
    }

    #[test]
    fn test_world_matches_search() {
        let w = world("wrld_1", "Harbor Town", 10);
        assert!(App::world_matches_search(&w, "harbor"));
        assert!(App::world_matches_search(&w, "ANN"));
        assert!(App::world_matches_search(&w, "wrld_1"));
        assert!(App::world_matches_search(&w, "game"));
        assert!(!App::world_matches_search(&w, "island"));
    }

    #[test]
    fn test_compare_worlds_by_name_ignores_case() {
        let a = world("w1", "alpha", 0);
        let b = world("w2", "Beta", 0);
        assert_eq!(compare_worlds(&a, &b, WorldSortColumn::Name), Ordering::Less);
    }

    #[test]
    fn test_compare_worlds_by_visits_breaks_ties_by_name() {
        let a = world("w1", "Beta", 5);
        let b = world("w2", "Alpha", 5);
        assert_eq!(
            compare_worlds(&a, &b, WorldSortColumn::Visits),
            Ordering::Greater
        );
        let c = world("w3", "Gamma", 9);
        assert_eq!(
            compare_worlds(&a, &c, WorldSortColumn::Visits),
            Ordering::Less
        );
    }
}
