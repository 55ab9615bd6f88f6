use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Durable slot storage for raw catalog payloads, keyed by identifier.
///
/// `read` never fails in a way distinguishable from "absent": a slot
/// that cannot be read is simply no cache. `write` reports its failure
/// so the caller can log it, but a failed write never aborts a
/// synchronization.
pub trait CacheStore {
    fn write(&self, key: &str, payload: &str) -> Result<()>;
    fn read(&self, key: &str) -> Option<String>;
}

/// Filesystem-backed cache: one `<key>.json` file per identifier, holding
/// the last successfully fetched payload verbatim. Last writer wins.
#[derive(Clone)]
pub struct FsCache {
    cache_dir: PathBuf,
}

impl FsCache {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache directory: {}", cache_dir.display()))?;
        Ok(Self { cache_dir })
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// When the slot for `key` was last written, from file mtime.
    pub fn cached_at(&self, key: &str) -> Option<DateTime<Utc>> {
        let meta = std::fs::metadata(self.slot_path(key)).ok()?;
        let modified = meta.modified().ok()?;
        Some(modified.into())
    }

    /// Human-readable slot age for the status bar, or None if no slot exists.
    pub fn age_display(&self, key: &str) -> Option<String> {
        self.cached_at(key).map(age_display)
    }
}

impl CacheStore for FsCache {
    fn write(&self, key: &str, payload: &str) -> Result<()> {
        // The directory may have been removed since construction
        std::fs::create_dir_all(&self.cache_dir)
            .with_context(|| format!("Failed to create cache directory: {}", self.cache_dir.display()))?;

        let path = self.slot_path(key);
        std::fs::write(&path, payload)
            .with_context(|| format!("Failed to write cache slot: {}", path.display()))
    }

    fn read(&self, key: &str) -> Option<String> {
        let path = self.slot_path(key);
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(&path) {
            Ok(payload) => Some(payload),
            Err(e) => {
                // An unreadable slot is indistinguishable from a missing one
                debug!(key, error = %e, "Failed to read cache slot");
                None
            }
        }
    }
}

/// Format a cache timestamp as a rough age ("just now", "5m ago", ...).
pub fn age_display(cached_at: DateTime<Utc>) -> String {
    let minutes = (Utc::now() - cached_at).num_minutes();
    if minutes < 1 {
        // Covers clock skew as well
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        let hours = minutes / 60;
        if minutes % 60 >= 30 {
            format!("{}h ago", hours + 1)
        } else {
            format!("{}h ago", hours)
        }
    } else {
        let days = minutes / 1440;
        if (minutes % 1440) / 60 >= 12 {
            format!("{}d ago", days + 1)
        } else {
            format!("{}d ago", days)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn temp_cache() -> (tempfile::TempDir, FsCache) {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = FsCache::new(dir.path().join("slots")).expect("cache");
        (dir, cache)
    }

    #[test]
    fn test_write_then_read_round_trips() {
        let (_dir, cache) = temp_cache();
        cache.write("usr_1", r#"[{"worldId":"w1"}]"#).unwrap();
        assert_eq!(cache.read("usr_1").as_deref(), Some(r#"[{"worldId":"w1"}]"#));
    }

    #[test]
    fn test_read_missing_slot_is_none() {
        let (_dir, cache) = temp_cache();
        assert_eq!(cache.read("usr_nobody"), None);
    }

    #[test]
    fn test_write_overwrites_prior_payload() {
        let (_dir, cache) = temp_cache();
        cache.write("usr_1", "[]").unwrap();
        cache.write("usr_1", r#"[{"worldId":"w2"}]"#).unwrap();
        assert_eq!(cache.read("usr_1").as_deref(), Some(r#"[{"worldId":"w2"}]"#));
    }

    #[test]
    fn test_unreadable_slot_reads_as_absent() {
        let (_dir, cache) = temp_cache();
        // A directory where the slot file should be makes the read fail
        std::fs::create_dir_all(cache.slot_path("usr_1")).unwrap();
        assert_eq!(cache.read("usr_1"), None);
    }

    #[test]
    fn test_slots_are_keyed_independently() {
        let (_dir, cache) = temp_cache();
        cache.write("usr_a", "a").unwrap();
        cache.write("usr_b", "b").unwrap();
        assert_eq!(cache.read("usr_a").as_deref(), Some("a"));
        assert_eq!(cache.read("usr_b").as_deref(), Some("b"));
    }

    #[test]
    fn test_cached_at_present_after_write() {
        let (_dir, cache) = temp_cache();
        assert!(cache.cached_at("usr_1").is_none());
        cache.write("usr_1", "[]").unwrap();
        assert!(cache.cached_at("usr_1").is_some());
    }

    #[test]
    fn test_age_display_buckets() {
        let now = Utc::now();
        assert_eq!(age_display(now), "just now");
        assert_eq!(age_display(now - Duration::minutes(5)), "5m ago");
        assert_eq!(age_display(now - Duration::minutes(90)), "2h ago");
        assert_eq!(age_display(now - Duration::minutes(61)), "1h ago");
        assert_eq!(age_display(now - Duration::days(3)), "3d ago");
    }
}
