use serde::{Deserialize, Serialize};

use crate::utils::format_date;

/// One entry of the remote world catalog.
///
/// The remote source guarantees nothing beyond `worldId`; every other
/// field defaults independently when absent, so a sparse record still
/// deserializes into a usable `World`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    #[serde(rename = "worldId")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub visits: u64,
    #[serde(default)]
    pub favorites: u64,
    /// Opaque timestamp string from the remote source, never parsed.
    #[serde(rename = "lastUpdate", default)]
    pub last_update: String,
}

impl World {
    /// Display name for lists, falling back to the id for unnamed worlds.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    pub fn tags_display(&self) -> String {
        self.tags.join(", ")
    }

    pub fn updated_display(&self) -> String {
        if self.last_update.is_empty() {
            "-".to_string()
        } else {
            format_date(&self.last_update)
        }
    }
}

/// Sortable columns for the world table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldSortColumn {
    Name,
    Visits,
    Favorites,
    Updated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_id() {
        let world = World {
            id: "wrld_123".to_string(),
            name: String::new(),
            author: String::new(),
            image_url: String::new(),
            description: String::new(),
            tags: vec![],
            visits: 0,
            favorites: 0,
            last_update: String::new(),
        };
        assert_eq!(world.display_name(), "wrld_123");
    }

    #[test]
    fn test_sparse_record_deserializes_with_defaults() {
        let world: World = serde_json::from_str(r#"{"worldId":"w1"}"#)
            .expect("sparse record should deserialize");
        assert_eq!(world.id, "w1");
        assert_eq!(world.name, "");
        assert_eq!(world.author, "");
        assert_eq!(world.image_url, "");
        assert_eq!(world.description, "");
        assert!(world.tags.is_empty());
        assert_eq!(world.visits, 0);
        assert_eq!(world.favorites, 0);
        assert_eq!(world.last_update, "");
    }

    #[test]
    fn test_tags_display() {
        let world = World {
            id: "w1".to_string(),
            name: "Alpha".to_string(),
            author: String::new(),
            image_url: String::new(),
            description: String::new(),
            tags: vec!["game".to_string(), "quest".to_string()],
            visits: 0,
            favorites: 0,
            last_update: String::new(),
        };
        assert_eq!(world.tags_display(), "game, quest");
    }
}
