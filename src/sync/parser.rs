//! Raw payload to catalog conversion.

use thiserror::Error;

use crate::models::World;

/// A payload that was present but not a well-formed catalog.
///
/// Absent or blank input is NOT a parse error - it normalizes to an
/// empty catalog. Only a payload that exists and fails to match "JSON
/// array of world objects" ends up here.
#[derive(Error, Debug)]
#[error("Malformed catalog payload: {0}")]
pub struct ParseError(#[from] serde_json::Error);

/// Parse a raw catalog payload into an ordered list of worlds.
///
/// Output order matches the input array; duplicate identifiers are kept.
/// Each record defaults its optional fields independently, so a record
/// missing only `tags` still parses.
pub fn parse_catalog(raw: Option<&str>) -> Result<Vec<World>, ParseError> {
    let raw = match raw {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Ok(Vec::new()),
    };

    Ok(serde_json::from_str(raw)?)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_input_is_empty_catalog() {
        assert!(parse_catalog(None).unwrap().is_empty());
    }

    #[test]
    fn test_empty_string_is_empty_catalog() {
        assert!(parse_catalog(Some("")).unwrap().is_empty());
        assert!(parse_catalog(Some("   \n")).unwrap().is_empty());
    }

    #[test]
    fn test_sparse_record_defaults_field_by_field() {
        let worlds = parse_catalog(Some(r#"[{"worldId":"w1","name":"Alpha","visits":5}]"#)).unwrap();
        assert_eq!(worlds.len(), 1);

        let w = &worlds[0];
        assert_eq!(w.id, "w1");
        assert_eq!(w.name, "Alpha");
        assert_eq!(w.visits, 5);
        assert_eq!(w.author, "");
        assert_eq!(w.image_url, "");
        assert_eq!(w.description, "");
        assert!(w.tags.is_empty());
        assert_eq!(w.favorites, 0);
        assert_eq!(w.last_update, "");
    }

    #[test]
    fn test_missing_tags_does_not_drop_record() {
        let worlds = parse_catalog(Some(
            r#"[{"worldId":"w1","name":"Alpha","author":"ann","visits":10,"favorites":2}]"#,
        ))
        .unwrap();
        assert_eq!(worlds.len(), 1);
        assert!(worlds[0].tags.is_empty());
    }

    #[test]
    fn test_order_matches_input() {
        let worlds = parse_catalog(Some(
            r#"[{"worldId":"w3"},{"worldId":"w1"},{"worldId":"w2"}]"#,
        ))
        .unwrap();
        let ids: Vec<&str> = worlds.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["w3", "w1", "w2"]);
    }

    #[test]
    fn test_duplicate_identifiers_are_kept() {
        let worlds = parse_catalog(Some(r#"[{"worldId":"w1"},{"worldId":"w1"}]"#)).unwrap();
        assert_eq!(worlds.len(), 2);
    }

    #[test]
    fn test_full_record_parses() {
        let worlds = parse_catalog(Some(
            r#"[{"worldId":"w9","name":"Harbor","author":"kit","imageUrl":"https://img.example/w9.png","description":"A small harbor town","tags":["town","chill"],"visits":1234,"favorites":56,"lastUpdate":"2026-05-01T12:00:00Z"}]"#,
        ))
        .unwrap();
        let w = &worlds[0];
        assert_eq!(w.image_url, "https://img.example/w9.png");
        assert_eq!(w.tags, vec!["town", "chill"]);
        assert_eq!(w.favorites, 56);
        assert_eq!(w.last_update, "2026-05-01T12:00:00Z");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(parse_catalog(Some("not json")).is_err());
        assert!(parse_catalog(Some(r#"[{"worldId":"w1""#)).is_err());
    }

    #[test]
    fn test_non_array_shape_is_an_error() {
        assert!(parse_catalog(Some(r#"{"worldId":"w1"}"#)).is_err());
        assert!(parse_catalog(Some(r#"[1,2,3]"#)).is_err());
    }

    #[test]
    fn test_record_without_identifier_is_an_error() {
        assert!(parse_catalog(Some(r#"[{"name":"Nameless"}]"#)).is_err());
    }
}
