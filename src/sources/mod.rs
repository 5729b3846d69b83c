mod models;

use std::sync::OnceLock;

pub use models::Source; // Re-export the model type to callers.

/// Source table shipped with the binary.
pub const BUNDLED_SOURCES: &str = include_str!("../../resources/sources.json");

/// Single, module-private cache (set exactly once).
static CACHE: OnceLock<Vec<Source>> = OnceLock::new();

// ---- Public API (serde hidden from callers) ----

/// Initialize from the table compiled into the binary.
pub fn init_bundled() -> Result<(), SourcesError> {
    init_from_json_str(BUNDLED_SOURCES)
}

/// Initialize from a JSON string.
pub fn init_from_json_str(json: &str) -> Result<(), SourcesError> {
    let parsed = parse(json)?;
    CACHE
        .set(parsed)
        .map_err(|_| SourcesError::AlreadyInitialized)?;
    Ok(())
}

/// Parse a source table without touching the cache.
pub fn parse(json: &str) -> Result<Vec<Source>, SourcesError> {
    serde_json::from_str(json).map_err(SourcesError::Json)
}

/// Find by name without cloning.
pub fn by_name(name: &str) -> Result<&'static Source, SourcesError> {
    let sources = CACHE.get().ok_or(SourcesError::NotInitialized)?;
    sources
        .iter()
        .find(|s| s.name() == name)
        .ok_or_else(|| SourcesError::UnknownSource(name.to_string()))
}

/// ---- Errors ----
#[derive(thiserror::Error, Debug)]
pub enum SourcesError {
    #[error("sources are not initialized")]
    NotInitialized,
    #[error("sources already initialized")]
    AlreadyInitialized,
    #[error("no source named '{0}' is configured")]
    UnknownSource(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::{BUNDLED_SOURCES, parse};

    #[test]
    fn bundled_table_lists_every_category_in_order() {
        let sources = parse(BUNDLED_SOURCES).expect("bundled sources must parse");
        let names: Vec<&str> = sources.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            ["weapons", "materials", "crafts", "artifacts", "characters"]
        );
    }

    #[test]
    fn only_weapons_carry_an_exclusion() {
        let sources = parse(BUNDLED_SOURCES).unwrap();
        for source in &sources {
            match source.name() {
                "weapons" => assert_eq!(source.exclude(), Some("prizedisshinblade")),
                _ => assert_eq!(source.exclude(), None),
            }
        }
    }

    #[test]
    fn output_names_match_the_published_files() {
        let sources = parse(BUNDLED_SOURCES).unwrap();
        let outputs: Vec<&str> = sources.iter().map(|s| s.output()).collect();
        assert_eq!(
            outputs,
            [
                "weapons.json",
                "materials.json",
                "characterdevelopmentitems.json",
                "artifacts.json",
                "characters.json",
            ]
        );
    }

    #[test]
    fn empty_exclusion_is_ignored() {
        let sources = parse(
            r#"[{"name":"x","url":"https://example.com","output":"x.json","parameters":{"exclude":""}}]"#,
        )
        .unwrap();
        assert_eq!(sources[0].exclude(), None);
    }

    #[test]
    fn malformed_table_is_a_json_error() {
        assert!(matches!(parse("{"), Err(super::SourcesError::Json(_))));
    }
}
