use crate::error::{FacetBrowseError, Result};
use crate::memory::MemoryFixture;
use crate::models::FacetBlockConfig;
use crate::schema_validation::validate_config_value;
use crate::solr::ServersConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

fn read_json<P: AsRef<Path>>(path: P) -> Result<Value> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    Ok(serde_json::from_value(read_json(path)?)?)
}

/// Load a block configuration, checking it against the configuration schema first.
pub fn load_block_config<P: AsRef<Path>>(path: P) -> Result<FacetBlockConfig> {
    let value = read_json(path)?;
    validate_config_value(&value).map_err(FacetBrowseError::InvalidConfig)?;
    Ok(serde_json::from_value(value)?)
}

/// Save a block configuration with pretty printing.
pub fn save_block_config<P: AsRef<Path>>(config: &FacetBlockConfig, path: P) -> Result<()> {
    save_json(config, path)
}

pub fn load_servers_config<P: AsRef<Path>>(path: P) -> Result<ServersConfig> {
    load_json(path)
}

pub fn load_fixture<P: AsRef<Path>>(path: P) -> Result<MemoryFixture> {
    load_json(path)
}

fn save_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_block_config_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("block.json");

        let mut config = FacetBlockConfig {
            search_index_id: "scores".to_string(),
            solr_field: "genre".to_string(),
            facet_field: "genre".to_string(),
            facets_path: "/search?f[0]=genre:".to_string(),
            show_counts: true,
            ..Default::default()
        };
        config.extra.insert("random_key".to_string(), json!("edit-solr-field-12"));

        save_block_config(&config, &path).unwrap();
        let loaded = load_block_config(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_schema_violation_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("block.json");
        fs::write(&path, r#"{"search_index": 7, "show_counts": true}"#).unwrap();

        let err = load_block_config(&path).unwrap_err();
        assert!(matches!(err, FacetBrowseError::InvalidConfig(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_servers_config(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, FacetBrowseError::Io(_)));
    }

    #[test]
    fn test_load_fixture() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fixture.json");
        fs::write(
            &path,
            r#"{"indexes": [{"id": "scores", "documents": [{"genre": "Opera"}]}]}"#,
        )
        .unwrap();

        let fixture = load_fixture(&path).unwrap();
        assert_eq!(fixture.indexes[0].id, "scores");
        assert_eq!(fixture.indexes[0].documents.len(), 1);
    }
}
