use crate::models::FacetBlockConfig;
use regex::Regex;
use std::sync::LazyLock;

static FIELD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*$").expect("valid field name pattern"));

static ABSOLUTE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*:)?//").expect("valid URL pattern"));

/// Validate a block configuration the way the block form does before saving.
/// Returns Ok(()) if valid, or Err(Vec<String>) with every problem found
pub fn validate_block_config(config: &FacetBlockConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let required = [
        ("search_index", &config.search_index_id),
        ("solr_field", &config.solr_field),
        ("facets_path", &config.facets_path),
        ("facet_field", &config.facet_field),
    ];
    for (key, value) in required {
        if value.trim().is_empty() {
            errors.push(format!("{} is required", key));
        }
    }

    if !config.solr_field.is_empty() && !FIELD_NAME.is_match(&config.solr_field) {
        errors.push(format!(
            "solr_field '{}' is not a valid field name",
            config.solr_field
        ));
    }

    if ABSOLUTE_URL.is_match(&config.facets_path) {
        errors.push(format!(
            "facets_path '{}' must be a relative path, e.g. /search?f[0]=collection:Photos&f[1]=",
            config.facets_path
        ));
    }

    if let Some(collection) = config.collection() {
        if collection.trim() != collection {
            errors.push("collection has leading or trailing whitespace".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check that the configured field is one the index actually exposes.
pub fn validate_field_available(config: &FacetBlockConfig, fields: &[String]) -> Result<(), String> {
    if fields.iter().any(|f| f == &config.solr_field) {
        Ok(())
    } else {
        Err(format!(
            "solr_field '{}' is not a field of index '{}'",
            config.solr_field, config.search_index_id
        ))
    }
}
