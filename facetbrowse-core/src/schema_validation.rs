use serde_json::{json, Value};

/// JSON Schema for a stored block configuration.
///
/// Only types are checked here; whether the block is complete enough to
/// render is decided by [`crate::validation::validate_block_config`].
pub fn block_config_schema() -> Value {
    let text = json!({"type": ["string", "null"]});
    let flag = json!({"type": ["boolean", "integer", "string", "null"]});

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Facet browse block configuration",
        "type": "object",
        "properties": {
            "search_index": text,
            "solr_field": text,
            "facet_field": text,
            "facets_path": text,
            "collection": text,
            "block_title": text,
            "show_counts": flag,
            "collapsed": flag
        }
    })
}

/// Validate data against JSON Schema
/// Returns Ok(()) if valid, Err with every validation error otherwise
pub fn validate_against_schema(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let compiled = jsonschema::validator_for(schema)
        .map_err(|e| vec![format!("Schema compilation error: {}", e)])?;

    let errors: Vec<String> = compiled
        .iter_errors(data)
        .map(|error| {
            let path_str = error.instance_path.to_string();
            let location = if path_str.is_empty() {
                "root".to_string()
            } else {
                path_str
            };
            format!("{} at {}", error, location)
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a raw block configuration against [`block_config_schema`].
pub fn validate_config_value(data: &Value) -> Result<(), Vec<String>> {
    validate_against_schema(&block_config_schema(), data)
}
