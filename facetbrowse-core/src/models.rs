use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Configuration of one facet browse block, as persisted by the block store.
///
/// Keys follow the stored schema (`search_index`, `solr_field`, ...). Keys we
/// do not know about, such as the admin form's `random_key`, are kept in
/// `extra` so a load/save round trip does not drop them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetBlockConfig {
    #[serde(rename = "search_index", default, deserialize_with = "string_or_null")]
    pub search_index_id: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub solr_field: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub facet_field: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub facets_path: String,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub block_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub show_counts: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub collapsed: bool,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl FacetBlockConfig {
    /// Collection scope, if one is set. An empty string counts as unset.
    pub fn collection(&self) -> Option<&str> {
        non_empty(self.collection.as_deref())
    }

    /// Block heading, if one is set. An empty string counts as unset.
    pub fn block_title(&self) -> Option<&str> {
        non_empty(self.block_title.as_deref())
    }

    /// Whether both the index and the field to facet on are known.
    pub fn is_complete(&self) -> bool {
        !self.search_index_id.is_empty() && !self.solr_field.is_empty()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Stored configs carry `null` for fields that were never filled in.
fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Checkbox values arrive as booleans, 0/1 or "0"/"1" depending on who saved them.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !matches!(s.trim(), "" | "0" | "false"),
        Value::Null => false,
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    })
}

/// One value/count pair as returned by the search backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFacetEntry {
    pub value: String,
    pub count: u64,
}

impl RawFacetEntry {
    pub fn new(value: impl Into<String>, count: u64) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

/// A facet value ready to be turned into a browse link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedFacetEntry {
    pub display_label: String,
    pub url_value: String,
    pub count: u64,
}

/// A rendered browse link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedFacet {
    /// Full anchor markup; the list is ordered by this string.
    pub markup: String,
    pub href: String,
    pub title: String,
    /// Visible link text, including the count suffix when counts are shown.
    pub text: String,
    pub count: u64,
}

/// Themed payload handed to the templating layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetBrowsePayload {
    pub theme: String,
    pub facets_path: String,
    pub facets: Vec<RenderedFacet>,
    pub block_title: Option<String>,
    pub search_index_id: String,
    pub facet_field_name: String,
    pub collapsed: bool,
    pub cache_max_age: u32,
}

/// Outcome of rendering a block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BlockRender {
    /// Configuration was incomplete; nothing is shown.
    Empty,
    Facets(FacetBrowsePayload),
}

impl BlockRender {
    pub fn facets(&self) -> &[RenderedFacet] {
        match self {
            BlockRender::Empty => &[],
            BlockRender::Facets(payload) => &payload.facets,
        }
    }

    pub fn payload(&self) -> Option<&FacetBrowsePayload> {
        match self {
            BlockRender::Empty => None,
            BlockRender::Facets(payload) => Some(payload),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, BlockRender::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_uses_stored_keys() {
        let config: FacetBlockConfig = serde_json::from_value(json!({
            "search_index": "scores",
            "solr_field": "ensemble_size",
            "facet_field": "ensemble_size",
            "facets_path": "/scores/search?f[0]=ensemble_size:",
            "collection": "Diamondback Photos",
            "block_title": "Browse by ensemble",
            "show_counts": 1,
            "collapsed": "0",
            "random_key": "edit-solr-field-42"
        }))
        .unwrap();

        assert_eq!(config.search_index_id, "scores");
        assert_eq!(config.collection(), Some("Diamondback Photos"));
        assert!(config.show_counts);
        assert!(!config.collapsed);
        assert_eq!(config.extra.get("random_key"), Some(&json!("edit-solr-field-42")));
        assert!(config.is_complete());
    }

    #[test]
    fn test_config_tolerates_nulls_and_missing_keys() {
        let config: FacetBlockConfig = serde_json::from_value(json!({
            "search_index": null,
            "collection": "",
            "block_title": null
        }))
        .unwrap();

        assert_eq!(config.search_index_id, "");
        assert_eq!(config.collection(), None);
        assert_eq!(config.block_title(), None);
        assert!(!config.show_counts);
        assert!(!config.is_complete());
    }

    #[test]
    fn test_config_round_trip_keeps_unknown_keys() {
        let original = json!({
            "search_index": "scores",
            "solr_field": "genre",
            "facet_field": "genre",
            "facets_path": "/search?f[0]=genre:",
            "show_counts": true,
            "collapsed": false,
            "random_key": "edit-solr-field-7"
        });
        let config: FacetBlockConfig = serde_json::from_value(original).unwrap();
        let saved = serde_json::to_value(&config).unwrap();

        assert_eq!(saved["search_index"], json!("scores"));
        assert_eq!(saved["random_key"], json!("edit-solr-field-7"));
        assert_eq!(saved["show_counts"], json!(true));
    }

    #[test]
    fn test_payload_serializes_contract_keys() {
        let payload = FacetBrowsePayload {
            theme: "facets_browse".to_string(),
            facets_path: "/s?f=".to_string(),
            facets: vec![],
            block_title: None,
            search_index_id: "scores".to_string(),
            facet_field_name: "genre".to_string(),
            collapsed: true,
            cache_max_age: 9999,
        };
        let value = serde_json::to_value(&payload).unwrap();

        for key in [
            "facetsPath",
            "facets",
            "blockTitle",
            "searchIndexId",
            "facetFieldName",
            "collapsed",
            "cacheMaxAge",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(value["cacheMaxAge"], json!(9999));
    }

    #[test]
    fn test_empty_render_has_no_facets() {
        assert!(BlockRender::Empty.facets().is_empty());
        assert!(BlockRender::Empty.payload().is_none());
    }
}
