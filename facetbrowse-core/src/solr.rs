//! Solr connector over HTTP.
//!
//! Servers and the indexes (cores) they host are described by a
//! [`ServersConfig`], usually loaded from a JSON file:
//!
//! ```json
//! {
//!   "servers": [{
//!     "id": "solr_main",
//!     "base_url": "http://localhost:8983/solr",
//!     "request_timeout_ms": 10000,
//!     "indexes": [{ "id": "scores", "core": "scores_core" }]
//!   }]
//! }
//! ```

use crate::backend::{FacetResultSet, IndexResolver, SearchConnector};
use crate::error::{FacetBrowseError, Result};
use crate::models::RawFacetEntry;
use crate::query::FacetQuery;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServersConfig {
    pub servers: Vec<SolrServerConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolrServerConfig {
    pub id: String,
    /// Solr root, e.g. `http://localhost:8983/solr`.
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub indexes: Vec<SolrIndexConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolrIndexConfig {
    pub id: String,
    /// Core (or collection) name; defaults to the index id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core: Option<String>,
}

impl SolrIndexConfig {
    pub fn core(&self) -> &str {
        self.core.as_deref().unwrap_or(&self.id)
    }
}

/// Connection to one Solr core.
pub struct SolrConnector {
    client: Client,
    index_id: String,
    core_url: String,
    credentials: Option<(String, Option<String>)>,
}

impl fmt::Debug for SolrConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolrConnector")
            .field("index_id", &self.index_id)
            .field("core_url", &self.core_url)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

impl SolrConnector {
    pub fn new(client: Client, index_id: impl Into<String>, core_url: impl Into<String>) -> Self {
        Self {
            client,
            index_id: index_id.into(),
            core_url: core_url.into(),
            credentials: None,
        }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.credentials = Some((username.into(), password));
        self
    }

    pub fn core_url(&self) -> &str {
        &self.core_url
    }

    fn get(&self, handler: &str) -> RequestBuilder {
        let builder = self.client.get(format!("{}/{}", self.core_url, handler));
        match &self.credentials {
            Some((user, password)) => builder.basic_auth(user, password.as_ref()),
            None => builder,
        }
    }

    fn send_json(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send()?;
        read_json(response)
    }
}

fn read_json(response: Response) -> Result<Value> {
    let status = response.status();
    let body = response.text()?;
    decode_body(status, body)
}

fn decode_body(status: StatusCode, body: String) -> Result<Value> {
    if !status.is_success() {
        warn!(status = status.as_u16(), "solr request failed");
        return Err(FacetBrowseError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body)
        .map_err(|e| FacetBrowseError::malformed(format!("response is not JSON: {}", e)))
}

impl SearchConnector for SolrConnector {
    fn execute(&self, query: &FacetQuery) -> Result<FacetResultSet> {
        debug!(
            index = %self.index_id,
            field = %query.facet_field.field,
            filters = query.filters.len(),
            "executing facet query"
        );

        let body = self.send_json(self.get("select").query(&query.to_params()))?;
        let results = parse_select_response(&body)?;

        debug!(
            index = %self.index_id,
            num_found = results.num_found,
            "facet query complete"
        );
        Ok(results)
    }

    fn fields(&self) -> Result<Vec<String>> {
        let params = [("numTerms", "0"), ("wt", "json")];
        let body = self.send_json(self.get("admin/luke").query(&params))?;
        parse_luke_fields(&body)
    }
}

/// Decode a `select` response into facet counts.
pub fn parse_select_response(body: &Value) -> Result<FacetResultSet> {
    if let Some(error) = body.get("error") {
        let message = error
            .get("msg")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(FacetBrowseError::malformed(format!("solr error: {}", message)));
    }

    let num_found = body
        .pointer("/response/numFound")
        .and_then(Value::as_u64)
        .ok_or_else(|| FacetBrowseError::malformed("missing response.numFound"))?;

    let mut facet_fields = HashMap::new();
    if let Some(fields) = body.pointer("/facet_counts/facet_fields").and_then(Value::as_object) {
        for (key, list) in fields {
            facet_fields.insert(key.clone(), parse_facet_list(list)?);
        }
    }

    Ok(FacetResultSet {
        num_found,
        facet_fields,
    })
}

/// Decode one facet field list in any of Solr's named-list shapes:
/// flat `[v, c, v, c]`, pairs `[[v, c]]`, or a `{v: c}` map.
///
/// Flat and pair lists keep the backend's order. A map has none to keep and
/// comes back sorted by value.
pub fn parse_facet_list(list: &Value) -> Result<Vec<RawFacetEntry>> {
    match list {
        Value::Array(items) if items.first().is_some_and(Value::is_array) => items
            .iter()
            .map(|pair| match pair.as_array().map(Vec::as_slice) {
                Some([value, count]) => facet_entry(value, count),
                _ => Err(FacetBrowseError::malformed("facet pair must have two elements")),
            })
            .collect(),
        Value::Array(items) => {
            if items.len() % 2 != 0 {
                return Err(FacetBrowseError::malformed(
                    "flat facet list has an odd number of elements",
                ));
            }
            items
                .chunks(2)
                .map(|pair| facet_entry(&pair[0], &pair[1]))
                .collect()
        }
        Value::Object(map) => map
            .iter()
            .map(|(value, count)| facet_entry(&Value::String(value.clone()), count))
            .collect(),
        Value::Null => Ok(Vec::new()),
        other => Err(FacetBrowseError::malformed(format!(
            "unexpected facet list: {}",
            other
        ))),
    }
}

fn facet_entry(value: &Value, count: &Value) -> Result<RawFacetEntry> {
    let value = match value {
        Value::String(s) => s.clone(),
        Value::Number(_) | Value::Bool(_) => value.to_string(),
        other => {
            return Err(FacetBrowseError::malformed(format!(
                "unexpected facet value: {}",
                other
            )))
        }
    };
    let count = count
        .as_u64()
        .ok_or_else(|| FacetBrowseError::malformed(format!("bad count for facet value '{}'", value)))?;
    Ok(RawFacetEntry { value, count })
}

/// Field names from a Luke (`admin/luke`) response.
pub fn parse_luke_fields(body: &Value) -> Result<Vec<String>> {
    let fields = body
        .get("fields")
        .and_then(Value::as_object)
        .ok_or_else(|| FacetBrowseError::malformed("missing fields in luke response"))?;
    Ok(fields.keys().cloned().collect())
}

/// Every Solr index reachable through the configured servers.
#[derive(Debug, Default)]
pub struct SolrRegistry {
    connectors: HashMap<String, SolrConnector>,
}

impl SolrRegistry {
    pub fn from_config(config: &ServersConfig) -> Result<Self> {
        let mut connectors = HashMap::new();
        let mut duplicates = Vec::new();

        for server in &config.servers {
            let client = build_client(server)?;
            let base_url = server.base_url.trim_end_matches('/');

            for index in &server.indexes {
                let core_url = format!("{}/{}", base_url, index.core());
                let mut connector = SolrConnector::new(client.clone(), &index.id, core_url);
                if let Some(user) = &server.username {
                    connector = connector.with_credentials(user, server.password.clone());
                }
                if connectors.insert(index.id.clone(), connector).is_some() {
                    duplicates.push(format!(
                        "index '{}' is configured more than once (server '{}')",
                        index.id, server.id
                    ));
                }
            }
        }

        if !duplicates.is_empty() {
            return Err(FacetBrowseError::InvalidConfig(duplicates));
        }

        Ok(Self { connectors })
    }
}

fn build_client(server: &SolrServerConfig) -> Result<Client> {
    let connect_timeout =
        Duration::from_millis(server.connect_timeout_ms.unwrap_or(DEFAULT_CONNECT_TIMEOUT_MS));
    let request_timeout =
        Duration::from_millis(server.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS));

    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .build()
        .map_err(|e| FacetBrowseError::BackendUnavailable {
            index_id: server.id.clone(),
            message: format!("failed to create HTTP client: {}", e),
        })
}

impl IndexResolver for SolrRegistry {
    fn connector(&self, index_id: &str) -> Result<&dyn SearchConnector> {
        self.connectors
            .get(index_id)
            .map(|c| c as &dyn SearchConnector)
            .ok_or_else(|| FacetBrowseError::IndexNotFound {
                index_id: index_id.to_string(),
            })
    }

    fn index_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.connectors.keys().cloned().collect();
        ids.sort();
        ids
    }
}
