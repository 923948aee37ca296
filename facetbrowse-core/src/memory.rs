//! In-process search indexes built from JSON documents.
//!
//! Facet counting follows Solr's defaults for a field facet: filters are
//! ANDed, values below the minimum count are dropped, the rest are ordered
//! by count (descending) then value, and the list is cut at the limit.

use crate::backend::{FacetResultSet, IndexResolver, SearchConnector};
use crate::error::{FacetBrowseError, Result};
use crate::models::RawFacetEntry;
use crate::query::{FacetQuery, FilterQuery};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

/// Contents of a fixture file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryFixture {
    pub indexes: Vec<MemoryIndexConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryIndexConfig {
    pub id: String,
    /// Declared field names. When empty, every key seen in a document is a field.
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// A stored document: field name to a scalar or an array of scalars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: Value) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    /// All values of a field as strings. Multi-valued fields yield one entry
    /// per element; missing or null fields yield nothing.
    pub fn field_values(&self, field: &str) -> Vec<String> {
        match self.fields.get(field) {
            Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
            Some(value) => scalar_to_string(value).into_iter().collect(),
            None => Vec::new(),
        }
    }

    fn matches(&self, filter: &FilterQuery) -> bool {
        self.field_values(&filter.field)
            .iter()
            .any(|value| filter.term.matches(value))
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Debug)]
pub struct MemoryIndex {
    id: String,
    fields: Vec<String>,
    documents: Vec<Document>,
    executed: Mutex<Vec<FacetQuery>>,
}

impl MemoryIndex {
    pub fn new(id: impl Into<String>, documents: Vec<Document>) -> Self {
        Self::from_config(MemoryIndexConfig {
            id: id.into(),
            fields: Vec::new(),
            documents,
        })
    }

    pub fn from_config(config: MemoryIndexConfig) -> Self {
        let fields = if config.fields.is_empty() {
            let seen: BTreeSet<&String> = config
                .documents
                .iter()
                .flat_map(|doc| doc.fields.keys())
                .collect();
            seen.into_iter().cloned().collect()
        } else {
            config.fields
        };

        Self {
            id: config.id,
            fields,
            documents: config.documents,
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Queries run against this index so far.
    pub fn executed_queries(&self) -> Vec<FacetQuery> {
        self.executed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn count_facets(&self, query: &FacetQuery) -> FacetResultSet {
        let matching: Vec<&Document> = self
            .documents
            .iter()
            .filter(|doc| query.filters.iter().all(|filter| doc.matches(filter)))
            .collect();

        let mut counts: HashMap<String, u64> = HashMap::new();
        for doc in &matching {
            for value in doc.field_values(&query.facet_field.field) {
                *counts.entry(value).or_default() += 1;
            }
        }

        let mut entries: Vec<RawFacetEntry> = counts
            .into_iter()
            .filter(|(_, count)| *count >= u64::from(query.min_count))
            .map(|(value, count)| RawFacetEntry { value, count })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
        entries.truncate(query.facet_field.limit as usize);

        let mut facet_fields = HashMap::new();
        facet_fields.insert(query.facet_field.key.clone(), entries);

        FacetResultSet {
            num_found: matching.len() as u64,
            facet_fields,
        }
    }
}

impl SearchConnector for MemoryIndex {
    fn execute(&self, query: &FacetQuery) -> Result<FacetResultSet> {
        self.executed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(query.clone());
        Ok(self.count_facets(query))
    }

    fn fields(&self) -> Result<Vec<String>> {
        Ok(self.fields.clone())
    }
}

#[derive(Debug, Default)]
pub struct MemoryResolver {
    indexes: HashMap<String, MemoryIndex>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fixture(fixture: MemoryFixture) -> Self {
        fixture
            .indexes
            .into_iter()
            .map(MemoryIndex::from_config)
            .fold(Self::new(), Self::with_index)
    }

    pub fn with_index(mut self, index: MemoryIndex) -> Self {
        self.indexes.insert(index.id.clone(), index);
        self
    }

    pub fn index(&self, index_id: &str) -> Option<&MemoryIndex> {
        self.indexes.get(index_id)
    }

    /// Total queries run across every index.
    pub fn execution_count(&self) -> usize {
        self.indexes
            .values()
            .map(|index| index.executed_queries().len())
            .sum()
    }
}

impl IndexResolver for MemoryResolver {
    fn connector(&self, index_id: &str) -> Result<&dyn SearchConnector> {
        self.indexes
            .get(index_id)
            .map(|index| index as &dyn SearchConnector)
            .ok_or_else(|| FacetBrowseError::IndexNotFound {
                index_id: index_id.to_string(),
            })
    }

    fn index_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.indexes.keys().cloned().collect();
        ids.sort();
        ids
    }
}
