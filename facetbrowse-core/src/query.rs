use serde::Serialize;

/// Maximum number of distinct facet values requested.
pub const FACET_LIMIT: u32 = 300;
/// Values matching fewer documents than this are not returned.
pub const FACET_MIN_COUNT: u32 = 1;

/// Field holding a document's collection (presentation set) name.
pub const COLLECTION_FIELD: &str = "presentation_set_label";
/// Flag marking documents visible in public browse surfaces.
pub const DISCOVERABLE_FIELD: &str = "is_discoverable";

pub const COLLECTION_TAG: &str = "collection";
pub const DISCOVERABLE_TAG: &str = "discoverable";

/// A facet-only search request for one field of one index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetQuery {
    pub index_id: String,
    pub facet_field: FacetField,
    pub filters: Vec<FilterQuery>,
    pub min_count: u32,
    /// Document rows to return. Only counts matter here.
    pub rows: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetField {
    /// Key the backend reports the counts under.
    pub key: String,
    pub field: String,
    pub limit: u32,
}

/// A filter-only clause: narrows the documents facets are counted over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterQuery {
    pub key: String,
    pub field: String,
    pub term: FilterTerm,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FilterTerm {
    /// Exact match on the whole field value.
    Phrase(String),
    Bool(bool),
}

impl FilterTerm {
    /// Whether a stored field value satisfies this term.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            FilterTerm::Phrase(expected) => value == expected,
            FilterTerm::Bool(expected) => match value {
                "true" => *expected,
                "false" => !*expected,
                _ => false,
            },
        }
    }
}

impl FilterQuery {
    /// Lucene clause for this filter, e.g. `presentation_set_label:"Scores"`.
    pub fn clause(&self) -> String {
        match &self.term {
            FilterTerm::Phrase(value) => format!("{}:\"{}\"", self.field, escape_phrase(value)),
            FilterTerm::Bool(value) => format!("{}:{}", self.field, value),
        }
    }

    /// The clause with its tags attached as local params.
    pub fn tagged_clause(&self) -> String {
        if self.tags.is_empty() {
            self.clause()
        } else {
            format!("{{!tag={}}}{}", self.tags.join(","), self.clause())
        }
    }
}

/// Backslash-escape the characters that would end or break a quoted phrase.
fn escape_phrase(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build the facet request for `solr_field`, scoped to `collection` when given.
///
/// A collection scope adds two filters: an exact match on the collection
/// field and a requirement that documents be discoverable.
pub fn build_facet_query(index_id: &str, solr_field: &str, collection: Option<&str>) -> FacetQuery {
    let mut filters = Vec::new();

    if let Some(collection) = collection {
        filters.push(FilterQuery {
            key: COLLECTION_FIELD.to_string(),
            field: COLLECTION_FIELD.to_string(),
            term: FilterTerm::Phrase(collection.to_string()),
            tags: vec![COLLECTION_TAG.to_string()],
        });
        filters.push(FilterQuery {
            key: DISCOVERABLE_FIELD.to_string(),
            field: DISCOVERABLE_FIELD.to_string(),
            term: FilterTerm::Bool(true),
            tags: vec![DISCOVERABLE_TAG.to_string()],
        });
    }

    FacetQuery {
        index_id: index_id.to_string(),
        facet_field: FacetField {
            key: solr_field.to_string(),
            field: solr_field.to_string(),
            limit: FACET_LIMIT,
        },
        filters,
        min_count: FACET_MIN_COUNT,
        rows: 0,
    }
}

impl FacetQuery {
    pub fn filter(&self, key: &str) -> Option<&FilterQuery> {
        self.filters.iter().find(|f| f.key == key)
    }

    /// Solr `select` request parameters, in a stable order.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let field = &self.facet_field;
        let mut params = vec![
            ("q".to_string(), "*:*".to_string()),
            ("rows".to_string(), self.rows.to_string()),
            ("wt".to_string(), "json".to_string()),
            ("facet".to_string(), "true".to_string()),
            (
                "facet.field".to_string(),
                format!("{{!key={}}}{}", field.key, field.field),
            ),
            (format!("f.{}.facet.limit", field.field), field.limit.to_string()),
            ("facet.mincount".to_string(), self.min_count.to_string()),
        ];

        for filter in &self.filters {
            params.push(("fq".to_string(), filter.tagged_clause()));
        }

        params
    }
}
