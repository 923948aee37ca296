//! Seams between the block and the search servers it reads from.
//!
//! An [`IndexResolver`] maps a search index id to a [`SearchConnector`],
//! which runs facet queries and reports the fields an index exposes.
//!
//! - [`crate::solr::SolrRegistry`]: Solr servers over HTTP
//! - [`crate::memory::MemoryResolver`]: in-process indexes built from documents

use crate::error::Result;
use crate::models::RawFacetEntry;
use crate::query::FacetQuery;
use std::collections::HashMap;

/// Facet counts returned for one query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetResultSet {
    /// Documents matching the query's filters.
    pub num_found: u64,
    /// Value/count pairs per facet key, in the order the backend returned them.
    pub facet_fields: HashMap<String, Vec<RawFacetEntry>>,
}

impl FacetResultSet {
    pub fn facet(&self, key: &str) -> Option<&[RawFacetEntry]> {
        self.facet_fields.get(key).map(Vec::as_slice)
    }
}

/// Connection to one search index.
pub trait SearchConnector: std::fmt::Debug + Send + Sync {
    /// Run a facet query. Failures are returned as-is; nothing is retried.
    fn execute(&self, query: &FacetQuery) -> Result<FacetResultSet>;

    /// Names of the fields the index exposes.
    fn fields(&self) -> Result<Vec<String>>;
}

/// Looks up the connector serving a search index.
pub trait IndexResolver: std::fmt::Debug + Send + Sync {
    /// Resolve `index_id`, failing with
    /// [`FacetBrowseError::IndexNotFound`](crate::error::FacetBrowseError::IndexNotFound)
    /// when no server knows it.
    fn connector(&self, index_id: &str) -> Result<&dyn SearchConnector>;

    /// Ids of every index this resolver can serve, sorted.
    fn index_ids(&self) -> Vec<String>;
}
