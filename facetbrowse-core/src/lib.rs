// Public modules
pub mod backend;
pub mod block;
pub mod error;
pub mod io;
pub mod memory;
pub mod models;
pub mod parsing;
pub mod query;
pub mod rendering;
pub mod schema_validation;
pub mod solr;
pub mod validation;

// Re-export commonly used types for convenience
pub use backend::{FacetResultSet, IndexResolver, SearchConnector};
pub use block::{block_query, build_block, list_index_fields, list_indexes, CACHE_MAX_AGE, THEME};
pub use error::{ErrorCategory, FacetBrowseError, Result};
pub use io::{load_block_config, load_fixture, load_servers_config, save_block_config};
pub use memory::{Document, MemoryFixture, MemoryIndex, MemoryResolver};
pub use models::{
    BlockRender, FacetBlockConfig, FacetBrowsePayload, NormalizedFacetEntry, RawFacetEntry,
    RenderedFacet,
};
pub use parsing::{normalize_entries, normalize_entry, FacetValue};
pub use query::{build_facet_query, FacetField, FacetQuery, FilterQuery, FilterTerm};
pub use rendering::{render_link, render_links};
pub use schema_validation::{block_config_schema, validate_config_value};
pub use solr::{ServersConfig, SolrConnector, SolrRegistry};
pub use validation::{validate_block_config, validate_field_available};
