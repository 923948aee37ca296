use crate::backend::IndexResolver;
use crate::error::Result;
use crate::models::{BlockRender, FacetBlockConfig, FacetBrowsePayload};
use crate::parsing::normalize_entries;
use crate::query::{build_facet_query, FacetQuery};
use crate::rendering::render_links;
use tracing::{debug, info};

/// Theme hook the payload is rendered with.
pub const THEME: &str = "facets_browse";
/// Facet lists change slowly; rendered blocks are cached for a long time.
pub const CACHE_MAX_AGE: u32 = 9999;

/// Build the query a block would run, or `None` if the block is incomplete.
pub fn block_query(config: &FacetBlockConfig) -> Option<FacetQuery> {
    config.is_complete().then(|| {
        build_facet_query(
            &config.search_index_id,
            &config.solr_field,
            config.collection(),
        )
    })
}

/// Render a facet browse block.
///
/// An incomplete configuration logs its contents and renders nothing.
/// Failures resolving the index or running the query are returned to the
/// caller untouched.
pub fn build_block(config: &FacetBlockConfig, resolver: &dyn IndexResolver) -> Result<BlockRender> {
    let Some(query) = block_query(config) else {
        info!(
            target: "facets_browse",
            search_index = %config.search_index_id,
            solr_field = %config.solr_field,
            facet_field = %config.facet_field,
            facets_path = %config.facets_path,
            collection = ?config.collection,
            block_title = ?config.block_title,
            show_counts = config.show_counts,
            collapsed = config.collapsed,
            "facet browse block is not fully configured"
        );
        return Ok(BlockRender::Empty);
    };

    let connector = resolver.connector(&config.search_index_id)?;
    let results = connector.execute(&query)?;

    let raw = if results.num_found > 0 {
        results.facet(&query.facet_field.key)
    } else {
        None
    };
    let entries = normalize_entries(raw);
    let facets = render_links(&entries, &config.facets_path, config.show_counts);

    debug!(
        search_index = %config.search_index_id,
        solr_field = %config.solr_field,
        facets = facets.len(),
        "rendered facet browse block"
    );

    Ok(BlockRender::Facets(FacetBrowsePayload {
        theme: THEME.to_string(),
        facets_path: config.facets_path.clone(),
        facets,
        block_title: config.block_title().map(str::to_string),
        search_index_id: config.search_index_id.clone(),
        facet_field_name: config.facet_field.clone(),
        collapsed: config.collapsed,
        cache_max_age: CACHE_MAX_AGE,
    }))
}

/// Ids of the indexes a block can be pointed at.
pub fn list_indexes(resolver: &dyn IndexResolver) -> Vec<String> {
    resolver.index_ids()
}

/// Fields available for faceting in one index.
pub fn list_index_fields(resolver: &dyn IndexResolver, index_id: &str) -> Result<Vec<String>> {
    resolver.connector(index_id)?.fields()
}
