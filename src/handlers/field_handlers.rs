use anyhow::Result;
use colored::Colorize;
use facetbrowse_core::{list_index_fields, list_indexes};

use crate::operations::open_resolver;
use crate::BackendArgs;

/// Print every index a block can use
pub fn print_indexes(backend: &BackendArgs) -> Result<()> {
    let resolver = open_resolver(backend)?;
    let ids = list_indexes(resolver.as_ref());

    if ids.is_empty() {
        println!("{}", "No search indexes configured.".yellow());
    }
    for id in ids {
        println!("{}", id);
    }
    Ok(())
}

/// Print the fields of one index, for picking a Solr field
pub fn print_fields(backend: &BackendArgs, index: &str) -> Result<()> {
    let resolver = open_resolver(backend)?;
    let fields = list_index_fields(resolver.as_ref(), index)?;

    println!("{} {}\n", "Fields of".bold(), index.bold());
    for field in fields {
        println!("- {}", field);
    }
    Ok(())
}
