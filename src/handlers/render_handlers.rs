use anyhow::{Context, Result};
use facetbrowse_core::{block_query, build_block, load_block_config};
use std::path::Path;

use crate::operations::open_resolver;
use crate::ui::{format_html, format_json, format_params, format_text};
use crate::{BackendArgs, OutputFormat};

/// Render the block described by a configuration file
pub fn render_block(
    backend: &BackendArgs,
    config_path: &Path,
    format: OutputFormat,
    dry_run: bool,
) -> Result<()> {
    let config = load_block_config(config_path)
        .with_context(|| format!("loading block configuration '{}'", config_path.display()))?;

    if dry_run {
        match block_query(&config) {
            Some(query) => println!("{}", format_params(&query)),
            None => println!("Block is not fully configured; no query would be sent."),
        }
        return Ok(());
    }

    let resolver = open_resolver(backend)?;
    let render = build_block(&config, resolver.as_ref())?;

    let output = match format {
        OutputFormat::Text => format_text(&render),
        OutputFormat::Html => format_html(&render),
        OutputFormat::Json => format_json(&render)?,
    };
    println!("{}", output);

    Ok(())
}
