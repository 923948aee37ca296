use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use facetbrowse_core::{
    list_index_fields, load_block_config, save_block_config, validate_block_config,
    validate_field_available, FacetBlockConfig, FacetBrowseError,
};
use std::path::{Path, PathBuf};

use crate::operations::open_resolver;
use crate::BackendArgs;

#[derive(Args, Debug, Default)]
pub struct ConfigureArgs {
    /// Block configuration file to create or update
    #[arg(value_name = "FILE")]
    pub config: PathBuf,

    /// Search index id
    #[arg(long)]
    pub search_index: Option<String>,

    /// Solr field to facet on
    #[arg(long)]
    pub solr_field: Option<String>,

    /// Facet name used in browse URLs
    #[arg(long)]
    pub facet_field: Option<String>,

    /// Relative browse path the facet value is appended to
    #[arg(long)]
    pub facets_path: Option<String>,

    /// Presentation set to narrow facets to (empty to clear)
    #[arg(long)]
    pub collection: Option<String>,

    /// Block heading (empty to clear)
    #[arg(long)]
    pub block_title: Option<String>,

    /// Show counts next to facet values
    #[arg(long, value_name = "BOOL")]
    pub show_counts: Option<bool>,

    /// Render the block collapsed by default
    #[arg(long, value_name = "BOOL")]
    pub collapsed: Option<bool>,
}

/// Apply the given flags on top of an existing configuration
pub fn apply_args(config: &mut FacetBlockConfig, args: &ConfigureArgs) {
    if let Some(v) = &args.search_index {
        config.search_index_id = v.trim().to_string();
    }
    if let Some(v) = &args.solr_field {
        config.solr_field = v.trim().to_string();
    }
    if let Some(v) = &args.facet_field {
        config.facet_field = v.trim().to_string();
    }
    if let Some(v) = &args.facets_path {
        config.facets_path = v.clone();
    }
    if let Some(v) = &args.collection {
        config.collection = Some(v.trim().to_string()).filter(|s| !s.is_empty());
    }
    if let Some(v) = &args.block_title {
        config.block_title = Some(v.clone()).filter(|s| !s.is_empty());
    }
    if let Some(v) = args.show_counts {
        config.show_counts = v;
    }
    if let Some(v) = args.collapsed {
        config.collapsed = v;
    }
}

/// Create or update a configuration file from command line flags
/// Keys not given on the command line keep their stored values
pub fn configure(args: &ConfigureArgs) -> Result<()> {
    let mut config = if args.config.exists() {
        load_block_config(&args.config)
            .with_context(|| format!("loading block configuration '{}'", args.config.display()))?
    } else {
        FacetBlockConfig::default()
    };

    apply_args(&mut config, args);
    validate_block_config(&config).map_err(FacetBrowseError::InvalidConfig)?;

    save_block_config(&config, &args.config)
        .with_context(|| format!("saving block configuration '{}'", args.config.display()))?;

    println!(
        "{} {}",
        "Saved".green().bold(),
        args.config.display()
    );
    Ok(())
}

/// Validate a configuration file, optionally against the index's field list
pub fn validate_config(backend: &BackendArgs, path: &Path, check_field: bool) -> Result<()> {
    let config = load_block_config(path)
        .with_context(|| format!("loading block configuration '{}'", path.display()))?;

    validate_block_config(&config).map_err(FacetBrowseError::InvalidConfig)?;

    if check_field {
        let resolver = open_resolver(backend)?;
        let fields = list_index_fields(resolver.as_ref(), &config.search_index_id)?;
        validate_field_available(&config, &fields)
            .map_err(|e| FacetBrowseError::InvalidConfig(vec![e]))?;
    }

    println!("{} {}", "Valid".green().bold(), path.display());
    Ok(())
}
