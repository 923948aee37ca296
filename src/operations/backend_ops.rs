use anyhow::{bail, Context, Result};
use facetbrowse_core::{load_fixture, load_servers_config, IndexResolver, MemoryResolver, SolrRegistry};
use tracing::debug;

use crate::BackendArgs;

/// Open the index resolver selected on the command line
pub fn open_resolver(args: &BackendArgs) -> Result<Box<dyn IndexResolver>> {
    match (&args.servers, &args.fixture) {
        (Some(_), Some(_)) => bail!("use either --servers or --fixture, not both"),
        (Some(path), None) => {
            let config = load_servers_config(path)
                .with_context(|| format!("loading servers from '{}'", path.display()))?;
            debug!(servers = config.servers.len(), "loaded solr server registry");
            Ok(Box::new(SolrRegistry::from_config(&config)?))
        }
        (None, Some(path)) => {
            let fixture = load_fixture(path)
                .with_context(|| format!("loading fixture from '{}'", path.display()))?;
            debug!(indexes = fixture.indexes.len(), "loaded in-memory fixture");
            Ok(Box::new(MemoryResolver::from_fixture(fixture)))
        }
        (None, None) => bail!("no search backend configured; pass --servers or --fixture"),
    }
}
