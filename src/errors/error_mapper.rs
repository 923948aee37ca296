use facetbrowse_core::{ErrorCategory, FacetBrowseError};

/// Map command errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_error(error: &anyhow::Error) -> (String, String, String) {
    let context = format!("{:#}", error);

    let Some(core) = error.chain().find_map(|e| e.downcast_ref::<FacetBrowseError>()) else {
        return ("Error".to_string(), context, String::new());
    };

    match core {
        FacetBrowseError::InvalidConfig(problems) => (
            "Invalid Configuration".to_string(),
            "The configuration has problems.".to_string(),
            problems
                .iter()
                .enumerate()
                .map(|(i, p)| format!("  {}. {}", i + 1, p))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        FacetBrowseError::IndexNotFound { index_id } => (
            "Index Not Found".to_string(),
            format!("No configured server provides index '{}'.", index_id),
            "Run `facetbrowse indexes` to see the indexes that are available.".to_string(),
        ),
        FacetBrowseError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => (
            "File Not Found".to_string(),
            "The file could not be found.".to_string(),
            format!("{}\n\nPlease verify the file exists and you have permission to read it.", context),
        ),
        FacetBrowseError::Io(io) if io.kind() == std::io::ErrorKind::PermissionDenied => (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            context,
        ),
        other => match other.category() {
            ErrorCategory::BackendResolution => (
                "Search Backend Unavailable".to_string(),
                "The search backend could not be reached.".to_string(),
                other.to_string(),
            ),
            ErrorCategory::BackendExecution => (
                "Search Failed".to_string(),
                "The facet query failed.".to_string(),
                other.to_string(),
            ),
            ErrorCategory::Configuration => (
                "Invalid Configuration".to_string(),
                "A configuration file could not be read.".to_string(),
                context,
            ),
            ErrorCategory::Io => ("Error".to_string(), "I/O failure.".to_string(), context),
        },
    }
}
