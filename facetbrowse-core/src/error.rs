use thiserror::Error;

/// Errors raised while resolving, querying or configuring a facet browse block.
///
/// An incomplete block configuration is not an error: the block renders
/// empty instead. Everything that reaches this type is meant to propagate
/// to the caller.
#[derive(Debug, Error)]
pub enum FacetBrowseError {
    /// No configured server serves the requested index.
    #[error("search index not found: {index_id}")]
    IndexNotFound { index_id: String },

    /// The server for an index could not be set up.
    #[error("search backend unavailable for index '{index_id}': {message}")]
    BackendUnavailable { index_id: String, message: String },

    /// Transport-level failure talking to the search server.
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The search server answered with a non-success status.
    #[error("search server returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The search server answered with something we cannot decode.
    #[error("malformed search response: {message}")]
    MalformedResponse { message: String },

    /// A configuration or fixture file failed validation.
    #[error("invalid configuration:\n{}", .0.join("\n"))]
    InvalidConfig(Vec<String>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification used by callers deciding how to surface a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    BackendResolution,
    BackendExecution,
    Io,
}

impl FacetBrowseError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FacetBrowseError::IndexNotFound { .. }
            | FacetBrowseError::BackendUnavailable { .. } => ErrorCategory::BackendResolution,
            FacetBrowseError::Request(_)
            | FacetBrowseError::HttpStatus { .. }
            | FacetBrowseError::MalformedResponse { .. } => ErrorCategory::BackendExecution,
            FacetBrowseError::InvalidConfig(_) | FacetBrowseError::Json(_) => {
                ErrorCategory::Configuration
            }
            FacetBrowseError::Io(_) => ErrorCategory::Io,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        FacetBrowseError::MalformedResponse {
            message: message.into(),
        }
    }
}

/// Result type alias for facet browse operations.
pub type Result<T> = std::result::Result<T, FacetBrowseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err = FacetBrowseError::IndexNotFound {
            index_id: "scores".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::BackendResolution);

        let err = FacetBrowseError::HttpStatus {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::BackendExecution);

        let err = FacetBrowseError::InvalidConfig(vec!["a".to_string()]);
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_invalid_config_lists_every_problem() {
        let err = FacetBrowseError::InvalidConfig(vec![
            "search_index is required".to_string(),
            "solr_field is required".to_string(),
        ]);
        let message = err.to_string();
        assert!(message.contains("search_index is required"));
        assert!(message.contains("solr_field is required"));
    }
}
