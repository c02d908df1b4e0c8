use thiserror::Error;

/// Errors building the static collaborators from configuration.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("invalid assertion key: {0}")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),

    #[error("invalid URL in `{field}`: {source}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },
}
