use thiserror::Error;

/// The single failure kind a refresh can surface: whatever error the
/// repository raised (network, authorization, decoding), unclassified.
#[derive(Debug, Error)]
#[error("failed to fetch favorites: {source}")]
pub struct FetchError {
    #[source]
    pub source: anyhow::Error,
}

impl FetchError {
    pub fn new(source: anyhow::Error) -> Self {
        Self { source }
    }
}
