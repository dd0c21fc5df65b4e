/// Failure of a repository search or of building a repository
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(
        "country {0:?} is not known, use NestoriaRepo::with_endpoint if you know the API host"
    )]
    UnknownCountry(String),

    #[error("invalid endpoint {0}")]
    InvalidEndpoint(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned unexpected status: {0}")]
    Status(String),

    #[error("failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RepoError>;
