#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error(transparent)]
    EnvVar(#[from] EnvVarError),

    #[error("JSON decode error: {0}")]
    JSON(#[from] JSONError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

#[derive(thiserror::Error, Debug)]
#[error("{source} ({var})")]
pub struct EnvVarError {
    var: String,
    #[source]
    source: std::env::VarError,
}

impl EnvVarError {
    pub fn new(var: &str, source: std::env::VarError) -> Self {
        Self {
            var: var.into(),
            source,
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("{source} ({url})")]
pub struct JSONError {
    url: String,
    #[source]
    source: serde_json::Error,
}

impl JSONError {
    pub fn new(url: &str, source: serde_json::Error) -> Self {
        Self {
            url: url.into(),
            source,
        }
    }
}
