use thiserror::Error;

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("rule has no 'match' block")]
    MissingMatchBlock,

    #[error("missing required field '{0}'")]
    MissingRequiredField(&'static str),

    #[error("no entity matched '{0}'")]
    NoMatch(String),

    #[error("{count} entities matched '{name}', expected exactly one")]
    AmbiguousMatch { name: String, count: usize },

    #[error("unable to resolve '{0}' in the registry")]
    ComponentResolution(String),

    #[error("unknown biome '{0}'")]
    UnknownBiome(String),

    #[error("invalid value for '{key}': expected {expected}")]
    InvalidValue { key: String, expected: &'static str },

    #[error("malformed rule document: {0}")]
    MalformedDocument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RewriteError>;
