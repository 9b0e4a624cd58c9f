use thiserror::Error;

/// Failures raised while turning wire data back into type-description values.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A necessity token other than `required` / `optional`.
    #[error("malformed necessity value `{0}` (expected `required` or `optional`)")]
    MalformedNecessity(String),

    /// Missing field, wrong shape, or a failure inside a nested `type`.
    /// `source` is the deserializer's own error, untouched.
    #[error("at JSON path {path} → {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DecodeError {
    /// JSON path of a structural failure, if this is one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Json { path, .. } => Some(path.as_str()),
            Self::MalformedNecessity(_) => None,
        }
    }
}

pub type DecodeResult<T> = Result<T, DecodeError>;
