use thiserror::Error;

/// Configuration errors.
///
/// Malformed locale *content* never errors (it degrades with a
/// [`Diagnostic`](crate::Diagnostic)); malformed *configuration* does.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid replacement pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
