use thiserror::Error;

/// A construction-time configuration error.
///
/// Raised synchronously while building a memoized function or selector; a
/// successfully constructed value never produces one. Errors raised by a
/// wrapped function itself are not represented here: they propagate to the
/// caller unmodified (as panics) and leave the cache untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A cache must hold at least one entry.
    #[error("cache size must be at least 1, but was {0}")]
    CacheSize(usize),
    /// A selector needs at least one input function.
    #[error("selector declared no input functions")]
    NoInputs,
    /// A structured selector needs at least one keyed entry.
    #[error("structured selector mapping is empty")]
    EmptyMapping,
    /// The same key appeared twice in a structured selector mapping.
    #[error("structured selector mapping repeats the key `{0}`")]
    DuplicateKey(String),
}
