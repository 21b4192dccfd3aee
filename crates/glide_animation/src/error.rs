//! Error types for glide_animation

use thiserror::Error;

/// Errors surfaced to callers configuring an animator
///
/// Only caller-supplied configuration can fail. Broken internal ordering
/// (a frame for a timer with no registered bundle) panics instead.
#[derive(Error, Debug)]
pub enum AnimatorError {
    /// Duration below zero
    #[error("Animators cannot have negative duration: {0}")]
    NegativeDuration(i64),

    /// Start delay below zero
    #[error("Animators cannot have negative start delay: {0}")]
    NegativeStartDelay(i64),

    /// Configuration file could not be parsed
    #[error("Invalid animator configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for glide_animation operations
pub type Result<T> = std::result::Result<T, AnimatorError>;
