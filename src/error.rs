//! Error types for the localization engine.
//!
//! Per-file parse failures are deliberately absent from this enum: one bad
//! file in a batch is absorbed and logged where it happens (see
//! [`crate::parsers::ParseSkip`]), never propagated. Only registry-level
//! invariant violations and resolution-time argument mismatches are errors.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the registry and the template resolver.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// No source supplied entries for the declared default culture.
    /// Fatal to `load`: without a default, no lookup can be guaranteed
    /// to resolve.
    #[error("no resources loaded for default culture `{0}`")]
    MissingDefaultCulture(String),

    /// The registry was used before a successful `load`.
    #[error("registry is not initialized; call load() first")]
    NotInitialized,

    /// A live argument slot referenced a position outside the per-call
    /// value list. Indicates a binding authored against the wrong
    /// placeholder count.
    #[error("live argument index {index} out of range ({supplied} value(s) supplied)")]
    LiveArgumentOutOfRange { index: usize, supplied: usize },
}
