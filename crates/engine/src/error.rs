//! The module contains the errors the engine can return.
//!
//! Read paths of the allocator (display values, summaries) never fail: they
//! fall back to safe defaults. Errors only surface at the strict parsing
//! boundary and when a draft is committed:
//!
//! - [`InvalidAmount`], [`InvalidPercent`], [`InvalidShares`] from strict parsing.
//! - [`NoParticipants`], [`PercentageMismatch`], [`AmountMismatch`] from
//!   [`SplitDraft::commit`].
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidPercent`]: EngineError::InvalidPercent
//!  [`InvalidShares`]: EngineError::InvalidShares
//!  [`NoParticipants`]: EngineError::NoParticipants
//!  [`PercentageMismatch`]: EngineError::PercentageMismatch
//!  [`AmountMismatch`]: EngineError::AmountMismatch
//!  [`SplitDraft::commit`]: crate::SplitDraft::commit
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid percentage: {0}")]
    InvalidPercent(String),
    #[error("Invalid shares: {0}")]
    InvalidShares(String),
    #[error("Invalid split method: {0}")]
    InvalidMethod(String),
    #[error("Currency mismatch: {0}")]
    CurrencyMismatch(String),
    #[error("\"{0}\" participant not found!")]
    UnknownParticipant(String),
    #[error("\"{0}\" participant already present!")]
    DuplicateParticipant(String),
    #[error("No participants selected")]
    NoParticipants,
    #[error("Percentages add up to {0}, should be 100%")]
    PercentageMismatch(String),
    #[error("Amounts add up to {actual}, should be {expected}")]
    AmountMismatch { actual: String, expected: String },
}
