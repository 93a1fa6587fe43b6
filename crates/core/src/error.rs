//! Domain error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Business-rule rejection.
///
/// These are expected outcomes of a mutation, not faults. Callers branch on
/// them and decide what to tell the operator. Malformed operator input is not
/// represented here; it never reaches the domain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Identifier was non-positive or already in use.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A quantity or price was below zero.
    #[error("negative value: {0}")]
    NegativeValue(String),

    /// A line value or the inventory total would not fit the decimal range.
    #[error("value out of range: {0}")]
    ValueOutOfRange(String),

    /// No product with this identifier exists.
    #[error("product {0} not found")]
    NotFound(ProductId),
}

impl DomainError {
    pub fn invalid_identifier(msg: impl Into<String>) -> Self {
        Self::InvalidIdentifier(msg.into())
    }

    pub fn negative_value(msg: impl Into<String>) -> Self {
        Self::NegativeValue(msg.into())
    }

    pub fn value_out_of_range(msg: impl Into<String>) -> Self {
        Self::ValueOutOfRange(msg.into())
    }

    pub fn not_found(id: ProductId) -> Self {
        Self::NotFound(id)
    }
}
