//! Invalid-input errors for the exchange model.
//!
//! Every pure function checks its numeric inputs at the boundary and returns
//! one of these immediately. Callers decide whether to abort or substitute.

use crate::types::{Exponent, Good, Price, Quantity};

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Zero, negative, NaN or infinite price.
    #[error("price of {good} must be positive, got {price}")]
    NonPositivePrice { good: Good, price: Price },

    /// Cobb-Douglas exponent outside the open interval (0,1).
    #[error("preference exponent must lie in (0,1), got {exponent}")]
    ExponentOutOfRange { exponent: Exponent },

    /// Negative, NaN or infinite consumption.
    #[error("quantity of {good} must be finite and non-negative, got {quantity}")]
    NegativeQuantity { good: Good, quantity: Quantity },

    /// Indifference level below zero; Cobb-Douglas utility is never negative.
    #[error("utility level must be non-negative, got {level}")]
    NegativeUtility { level: f64 },

    /// Endowment share outside [0,1]; total endowment of each good is 1.
    #[error("endowment of {good} must lie in [0,1], got {omega}")]
    EndowmentOutOfRange { good: Good, omega: Quantity },
}

/// Failure to load an [`EconomyConfig`](crate::EconomyConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Domain(#[from] DomainError),
}
