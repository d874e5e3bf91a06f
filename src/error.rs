//! Error types for subjective-logic.
//!
//! All errors are strongly typed using thiserror. Every variant carries the
//! constraint that was violated together with the offending value(s), so
//! callers can pattern match on the failure instead of parsing messages.

use thiserror::Error;

/// Validation errors raised while constructing or combining opinions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A component is NaN or outside [0.0, 1.0].
    #[error("{field} value {value} is out of range [0.0, 1.0]")]
    ValueOutOfRange {
        /// Name of the component.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Belief, disbelief and uncertainty do not sum to one.
    #[error(
        "belief ({belief}) + disbelief ({disbelief}) + uncertainty ({uncertainty}) = {sum}, expected 1"
    )]
    SumInvariant {
        /// Belief mass.
        belief: f64,
        /// Disbelief mass.
        disbelief: f64,
        /// Uncertainty mass.
        uncertainty: f64,
        /// Their sum.
        sum: f64,
    },

    /// An evidence count is not a finite, non-negative whole number.
    #[error("Invalid evidence '{parameter}': value {value} {reason}")]
    InvalidEvidence {
        /// `r` or `s`.
        parameter: &'static str,
        /// The rejected count.
        value: f64,
        /// The violated constraint.
        reason: &'static str,
    },

    /// The prior weight is not finite and positive.
    #[error("Prior weight {value} must be finite and greater than 0")]
    InvalidPriorWeight {
        /// The rejected weight.
        value: f64,
    },

    /// Fusion required equal base rates and got different ones.
    #[error("Base rates {left} and {right} differ; fusion requires equal base rates")]
    IncompatibleBaseRates {
        /// Base rate of the first opinion.
        left: f64,
        /// Base rate of the disagreeing opinion.
        right: f64,
    },

    /// `fuse_all` was given no opinions.
    #[error("Fusion requires at least one opinion")]
    EmptyFusionInput,

    /// A required JSON field is absent.
    #[error("Required field '{field}' is missing")]
    MissingField {
        /// Name of the field.
        field: &'static str,
    },

    /// The JSON value is not an object.
    #[error("Opinion JSON must be an object")]
    NotAnObject,
}

impl ValidationError {
    /// Creates an invalid-evidence error for `r` or `s`.
    #[must_use]
    pub fn invalid_evidence(parameter: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidEvidence {
            parameter,
            value,
            reason,
        }
    }

    /// Name of the parameter or field the error refers to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::ValueOutOfRange { field, .. } | Self::MissingField { field } => Some(*field),
            Self::InvalidEvidence { parameter, .. } => Some(*parameter),
            Self::InvalidPriorWeight { .. } => Some("prior_weight"),
            Self::IncompatibleBaseRates { .. } => Some("base_rate"),
            Self::SumInvariant { .. } | Self::EmptyFusionInput | Self::NotAnObject => None,
        }
    }
}

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum OpinionError {
    /// An invalid value or combination.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Malformed or mistyped JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OpinionError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a serialization error.
    #[must_use]
    pub const fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization(_))
    }

    /// Returns the underlying validation error, if any.
    #[must_use]
    pub const fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Serialization(_) => None,
        }
    }
}

/// Result type alias for opinion operations.
pub type OpinionResult<T> = Result<T, OpinionError>;
