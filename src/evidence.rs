//! Evidence counts and the evidence-to-opinion mapping.
//!
//! Positive evidence `r` and negative evidence `s` map to an opinion through a
//! non-informative prior weight `W`:
//!
//! ```text
//! b = r / (r + s + W)
//! d = s / (r + s + W)
//! u = W / (r + s + W)
//! ```

use serde::Serialize;

use crate::error::ValidationError;
use crate::opinion::BinomialOpinion;

/// Amount of evidence for and against a proposition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evidence {
    positive: f64,
    negative: f64,
}

impl Evidence {
    /// Creates evidence from observation counts.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEvidence` naming `r` or `s` when a
    /// count is not finite, negative, or not a whole number.
    pub fn observed(r: f64, s: f64) -> Result<Self, ValidationError> {
        Self::validate_count("r", r)?;
        Self::validate_count("s", s)?;
        Ok(Self {
            positive: r,
            negative: s,
        })
    }

    /// Effective evidence recovered from an opinion; may be fractional.
    pub(crate) const fn effective(positive: f64, negative: f64) -> Self {
        Self { positive, negative }
    }

    /// Positive evidence `r`.
    pub const fn positive(&self) -> f64 {
        self.positive
    }

    /// Negative evidence `s`.
    pub const fn negative(&self) -> f64 {
        self.negative
    }

    /// Total evidence `r + s`.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.positive + self.negative
    }

    /// Pools two bodies of evidence. Mapping the result to an opinion is
    /// equivalent to cumulative fusion of the two mapped opinions.
    #[must_use]
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            positive: self.positive + other.positive,
            negative: self.negative + other.negative,
        }
    }

    /// Maps the evidence to an opinion.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPriorWeight` for a non-positive or
    /// non-finite prior weight, `ValidationError::InvalidEvidence` if pooling
    /// overflowed a count to infinity, and `ValidationError::ValueOutOfRange`
    /// for an invalid base rate.
    pub fn to_opinion(
        &self,
        base_rate: f64,
        prior_weight: f64,
    ) -> Result<BinomialOpinion, ValidationError> {
        Self::validate_prior_weight(prior_weight)?;
        Self::validate_count("r", self.positive)?;
        Self::validate_count("s", self.negative)?;

        // Scaled by the largest term so `r + s + W` cannot overflow.
        let scale = self.positive.max(self.negative).max(prior_weight);
        let (r, s, w) = (
            self.positive / scale,
            self.negative / scale,
            prior_weight / scale,
        );
        let total = r + s + w;
        BinomialOpinion::from_computed(r / total, s / total, w / total, base_rate)
    }

    pub(crate) fn validate_prior_weight(prior_weight: f64) -> Result<(), ValidationError> {
        if !prior_weight.is_finite() || prior_weight <= 0.0 {
            return Err(ValidationError::InvalidPriorWeight {
                value: prior_weight,
            });
        }
        Ok(())
    }

    fn validate_count(parameter: &'static str, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid_evidence(
                parameter,
                value,
                "must be finite",
            ));
        }
        if value < 0.0 {
            return Err(ValidationError::invalid_evidence(
                parameter,
                value,
                "must be non-negative",
            ));
        }
        if value.fract() != 0.0 {
            return Err(ValidationError::invalid_evidence(
                parameter,
                value,
                "must be a whole number",
            ));
        }
        Ok(())
    }
}
