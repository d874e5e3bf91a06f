//! Binomial opinions.
//!
//! A binomial opinion expresses belief about a binary proposition as three
//! masses (belief, disbelief, uncertainty) that sum to one, plus a base rate
//! that says how the uncertainty mass should be read as probability. Opinions
//! are validated on construction and never mutated afterwards; every operator
//! returns a new value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::EvidenceConfig;
use crate::error::{OpinionResult, ValidationError};
use crate::evidence::Evidence;

/// Allowed deviation of `belief + disbelief + uncertainty` from 1.
pub const SUM_TOLERANCE: f64 = 1e-6;

/// Base rate used when none is given.
pub const DEFAULT_BASE_RATE: f64 = 0.5;

/// Non-informative prior weight `W` of the evidence mapping.
pub const DEFAULT_PRIOR_WEIGHT: f64 = 2.0;

/// Rounding error tolerated on computed (not caller supplied) masses.
pub(crate) const DRIFT_TOLERANCE: f64 = 1e-9;

/// Sum deviation renormalized away on computed masses: the error of two
/// inputs at the edge of [`SUM_TOLERANCE`], plus rounding.
pub(crate) const COMPUTED_SUM_TOLERANCE: f64 = 2.0 * SUM_TOLERANCE + DRIFT_TOLERANCE;

/// A subjective-logic opinion about a binary proposition.
///
/// # Examples
///
/// ```
/// use subjective_logic::BinomialOpinion;
///
/// let opinion = BinomialOpinion::new(0.5, 0.3, 0.2, 0.5).unwrap();
/// assert!((opinion.projected_probability() - 0.6).abs() < 1e-12);
///
/// // The masses must sum to one.
/// assert!(BinomialOpinion::new(0.5, 0.5, 0.5, 0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOpinion")]
pub struct BinomialOpinion {
    belief: f64,
    disbelief: f64,
    uncertainty: f64,
    base_rate: f64,
}

/// Unvalidated wire form; deserialization goes through `TryFrom`.
#[derive(Debug, Deserialize)]
struct RawOpinion {
    belief: f64,
    disbelief: f64,
    uncertainty: f64,
    #[serde(default = "default_base_rate")]
    base_rate: f64,
}

const fn default_base_rate() -> f64 {
    DEFAULT_BASE_RATE
}

impl TryFrom<RawOpinion> for BinomialOpinion {
    type Error = ValidationError;

    fn try_from(raw: RawOpinion) -> Result<Self, Self::Error> {
        Self::new(raw.belief, raw.disbelief, raw.uncertainty, raw.base_rate)
    }
}

impl BinomialOpinion {
    /// Creates an opinion from its four components.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::ValueOutOfRange` if any component is not a
    /// finite number in [0.0, 1.0], and `ValidationError::SumInvariant` if
    /// belief, disbelief and uncertainty do not sum to 1 within
    /// [`SUM_TOLERANCE`].
    pub fn new(
        belief: f64,
        disbelief: f64,
        uncertainty: f64,
        base_rate: f64,
    ) -> Result<Self, ValidationError> {
        Self::validate_unit("belief", belief)?;
        Self::validate_unit("disbelief", disbelief)?;
        Self::validate_unit("uncertainty", uncertainty)?;
        Self::validate_unit("base_rate", base_rate)?;

        let sum = belief + disbelief + uncertainty;
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(ValidationError::SumInvariant {
                belief,
                disbelief,
                uncertainty,
                sum,
            });
        }

        Ok(Self {
            belief,
            disbelief,
            uncertainty,
            base_rate,
        })
    }

    /// Creates an opinion with the default base rate of 0.5.
    ///
    /// # Errors
    ///
    /// Same as [`BinomialOpinion::new`].
    pub fn with_default_base_rate(
        belief: f64,
        disbelief: f64,
        uncertainty: f64,
    ) -> Result<Self, ValidationError> {
        Self::new(belief, disbelief, uncertainty, DEFAULT_BASE_RATE)
    }

    /// Creates the vacuous opinion (total ignorance): `u = 1`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::ValueOutOfRange` for an invalid base rate.
    pub fn vacuous(base_rate: f64) -> Result<Self, ValidationError> {
        Self::new(0.0, 0.0, 1.0, base_rate)
    }

    /// Creates a dogmatic opinion (`u = 0`) with the given belief.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::ValueOutOfRange` if `belief` or `base_rate`
    /// is outside [0.0, 1.0].
    pub fn dogmatic(belief: f64, base_rate: f64) -> Result<Self, ValidationError> {
        Self::validate_unit("belief", belief)?;
        Self::new(belief, 1.0 - belief, 0.0, base_rate)
    }

    /// Creates an opinion from whole-number evidence counts with prior weight 2.
    ///
    /// `r` counts observations supporting the proposition and `s` counts
    /// observations against it.
    ///
    /// # Examples
    ///
    /// ```
    /// use subjective_logic::BinomialOpinion;
    ///
    /// let opinion = BinomialOpinion::from_evidence(8.0, 2.0, 0.5).unwrap();
    /// assert!((opinion.uncertainty() - 2.0 / 12.0).abs() < 1e-12);
    /// assert!((opinion.projected_probability() - 0.75).abs() < 1e-12);
    ///
    /// assert!(BinomialOpinion::from_evidence(-1.0, 3.0, 0.5).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEvidence` if `r` or `s` is negative,
    /// fractional or not finite, and `ValidationError::ValueOutOfRange` for an
    /// invalid base rate.
    pub fn from_evidence(r: f64, s: f64, base_rate: f64) -> Result<Self, ValidationError> {
        Self::from_evidence_with_prior(r, s, base_rate, DEFAULT_PRIOR_WEIGHT)
    }

    /// Creates an opinion from evidence counts with an explicit prior weight.
    ///
    /// # Errors
    ///
    /// As [`BinomialOpinion::from_evidence`], plus
    /// `ValidationError::InvalidPriorWeight` when `prior_weight` is not a
    /// finite number greater than zero.
    pub fn from_evidence_with_prior(
        r: f64,
        s: f64,
        base_rate: f64,
        prior_weight: f64,
    ) -> Result<Self, ValidationError> {
        Evidence::observed(r, s)?.to_opinion(base_rate, prior_weight)
    }

    /// Creates an opinion from evidence counts using the mapping settings in
    /// `config`.
    ///
    /// # Errors
    ///
    /// As [`BinomialOpinion::from_evidence_with_prior`].
    pub fn from_evidence_with_config(
        r: f64,
        s: f64,
        config: &EvidenceConfig,
    ) -> Result<Self, ValidationError> {
        Self::from_evidence_with_prior(r, s, config.base_rate, config.prior_weight)
    }

    /// Maps this opinion back to the evidence that would produce it.
    ///
    /// Returns `Ok(None)` for dogmatic opinions, which correspond to an
    /// unbounded amount of evidence. The returned counts are effective
    /// evidence and need not be whole numbers.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPriorWeight` for a non-positive or
    /// non-finite prior weight.
    pub fn to_evidence(&self, prior_weight: f64) -> Result<Option<Evidence>, ValidationError> {
        Evidence::validate_prior_weight(prior_weight)?;
        if self.is_dogmatic() {
            return Ok(None);
        }
        Ok(Some(Evidence::effective(
            prior_weight * self.belief / self.uncertainty,
            prior_weight * self.disbelief / self.uncertainty,
        )))
    }

    /// Belief mass `b`.
    pub const fn belief(&self) -> f64 {
        self.belief
    }

    /// Disbelief mass `d`.
    pub const fn disbelief(&self) -> f64 {
        self.disbelief
    }

    /// Uncertainty mass `u`.
    pub const fn uncertainty(&self) -> f64 {
        self.uncertainty
    }

    /// Base rate `a`, the prior probability of the proposition.
    pub const fn base_rate(&self) -> f64 {
        self.base_rate
    }

    /// Projected probability `P = b + a·u`.
    ///
    /// Masses may sum to slightly more than one within [`SUM_TOLERANCE`], so
    /// the result is clamped to [0.0, 1.0].
    #[must_use]
    pub fn projected_probability(&self) -> f64 {
        (self.belief + self.base_rate * self.uncertainty).clamp(0.0, 1.0)
    }

    /// Returns true if the opinion carries no evidence at all (`u = 1`).
    #[must_use]
    pub fn is_vacuous(&self) -> bool {
        self.uncertainty >= 1.0
    }

    /// Returns true if the opinion has no uncertainty (`u = 0`).
    #[must_use]
    pub fn is_dogmatic(&self) -> bool {
        self.uncertainty <= 0.0
    }

    /// Compares all four components within `tolerance`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.belief - other.belief).abs() <= tolerance
            && (self.disbelief - other.disbelief).abs() <= tolerance
            && (self.uncertainty - other.uncertainty).abs() <= tolerance
            && (self.base_rate - other.base_rate).abs() <= tolerance
    }

    /// Returns the opinion as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "belief": self.belief,
            "disbelief": self.disbelief,
            "uncertainty": self.uncertainty,
            "base_rate": self.base_rate,
        })
    }

    /// Builds an opinion from a JSON object with `belief`, `disbelief`,
    /// `uncertainty` and an optional `base_rate` (default 0.5).
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NotAnObject` or `ValidationError::MissingField`
    /// for malformed input, `OpinionError::Serialization` for non-numeric
    /// fields, and the usual construction errors for invalid values.
    pub fn from_json(value: &serde_json::Value) -> OpinionResult<Self> {
        let object = value.as_object().ok_or(ValidationError::NotAnObject)?;
        for field in ["belief", "disbelief", "uncertainty"] {
            if !object.contains_key(field) {
                return Err(ValidationError::MissingField { field }.into());
            }
        }
        let raw: RawOpinion = serde_json::from_value(value.clone())?;
        Ok(Self::try_from(raw)?)
    }

    /// Parses an opinion from a JSON string.
    ///
    /// # Errors
    ///
    /// As [`BinomialOpinion::from_json`], plus syntax errors.
    pub fn from_json_str(json: &str) -> OpinionResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json(&value)
    }

    /// Builds an opinion from computed masses.
    ///
    /// Values within [`DRIFT_TOLERANCE`] outside [0.0, 1.0] are snapped to the
    /// nearest bound. Operators combine inputs that are each allowed to be off
    /// by [`SUM_TOLERANCE`], so a mass sum within [`COMPUTED_SUM_TOLERANCE`] of
    /// one is renormalized. The regular validation runs afterwards.
    pub(crate) fn from_computed(
        belief: f64,
        disbelief: f64,
        uncertainty: f64,
        base_rate: f64,
    ) -> Result<Self, ValidationError> {
        let (mut belief, mut disbelief, mut uncertainty) = (
            snap_to_unit(belief),
            snap_to_unit(disbelief),
            snap_to_unit(uncertainty),
        );
        let sum = belief + disbelief + uncertainty;
        if (sum - 1.0).abs() <= COMPUTED_SUM_TOLERANCE {
            belief /= sum;
            disbelief /= sum;
            uncertainty /= sum;
        }
        Self::new(belief, disbelief, uncertainty, snap_to_unit(base_rate))
    }

    fn validate_unit(field: &'static str, value: f64) -> Result<(), ValidationError> {
        if value.is_nan() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::ValueOutOfRange { field, value });
        }
        Ok(())
    }
}

fn snap_to_unit(value: f64) -> f64 {
    if value < 0.0 && value >= -DRIFT_TOLERANCE {
        0.0
    } else if value > 1.0 && value <= 1.0 + DRIFT_TOLERANCE {
        1.0
    } else {
        value
    }
}

impl fmt::Display for BinomialOpinion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BinomialOpinion(belief={:.3}, disbelief={:.3}, uncertainty={:.3}, base_rate={:.3})",
            self.belief, self.disbelief, self.uncertainty, self.base_rate
        )
    }
}
