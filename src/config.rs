//! Settings for evidence mapping and fusion.
//!
//! Both structs deserialize with `#[serde(default)]`, so a host application
//! can load a partial JSON document and fall back to the defaults for the
//! rest. Call `validate()` after loading.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::evidence::Evidence;
use crate::fusion::{BaseRatePolicy, FusionOperator};
use crate::opinion::{DEFAULT_BASE_RATE, DEFAULT_PRIOR_WEIGHT};

/// Evidence-to-opinion mapping settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceConfig {
    /// Non-informative prior weight `W`.
    pub prior_weight: f64,
    /// Base rate assigned to opinions built from evidence.
    pub base_rate: f64,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            prior_weight: DEFAULT_PRIOR_WEIGHT,
            base_rate: DEFAULT_BASE_RATE,
        }
    }
}

impl EvidenceConfig {
    /// Checks the prior weight and the base rate.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPriorWeight` or
    /// `ValidationError::ValueOutOfRange`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Evidence::validate_prior_weight(self.prior_weight)?;
        if self.base_rate.is_nan() || !(0.0..=1.0).contains(&self.base_rate) {
            return Err(ValidationError::ValueOutOfRange {
                field: "base_rate",
                value: self.base_rate,
            });
        }
        Ok(())
    }
}

/// Fusion settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Fusion rule.
    pub operator: FusionOperator,
    /// How the base rate of the result is determined.
    pub base_rate_policy: BaseRatePolicy,
}
