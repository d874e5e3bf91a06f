//! Belief fusion and trust discounting.
//!
//! Fusion combines two opinions held by different sources about the same
//! proposition into a single opinion. Two rules are provided (Jøsang,
//! *Subjective Logic*, 2016, chapter 12):
//!
//! - **Cumulative** fusion treats the sources as independent, so their
//!   evidence accumulates and uncertainty shrinks. It is equivalent to adding
//!   the underlying evidence counts.
//! - **Averaging** fusion treats the sources as dependent, so their evidence
//!   is averaged instead of added.
//!
//! Both rules define the degenerate inputs explicitly: two vacuous opinions
//! fuse to a vacuous opinion, and two dogmatic opinions fuse to the average
//! of their beliefs with equal relative weight.
//!
//! The base rate of the result is resolved by a [`BaseRatePolicy`].

use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::FusionConfig;
use crate::error::ValidationError;
use crate::opinion::BinomialOpinion;

/// Maximum difference for two base rates to count as equal.
pub const BASE_RATE_TOLERANCE: f64 = 1e-6;

/// Which fusion rule to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionOperator {
    /// Independent sources; evidence accumulates.
    #[default]
    Cumulative,

    /// Dependent sources; evidence is averaged.
    Averaging,
}

impl fmt::Display for FusionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cumulative => write!(f, "cumulative"),
            Self::Averaging => write!(f, "averaging"),
        }
    }
}

/// How the base rate of a fused opinion is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseRatePolicy {
    /// Combine the base rates with the operator's own rule: weighted by
    /// confidence for cumulative fusion, the arithmetic mean for averaging
    /// fusion. Symmetric in the two inputs.
    #[default]
    Combine,

    /// Reject inputs whose base rates differ by more than
    /// [`BASE_RATE_TOLERANCE`]; the result keeps the shared base rate.
    RequireEqual,
}

impl fmt::Display for BaseRatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Combine => write!(f, "combine"),
            Self::RequireEqual => write!(f, "require_equal"),
        }
    }
}

impl BinomialOpinion {
    /// Cumulative fusion with another opinion, combining base rates.
    ///
    /// # Examples
    ///
    /// ```
    /// use subjective_logic::BinomialOpinion;
    ///
    /// let a = BinomialOpinion::new(0.5, 0.3, 0.2, 0.5).unwrap();
    /// let b = BinomialOpinion::new(0.6, 0.2, 0.2, 0.5).unwrap();
    /// let fused = a.cumulative_fuse(&b).unwrap();
    /// assert!((fused.uncertainty() - 0.04 / 0.36).abs() < 1e-9);
    /// ```
    ///
    /// # Errors
    ///
    /// Only fails if the computed result violates the opinion invariants,
    /// which valid inputs do not produce.
    pub fn cumulative_fuse(&self, other: &Self) -> Result<Self, ValidationError> {
        self.fuse(other, FusionOperator::Cumulative, BaseRatePolicy::Combine)
    }

    /// Averaging fusion with another opinion, averaging base rates.
    ///
    /// # Errors
    ///
    /// Only fails if the computed result violates the opinion invariants,
    /// which valid inputs do not produce.
    pub fn averaging_fuse(&self, other: &Self) -> Result<Self, ValidationError> {
        self.fuse(other, FusionOperator::Averaging, BaseRatePolicy::Combine)
    }

    /// Fuses with another opinion using the given rule and base-rate policy.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::IncompatibleBaseRates` when `policy` is
    /// [`BaseRatePolicy::RequireEqual`] and the base rates differ.
    pub fn fuse(
        &self,
        other: &Self,
        operator: FusionOperator,
        policy: BaseRatePolicy,
    ) -> Result<Self, ValidationError> {
        let required = required_base_rate(self, other, policy)?;
        let (belief, disbelief, uncertainty, combined) = match operator {
            FusionOperator::Cumulative => cumulative_pair(self, other),
            FusionOperator::Averaging => averaging_pair(self, other),
        };
        let fused = BinomialOpinion::from_computed(
            belief,
            disbelief,
            uncertainty,
            required.unwrap_or(combined),
        )?;
        trace!("{} fusion of {} and {} -> {}", operator, self, other, fused);
        Ok(fused)
    }

    /// Fuses with another opinion using the settings in `config`.
    ///
    /// # Errors
    ///
    /// As [`BinomialOpinion::fuse`].
    pub fn fuse_with_config(
        &self,
        other: &Self,
        config: &FusionConfig,
    ) -> Result<Self, ValidationError> {
        self.fuse(other, config.operator, config.base_rate_policy)
    }

    /// Discounts `opinion` by this opinion, read as trust in its source.
    ///
    /// # Errors
    ///
    /// Only fails if the computed result violates the opinion invariants.
    pub fn discount(&self, opinion: &Self) -> Result<Self, ValidationError> {
        trust_discount(self, opinion)
    }
}

/// Probability-sensitive trust discounting.
///
/// Given an analyst's trust in a source and the source's opinion about a
/// proposition, derives the analyst's opinion about the proposition. Belief
/// and disbelief are scaled by the projected probability of the trust
/// opinion; the remainder becomes uncertainty. The base rate of `opinion` is
/// kept.
///
/// # Errors
///
/// Only fails if the computed result violates the opinion invariants.
pub fn trust_discount(
    trust: &BinomialOpinion,
    opinion: &BinomialOpinion,
) -> Result<BinomialOpinion, ValidationError> {
    let p = trust.projected_probability();
    // Same as 1 - b - d for exact inputs, but never negative.
    BinomialOpinion::from_computed(
        p * opinion.belief(),
        p * opinion.disbelief(),
        p * opinion.uncertainty() + (1.0 - p),
        opinion.base_rate(),
    )
}

/// Fuses any number of opinions.
///
/// Cumulative fusion is applied pairwise from left to right. When two or more
/// inputs are dogmatic they alone decide the result, each with equal weight,
/// so the outcome does not depend on their order. Averaging fusion uses the
/// closed form for N sources, which weights every source equally regardless
/// of order.
///
/// # Errors
///
/// Returns `ValidationError::EmptyFusionInput` for an empty input and
/// `ValidationError::IncompatibleBaseRates` when `policy` requires equal base
/// rates and any input disagrees with the first.
pub fn fuse_all<'a, I>(
    opinions: I,
    operator: FusionOperator,
    policy: BaseRatePolicy,
) -> Result<BinomialOpinion, ValidationError>
where
    I: IntoIterator<Item = &'a BinomialOpinion>,
{
    let opinions: Vec<&BinomialOpinion> = opinions.into_iter().collect();
    let (first, rest) = opinions
        .split_first()
        .ok_or(ValidationError::EmptyFusionInput)?;

    if policy == BaseRatePolicy::RequireEqual {
        for other in rest {
            required_base_rate(first, other, policy)?;
        }
    }

    match operator {
        FusionOperator::Cumulative => {
            let dogmatic: Vec<&BinomialOpinion> =
                opinions.iter().copied().filter(|o| o.is_dogmatic()).collect();
            if dogmatic.len() > 1 {
                // The pairwise dogmatic rule is not associative.
                let base_rate = match policy {
                    BaseRatePolicy::Combine => mean_base_rate(&dogmatic),
                    BaseRatePolicy::RequireEqual => first.base_rate(),
                };
                return dogmatic_consensus(&dogmatic, base_rate);
            }
            rest.iter()
                .try_fold(**first, |acc, next| acc.fuse(next, operator, policy))
        }
        FusionOperator::Averaging => averaging_many(&opinions, policy),
    }
}

fn required_base_rate(
    a: &BinomialOpinion,
    b: &BinomialOpinion,
    policy: BaseRatePolicy,
) -> Result<Option<f64>, ValidationError> {
    match policy {
        BaseRatePolicy::Combine => Ok(None),
        BaseRatePolicy::RequireEqual => {
            if (a.base_rate() - b.base_rate()).abs() > BASE_RATE_TOLERANCE {
                return Err(ValidationError::IncompatibleBaseRates {
                    left: a.base_rate(),
                    right: b.base_rate(),
                });
            }
            Ok(Some(a.base_rate()))
        }
    }
}

fn mean(x: f64, y: f64) -> f64 {
    (x + y) / 2.0
}

#[allow(clippy::cast_precision_loss)]
fn mean_base_rate(opinions: &[&BinomialOpinion]) -> f64 {
    opinions.iter().map(|o| o.base_rate()).sum::<f64>() / opinions.len() as f64
}

/// Equal-weight consensus of dogmatic opinions.
#[allow(clippy::cast_precision_loss)]
fn dogmatic_consensus(
    dogmatic: &[&BinomialOpinion],
    base_rate: f64,
) -> Result<BinomialOpinion, ValidationError> {
    let k = dogmatic.len() as f64;
    if dogmatic.len() > 1 {
        debug!("fusing {} dogmatic opinions with equal weight", dogmatic.len());
    }
    let belief = dogmatic.iter().map(|o| o.belief()).sum::<f64>() / k;
    let disbelief = dogmatic.iter().map(|o| o.disbelief()).sum::<f64>() / k;
    BinomialOpinion::from_computed(belief, disbelief, 0.0, base_rate)
}

/// Returns `(belief, disbelief, uncertainty, base_rate)` of cumulative fusion.
fn cumulative_pair(a: &BinomialOpinion, b: &BinomialOpinion) -> (f64, f64, f64, f64) {
    let (ua, ub) = (a.uncertainty(), b.uncertainty());

    if a.is_vacuous() && b.is_vacuous() {
        debug!("cumulative fusion of two vacuous opinions");
        return (
            mean(a.belief(), b.belief()),
            mean(a.disbelief(), b.disbelief()),
            1.0,
            mean(a.base_rate(), b.base_rate()),
        );
    }
    if a.is_dogmatic() && b.is_dogmatic() {
        debug!("cumulative fusion of two dogmatic opinions");
        return (
            mean(a.belief(), b.belief()),
            mean(a.disbelief(), b.disbelief()),
            0.0,
            mean(a.base_rate(), b.base_rate()),
        );
    }

    let kappa = ua + ub - ua * ub;
    let belief = (a.belief() * ub + b.belief() * ua) / kappa;
    let disbelief = (a.disbelief() * ub + b.disbelief() * ua) / kappa;
    let uncertainty = ua * ub / kappa;

    // Base rates weighted by each side's share of non-vacuous evidence.
    let weight_a = ub * (1.0 - ua);
    let weight_b = ua * (1.0 - ub);
    let base_rate = if weight_a + weight_b > 0.0 {
        (a.base_rate() * weight_a + b.base_rate() * weight_b) / (weight_a + weight_b)
    } else {
        mean(a.base_rate(), b.base_rate())
    };

    (belief, disbelief, uncertainty, base_rate)
}

/// Returns `(belief, disbelief, uncertainty, base_rate)` of averaging fusion.
fn averaging_pair(a: &BinomialOpinion, b: &BinomialOpinion) -> (f64, f64, f64, f64) {
    let (ua, ub) = (a.uncertainty(), b.uncertainty());
    let base_rate = mean(a.base_rate(), b.base_rate());

    if a.is_vacuous() && b.is_vacuous() {
        debug!("averaging fusion of two vacuous opinions");
        return (
            mean(a.belief(), b.belief()),
            mean(a.disbelief(), b.disbelief()),
            1.0,
            base_rate,
        );
    }
    if a.is_dogmatic() && b.is_dogmatic() {
        debug!("averaging fusion of two dogmatic opinions");
        return (
            mean(a.belief(), b.belief()),
            mean(a.disbelief(), b.disbelief()),
            0.0,
            base_rate,
        );
    }

    let total = ua + ub;
    (
        (a.belief() * ub + b.belief() * ua) / total,
        (a.disbelief() * ub + b.disbelief() * ua) / total,
        2.0 * ua * ub / total,
        base_rate,
    )
}

#[allow(clippy::cast_precision_loss)]
fn averaging_many(
    opinions: &[&BinomialOpinion],
    policy: BaseRatePolicy,
) -> Result<BinomialOpinion, ValidationError> {
    let n = opinions.len() as f64;
    let base_rate = match policy {
        BaseRatePolicy::Combine => mean_base_rate(opinions),
        BaseRatePolicy::RequireEqual => opinions[0].base_rate(),
    };

    // Dogmatic sources dominate; with several of them they share equal weight.
    let dogmatic: Vec<&BinomialOpinion> =
        opinions.iter().copied().filter(|o| o.is_dogmatic()).collect();
    if !dogmatic.is_empty() {
        return dogmatic_consensus(&dogmatic, base_rate);
    }

    // Weighting source i by the product of the other uncertainties is the
    // same as weighting by 1/u_i once every u_i > 0; the latter cannot underflow.
    let weights: Vec<f64> = opinions.iter().map(|o| 1.0 / o.uncertainty()).collect();
    let total: f64 = weights.iter().sum();

    let belief = opinions
        .iter()
        .zip(&weights)
        .map(|(o, w)| o.belief() * w)
        .sum::<f64>()
        / total;
    let disbelief = opinions
        .iter()
        .zip(&weights)
        .map(|(o, w)| o.disbelief() * w)
        .sum::<f64>()
        / total;
    let uncertainty = n / total;

    BinomialOpinion::from_computed(belief, disbelief, uncertainty, base_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(b: f64, d: f64, u: f64, a: f64) -> BinomialOpinion {
        BinomialOpinion::new(b, d, u, a).unwrap()
    }

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_cumulative_fusion_reference_values() {
        let fused = op(0.5, 0.3, 0.2, 0.5)
            .cumulative_fuse(&op(0.6, 0.2, 0.2, 0.5))
            .unwrap();
        assert_close(fused.belief(), 0.22 / 0.36, 1e-9);
        assert_close(fused.disbelief(), 0.10 / 0.36, 1e-9);
        assert_close(fused.uncertainty(), 0.04 / 0.36, 1e-9);
        assert_close(fused.base_rate(), 0.5, 1e-9);
    }

    #[test]
    fn test_cumulative_fusion_weights_base_rates() {
        let a = op(0.4, 0.4, 0.2, 0.2);
        let b = op(0.2, 0.2, 0.6, 0.8);
        let fused = a.cumulative_fuse(&b).unwrap();
        // weight_a = 0.6 * 0.8 = 0.48, weight_b = 0.2 * 0.4 = 0.08
        assert_close(fused.base_rate(), (0.2 * 0.48 + 0.8 * 0.08) / 0.56, 1e-9);
        assert_eq!(fused, b.cumulative_fuse(&a).unwrap());
    }

    #[test]
    fn test_cumulative_fusion_vacuous_is_identity() {
        let a = op(0.3, 0.5, 0.2, 0.7);
        let fused = a.cumulative_fuse(&BinomialOpinion::vacuous(0.1).unwrap()).unwrap();
        assert!(fused.approx_eq(&a, 1e-12), "{fused}");
    }

    #[test]
    fn test_cumulative_fusion_two_vacuous() {
        let fused = BinomialOpinion::vacuous(0.2)
            .unwrap()
            .cumulative_fuse(&BinomialOpinion::vacuous(0.6).unwrap())
            .unwrap();
        assert_eq!(fused.belief(), 0.0);
        assert_eq!(fused.disbelief(), 0.0);
        assert_eq!(fused.uncertainty(), 1.0);
        assert_close(fused.base_rate(), 0.4, 1e-12);
    }

    #[test]
    fn test_cumulative_fusion_two_dogmatic() {
        let fused = BinomialOpinion::dogmatic(1.0, 0.5)
            .unwrap()
            .cumulative_fuse(&BinomialOpinion::dogmatic(0.4, 0.5).unwrap())
            .unwrap();
        assert_close(fused.belief(), 0.7, 1e-12);
        assert_close(fused.disbelief(), 0.3, 1e-12);
        assert_eq!(fused.uncertainty(), 0.0);
    }

    #[test]
    fn test_cumulative_fusion_certain_source_dominates() {
        let certain = op(1.0, 0.0, 0.0, 0.3);
        let fused = certain.cumulative_fuse(&op(0.1, 0.6, 0.3, 0.9)).unwrap();
        assert_close(fused.belief(), 1.0, 1e-12);
        assert_close(fused.disbelief(), 0.0, 1e-12);
        assert_close(fused.uncertainty(), 0.0, 1e-12);
        assert_close(fused.base_rate(), 0.3, 1e-12);
    }

    #[test]
    fn test_averaging_fusion_reference_values() {
        let fused = op(0.55, 0.21, 0.24, 0.28)
            .averaging_fuse(&op(0.16, 0.64, 0.2, 0.82))
            .unwrap();
        assert_close(fused.belief(), (0.55 * 0.2 + 0.16 * 0.24) / 0.44, 1e-9);
        assert_close(fused.disbelief(), (0.21 * 0.2 + 0.64 * 0.24) / 0.44, 1e-9);
        assert_close(fused.uncertainty(), 2.0 * 0.24 * 0.2 / 0.44, 1e-9);
        assert_close(fused.base_rate(), 0.55, 1e-9);
    }

    #[test]
    fn test_averaging_fusion_same_opinion_is_idempotent() {
        let a = op(0.3, 0.3, 0.4, 0.5);
        assert!(a.averaging_fuse(&a).unwrap().approx_eq(&a, 1e-12));
    }

    #[test]
    fn test_averaging_fusion_degenerate_inputs() {
        let vacuous = BinomialOpinion::vacuous(0.5).unwrap();
        let fused = vacuous.averaging_fuse(&vacuous).unwrap();
        assert!(fused.is_vacuous());
        assert_eq!(fused.belief(), 0.0);

        let fused = BinomialOpinion::dogmatic(0.2, 0.5)
            .unwrap()
            .averaging_fuse(&BinomialOpinion::dogmatic(0.6, 0.5).unwrap())
            .unwrap();
        assert!(fused.is_dogmatic());
        assert_close(fused.belief(), 0.4, 1e-12);
    }

    #[test]
    fn test_require_equal_policy() {
        let a = op(0.5, 0.3, 0.2, 0.5);
        let b = op(0.6, 0.2, 0.2, 0.7);
        let err = a
            .fuse(&b, FusionOperator::Cumulative, BaseRatePolicy::RequireEqual)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::IncompatibleBaseRates {
                left: 0.5,
                right: 0.7
            }
        );

        let c = op(0.6, 0.2, 0.2, 0.5);
        let fused = a
            .fuse(&c, FusionOperator::Averaging, BaseRatePolicy::RequireEqual)
            .unwrap();
        assert_eq!(fused.base_rate(), 0.5);
    }

    #[test]
    fn test_fuse_with_config() {
        let config = FusionConfig {
            operator: FusionOperator::Averaging,
            base_rate_policy: BaseRatePolicy::Combine,
        };
        let a = op(0.55, 0.21, 0.24, 0.28);
        let b = op(0.16, 0.64, 0.2, 0.82);
        assert_eq!(
            a.fuse_with_config(&b, &config).unwrap(),
            a.averaging_fuse(&b).unwrap()
        );
    }

    #[test]
    fn test_trust_discount_reference_values() {
        let trust = op(0.2, 0.4, 0.4, 0.75);
        let opinion = op(0.45, 0.35, 0.2, 0.25);
        let discounted = trust.discount(&opinion).unwrap();
        assert_close(discounted.belief(), 0.225, 1e-9);
        assert_close(discounted.disbelief(), 0.175, 1e-9);
        assert_close(discounted.uncertainty(), 0.6, 1e-9);
        assert_close(discounted.base_rate(), 0.25, 1e-12);
    }

    #[test]
    fn test_trust_discount_by_distrust_is_vacuous() {
        let distrust = BinomialOpinion::dogmatic(0.0, 0.5).unwrap();
        let discounted = trust_discount(&distrust, &op(0.9, 0.1, 0.0, 0.5)).unwrap();
        assert!(discounted.is_vacuous());
    }

    #[test]
    fn test_fuse_all_empty() {
        let none: Vec<BinomialOpinion> = Vec::new();
        assert_eq!(
            fuse_all(&none, FusionOperator::Cumulative, BaseRatePolicy::Combine).unwrap_err(),
            ValidationError::EmptyFusionInput
        );
    }

    #[test]
    fn test_fuse_all_single_is_identity() {
        let a = op(0.5, 0.3, 0.2, 0.5);
        for operator in [FusionOperator::Cumulative, FusionOperator::Averaging] {
            let fused = fuse_all([&a], operator, BaseRatePolicy::Combine).unwrap();
            assert!(fused.approx_eq(&a, 1e-12));
        }
    }

    #[test]
    fn test_fuse_all_averaging_matches_pair() {
        let a = op(0.55, 0.21, 0.24, 0.28);
        let b = op(0.16, 0.64, 0.2, 0.82);
        let many = fuse_all([&a, &b], FusionOperator::Averaging, BaseRatePolicy::Combine).unwrap();
        assert!(many.approx_eq(&a.averaging_fuse(&b).unwrap(), 1e-12));
    }

    #[test]
    fn test_fuse_all_averaging_order_independent() {
        let a = op(0.5, 0.3, 0.2, 0.5);
        let b = op(0.1, 0.6, 0.3, 0.5);
        let c = op(0.2, 0.2, 0.6, 0.5);
        let abc = fuse_all([&a, &b, &c], FusionOperator::Averaging, BaseRatePolicy::Combine)
            .unwrap();
        let cab = fuse_all([&c, &a, &b], FusionOperator::Averaging, BaseRatePolicy::Combine)
            .unwrap();
        assert!(abc.approx_eq(&cab, 1e-12));
    }

    #[test]
    fn test_fuse_all_averaging_dogmatic_sources_dominate() {
        let a = BinomialOpinion::dogmatic(1.0, 0.5).unwrap();
        let b = op(0.1, 0.6, 0.3, 0.5);
        let c = BinomialOpinion::dogmatic(0.5, 0.5).unwrap();
        let fused = fuse_all([&a, &b, &c], FusionOperator::Averaging, BaseRatePolicy::Combine)
            .unwrap();
        assert_close(fused.belief(), 0.75, 1e-12);
        assert_eq!(fused.uncertainty(), 0.0);
    }

    #[test]
    fn test_fuse_all_cumulative_dogmatic_sources_share_weight() {
        let yes = BinomialOpinion::dogmatic(1.0, 0.5).unwrap();
        let no = BinomialOpinion::dogmatic(0.0, 0.5).unwrap();
        let other = op(0.6, 0.1, 0.3, 0.5);
        let orders = [
            [&yes, &no, &no, &other],
            [&no, &no, &yes, &other],
            [&other, &no, &yes, &no],
        ];
        for order in orders {
            let fused = fuse_all(order, FusionOperator::Cumulative, BaseRatePolicy::Combine)
                .unwrap();
            assert_close(fused.belief(), 1.0 / 3.0, 1e-12);
            assert_close(fused.disbelief(), 2.0 / 3.0, 1e-12);
            assert_eq!(fused.uncertainty(), 0.0);
        }

        let averaged =
            fuse_all([&yes, &no, &no], FusionOperator::Averaging, BaseRatePolicy::Combine)
                .unwrap();
        assert_close(averaged.belief(), 1.0 / 3.0, 1e-12);
    }

    #[test]
    fn test_fusion_accepts_inputs_at_sum_tolerance_edge() {
        let a = op(0.5, 0.0, 0.500_000_9, 0.5);
        let b = op(0.0, 0.5, 0.500_000_9, 0.5);
        for operator in [FusionOperator::Cumulative, FusionOperator::Averaging] {
            for (x, y) in [(&a, &a), (&a, &b), (&b, &a)] {
                let fused = x.fuse(y, operator, BaseRatePolicy::Combine).unwrap();
                let sum = fused.belief() + fused.disbelief() + fused.uncertainty();
                assert!((sum - 1.0).abs() < 1e-12, "{operator}: {fused}");
            }
        }
        let many = [&a, &b, &a, &b];
        for operator in [FusionOperator::Cumulative, FusionOperator::Averaging] {
            assert!(fuse_all(many, operator, BaseRatePolicy::Combine).is_ok());
        }
        assert!(op(1.0, 0.0, 0.000_000_9, 1.0).discount(&a).is_ok());
        let dogmatic_source = op(0.6, 0.400_000_9, 0.0, 0.5);
        let discounted = op(1.0, 0.0, 0.0, 0.5).discount(&dogmatic_source).unwrap();
        assert!(discounted.uncertainty() >= 0.0);
    }

    #[test]
    fn test_fuse_all_require_equal_checks_every_input() {
        let a = op(0.5, 0.3, 0.2, 0.5);
        let b = op(0.1, 0.6, 0.3, 0.5);
        let c = op(0.2, 0.2, 0.6, 0.9);
        for operator in [FusionOperator::Cumulative, FusionOperator::Averaging] {
            assert!(matches!(
                fuse_all([&a, &b, &c], operator, BaseRatePolicy::RequireEqual),
                Err(ValidationError::IncompatibleBaseRates { .. })
            ));
        }
    }

    #[test]
    fn test_operator_display_and_serde() {
        assert_eq!(FusionOperator::Averaging.to_string(), "averaging");
        assert_eq!(BaseRatePolicy::RequireEqual.to_string(), "require_equal");
        let json = serde_json::to_string(&FusionOperator::Cumulative).unwrap();
        assert_eq!(json, "\"cumulative\"");
        let policy: BaseRatePolicy = serde_json::from_str("\"require_equal\"").unwrap();
        assert_eq!(policy, BaseRatePolicy::RequireEqual);
    }
}
