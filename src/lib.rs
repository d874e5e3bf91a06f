//! # subjective-logic - Binomial Opinions
//!
//! Subjective logic extends probability with an explicit uncertainty mass.
//! An opinion about a binary proposition splits unit mass between belief,
//! disbelief and uncertainty, and carries a base rate that turns the
//! uncertainty into a point probability when one is needed.
//!
//! ## Core Concepts
//!
//! - **BinomialOpinion**: validated `(b, d, u, a)` value with `b + d + u = 1`
//! - **Evidence**: positive and negative observation counts mapped to an opinion
//! - **Projected probability**: `P = b + a·u`
//! - **Fusion**: cumulative and averaging combination of two sources' opinions
//! - **Trust discounting**: scaling a source's opinion by trust in that source
//!
//! ## Usage
//!
//! ```rust
//! use subjective_logic::{BinomialOpinion, BaseRatePolicy, FusionOperator};
//!
//! // Eight positive and two negative observations.
//! let sensor_a = BinomialOpinion::from_evidence(8.0, 2.0, 0.5)?;
//! assert!((sensor_a.projected_probability() - 0.75).abs() < 1e-9);
//!
//! // A second, independent source.
//! let sensor_b = BinomialOpinion::new(0.6, 0.2, 0.2, 0.5)?;
//! let fused = sensor_a.fuse(&sensor_b, FusionOperator::Cumulative, BaseRatePolicy::RequireEqual)?;
//! assert!(fused.uncertainty() < sensor_a.uncertainty());
//! # Ok::<(), subjective_logic::ValidationError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod evidence;
pub mod fusion;
pub mod opinion;

// Re-export primary types at crate root for convenience
pub use config::{EvidenceConfig, FusionConfig};
pub use error::{OpinionError, OpinionResult, ValidationError};
pub use evidence::Evidence;
pub use fusion::{fuse_all, trust_discount, BaseRatePolicy, FusionOperator, BASE_RATE_TOLERANCE};
pub use opinion::{BinomialOpinion, DEFAULT_BASE_RATE, DEFAULT_PRIOR_WEIGHT, SUM_TOLERANCE};
