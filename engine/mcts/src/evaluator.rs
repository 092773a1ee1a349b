//! Oracle output checks.
//!
//! The evaluator contract lives in `engine-core`. The search does not trust
//! the numbers it gets back: priors are masked to legal actions and
//! renormalised, and the value is clamped to `[-1, 1]`. Anything that had to
//! be repaired is reported as a [`ContractViolation`] and logged, never
//! returned as an error.

use thiserror::Error;
use tracing::warn;

pub use engine_core::{
    uniform_policy, EvalResult, Evaluator, EvaluatorError, RandomEvaluator, UniformEvaluator,
};

/// Legal prior mass below this is treated as zero.
const MIN_LEGAL_MASS: f32 = 1e-8;

/// A recoverable breach of the evaluator contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractViolation {
    #[error("policy has {got} entries, expected {expected}")]
    PolicyLength { expected: usize, got: usize },

    #[error("policy contains negative or non-finite priors")]
    InvalidPrior,

    #[error("policy puts no mass on legal actions")]
    NoLegalMass,

    #[error("value {0} is not finite")]
    NonFiniteValue(f32),

    #[error("value {0} is outside [-1, 1]")]
    ValueOutOfRange(f32),
}

/// Evaluator output after repair.
#[derive(Debug, Clone)]
pub struct Sanitized {
    /// Priors over all actions, zero on illegal ones, summing to 1 when any
    /// action is legal
    pub priors: Vec<f32>,

    /// Value in `[-1, 1]`
    pub value: f32,

    pub violations: Vec<ContractViolation>,
}

/// Mask, renormalise and clamp raw evaluator output.
///
/// Falls back to a uniform prior when the policy has the wrong length or no
/// usable mass on legal actions. A non-finite value becomes 0.
pub fn sanitize(result: &EvalResult, legal_mask: &[bool]) -> Sanitized {
    let mut violations = Vec::new();

    let priors = if result.policy.len() != legal_mask.len() {
        violations.push(ContractViolation::PolicyLength {
            expected: legal_mask.len(),
            got: result.policy.len(),
        });
        uniform_policy(legal_mask)
    } else {
        let mut masked: Vec<f32> = result
            .policy
            .iter()
            .zip(legal_mask)
            .map(|(&p, &legal)| if legal { p } else { 0.0 })
            .collect();

        if masked.iter().any(|p| !p.is_finite() || *p < 0.0) {
            violations.push(ContractViolation::InvalidPrior);
            for p in &mut masked {
                if !p.is_finite() || *p < 0.0 {
                    *p = 0.0;
                }
            }
        }

        let mass: f32 = masked.iter().sum();
        if mass < MIN_LEGAL_MASS {
            if legal_mask.iter().any(|&legal| legal) {
                violations.push(ContractViolation::NoLegalMass);
            }
            uniform_policy(legal_mask)
        } else {
            for p in &mut masked {
                *p /= mass;
            }
            masked
        }
    };

    let value = if !result.value.is_finite() {
        violations.push(ContractViolation::NonFiniteValue(result.value));
        0.0
    } else if !(-1.0..=1.0).contains(&result.value) {
        violations.push(ContractViolation::ValueOutOfRange(result.value));
        result.value.clamp(-1.0, 1.0)
    } else {
        result.value
    };

    for violation in &violations {
        warn!(%violation, "Evaluator output repaired");
    }

    Sanitized {
        priors,
        value,
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(policy: Vec<f32>, value: f32) -> EvalResult {
        EvalResult { policy, value }
    }

    #[test]
    fn test_clean_output_is_unchanged() {
        let mask = [true, false, true, true];
        let out = sanitize(&eval(vec![0.5, 0.0, 0.25, 0.25], 0.3), &mask);
        assert!(out.violations.is_empty());
        assert_eq!(out.priors, vec![0.5, 0.0, 0.25, 0.25]);
        assert!((out.value - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_illegal_mass_is_masked_and_renormalised() {
        let mask = [true, false, true];
        let out = sanitize(&eval(vec![0.2, 0.6, 0.2], 0.0), &mask);
        // Mass on illegal actions is silently dropped
        assert!(out.violations.is_empty());
        assert!((out.priors[0] - 0.5).abs() < 1e-6);
        assert_eq!(out.priors[1], 0.0);
        assert!((out.priors[2] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_wrong_length_falls_back_to_uniform() {
        let mask = [true, true, false];
        let out = sanitize(&eval(vec![1.0], 0.0), &mask);
        assert_eq!(
            out.violations,
            vec![ContractViolation::PolicyLength {
                expected: 3,
                got: 1
            }]
        );
        assert_eq!(out.priors, vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_no_legal_mass_falls_back_to_uniform() {
        let mask = [false, true, true];
        let out = sanitize(&eval(vec![1.0, 0.0, 0.0], 0.0), &mask);
        assert_eq!(out.violations, vec![ContractViolation::NoLegalMass]);
        assert_eq!(out.priors, vec![0.0, 0.5, 0.5]);
    }

    #[test]
    fn test_nan_prior_is_dropped() {
        let mask = [true, true];
        let out = sanitize(&eval(vec![f32::NAN, 2.0], 0.0), &mask);
        assert_eq!(out.violations, vec![ContractViolation::InvalidPrior]);
        assert_eq!(out.priors, vec![0.0, 1.0]);
    }

    #[test]
    fn test_value_is_clamped() {
        let mask = [true];
        let out = sanitize(&eval(vec![1.0], 3.5), &mask);
        assert_eq!(out.violations, vec![ContractViolation::ValueOutOfRange(3.5)]);
        assert_eq!(out.value, 1.0);

        let out = sanitize(&eval(vec![1.0], -2.0), &mask);
        assert_eq!(out.value, -1.0);
    }

    #[test]
    fn test_nan_value_becomes_zero() {
        let mask = [true];
        let out = sanitize(&eval(vec![1.0], f32::NAN), &mask);
        assert_eq!(out.value, 0.0);
        assert!(matches!(
            out.violations.as_slice(),
            [ContractViolation::NonFiniteValue(_)]
        ));
    }
}
