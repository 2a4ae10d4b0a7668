//! Explainer ensemble: aggregated Shapley attributions for one customer.

use credlens_core::error::{CredlensError, Result};
use credlens_core::types::Attribution;
use serde::{Deserialize, Serialize};

/// An attribution model paired with one classifier.
///
/// For a feature row it produces a per-feature signed contribution vector
/// (in the customer table's column order) and a scalar expected value —
/// the score attributable to no feature information.
pub trait Explainer: Send + Sync {
    fn contributions(&self, features: &[f64]) -> Vec<f64>;
    fn expected_value(&self) -> f64;
}

/// A linear attribution model loaded from a JSON artifact.
///
/// Contribution of feature `i` is `weights[i] * (x[i] - feature_means[i])`,
/// the exact Shapley value of a linear scorer over an independent
/// background distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearExplainer {
    pub weights: Vec<f64>,
    pub feature_means: Vec<f64>,
    pub expected_value: f64,
}

impl Explainer for LinearExplainer {
    fn contributions(&self, features: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.feature_means)
            .zip(features)
            .map(|((w, m), x)| w * (x - m))
            .collect()
    }

    fn expected_value(&self) -> f64 {
        self.expected_value
    }
}

/// An ordered collection of explainers, one per classifier.
pub struct ExplainerEnsemble {
    members: Vec<Box<dyn Explainer>>,
}

impl ExplainerEnsemble {
    pub fn new(members: Vec<Box<dyn Explainer>>) -> Result<Self> {
        if members.is_empty() {
            return Err(CredlensError::empty_ensemble("explainer"));
        }
        Ok(Self { members })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Unweighted mean of per-explainer contributions and expected values.
    ///
    /// Feature ordering is preserved: position `i` of the result refers to
    /// the same column as position `i` of the input row. A member producing
    /// a vector of the wrong length is an error, never a silent zero
    /// vector.
    pub fn aggregate(&self, features: &[f64], feature_count: usize) -> Result<Attribution> {
        let k = self.members.len() as f64;
        let mut contributions = vec![0.0f64; feature_count];
        let mut base_value = 0.0f64;

        for member in &self.members {
            let shap = member.contributions(features);
            if shap.len() != feature_count {
                return Err(CredlensError::shape_mismatch(feature_count, shap.len()));
            }
            for (acc, value) in contributions.iter_mut().zip(&shap) {
                *acc += value / k;
            }
            base_value += member.expected_value() / k;
        }

        Ok(Attribution {
            contributions,
            base_value,
        })
    }
}

impl std::fmt::Debug for ExplainerEnsemble {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplainerEnsemble")
            .field("members", &self.members.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns a fixed contribution vector and expected value.
    struct FixedExplainer {
        shap: Vec<f64>,
        expected: f64,
    }

    impl Explainer for FixedExplainer {
        fn contributions(&self, _features: &[f64]) -> Vec<f64> {
            self.shap.clone()
        }

        fn expected_value(&self) -> f64 {
            self.expected
        }
    }

    fn fixed(shap: Vec<f64>, expected: f64) -> Box<dyn Explainer> {
        Box::new(FixedExplainer { shap, expected })
    }

    #[test]
    fn empty_ensemble_is_rejected() {
        assert!(ExplainerEnsemble::new(vec![]).is_err());
    }

    #[test]
    fn aggregate_averages_members() {
        let ensemble = ExplainerEnsemble::new(vec![
            fixed(vec![0.2, -0.4], 0.3),
            fixed(vec![0.0, 0.0], 0.1),
        ])
        .unwrap();
        let a = ensemble.aggregate(&[0.0, 0.0], 2).unwrap();
        assert!((a.contributions[0] - 0.1).abs() < 1e-12);
        assert!((a.contributions[1] + 0.2).abs() < 1e-12);
        assert!((a.base_value - 0.2).abs() < 1e-12);
    }

    #[test]
    fn aggregate_is_order_independent() {
        let members = |order: [usize; 3]| {
            let pool = [
                (vec![0.1, 0.2], 0.05),
                (vec![-0.3, 0.0], 0.25),
                (vec![0.07, -0.01], 0.15),
            ];
            ExplainerEnsemble::new(
                order
                    .iter()
                    .map(|&i| fixed(pool[i].0.clone(), pool[i].1))
                    .collect(),
            )
            .unwrap()
        };
        let a = members([0, 1, 2]).aggregate(&[0.0, 0.0], 2).unwrap();
        let b = members([2, 0, 1]).aggregate(&[0.0, 0.0], 2).unwrap();
        assert!((a.base_value - b.base_value).abs() < 1e-12);
        for (x, y) in a.contributions.iter().zip(&b.contributions) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn wrong_length_is_an_error_not_a_zero_vector() {
        let ensemble = ExplainerEnsemble::new(vec![fixed(vec![0.1], 0.0)]).unwrap();
        let err = ensemble.aggregate(&[0.0, 0.0], 2).unwrap_err();
        assert!(err.to_string().contains("expected 2 features, found 1"));
    }

    #[test]
    fn linear_explainer_reconstructs_its_scorer_delta() {
        let explainer = LinearExplainer {
            weights: vec![0.5, -1.0],
            feature_means: vec![1.0, 2.0],
            expected_value: 0.4,
        };
        let shap = explainer.contributions(&[2.0, 2.0]);
        assert!((shap[0] - 0.5).abs() < 1e-12);
        assert!(shap[1].abs() < 1e-12);
    }
}
