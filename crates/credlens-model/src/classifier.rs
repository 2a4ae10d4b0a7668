//! Classifier ensemble: risk scoring for one customer.

use credlens_core::error::{CredlensError, Result};
use serde::{Deserialize, Serialize};

/// A binary loan-risk classifier.
///
/// Implementations return a two-class probability vector
/// `[P(repay), P(deny)]` for one feature row. All members of an ensemble
/// must accept the same feature vector shape.
pub trait Classifier: Send + Sync {
    fn predict_proba(&self, features: &[f64]) -> [f64; 2];

    /// Number of features this classifier expects, when known.
    fn feature_count(&self) -> Option<usize> {
        None
    }
}

/// A logistic scorer loaded from a JSON artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticScorer {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl Classifier for LogisticScorer {
    fn predict_proba(&self, features: &[f64]) -> [f64; 2] {
        let z: f64 = self.intercept
            + self
                .weights
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>();
        let deny = 1.0 / (1.0 + (-z).exp());
        [1.0 - deny, deny]
    }

    fn feature_count(&self) -> Option<usize> {
        Some(self.weights.len())
    }
}

/// An ordered collection of independently trained classifiers.
///
/// Risk is the unweighted mean of the members' denial probabilities;
/// the empty ensemble is rejected at construction so the mean can never
/// divide by zero.
pub struct ClassifierEnsemble {
    members: Vec<Box<dyn Classifier>>,
}

impl ClassifierEnsemble {
    pub fn new(members: Vec<Box<dyn Classifier>>) -> Result<Self> {
        if members.is_empty() {
            return Err(CredlensError::empty_ensemble("classifier"));
        }
        Ok(Self { members })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Aggregated probability of denial for one feature row.
    ///
    /// Sums the two-class probability vectors elementwise, divides by the
    /// ensemble size, and takes the denial-class component.
    pub fn risk(&self, features: &[f64]) -> f64 {
        let mut acc = [0.0f64; 2];
        for member in &self.members {
            let p = member.predict_proba(features);
            acc[0] += p[0];
            acc[1] += p[1];
        }
        let k = self.members.len() as f64;
        acc[1] / k
    }
}

impl std::fmt::Debug for ClassifierEnsemble {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierEnsemble")
            .field("members", &self.members.len())
            .finish()
    }
}
