//! Dashboard configuration.

use crate::error::{CredlensError, Result};
use serde::{Deserialize, Serialize};

/// Dashboard parameters, fixed at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Risk value at or above which a loan is denied.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Keep only the first N customers from the feature table.
    /// `None` loads every customer.
    #[serde(default = "default_sample_cap")]
    pub sample_cap: Option<usize>,
    #[serde(default)]
    pub top: TopRange,
}

/// The allowed range for the "number of top criteria" selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopRange {
    #[serde(default = "default_top_min")]
    pub min: usize,
    #[serde(default = "default_top_max")]
    pub max: usize,
    #[serde(default = "default_top_step")]
    pub step: usize,
    #[serde(default = "default_top_default")]
    pub default: usize,
}

// Default value functions
fn default_threshold() -> f64 {
    0.3
}
fn default_sample_cap() -> Option<usize> {
    Some(500)
}
fn default_top_min() -> usize {
    5
}
fn default_top_max() -> usize {
    50
}
fn default_top_step() -> usize {
    5
}
fn default_top_default() -> usize {
    15
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            sample_cap: default_sample_cap(),
            top: TopRange::default(),
        }
    }
}

impl Default for TopRange {
    fn default() -> Self {
        Self {
            min: default_top_min(),
            max: default_top_max(),
            step: default_top_step(),
            default: default_top_default(),
        }
    }
}

impl DashboardConfig {
    /// Validate the configuration before any artifact is loaded.
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(CredlensError::out_of_range(
                "threshold",
                0.0,
                1.0,
                self.threshold,
            ));
        }
        if self.top.min == 0 || self.top.min > self.top.max {
            return Err(CredlensError::out_of_range(
                "top.min",
                1.0,
                self.top.max as f64,
                self.top.min as f64,
            ));
        }
        if self.top.default < self.top.min || self.top.default > self.top.max {
            return Err(CredlensError::out_of_range(
                "top.default",
                self.top.min as f64,
                self.top.max as f64,
                self.top.default as f64,
            ));
        }
        Ok(())
    }

    /// Clamp a requested top-N onto the configured range and step grid.
    pub fn clamp_top(&self, requested: usize) -> usize {
        let clamped = requested.clamp(self.top.min, self.top.max);
        if self.top.step > 1 {
            let steps = (clamped - self.top.min) / self.top.step;
            self.top.min + steps * self.top.step
        } else {
            clamped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_parameters() {
        let c = DashboardConfig::default();
        assert!((c.threshold - 0.3).abs() < 1e-12);
        assert_eq!(c.sample_cap, Some(500));
        assert_eq!(c.top.default, 15);
        assert_eq!((c.top.min, c.top.max, c.top.step), (5, 50, 5));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn threshold_must_be_strictly_inside_unit_interval() {
        let mut c = DashboardConfig::default();
        c.threshold = 0.0;
        assert!(c.validate().is_err());
        c.threshold = 1.0;
        assert!(c.validate().is_err());
        c.threshold = 0.5;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn clamp_top_snaps_to_range_and_step() {
        let c = DashboardConfig::default();
        assert_eq!(c.clamp_top(3), 5);
        assert_eq!(c.clamp_top(17), 15);
        assert_eq!(c.clamp_top(50), 50);
        assert_eq!(c.clamp_top(120), 50);
    }
}
