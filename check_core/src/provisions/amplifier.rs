//! # Second-Order Amplifier (B1)
//!
//! Multiplier for P-δ effects per AISC 360 Appendix 8, approximate
//! second-order analysis, about one chosen axis.
//!
//! ```text
//! Pe1 = π²·0.8·τb·E·I / Lb²          (A-8-5)
//! B1  = Cm / (1 − α·Pr/Pe1)          (A-8-3)
//! ```
//!
//! Axial demands must all be compression or all be tension within a batch;
//! magnitudes are used.
//!
//! ## Example
//!
//! ```rust
//! use check_core::provisions::amplifier::{calculate, AmplifierInput};
//!
//! let input = AmplifierInput::new(vec![-100.0, -250.0], 800.0, 144.0);
//! let b1 = calculate(&input).unwrap();
//! assert!(b1.iter().all(|&b| b > 1.0));
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::batch::{map_members, require_positive, resolve_len, uniform_magnitudes, Broadcast};
use crate::errors::{CheckError, CheckResult};
use crate::material::E_STEEL_KSI;
use crate::provisions::aisc_ref;

/// Input parameters for the B1 amplifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmplifierInput {
    /// Required axial strength Pr (uniformly signed)
    #[serde(rename = "Pr")]
    pub pr: Broadcast<f64>,

    /// Moment of inertia about the axis of bending
    #[serde(rename = "I")]
    pub i: Broadcast<f64>,

    /// Unbraced length
    #[serde(rename = "Lb")]
    pub lb: Broadcast<f64>,

    /// Modulus of elasticity
    #[serde(rename = "E")]
    pub e: Broadcast<f64>,

    /// Stiffness reduction parameter τb
    pub tau_b: Broadcast<f64>,

    /// Coefficient for nonuniform moment Cm
    #[serde(rename = "Cm")]
    pub cm: Broadcast<f64>,

    /// 1.0 for LRFD, 1.6 for ASD
    pub alpha: f64,
}

impl AmplifierInput {
    /// LRFD input with E = 29000 ksi, τb = 1.0 and Cm = 1.0
    pub fn new(
        pr: impl Into<Broadcast<f64>>,
        i: impl Into<Broadcast<f64>>,
        lb: impl Into<Broadcast<f64>>,
    ) -> Self {
        AmplifierInput {
            pr: pr.into(),
            i: i.into(),
            lb: lb.into(),
            e: Broadcast::Scalar(E_STEEL_KSI),
            tau_b: Broadcast::Scalar(1.0),
            cm: Broadcast::Scalar(1.0),
            alpha: 1.0,
        }
    }

    /// Builder: set Cm
    pub fn with_cm(mut self, cm: impl Into<Broadcast<f64>>) -> Self {
        self.cm = cm.into();
        self
    }

    /// Builder: set α
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Builder: set E
    pub fn with_e(mut self, e: impl Into<Broadcast<f64>>) -> Self {
        self.e = e.into();
        self
    }

    /// Validate inputs and resolve the batch length.
    pub fn validate(&self) -> CheckResult<usize> {
        let n = resolve_len(&[
            ("Pr", self.pr.len()),
            ("I", self.i.len()),
            ("Lb", self.lb.len()),
            ("E", self.e.len()),
            ("tau_b", self.tau_b.len()),
            ("Cm", self.cm.len()),
        ])?;
        require_positive("I", &self.i)?;
        require_positive("Lb", &self.lb)?;
        require_positive("E", &self.e)?;
        require_positive("tau_b", &self.tau_b)?;
        require_positive("Cm", &self.cm)?;
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(CheckError::invalid_input(
                "alpha",
                self.alpha.to_string(),
                "alpha must be positive (1.0 LRFD, 1.6 ASD)",
            ));
        }
        Ok(n)
    }
}

/// Elastic critical buckling strength of the member in the plane of bending (A-8-5)
#[inline]
pub fn elastic_critical_load(e: f64, i: f64, lb: f64, tau_b: f64) -> f64 {
    PI.powi(2) * 0.8 * tau_b * e * i / lb.powi(2)
}

/// Calculate B1 for every member.
///
/// # Errors
///
/// * `NonUniformSign` - `Pr` mixes tension and compression, or contains zero
/// * `InvalidInput` / `LengthMismatch` - malformed batch
pub fn calculate(input: &AmplifierInput) -> CheckResult<Vec<f64>> {
    let n = input.validate()?;
    let pr = uniform_magnitudes("Pr", &input.pr)?;
    debug!(provision = aisc_ref::B1, members = n, alpha = input.alpha, "computing B1");

    let ratios = map_members(n, |k| {
        let pe1 = elastic_critical_load(input.e.at(k), input.i.at(k), input.lb.at(k), input.tau_b.at(k));
        input.alpha * pr.at(k) / pe1
    });

    let beyond_buckling = ratios.iter().filter(|&&r| r >= 1.0).count();
    if beyond_buckling > 0 {
        warn!(
            provision = aisc_ref::B1,
            members = beyond_buckling,
            "alpha*Pr reaches Pe1; B1 is not meaningful for these members"
        );
    }

    Ok(map_members(n, |k| input.cm.at(k) / (1.0 - ratios[k])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pe1() {
        // π²·0.8·29000·800 / 144² = 8833.9 kips
        let pe1 = elastic_critical_load(29000.0, 800.0, 144.0, 1.0);
        assert!((pe1 - 8833.9).abs() < 0.1);
    }

    #[test]
    fn test_b1_compression_and_tension_agree() {
        let compression = calculate(&AmplifierInput::new(vec![-500.0, -1000.0], 800.0, 144.0)).unwrap();
        let tension = calculate(&AmplifierInput::new(vec![500.0, 1000.0], 800.0, 144.0)).unwrap();
        assert_eq!(compression, tension);

        // B1 = 1 / (1 − 500/8833.9) = 1.0600
        assert!((compression[0] - 1.0600).abs() < 1e-3);
        assert!(compression[1] > compression[0]);
    }

    #[test]
    fn test_b1_scales_with_cm_and_alpha() {
        let lrfd = calculate(&AmplifierInput::new(500.0, 800.0, 144.0)).unwrap()[0];
        let asd = calculate(&AmplifierInput::new(500.0, 800.0, 144.0).with_alpha(1.6)).unwrap()[0];
        let reduced = calculate(&AmplifierInput::new(500.0, 800.0, 144.0).with_cm(0.6)).unwrap()[0];
        assert!(asd > lrfd);
        assert!((reduced - 0.6 * lrfd).abs() < 1e-12);
    }

    #[test]
    fn test_b1_mixed_sign_rejected() {
        let err = calculate(&AmplifierInput::new(vec![100.0, -50.0], 800.0, 144.0)).unwrap_err();
        assert!(matches!(err, CheckError::NonUniformSign { positive: 1, negative: 1, .. }));
    }

    #[test]
    fn test_b1_length_mismatch() {
        let input = AmplifierInput::new(vec![100.0, 50.0], vec![800.0, 900.0, 1000.0], 144.0);
        assert_eq!(calculate(&input).unwrap_err().error_code(), "LENGTH_MISMATCH");
    }

    #[test]
    fn test_b1_beyond_buckling_is_negative() {
        // Pr above Pe1 is returned as computed, with a warning logged
        let b1 = calculate(&AmplifierInput::new(10000.0, 800.0, 144.0)).unwrap();
        assert!(b1[0] < 0.0);
    }
}
