//! # Combined Axial Force and Flexure (H1)
//!
//! Demand-capacity ratio for doubly and singly symmetric members under axial
//! force and biaxial bending.
//!
//! ```text
//! Mtotal = |Mrx|/Mcx + |Mry|/Mcy
//! Pr/Pc ≥ 0.2   DCR = Pr/Pc + 8/9·Mtotal        (H1-1a)
//! Pr/Pc < 0.2   DCR = Pr/(2Pc) + Mtotal         (H1-1b)
//! ```
//!
//! The two equations do not meet exactly at Pr/Pc = 0.2. Axial demands must
//! be uniformly signed within a batch; magnitudes are used.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::batch::{map_members, require_finite, require_positive, resolve_len, uniform_magnitudes, Broadcast};
use crate::errors::CheckResult;
use crate::provisions::aisc_ref;

/// Pr/Pc ratio at which H1-1a takes over from H1-1b
pub const AXIAL_RATIO_LIMIT: f64 = 0.2;

/// Input parameters for the interaction check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionInput {
    /// Required axial strength (uniformly signed)
    #[serde(rename = "Pr")]
    pub pr: Broadcast<f64>,

    /// Available axial strength
    #[serde(rename = "Pc")]
    pub pc: Broadcast<f64>,

    /// Required flexural strength about x
    #[serde(rename = "Mrx")]
    pub mrx: Broadcast<f64>,

    /// Available flexural strength about x
    #[serde(rename = "Mcx")]
    pub mcx: Broadcast<f64>,

    /// Required flexural strength about y
    #[serde(rename = "Mry")]
    pub mry: Broadcast<f64>,

    /// Available flexural strength about y
    #[serde(rename = "Mcy")]
    pub mcy: Broadcast<f64>,
}

impl InteractionInput {
    pub fn new(
        pr: impl Into<Broadcast<f64>>,
        pc: impl Into<Broadcast<f64>>,
        mrx: impl Into<Broadcast<f64>>,
        mcx: impl Into<Broadcast<f64>>,
        mry: impl Into<Broadcast<f64>>,
        mcy: impl Into<Broadcast<f64>>,
    ) -> Self {
        InteractionInput {
            pr: pr.into(),
            pc: pc.into(),
            mrx: mrx.into(),
            mcx: mcx.into(),
            mry: mry.into(),
            mcy: mcy.into(),
        }
    }

    /// Validate inputs and resolve the batch length.
    pub fn validate(&self) -> CheckResult<usize> {
        let n = resolve_len(&[
            ("Pr", self.pr.len()),
            ("Pc", self.pc.len()),
            ("Mrx", self.mrx.len()),
            ("Mcx", self.mcx.len()),
            ("Mry", self.mry.len()),
            ("Mcy", self.mcy.len()),
        ])?;
        require_positive("Pc", &self.pc)?;
        require_positive("Mcx", &self.mcx)?;
        require_positive("Mcy", &self.mcy)?;
        require_finite("Mrx", &self.mrx)?;
        require_finite("Mry", &self.mry)?;
        Ok(n)
    }
}

/// Which H1.1 equation applies to a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum InteractionEquation {
    /// Pr/Pc ≥ 0.2
    #[serde(rename = "H1-1a")]
    H1_1a,
    /// Pr/Pc < 0.2
    #[serde(rename = "H1-1b")]
    H1_1b,
}

impl InteractionEquation {
    /// Select the equation for an axial ratio Pr/Pc
    #[inline]
    pub fn for_ratio(axial_ratio: f64) -> Self {
        if axial_ratio >= AXIAL_RATIO_LIMIT {
            InteractionEquation::H1_1a
        } else {
            InteractionEquation::H1_1b
        }
    }
}

/// Demand-capacity ratio for one member
#[inline]
pub fn demand_capacity_ratio(axial_ratio: f64, flexure_ratio: f64) -> f64 {
    match InteractionEquation::for_ratio(axial_ratio) {
        InteractionEquation::H1_1a => axial_ratio + 8.0 / 9.0 * flexure_ratio,
        InteractionEquation::H1_1b => axial_ratio / 2.0 + flexure_ratio,
    }
}

fn axial_ratios(input: &InteractionInput, n: usize) -> CheckResult<Vec<f64>> {
    let pr = uniform_magnitudes("Pr", &input.pr)?;
    Ok(map_members(n, |k| pr.at(k) / input.pc.at(k)))
}

/// Equation applied to every member
pub fn equations(input: &InteractionInput) -> CheckResult<Vec<InteractionEquation>> {
    let n = input.validate()?;
    let ratios = axial_ratios(input, n)?;
    Ok(ratios.into_iter().map(InteractionEquation::for_ratio).collect())
}

/// Calculate the H1.1 demand-capacity ratio for every member.
///
/// # Errors
///
/// * `NonUniformSign` - `Pr` mixes tension and compression, or contains zero
pub fn calculate(input: &InteractionInput) -> CheckResult<Vec<f64>> {
    let n = input.validate()?;
    let ratios = axial_ratios(input, n)?;
    debug!(provision = aisc_ref::H1, members = n, "computing interaction ratios");

    Ok(map_members(n, |k| {
        let flexure = input.mrx.at(k).abs() / input.mcx.at(k) + input.mry.at(k).abs() / input.mcy.at(k);
        demand_capacity_ratio(ratios[k], flexure)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CheckError;

    #[test]
    fn test_high_axial() {
        // 100/400 = 0.25; Mtotal = 50/200 + 10/80 = 0.375
        let input = InteractionInput::new(100.0, 400.0, 50.0, 200.0, 10.0, 80.0);
        let dcr = calculate(&input).unwrap();
        assert!((dcr[0] - 0.58333).abs() < 1e-5);
        assert_eq!(equations(&input).unwrap(), vec![InteractionEquation::H1_1a]);
    }

    #[test]
    fn test_low_axial() {
        // 40/400 = 0.1 → 0.05 + 0.375
        let input = InteractionInput::new(40.0, 400.0, 50.0, 200.0, 10.0, 80.0);
        let dcr = calculate(&input).unwrap();
        assert!((dcr[0] - 0.425).abs() < 1e-12);
        assert_eq!(equations(&input).unwrap(), vec![InteractionEquation::H1_1b]);
    }

    #[test]
    fn test_boundary_uses_h1_1a() {
        let input = InteractionInput::new(80.0, 400.0, 0.0, 200.0, 0.0, 80.0);
        assert_eq!(equations(&input).unwrap(), vec![InteractionEquation::H1_1a]);
        assert!((calculate(&input).unwrap()[0] - 0.2).abs() < 1e-12);

        // Just below the limit H1-1b halves the axial term
        let below = InteractionInput::new(79.99, 400.0, 0.0, 200.0, 0.0, 80.0);
        assert!(calculate(&below).unwrap()[0] < 0.1);
    }

    #[test]
    fn test_compression_sign_and_negative_moments() {
        let tension = InteractionInput::new(vec![100.0, 40.0], 400.0, 50.0, 200.0, 10.0, 80.0);
        let compression = InteractionInput::new(vec![-100.0, -40.0], 400.0, -50.0, 200.0, -10.0, 80.0);
        assert_eq!(calculate(&tension).unwrap(), calculate(&compression).unwrap());
    }

    #[test]
    fn test_mixed_sign_rejected() {
        let input = InteractionInput::new(vec![100.0, -50.0], 400.0, 50.0, 200.0, 10.0, 80.0);
        assert_eq!(calculate(&input).unwrap_err().error_code(), "NON_UNIFORM_SIGN");
        assert!(equations(&input).is_err());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let input = InteractionInput::new(100.0, 400.0, 50.0, vec![200.0, 0.0], 10.0, 80.0);
        match calculate(&input).unwrap_err() {
            CheckError::InvalidInput { field, .. } => assert_eq!(field, "Mcx[1]"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_equation_serialization() {
        let json = serde_json::to_string(&InteractionEquation::H1_1b).unwrap();
        assert_eq!(json, "\"H1-1b\"");
    }
}
