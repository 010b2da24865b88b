//! # Compression Capacity (E3)
//!
//! Flexural buckling of members without slender elements, about the axis
//! with the smaller radius of gyration.
//!
//! ```text
//! Fe  = π²E / (Lb/r_min)²            (E3-4)
//! Fcr = 0.658^(Fy/Fe)·Fy   Fy/Fe ≤ 2.25   (E3-2)
//! Fcr = 0.877·Fe           Fy/Fe > 2.25   (E3-3)
//! φPn = 0.9·Fcr·Ag
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::batch::{map_members, require_positive, resolve_len, Broadcast};
use crate::errors::CheckResult;
use crate::material::SteelMaterial;
use crate::provisions::{aisc_ref, PHI_C};

/// Fy/Fe ratio separating inelastic from elastic buckling
pub const INELASTIC_LIMIT: f64 = 2.25;

/// Input parameters for compression capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionInput {
    /// Gross area Ag
    #[serde(rename = "A")]
    pub area: Broadcast<f64>,

    /// Radius of gyration about the strong axis
    pub rx: Broadcast<f64>,

    /// Radius of gyration about the weak axis
    pub ry: Broadcast<f64>,

    /// Unbraced length (taken equal for both axes)
    #[serde(rename = "Lb")]
    pub lb: Broadcast<f64>,

    /// Steel (Fy, E)
    pub material: SteelMaterial,
}

impl CompressionInput {
    /// Validate inputs and resolve the batch length.
    pub fn validate(&self) -> CheckResult<usize> {
        let [fy, e, _] = self.material.batch_params();
        let n = resolve_len(&[
            ("A", self.area.len()),
            ("rx", self.rx.len()),
            ("ry", self.ry.len()),
            ("Lb", self.lb.len()),
            fy,
            e,
        ])?;
        require_positive("A", &self.area)?;
        require_positive("rx", &self.rx)?;
        require_positive("ry", &self.ry)?;
        require_positive("Lb", &self.lb)?;
        self.material.validate()?;
        Ok(n)
    }
}

/// Buckling regime of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BucklingMode {
    /// Fy/Fe ≤ 2.25
    Inelastic,
    /// Fy/Fe > 2.25
    Elastic,
}

/// Elastic buckling stress Fe (E3-4)
#[inline]
pub fn elastic_buckling_stress(e: f64, lb: f64, r: f64) -> f64 {
    PI.powi(2) * e / (lb / r).powi(2)
}

/// Critical stress Fcr for a given Fy and Fe (E3-2, E3-3)
#[inline]
pub fn critical_stress(fy: f64, fe: f64) -> f64 {
    match buckling_mode(fy, fe) {
        BucklingMode::Inelastic => 0.658_f64.powf(fy / fe) * fy,
        BucklingMode::Elastic => 0.877 * fe,
    }
}

/// Classify a member's buckling regime
#[inline]
pub fn buckling_mode(fy: f64, fe: f64) -> BucklingMode {
    if fy / fe <= INELASTIC_LIMIT {
        BucklingMode::Inelastic
    } else {
        BucklingMode::Elastic
    }
}

fn member_fe(input: &CompressionInput, k: usize) -> f64 {
    let r_min = input.rx.at(k).min(input.ry.at(k));
    elastic_buckling_stress(input.material.e.at(k), input.lb.at(k), r_min)
}

/// Buckling regime of every member
pub fn modes(input: &CompressionInput) -> CheckResult<Vec<BucklingMode>> {
    let n = input.validate()?;
    Ok(map_members(n, |k| buckling_mode(input.material.fy.at(k), member_fe(input, k))))
}

/// Calculate available compressive strength φPn for every member.
pub fn calculate(input: &CompressionInput) -> CheckResult<Vec<f64>> {
    let n = input.validate()?;
    debug!(provision = aisc_ref::E3, members = n, "computing compression capacity");

    Ok(map_members(n, |k| {
        let fcr = critical_stress(input.material.fy.at(k), member_fe(input, k));
        PHI_C * fcr * input.area.at(k)
    }))
}
