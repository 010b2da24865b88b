//! # Round HSS Flexure (F8)
//!
//! Round hollow structural sections with D/t < 0.45·E/Fy. Members outside
//! that range are rejected; the provision does not extrapolate.
//!
//! ```text
//! Mp  = Fy·Z                                   (F8-1)
//! λp  = 0.07·E/Fy,  λr = 0.31·E/Fy             (Table B4.1b Case 20)
//! compact      Mn = Mp
//! noncompact   Mn = (0.021·E/(D/t) + Fy)·S ≤ Mp    (F8-2)
//! slender      Mn = Fcr·S ≤ Mp,  Fcr = 0.33·E/(D/t)  (F8-3, F8-4)
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::batch::{first_member_where, map_members, require_positive, resolve_len, Broadcast};
use crate::errors::{CheckError, CheckResult};
use crate::material::SteelMaterial;
use crate::provisions::{aisc_ref, Compactness, PHI_B};

/// Upper bound on D/t, as a multiple of E/Fy
pub const APPLICABILITY_LIMIT: f64 = 0.45;

/// Input parameters for round HSS flexure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundHssInput {
    /// Outside diameter
    #[serde(rename = "D")]
    pub d: Broadcast<f64>,

    /// Design wall thickness
    pub t: Broadcast<f64>,

    /// Elastic section modulus
    #[serde(rename = "S")]
    pub s: Broadcast<f64>,

    /// Plastic section modulus
    #[serde(rename = "Z")]
    pub z: Broadcast<f64>,

    /// Steel (Fy, E)
    pub material: SteelMaterial,
}

impl RoundHssInput {
    fn d_over_t(&self, k: usize) -> f64 {
        self.d.at(k) / self.t.at(k)
    }

    /// Validate inputs, including the D/t applicability bound.
    ///
    /// # Errors
    ///
    /// * `NotApplicable` - D/t ≥ 0.45·E/Fy for some member
    pub fn validate(&self) -> CheckResult<usize> {
        let [fy, e, _] = self.material.batch_params();
        let n = resolve_len(&[
            ("D", self.d.len()),
            ("t", self.t.len()),
            ("S", self.s.len()),
            ("Z", self.z.len()),
            fy,
            e,
        ])?;
        require_positive("D", &self.d)?;
        require_positive("t", &self.t)?;
        require_positive("S", &self.s)?;
        require_positive("Z", &self.z)?;
        self.material.validate()?;

        let limit = |k: usize| APPLICABILITY_LIMIT * self.material.e.at(k) / self.material.fy.at(k);
        if let Some(k) = first_member_where(n, |k| self.d_over_t(k) >= limit(k)) {
            return Err(CheckError::not_applicable(
                aisc_ref::F8,
                k,
                format!("D/t = {:.1} is not below 0.45E/Fy = {:.1}", self.d_over_t(k), limit(k)),
            ));
        }
        Ok(n)
    }
}

/// Limiting D/t ratios (λp, λr) for round HSS in flexure
#[inline]
pub fn wall_limits(fy: f64, e: f64) -> (f64, f64) {
    (0.07 * e / fy, 0.31 * e / fy)
}

fn member_class(input: &RoundHssInput, k: usize) -> Compactness {
    let (lambda_p, lambda_r) = wall_limits(input.material.fy.at(k), input.material.e.at(k));
    Compactness::classify(input.d_over_t(k), lambda_p, lambda_r)
}

fn nominal_moment(input: &RoundHssInput, k: usize) -> f64 {
    let (fy, e) = (input.material.fy.at(k), input.material.e.at(k));
    let d_t = input.d_over_t(k);
    let s = input.s.at(k);
    let mp = fy * input.z.at(k);

    match member_class(input, k) {
        Compactness::Compact => mp,
        Compactness::Noncompact => ((0.021 * e / d_t + fy) * s).min(mp),
        Compactness::Slender => {
            let fcr = 0.33 * e / d_t;
            (fcr * s).min(mp)
        }
    }
}

/// Wall classification of every member
pub fn classification(input: &RoundHssInput) -> CheckResult<Vec<Compactness>> {
    let n = input.validate()?;
    Ok(map_members(n, |k| member_class(input, k)))
}

/// Calculate available flexural strength φMn for every member.
pub fn calculate(input: &RoundHssInput) -> CheckResult<Vec<f64>> {
    let n = input.validate()?;
    debug!(provision = aisc_ref::F8, members = n, "computing round HSS flexure");
    Ok(map_members(n, |k| PHI_B * nominal_moment(input, k)))
}
