//! # Minor-Axis Flexure (F6)
//!
//! I-shaped members and channels bent about their minor axis. Yielding and
//! flange local buckling are the limit states.
//!
//! ```text
//! Mp   = min(Fy·Zy, 1.6·Fy·Sy)                    (F6-1)
//! λpf  = 0.38·√(E/Fy),  λrf = 1.0·√(E/Fy)         (Table B4.1b Case 10)
//! compact      Mn = Mp
//! noncompact   Mn = Mp − (Mp − 0.7FySy)(λ − λpf)/(λrf − λpf)   (F6-2)
//! slender      Mn = 0.69·E·Sy / λ²                (F6-3, F6-4)
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::batch::{map_members, require_positive, resolve_len, Broadcast};
use crate::errors::{CheckError, CheckResult};
use crate::material::SteelMaterial;
use crate::provisions::{aisc_ref, interpolate_noncompact, Compactness, PHI_B};
use crate::section::PropertyBundle;

/// Minor-axis section properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinorAxisSection {
    /// Elastic section modulus about y
    #[serde(rename = "Sy")]
    pub sy: Broadcast<f64>,

    /// Plastic section modulus about y
    #[serde(rename = "Zy")]
    pub zy: Broadcast<f64>,

    /// Flange slenderness bf/2tf (b/tf for channels)
    pub lambda_f: Broadcast<f64>,
}

impl MinorAxisSection {
    /// Unpack a property bundle (`Sy`, `Zy` and `bf/2tf` or `lambda_f`).
    pub fn from_bundle(bundle: &PropertyBundle) -> CheckResult<Self> {
        let lambda_f = bundle
            .optional_column("bf/2tf")
            .or_else(|| bundle.optional_column("lambda_f"))
            .ok_or_else(|| CheckError::missing_field("bf/2tf"))?;
        let section = MinorAxisSection {
            sy: bundle.column("Sy")?,
            zy: bundle.column("Zy")?,
            lambda_f,
        };
        resolve_len(&section.batch_params())?;
        Ok(section)
    }

    /// Lengths of the per-member arrays, for batch resolution
    pub fn batch_params(&self) -> [(&'static str, Option<usize>); 3] {
        [
            ("Sy", self.sy.len()),
            ("Zy", self.zy.len()),
            ("lambda_f", self.lambda_f.len()),
        ]
    }
}

/// Input parameters for minor-axis flexure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinorAxisInput {
    /// Section properties
    pub section: MinorAxisSection,

    /// Steel (Fy, E)
    pub material: SteelMaterial,
}

impl MinorAxisInput {
    /// Validate inputs and resolve the batch length.
    pub fn validate(&self) -> CheckResult<usize> {
        let [fy, e, _] = self.material.batch_params();
        let mut params = self.section.batch_params().to_vec();
        params.extend([fy, e]);
        let n = resolve_len(&params)?;
        require_positive("Sy", &self.section.sy)?;
        require_positive("Zy", &self.section.zy)?;
        require_positive("lambda_f", &self.section.lambda_f)?;
        self.material.validate()?;
        Ok(n)
    }
}

/// Limiting flange slenderness (λpf, λrf) for a flange in flexure
#[inline]
pub fn flange_limits(fy: f64, e: f64) -> (f64, f64) {
    let root = (e / fy).sqrt();
    (0.38 * root, root)
}

fn member_class(input: &MinorAxisInput, k: usize) -> (Compactness, f64, f64) {
    let (lambda_pf, lambda_rf) = flange_limits(input.material.fy.at(k), input.material.e.at(k));
    let class = Compactness::classify(input.section.lambda_f.at(k), lambda_pf, lambda_rf);
    (class, lambda_pf, lambda_rf)
}

fn nominal_moment(input: &MinorAxisInput, k: usize) -> f64 {
    let (fy, e) = (input.material.fy.at(k), input.material.e.at(k));
    let s = &input.section;
    let (sy, lambda) = (s.sy.at(k), s.lambda_f.at(k));
    let mp = (fy * s.zy.at(k)).min(1.6 * fy * sy);

    match member_class(input, k) {
        (Compactness::Compact, _, _) => mp,
        (Compactness::Noncompact, lambda_pf, lambda_rf) => {
            interpolate_noncompact(mp, 0.7 * fy * sy, lambda, lambda_pf, lambda_rf)
        }
        (Compactness::Slender, _, _) => 0.69 * e * sy / lambda.powi(2),
    }
}

/// Flange classification of every member
pub fn classification(input: &MinorAxisInput) -> CheckResult<Vec<Compactness>> {
    let n = input.validate()?;
    Ok(map_members(n, |k| member_class(input, k).0))
}

/// Calculate available minor-axis flexural strength φMny for every member.
pub fn calculate(input: &MinorAxisInput) -> CheckResult<Vec<f64>> {
    let n = input.validate()?;
    debug!(provision = aisc_ref::F6, members = n, "computing minor-axis flexure");
    Ok(map_members(n, |k| PHI_B * nominal_moment(input, k)))
}

/// Calculate φMny from a property bundle.
pub fn calculate_from_bundle(bundle: &PropertyBundle, material: SteelMaterial) -> CheckResult<Vec<f64>> {
    let section = MinorAxisSection::from_bundle(bundle)?;
    calculate(&MinorAxisInput { section, material })
}
