//! # Tee and Double-Angle Flexure (F9)
//!
//! Tees and double angles loaded in the plane of symmetry. Four limit states
//! are evaluated per member and the lowest governs:
//!
//! ```text
//! 1. Yielding        Mp = min(Fy·Zx, 1.6·Fy·Sx)   stem in tension        (F9-2)
//!                    Mp = min(Fy·Zx, Fy·Sx)       stem in compression    (F9-4)
//! 2. LTB             Mcr = π·√(E·Iy·G·J)/Lb · (B + √(1 + B²))
//!                    B = ±2.3·(d/Lb)·√(Iy/J), + when the stem is in tension
//! 3. Flange local    Sxc = Iy/y
//!    buckling        compact: no limit
//!                    noncompact: Mp − (Mp − 0.7FySxc)(λ − λpf)/(λrf − λpf) ≤ 1.6FySx
//!                    slender: 0.7·E·Sxc/λ²
//! 4. Stem local      d/tw ≤ 0.84√(E/Fy):  Fcr = Fy
//!    buckling        d/tw ≤ 1.03√(E/Fy):  Fcr = Fy(2.55 − 1.84(d/tw)√(Fy/E))
//!                    otherwise:           Fcr = 0.69E/(d/tw)²
//!                    Mn = Fcr·Sx, only when the stem is in compression
//! ```
//!
//! ## Confidence
//!
//! These formulas have not been independently verified against the code
//! text. Every call logs a warning and the result is returned as
//! [`Assessed`] with an unverified
//! [`Confidence`](crate::provisions::Confidence). Tees and double angles
//! share one set of limit states; which sub-clauses apply to each family,
//! and how the stem-tension flag should select capacities for double
//! angles, are open questions.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::batch::{map_members, require_positive, resolve_len, Broadcast};
use crate::errors::CheckResult;
use crate::material::SteelMaterial;
use crate::provisions::flexure_minor::flange_limits;
use crate::provisions::{aisc_ref, interpolate_noncompact, Assessed, Compactness, PHI_B};
use crate::section::{require_kinds, SectionKind};

/// Section families covered by F9
pub const F9_KINDS: [SectionKind; 2] = [SectionKind::Tee, SectionKind::DoubleAngle];

/// Input parameters for tee and double-angle flexure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeeInput {
    /// Section family (WT or 2L)
    #[serde(rename = "Type")]
    pub kinds: Broadcast<SectionKind>,

    /// True where the stem is in flexural tension
    pub stem_tension: Broadcast<bool>,

    /// Depth of the tee or width of the outstanding angle leg
    pub d: Broadcast<f64>,

    /// Stem (web) thickness
    pub tw: Broadcast<f64>,

    /// Elastic section modulus about x
    #[serde(rename = "Sx")]
    pub sx: Broadcast<f64>,

    /// Plastic section modulus about x
    #[serde(rename = "Zx")]
    pub zx: Broadcast<f64>,

    /// Torsional constant
    #[serde(rename = "J")]
    pub j: Broadcast<f64>,

    /// Weak-axis moment of inertia
    #[serde(rename = "Iy")]
    pub iy: Broadcast<f64>,

    /// Distance to the compression flange
    pub y: Broadcast<f64>,

    /// Flange slenderness bf/2tf
    pub lambda_f: Broadcast<f64>,

    /// Unbraced length
    #[serde(rename = "Lb")]
    pub lb: Broadcast<f64>,

    /// Steel (Fy, E, G)
    pub material: SteelMaterial,
}

impl TeeInput {
    /// Validate inputs and resolve the batch length.
    pub fn validate(&self) -> CheckResult<usize> {
        let [fy, e, g] = self.material.batch_params();
        let n = resolve_len(&[
            ("Type", self.kinds.len()),
            ("stem_tension", self.stem_tension.len()),
            ("d", self.d.len()),
            ("tw", self.tw.len()),
            ("Sx", self.sx.len()),
            ("Zx", self.zx.len()),
            ("J", self.j.len()),
            ("Iy", self.iy.len()),
            ("y", self.y.len()),
            ("lambda_f", self.lambda_f.len()),
            ("Lb", self.lb.len()),
            fy,
            e,
            g,
        ])?;
        require_kinds(aisc_ref::F9, &self.kinds, &F9_KINDS)?;
        require_positive("d", &self.d)?;
        require_positive("tw", &self.tw)?;
        require_positive("Sx", &self.sx)?;
        require_positive("Zx", &self.zx)?;
        require_positive("J", &self.j)?;
        require_positive("Iy", &self.iy)?;
        require_positive("y", &self.y)?;
        require_positive("lambda_f", &self.lambda_f)?;
        require_positive("Lb", &self.lb)?;
        self.material.validate_with_shear()?;
        Ok(n)
    }
}

/// Limit states of F9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeeLimitState {
    Yielding,
    LateralTorsionalBuckling,
    FlangeLocalBuckling,
    StemLocalBuckling,
}

/// F9 strengths for a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeeFlexure {
    /// Available flexural strength φMn
    pub phi_mn: Vec<f64>,
    /// Limit state that produced φMn, per member
    pub governing: Vec<TeeLimitState>,
}

/// Nominal strengths of the four limit states; `INFINITY` where one does not apply.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LimitStrengths {
    yielding: f64,
    ltb: f64,
    flb: f64,
    slb: f64,
}

impl LimitStrengths {
    fn governing(&self) -> (f64, TeeLimitState) {
        [
            (self.yielding, TeeLimitState::Yielding),
            (self.ltb, TeeLimitState::LateralTorsionalBuckling),
            (self.flb, TeeLimitState::FlangeLocalBuckling),
            (self.slb, TeeLimitState::StemLocalBuckling),
        ]
        .into_iter()
        .fold((f64::INFINITY, TeeLimitState::Yielding), |best, candidate| {
            if candidate.0 < best.0 {
                candidate
            } else {
                best
            }
        })
    }
}

/// Stem critical stress for a given d/tw
#[inline]
pub fn stem_critical_stress(d_tw: f64, fy: f64, e: f64) -> f64 {
    let root = (e / fy).sqrt();
    if d_tw <= 0.84 * root {
        fy
    } else if d_tw <= 1.03 * root {
        fy * (2.55 - 1.84 * d_tw * (fy / e).sqrt())
    } else {
        0.69 * e / d_tw.powi(2)
    }
}

fn limit_strengths(input: &TeeInput, k: usize) -> LimitStrengths {
    let (fy, e, g) = (input.material.fy.at(k), input.material.e.at(k), input.material.g.at(k));
    let stem_tension = input.stem_tension.at(k);
    let (d, sx, iy, j, lb) = (input.d.at(k), input.sx.at(k), input.iy.at(k), input.j.at(k), input.lb.at(k));
    let lambda = input.lambda_f.at(k);

    let yielding = if stem_tension {
        (fy * input.zx.at(k)).min(1.6 * fy * sx)
    } else {
        (fy * input.zx.at(k)).min(fy * sx)
    };

    let sign = if stem_tension { 1.0 } else { -1.0 };
    let b = sign * 2.3 * (d / lb) * (iy / j).sqrt();
    let root = (1.0 + b * b).sqrt();
    // B + √(1 + B²) rewritten for B < 0 to avoid cancellation at short Lb
    let shape = if b < 0.0 { 1.0 / (root - b) } else { b + root };
    let ltb = PI * (e * iy * g * j).sqrt() / lb * shape;

    let (lambda_pf, lambda_rf) = flange_limits(fy, e);
    let sxc = iy / input.y.at(k);
    let flb = match Compactness::classify(lambda, lambda_pf, lambda_rf) {
        Compactness::Compact => f64::INFINITY,
        Compactness::Noncompact => {
            interpolate_noncompact(yielding, 0.7 * fy * sxc, lambda, lambda_pf, lambda_rf).min(1.6 * fy * sx)
        }
        Compactness::Slender => 0.7 * e * sxc / lambda.powi(2),
    };

    let slb = if stem_tension {
        f64::INFINITY
    } else {
        stem_critical_stress(d / input.tw.at(k), fy, e) * sx
    };

    LimitStrengths { yielding, ltb, flb, slb }
}

fn unverified_notes() -> Vec<String> {
    vec![
        "F9 formulas have not been independently verified against the code provision".to_string(),
        "tees and double angles use the same limit states; governing sub-clauses per family are unresolved"
            .to_string(),
        "handling of the stem-tension flag when selecting capacities is unresolved".to_string(),
    ]
}

/// Calculate available flexural strength φMn for tees and double angles.
///
/// The result is always [`Confidence::Unverified`](crate::provisions::Confidence::Unverified).
pub fn calculate(input: &TeeInput) -> CheckResult<Assessed<TeeFlexure>> {
    let n = input.validate()?;
    warn!(
        provision = aisc_ref::F9,
        members = n,
        "F9 provisions might not be correctly implemented"
    );
    debug!(provision = aisc_ref::F9, members = n, "computing tee flexure");

    let per_member = map_members(n, |k| limit_strengths(input, k).governing());
    let (phi_mn, governing) = per_member
        .into_iter()
        .map(|(mn, state)| (PHI_B * mn, state))
        .unzip();

    Ok(Assessed::unverified(
        TeeFlexure { phi_mn, governing },
        aisc_ref::F9,
        unverified_notes(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CheckError;
    use crate::provisions::Confidence;

    /// WT8X25
    fn wt8x25(stem_tension: impl Into<Broadcast<bool>>, lb: impl Into<Broadcast<f64>>) -> TeeInput {
        TeeInput {
            kinds: SectionKind::Tee.into(),
            stem_tension: stem_tension.into(),
            d: 8.13.into(),
            tw: 0.380.into(),
            sx: 6.78.into(),
            zx: 12.0.into(),
            j: 0.567.into(),
            iy: 18.6.into(),
            y: 1.89.into(),
            lambda_f: 5.61.into(),
            lb: lb.into(),
            material: SteelMaterial::default(),
        }
    }

    #[test]
    fn test_always_unverified() {
        let result = calculate(&wt8x25(true, 24.0)).unwrap();
        assert!(!result.confidence.is_verified());
        match result.confidence {
            Confidence::Unverified { provision, notes } => {
                assert_eq!(provision, aisc_ref::F9);
                assert_eq!(notes.len(), 3);
            }
            Confidence::Verified => unreachable!(),
        }
    }

    #[test]
    fn test_stem_tension_yielding() {
        // 1.6·Fy·Sx = 542.4 < Fy·Zx = 600
        let result = calculate(&wt8x25(true, vec![24.0, 240.0])).unwrap().into_value();
        for phi_mn in &result.phi_mn {
            assert!((phi_mn - 0.9 * 542.4).abs() < 1e-9);
        }
        assert_eq!(result.governing, vec![TeeLimitState::Yielding; 2]);
    }

    #[test]
    fn test_stem_compression_local_buckling() {
        // d/tw = 21.4: Fcr = Fy(2.55 − 1.84·21.4·√(50/29000)) = 45.77 ksi
        let result = calculate(&wt8x25(false, 24.0)).unwrap().into_value();
        assert!((result.phi_mn[0] - 279.29).abs() < 0.01);
        assert_eq!(result.governing, vec![TeeLimitState::StemLocalBuckling]);
    }

    #[test]
    fn test_stem_compression_ltb() {
        let result = calculate(&wt8x25(false, 600.0)).unwrap().into_value();
        let b: f64 = -2.3 * (8.13 / 600.0) * (18.6_f64 / 0.567).sqrt();
        let mcr = PI * (29000.0 * 18.6 * 11200.0 * 0.567_f64).sqrt() / 600.0 * (b + (1.0 + b * b).sqrt());
        assert!((result.phi_mn[0] - 0.9 * mcr).abs() < 1e-9);
        assert_eq!(result.governing, vec![TeeLimitState::LateralTorsionalBuckling]);
    }

    #[test]
    fn test_ltb_sign_depends_on_stem() {
        let tension = limit_strengths(&wt8x25(true, 240.0), 0);
        let compression = limit_strengths(&wt8x25(false, 240.0), 0);
        assert!(tension.ltb > compression.ltb);
    }

    #[test]
    fn test_slender_flange() {
        let mut input = wt8x25(true, 24.0);
        input.lambda_f = 30.0.into();
        let result = calculate(&input).unwrap().into_value();
        let sxc = 18.6 / 1.89;
        assert!((result.phi_mn[0] - 0.9 * 0.7 * 29000.0 * sxc / 900.0).abs() < 1e-9);
        assert_eq!(result.governing, vec![TeeLimitState::FlangeLocalBuckling]);
    }

    #[test]
    fn test_noncompact_flange() {
        // λf = 15 lies between λpf = 9.15 and λrf = 24.08
        let mut input = wt8x25(vec![true, false], 24.0);
        input.lambda_f = 15.0.into();
        let result = calculate(&input).unwrap().into_value();

        let (lambda_pf, lambda_rf) = flange_limits(50.0, 29000.0);
        let sxc = 18.6 / 1.89;
        let mp = 1.6 * 50.0 * 6.78;
        let expected = mp - (mp - 0.7 * 50.0 * sxc) * (15.0 - lambda_pf) / (lambda_rf - lambda_pf);
        assert!((result.phi_mn[0] - 0.9 * expected).abs() < 1e-9);
        assert!((result.phi_mn[0] - 418.378).abs() < 1e-3);
        assert_eq!(
            result.governing,
            vec![TeeLimitState::FlangeLocalBuckling, TeeLimitState::StemLocalBuckling]
        );
        assert!((result.phi_mn[1] - 279.29).abs() < 0.01);
    }

    #[test]
    fn test_noncompact_flange_starts_from_yielding() {
        // Just above λpf the flange strength approaches the stem-dependent Mp
        let (lambda_pf, _) = flange_limits(50.0, 29000.0);
        for stem_tension in [true, false] {
            let mut input = wt8x25(stem_tension, 24.0);
            input.lambda_f = (lambda_pf + 1e-9).into();
            let strengths = limit_strengths(&input, 0);
            assert!((strengths.flb - strengths.yielding).abs() < 1e-6);
            assert!(strengths.flb <= 1.6 * 50.0 * 6.78);
        }
    }

    #[test]
    fn test_short_lb_stem_compression_ltb_stays_finite() {
        // Mcr → π√(E·Iy·G·J) / (4.6·d·√(Iy/J)) as Lb → 0
        let limit = PI * (29000.0 * 18.6 * 11200.0 * 0.567_f64).sqrt() / (4.6 * 8.13 * (18.6_f64 / 0.567).sqrt());
        for lb in [1e-3, 1e-6, 1e-9] {
            let strengths = limit_strengths(&wt8x25(false, lb), 0);
            assert!((strengths.ltb - limit).abs() / limit < 1e-3);
        }
        let result = calculate(&wt8x25(false, vec![1e-3, 1e-6, 1e-9])).unwrap().into_value();
        for phi_mn in &result.phi_mn {
            assert!((phi_mn - 279.29).abs() < 0.01);
        }
    }

    #[test]
    fn test_compact_flange_has_no_limit() {
        let strengths = limit_strengths(&wt8x25(true, 24.0), 0);
        assert!(strengths.flb.is_infinite());
        assert!(strengths.slb.is_infinite());
    }

    #[test]
    fn test_stem_critical_stress_zones() {
        let root = (29000.0_f64 / 50.0).sqrt();
        assert_eq!(stem_critical_stress(0.5 * root, 50.0, 29000.0), 50.0);
        let noncompact = stem_critical_stress(0.9 * root, 50.0, 29000.0);
        assert!(noncompact < 50.0 && noncompact > 0.69 * 50.0 / (1.03 * 1.03));
        let slender = stem_critical_stress(2.0 * root, 50.0, 29000.0);
        assert!((slender - 0.69 * 50.0 / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_double_angle_accepted_wide_flange_rejected() {
        let mut input = wt8x25(true, 24.0);
        input.kinds = SectionKind::DoubleAngle.into();
        assert!(calculate(&input).is_ok());

        input.kinds = vec![SectionKind::WideFlange].into();
        assert!(matches!(
            calculate(&input).unwrap_err(),
            CheckError::UnsupportedSection { member: 0, .. }
        ));
    }

    #[test]
    fn test_requires_shear_modulus() {
        let mut input = wt8x25(true, 24.0);
        input.material = SteelMaterial::default().with_g(0.0);
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_per_member_stem_flag() {
        let mut input = wt8x25(true, 24.0);
        input.stem_tension = vec![true, false].into();
        let result = calculate(&input).unwrap().into_value();
        assert_eq!(
            result.governing,
            vec![TeeLimitState::Yielding, TeeLimitState::StemLocalBuckling]
        );
    }
}
