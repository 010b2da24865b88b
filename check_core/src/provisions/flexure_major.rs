//! # Major-Axis Flexure (F2)
//!
//! Doubly symmetric compact I-shaped members and channels bent about their
//! major axis. Nominal strength is the lower of yielding and lateral-torsional
//! buckling, selected per member by unbraced length:
//!
//! ```text
//! Lb ≤ Lp        Mn = Mp = Fy·Zx                                     (F2-1)
//! Lp < Lb ≤ Lr   Mn = Cb[Mp − (Mp − 0.7FySx)(Lb − Lp)/(Lr − Lp)] ≤ Mp (F2-2)
//! Lb > Lr        Mn = Fcr·Sx ≤ Mp                                    (F2-3)
//!
//! Fcr = Cb·π²E/(Lb/rts)² · √(1 + 0.078·Jc/(Sx·ho)·(Lb/rts)²)         (F2-4)
//! Lp  = 1.76·ry·√(E/Fy)                                              (F2-5)
//! Lr  = 1.95·rts·E/(0.7Fy) · √(Jc/(Sx·ho) + √((Jc/(Sx·ho))² + 6.76(0.7Fy/E)²))  (F2-6)
//! c   = 1 for I-shapes, ho/2·√(Iy/Cw) for channels                   (F2-8)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use check_core::material::SteelMaterial;
//! use check_core::provisions::flexure_major::{calculate, MajorAxisInput, MajorAxisSection};
//! use check_core::section::PropertyBundle;
//!
//! // W18X50
//! let bundle = PropertyBundle::from_json(r#"{
//!     "Type": ["W"], "ho": [17.4], "J": [1.24], "Sx": [88.9],
//!     "Zx": [101.0], "ry": [1.65], "rts": [1.98]
//! }"#).unwrap();
//! let section = MajorAxisSection::from_bundle(&bundle).unwrap();
//! let input = MajorAxisInput::new(section, 60.0, SteelMaterial::default());
//! let phi_mnx = calculate(&input).unwrap();
//! assert!((phi_mnx[0] - 0.9 * 50.0 * 101.0).abs() < 1e-9);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::batch::{map_members, require_positive, resolve_len, Broadcast};
use crate::errors::{CheckError, CheckResult};
use crate::material::SteelMaterial;
use crate::provisions::{aisc_ref, PHI_B};
use crate::section::{require_kinds, PropertyBundle, SectionKind};

/// Section families covered by F2
pub const F2_KINDS: [SectionKind; 2] = [SectionKind::WideFlange, SectionKind::Channel];

/// Major-axis section properties for a batch of W and C shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajorAxisSection {
    /// Section family (W or C only)
    #[serde(rename = "Type")]
    pub kinds: Broadcast<SectionKind>,

    /// Distance between flange centroids
    pub ho: Broadcast<f64>,

    /// Torsional constant
    #[serde(rename = "J")]
    pub j: Broadcast<f64>,

    /// Elastic section modulus about x
    #[serde(rename = "Sx")]
    pub sx: Broadcast<f64>,

    /// Plastic section modulus about x
    #[serde(rename = "Zx")]
    pub zx: Broadcast<f64>,

    /// Radius of gyration about y
    pub ry: Broadcast<f64>,

    /// Effective radius of gyration for lateral-torsional buckling
    pub rts: Broadcast<f64>,

    /// Weak-axis moment of inertia (channels only)
    #[serde(rename = "Iy", default, skip_serializing_if = "Option::is_none")]
    pub iy: Option<Broadcast<f64>>,

    /// Warping constant (channels only)
    #[serde(rename = "Cw", default, skip_serializing_if = "Option::is_none")]
    pub cw: Option<Broadcast<f64>>,
}

impl MajorAxisSection {
    /// Unpack a property bundle.
    ///
    /// `Type`, `ho`, `J`, `Sx`, `Zx`, `ry` and `rts` are required. `Iy` and
    /// `Cw` are required only when the batch contains a channel.
    pub fn from_bundle(bundle: &PropertyBundle) -> CheckResult<Self> {
        let kinds = bundle.kinds()?;
        let has_channel = kinds.any(|k| k == SectionKind::Channel);
        let channel_column = |name: &str| -> CheckResult<Option<Broadcast<f64>>> {
            if has_channel {
                bundle.column(name).map(Some)
            } else {
                Ok(bundle.optional_column(name))
            }
        };

        let section = MajorAxisSection {
            ho: bundle.column("ho")?,
            j: bundle.column("J")?,
            sx: bundle.column("Sx")?,
            zx: bundle.column("Zx")?,
            ry: bundle.column("ry")?,
            rts: bundle.column("rts")?,
            iy: channel_column("Iy")?,
            cw: channel_column("Cw")?,
            kinds,
        };
        section.validate()?;
        Ok(section)
    }

    /// Lengths of the per-member arrays, for batch resolution
    pub fn batch_params(&self) -> [(&'static str, Option<usize>); 9] {
        [
            ("Type", self.kinds.len()),
            ("ho", self.ho.len()),
            ("J", self.j.len()),
            ("Sx", self.sx.len()),
            ("Zx", self.zx.len()),
            ("ry", self.ry.len()),
            ("rts", self.rts.len()),
            ("Iy", self.iy.as_ref().and_then(Broadcast::len)),
            ("Cw", self.cw.as_ref().and_then(Broadcast::len)),
        ]
    }

    /// Validate the section and resolve its batch length.
    pub fn validate(&self) -> CheckResult<usize> {
        let n = resolve_len(&self.batch_params())?;
        require_kinds(aisc_ref::F2, &self.kinds, &F2_KINDS)?;
        require_positive("ho", &self.ho)?;
        require_positive("J", &self.j)?;
        require_positive("Sx", &self.sx)?;
        require_positive("Zx", &self.zx)?;
        require_positive("ry", &self.ry)?;
        require_positive("rts", &self.rts)?;

        if self.kinds.any(|k| k == SectionKind::Channel) {
            let iy = self.iy.as_ref().ok_or_else(|| CheckError::missing_field("Iy"))?;
            let cw = self.cw.as_ref().ok_or_else(|| CheckError::missing_field("Cw"))?;
            require_positive("Iy", iy)?;
            require_positive("Cw", cw)?;
        }
        Ok(n)
    }

    /// Coefficient c (F2-8a, F2-8b)
    fn c(&self, k: usize) -> f64 {
        match (self.kinds.at(k), &self.iy, &self.cw) {
            (SectionKind::Channel, Some(iy), Some(cw)) => self.ho.at(k) / 2.0 * (iy.at(k) / cw.at(k)).sqrt(),
            _ => 1.0,
        }
    }
}

/// Input parameters for major-axis flexure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajorAxisInput {
    /// Section properties
    pub section: MajorAxisSection,

    /// Unbraced length of the compression flange
    #[serde(rename = "Lb")]
    pub lb: Broadcast<f64>,

    /// Lateral-torsional buckling modification factor
    #[serde(rename = "Cb")]
    pub cb: Broadcast<f64>,

    /// Steel (Fy, E)
    pub material: SteelMaterial,
}

impl MajorAxisInput {
    /// Input with Cb = 1.0
    pub fn new(section: MajorAxisSection, lb: impl Into<Broadcast<f64>>, material: SteelMaterial) -> Self {
        MajorAxisInput {
            section,
            lb: lb.into(),
            cb: Broadcast::Scalar(1.0),
            material,
        }
    }

    /// Builder: set Cb
    pub fn with_cb(mut self, cb: impl Into<Broadcast<f64>>) -> Self {
        self.cb = cb.into();
        self
    }

    /// Validate inputs and resolve the batch length.
    pub fn validate(&self) -> CheckResult<usize> {
        self.section.validate()?;
        let [fy, e, _] = self.material.batch_params();
        let mut params = self.section.batch_params().to_vec();
        params.extend([("Lb", self.lb.len()), ("Cb", self.cb.len()), fy, e]);
        let n = resolve_len(&params)?;
        require_positive("Lb", &self.lb)?;
        require_positive("Cb", &self.cb)?;
        self.material.validate()?;
        Ok(n)
    }
}

/// Lateral-torsional buckling zone of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LtbZone {
    /// Lb ≤ Lp, yielding governs
    Plastic,
    /// Lp < Lb ≤ Lr
    Inelastic,
    /// Lb > Lr
    Elastic,
}

/// Per-member quantities shared by classification and strength.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MemberLtb {
    mp: f64,
    lp: f64,
    lr: f64,
    zone: LtbZone,
}

fn member_ltb(input: &MajorAxisInput, k: usize) -> MemberLtb {
    let s = &input.section;
    let (fy, e) = (input.material.fy.at(k), input.material.e.at(k));
    let (sx, ho, rts) = (s.sx.at(k), s.ho.at(k), s.rts.at(k));
    let jc = s.j.at(k) * s.c(k) / (sx * ho);
    let lb = input.lb.at(k);

    let mp = fy * s.zx.at(k);
    let lp = 1.76 * s.ry.at(k) * (e / fy).sqrt();
    let lr = 1.95 * rts * e / (0.7 * fy) * (jc + (jc.powi(2) + 6.76 * (0.7 * fy / e).powi(2)).sqrt()).sqrt();

    let zone = if lb <= lp {
        LtbZone::Plastic
    } else if lb > lr {
        LtbZone::Elastic
    } else {
        LtbZone::Inelastic
    };
    MemberLtb { mp, lp, lr, zone }
}

fn nominal_moment(input: &MajorAxisInput, k: usize) -> f64 {
    let MemberLtb { mp, lp, lr, zone } = member_ltb(input, k);
    let s = &input.section;
    let (fy, e) = (input.material.fy.at(k), input.material.e.at(k));
    let (cb, lb, sx, rts) = (input.cb.at(k), input.lb.at(k), s.sx.at(k), s.rts.at(k));

    match zone {
        LtbZone::Plastic => mp,
        LtbZone::Inelastic => {
            let mn = cb * (mp - (mp - 0.7 * fy * sx) * (lb - lp) / (lr - lp));
            mn.min(mp)
        }
        LtbZone::Elastic => {
            let jc = s.j.at(k) * s.c(k) / (sx * s.ho.at(k));
            let slenderness_sq = (lb / rts).powi(2);
            let fcr = cb * PI.powi(2) * e / slenderness_sq * (1.0 + 0.078 * jc * slenderness_sq).sqrt();
            (fcr * sx).min(mp)
        }
    }
}

/// Limiting lengths (Lp, Lr) of every member
pub fn limiting_lengths(input: &MajorAxisInput) -> CheckResult<Vec<(f64, f64)>> {
    let n = input.validate()?;
    Ok(map_members(n, |k| {
        let ltb = member_ltb(input, k);
        (ltb.lp, ltb.lr)
    }))
}

/// Lateral-torsional buckling zone of every member
pub fn zones(input: &MajorAxisInput) -> CheckResult<Vec<LtbZone>> {
    let n = input.validate()?;
    Ok(map_members(n, |k| member_ltb(input, k).zone))
}

/// Calculate available major-axis flexural strength φMnx for every member.
///
/// # Errors
///
/// * `UnsupportedSection` - a member is not a W or C shape
/// * `MissingField` - a channel is present but `Iy` or `Cw` is not
pub fn calculate(input: &MajorAxisInput) -> CheckResult<Vec<f64>> {
    let n = input.validate()?;
    debug!(provision = aisc_ref::F2, members = n, "computing major-axis flexure");
    Ok(map_members(n, |k| PHI_B * nominal_moment(input, k)))
}

/// Calculate φMnx from a property bundle.
pub fn calculate_from_bundle(
    bundle: &PropertyBundle,
    lb: impl Into<Broadcast<f64>>,
    cb: impl Into<Broadcast<f64>>,
    material: SteelMaterial,
) -> CheckResult<Vec<f64>> {
    let section = MajorAxisSection::from_bundle(bundle)?;
    calculate(&MajorAxisInput::new(section, lb, material).with_cb(cb))
}
