//! # AISC 360 Capacity Checks
//!
//! Batch capacity checks grouped by provision family. Each check follows the
//! pattern:
//!
//! - `*Input` - Named batch parameters (scalars broadcast to every member)
//! - `calculate(&input) -> CheckResult<...>` - Pure, stateless evaluation
//!
//! Every member of a batch is classified and evaluated independently. A
//! precondition that fails for any member fails the whole call.
//!
//! ## Available Checks
//!
//! - [`amplifier`] - Second-order amplifier B1 (Appendix 8)
//! - [`compression`] - Flexural buckling φPn (E3)
//! - [`flexure_major`] - Major-axis flexure of W and C shapes (F2)
//! - [`flexure_minor`] - Minor-axis flexure of I-shapes and channels (F6)
//! - [`flexure_round_hss`] - Round HSS flexure (F8)
//! - [`flexure_tee`] - Tees and double angles (F9, unverified)
//! - [`interaction`] - Combined axial and flexure (H1)

pub mod amplifier;
pub mod compression;
pub mod flexure_major;
pub mod flexure_minor;
pub mod flexure_round_hss;
pub mod flexure_tee;
pub mod interaction;

use serde::{Deserialize, Serialize};

pub use amplifier::AmplifierInput;
pub use compression::CompressionInput;
pub use flexure_major::{MajorAxisInput, MajorAxisSection};
pub use flexure_minor::{MinorAxisInput, MinorAxisSection};
pub use flexure_round_hss::RoundHssInput;
pub use flexure_tee::{TeeFlexure, TeeInput, TeeLimitState};
pub use interaction::{InteractionEquation, InteractionInput};

// Zone and classification reports, named by provision
pub use flexure_major::zones as f2_zones;
pub use flexure_minor::classification as f6_classification;
pub use flexure_round_hss::classification as f8_classification;
pub use interaction::equations as h1_equations;

/// Resistance factor for flexure, φb (AISC 360 F1)
pub const PHI_B: f64 = 0.9;

/// Resistance factor for compression, φc (AISC 360 E1)
pub const PHI_C: f64 = 0.9;

/// AISC 360 provision references used in logs and errors.
pub mod aisc_ref {
    /// Approximate second-order analysis, B1 multiplier
    pub const B1: &str = "AISC 360 A-8-3";
    /// Flexural buckling of members without slender elements
    pub const E3: &str = "AISC 360 E3";
    /// Doubly symmetric compact I-shapes and channels, major axis
    pub const F2: &str = "AISC 360 F2";
    /// I-shapes and channels bent about the minor axis
    pub const F6: &str = "AISC 360 F6";
    /// Round HSS
    pub const F8: &str = "AISC 360 F8";
    /// Tees and double angles loaded in the plane of symmetry
    pub const F9: &str = "AISC 360 F9";
    /// Doubly and singly symmetric members in flexure and compression
    pub const H1: &str = "AISC 360 H1.1";
}

/// Local buckling classification of a cross-section element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compactness {
    /// λ ≤ λp
    Compact,
    /// λp < λ < λr
    Noncompact,
    /// λ ≥ λr
    Slender,
}

impl Compactness {
    /// Classify a width-to-thickness ratio against its limiting ratios
    #[inline]
    pub fn classify(lambda: f64, lambda_p: f64, lambda_r: f64) -> Self {
        if lambda <= lambda_p {
            Compactness::Compact
        } else if lambda >= lambda_r {
            Compactness::Slender
        } else {
            Compactness::Noncompact
        }
    }
}

/// Linear transition from `mp` at λp to `mr` at λr (AISC F6-2 form)
#[inline]
pub(crate) fn interpolate_noncompact(mp: f64, mr: f64, lambda: f64, lambda_p: f64, lambda_r: f64) -> f64 {
    mp - (mp - mr) * (lambda - lambda_p) / (lambda_r - lambda_p)
}

/// How far a result can be trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum Confidence {
    /// The formula follows a verified code provision
    Verified,
    /// The formula has not been independently checked against the provision
    Unverified {
        provision: String,
        notes: Vec<String>,
    },
}

impl Confidence {
    /// True when no caveats are attached
    pub fn is_verified(&self) -> bool {
        matches!(self, Confidence::Verified)
    }
}

/// A result value together with its confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessed<T> {
    /// The computed value
    pub value: T,
    /// Validity signal carried alongside the value
    pub confidence: Confidence,
}

impl<T> Assessed<T> {
    /// Wrap a verified value
    pub fn verified(value: T) -> Self {
        Assessed {
            value,
            confidence: Confidence::Verified,
        }
    }

    /// Wrap an unverified value with notes
    pub fn unverified(value: T, provision: impl Into<String>, notes: Vec<String>) -> Self {
        Assessed {
            value,
            confidence: Confidence::Unverified {
                provision: provision.into(),
                notes,
            },
        }
    }

    /// Discard the confidence signal
    pub fn into_value(self) -> T {
        self.value
    }
}
