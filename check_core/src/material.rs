//! # Steel Material
//!
//! Yield strength and elastic constants for a batch of members. Each value
//! broadcasts, so a batch of one grade is just scalars.
//!
//! ## Example
//!
//! ```rust
//! use check_core::material::SteelMaterial;
//!
//! // A992: Fy = 50 ksi, E = 29000 ksi, G = 11200 ksi
//! let a992 = SteelMaterial::default();
//!
//! // Mixed grades in one batch
//! let mixed = SteelMaterial::new(vec![50.0, 36.0, 46.0]);
//! ```

use serde::{Deserialize, Serialize};

use crate::batch::{require_positive, Broadcast};
use crate::errors::CheckResult;

/// Modulus of elasticity of steel (ksi)
pub const E_STEEL_KSI: f64 = 29000.0;

/// Shear modulus of steel (ksi)
pub const G_STEEL_KSI: f64 = 11200.0;

/// Minimum yield strength of ASTM A992 (ksi)
pub const FY_A992_KSI: f64 = 50.0;

/// Steel material constants for a batch.
///
/// Units must be consistent with the section properties (ksi with inches,
/// or MPa with millimetres); no conversion is performed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelMaterial {
    /// Specified minimum yield strength Fy
    #[serde(rename = "Fy")]
    pub fy: Broadcast<f64>,

    /// Modulus of elasticity E
    #[serde(rename = "E", default = "default_e")]
    pub e: Broadcast<f64>,

    /// Shear modulus G
    #[serde(rename = "G", default = "default_g")]
    pub g: Broadcast<f64>,
}

fn default_e() -> Broadcast<f64> {
    Broadcast::Scalar(E_STEEL_KSI)
}

fn default_g() -> Broadcast<f64> {
    Broadcast::Scalar(G_STEEL_KSI)
}

impl SteelMaterial {
    /// Steel with the given yield strength and default E, G
    pub fn new(fy: impl Into<Broadcast<f64>>) -> Self {
        SteelMaterial {
            fy: fy.into(),
            e: default_e(),
            g: default_g(),
        }
    }

    /// Builder: override the modulus of elasticity
    pub fn with_e(mut self, e: impl Into<Broadcast<f64>>) -> Self {
        self.e = e.into();
        self
    }

    /// Builder: override the shear modulus
    pub fn with_g(mut self, g: impl Into<Broadcast<f64>>) -> Self {
        self.g = g.into();
        self
    }

    /// Validate Fy and E. G is only needed by torsional checks.
    pub fn validate(&self) -> CheckResult<()> {
        require_positive("Fy", &self.fy)?;
        require_positive("E", &self.e)
    }

    /// Validate Fy, E and G
    pub fn validate_with_shear(&self) -> CheckResult<()> {
        self.validate()?;
        require_positive("G", &self.g)
    }

    /// Lengths of the per-member arrays, for batch resolution
    pub fn batch_params(&self) -> [(&'static str, Option<usize>); 3] {
        [("Fy", self.fy.len()), ("E", self.e.len()), ("G", self.g.len())]
    }
}

impl Default for SteelMaterial {
    fn default() -> Self {
        SteelMaterial::new(FY_A992_KSI)
    }
}
