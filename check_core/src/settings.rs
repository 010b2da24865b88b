//! # Check Settings
//!
//! Analysis-wide defaults: design method, default steel and the stiffness
//! reduction used by the second-order amplifier. Settings are plain JSON;
//! any key left out takes its default.
//!
//! ```json
//! {
//!   "design_method": "Asd",
//!   "material": { "Fy": 50.0, "E": 29000.0, "G": 11200.0 },
//!   "tau_b": 1.0
//! }
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::batch::Broadcast;
use crate::errors::{CheckError, CheckResult};
use crate::material::SteelMaterial;
use crate::provisions::amplifier::AmplifierInput;

/// ASD vs LRFD design methodology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DesignMethod {
    /// Allowable Stress Design
    Asd,
    /// Load and Resistance Factor Design
    #[default]
    Lrfd,
}

impl DesignMethod {
    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            DesignMethod::Asd => "ASD (Allowable Stress Design)",
            DesignMethod::Lrfd => "LRFD (Load and Resistance Factor Design)",
        }
    }

    /// Short abbreviation
    pub fn code(&self) -> &'static str {
        match self {
            DesignMethod::Asd => "ASD",
            DesignMethod::Lrfd => "LRFD",
        }
    }

    /// Load-type factor alpha for second-order effects (AISC 360 Appendix 8)
    pub fn alpha(&self) -> f64 {
        match self {
            DesignMethod::Asd => 1.6,
            DesignMethod::Lrfd => 1.0,
        }
    }
}

impl std::fmt::Display for DesignMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Analysis-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckSettings {
    /// Design method (selects the B1 load-type factor)
    pub design_method: DesignMethod,

    /// Default steel for members that do not specify their own
    pub material: SteelMaterial,

    /// Stiffness reduction parameter tau_b (AISC 360 Chapter C)
    pub tau_b: f64,
}

impl Default for CheckSettings {
    fn default() -> Self {
        CheckSettings {
            design_method: DesignMethod::default(),
            material: SteelMaterial::default(),
            tau_b: 1.0,
        }
    }
}

impl CheckSettings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> CheckResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> CheckResult<Self> {
        let mut file = File::open(path).map_err(|e| {
            CheckError::file_error("open", path.display().to_string(), e.to_string())
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| {
            CheckError::file_error("read", path.display().to_string(), e.to_string())
        })?;

        serde_json::from_str(&contents).map_err(|e| CheckError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })
    }

    /// Build a B1 input using these settings for E, tau_b and alpha
    pub fn amplifier(
        &self,
        pr: impl Into<Broadcast<f64>>,
        i: impl Into<Broadcast<f64>>,
        lb: impl Into<Broadcast<f64>>,
        cm: impl Into<Broadcast<f64>>,
    ) -> AmplifierInput {
        AmplifierInput {
            pr: pr.into(),
            i: i.into(),
            lb: lb.into(),
            e: self.material.e.clone(),
            tau_b: Broadcast::Scalar(self.tau_b),
            cm: cm.into(),
            alpha: self.design_method.alpha(),
        }
    }
}
