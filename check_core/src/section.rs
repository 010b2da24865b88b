//! # Section Families and Property Bundles
//!
//! Each flexure provision applies to a closed set of section families. The
//! family is a tagged enum rather than a string so that applicability is
//! checked exhaustively.
//!
//! Section properties arrive either as explicit per-parameter batches or as
//! a [`PropertyBundle`]: a table export with a `Type` column and one named
//! column per property, as produced by a shapes database or a model session.
//!
//! ```json
//! {
//!   "Type": ["W", "C"],
//!   "ho": [13.4, 9.6],
//!   "J": [4.06, 0.371],
//!   "Sx": [143.0, 20.7],
//!   "Zx": [157.0, 24.0],
//!   "ry": [3.70, 0.669],
//!   "rts": [4.10, 0.865],
//!   "Iy": [362.0, 2.27],
//!   "Cw": [16000.0, 45.5]
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::batch::Broadcast;
use crate::errors::{CheckError, CheckResult};

/// Section family classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    /// Doubly symmetric I-shape (W, M, S, HP)
    #[serde(rename = "W", alias = "M", alias = "S", alias = "HP")]
    WideFlange,
    /// Channel (C, MC)
    #[serde(rename = "C", alias = "MC")]
    Channel,
    /// Structural tee (WT, MT, ST)
    #[serde(rename = "WT", alias = "MT", alias = "ST")]
    Tee,
    /// Double angle (2L)
    #[serde(rename = "2L")]
    DoubleAngle,
    /// Round hollow structural section or pipe
    #[serde(rename = "HSS", alias = "PIPE")]
    RoundHss,
}

impl SectionKind {
    /// Parse from AISC type code
    pub fn from_aisc_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "W" | "M" | "S" | "HP" => Some(SectionKind::WideFlange),
            "C" | "MC" => Some(SectionKind::Channel),
            "WT" | "MT" | "ST" => Some(SectionKind::Tee),
            "2L" => Some(SectionKind::DoubleAngle),
            "HSS" | "PIPE" => Some(SectionKind::RoundHss),
            _ => None,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionKind::WideFlange => "Wide Flange (W)",
            SectionKind::Channel => "Channel (C)",
            SectionKind::Tee => "Tee (WT)",
            SectionKind::DoubleAngle => "Double Angle (2L)",
            SectionKind::RoundHss => "HSS Round",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl From<SectionKind> for Broadcast<SectionKind> {
    fn from(kind: SectionKind) -> Self {
        Broadcast::Scalar(kind)
    }
}

/// Reject any member whose section kind is not in `allowed`.
pub fn require_kinds(provision: &str, kinds: &Broadcast<SectionKind>, allowed: &[SectionKind]) -> CheckResult<()> {
    for (i, kind) in kinds.values().enumerate() {
        if !allowed.contains(&kind) {
            return Err(CheckError::unsupported_section(provision, i, kind.display_name()));
        }
    }
    Ok(())
}

/// Named property columns for a batch of members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyBundle {
    /// Section family per member
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub kinds: Option<Vec<SectionKind>>,

    /// Property columns keyed by AISC property name (`Sx`, `Zx`, `ry`, ...)
    #[serde(flatten)]
    pub columns: BTreeMap<String, Vec<f64>>,
}

impl PropertyBundle {
    /// Create an empty bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bundle from a JSON object of columns
    pub fn from_json(json: &str) -> CheckResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder: set the section kind column
    pub fn with_kinds(mut self, kinds: Vec<SectionKind>) -> Self {
        self.kinds = Some(kinds);
        self
    }

    /// Builder: add a property column
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.columns.insert(name.into(), values);
        self
    }

    /// Required section kind column
    pub fn kinds(&self) -> CheckResult<Broadcast<SectionKind>> {
        self.kinds
            .clone()
            .map(Broadcast::Array)
            .ok_or_else(|| CheckError::missing_field("Type"))
    }

    /// Required property column
    pub fn column(&self, name: &str) -> CheckResult<Broadcast<f64>> {
        self.columns
            .get(name)
            .cloned()
            .map(Broadcast::Array)
            .ok_or_else(|| CheckError::missing_field(name))
    }

    /// Property column that may be absent
    pub fn optional_column(&self, name: &str) -> Option<Broadcast<f64>> {
        self.columns.get(name).cloned().map(Broadcast::Array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_aisc_code() {
        assert_eq!(SectionKind::from_aisc_code("W"), Some(SectionKind::WideFlange));
        assert_eq!(SectionKind::from_aisc_code("hp"), Some(SectionKind::WideFlange));
        assert_eq!(SectionKind::from_aisc_code("MC"), Some(SectionKind::Channel));
        assert_eq!(SectionKind::from_aisc_code("2L"), Some(SectionKind::DoubleAngle));
        assert_eq!(SectionKind::from_aisc_code("L"), None);
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&SectionKind::DoubleAngle).unwrap();
        assert_eq!(json, "\"2L\"");
        let parsed: Vec<SectionKind> = serde_json::from_str("[\"W\", \"MC\", \"ST\", \"PIPE\"]").unwrap();
        assert_eq!(
            parsed,
            vec![
                SectionKind::WideFlange,
                SectionKind::Channel,
                SectionKind::Tee,
                SectionKind::RoundHss
            ]
        );
    }

    #[test]
    fn test_require_kinds() {
        let kinds: Broadcast<SectionKind> = vec![SectionKind::WideFlange, SectionKind::Tee].into();
        let err = require_kinds("AISC 360 F2", &kinds, &[SectionKind::WideFlange, SectionKind::Channel]).unwrap_err();
        assert_eq!(err, CheckError::unsupported_section("AISC 360 F2", 1, "Tee (WT)"));
    }

    #[test]
    fn test_bundle_from_json() {
        let bundle = PropertyBundle::from_json(r#"{"Type": ["W"], "Sx": [143.0], "Zx": [157.0]}"#).unwrap();
        assert_eq!(bundle.kinds, Some(vec![SectionKind::WideFlange]));
        assert_eq!(bundle.column("Sx").unwrap(), Broadcast::Array(vec![143.0]));
        assert_eq!(bundle.column("rts").unwrap_err(), CheckError::missing_field("rts"));
    }

    #[test]
    fn test_bundle_unknown_type_rejected() {
        let err = PropertyBundle::from_json(r#"{"Type": ["L"], "Sx": [1.0]}"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
