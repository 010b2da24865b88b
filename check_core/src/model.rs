//! # Structural Model Records
//!
//! Joints, frames and areas as read from an analysis model, and the
//! [`ModelSession`] trait through which a model is obtained. The capacity
//! checks never depend on a session; a [`Structure`] is only a source of
//! member arrays such as unbraced lengths.
//!
//! Records are keyed by sequential integers in retrieval order.
//!
//! ## Example
//!
//! ```rust
//! use check_core::model::{InMemorySession, Structure};
//!
//! let session = InMemorySession::from_json(r#"{
//!     "frames": [{
//!         "name": "B1",
//!         "start": { "x": 0.0, "y": 0.0, "z": 144.0 },
//!         "end": { "x": 240.0, "y": 0.0, "z": 144.0 },
//!         "section": "W18X50"
//!     }]
//! }"#).unwrap();
//! let structure = Structure::from_session(&session).unwrap();
//! assert_eq!(structure.frame_lengths().unwrap(), vec![240.0]);
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CheckError, CheckResult};

/// Frames with a squared length below this are degenerate
pub const MIN_SQUARED_LENGTH: f64 = 1e-10;

/// Fixity of the six degrees of freedom (Ux, Uy, Uz, Rx, Ry, Rz).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<bool>", into = "Vec<bool>")]
pub struct Restraint(pub [bool; 6]);

impl Restraint {
    /// Fully fixed support
    pub const FIXED: Restraint = Restraint([true; 6]);
    /// Translations fixed, rotations free
    pub const PINNED: Restraint = Restraint([true, true, true, false, false, false]);

    /// Build from 3 translational flags (rotations free) or all 6 flags.
    pub fn from_slice(flags: &[bool]) -> CheckResult<Self> {
        match *flags {
            [ux, uy, uz] => Ok(Restraint([ux, uy, uz, false, false, false])),
            [ux, uy, uz, rx, ry, rz] => Ok(Restraint([ux, uy, uz, rx, ry, rz])),
            _ => Err(CheckError::invalid_input(
                "restraint",
                format!("{} values", flags.len()),
                "Restraint must have length 3 or 6",
            )),
        }
    }

    /// True when no degree of freedom is restrained
    pub fn is_free(&self) -> bool {
        self.0.iter().all(|&fixed| !fixed)
    }
}

impl TryFrom<Vec<bool>> for Restraint {
    type Error = CheckError;

    fn try_from(flags: Vec<bool>) -> Result<Self, Self::Error> {
        Restraint::from_slice(&flags)
    }
}

impl From<Restraint> for Vec<bool> {
    fn from(restraint: Restraint) -> Self {
        restraint.0.to_vec()
    }
}

/// A point in the model, optionally restrained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    #[serde(default)]
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub restraint: Restraint,
}

impl Joint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Joint {
            name: None,
            x,
            y,
            z,
            restraint: Restraint::default(),
        }
    }

    /// Builder: set the name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: set the restraint from 3 or 6 flags
    pub fn with_restraint(mut self, flags: &[bool]) -> CheckResult<Self> {
        self.restraint = Restraint::from_slice(flags)?;
        Ok(self)
    }

    fn squared_distance(&self, other: &Joint) -> f64 {
        (other.x - self.x).powi(2) + (other.y - self.y).powi(2) + (other.z - self.z).powi(2)
    }
}

/// A line member between two joints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub name: Option<String>,
    pub start: Joint,
    pub end: Joint,

    /// Section property name
    #[serde(default)]
    pub section: Option<String>,

    #[serde(default)]
    pub story: Option<String>,

    /// Local axis rotation in degrees
    #[serde(default)]
    pub angle: f64,

    #[serde(default)]
    pub cardinal_point: Option<u8>,
}

impl Frame {
    pub fn new(start: Joint, end: Joint) -> Self {
        Frame {
            name: None,
            start,
            end,
            section: None,
            story: None,
            angle: 0.0,
            cardinal_point: None,
        }
    }

    /// Builder: set the section property name
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Distance between the end joints.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - the ends coincide
    pub fn length(&self) -> CheckResult<f64> {
        let squared = self.start.squared_distance(&self.end);
        if squared < MIN_SQUARED_LENGTH {
            return Err(CheckError::invalid_input(
                self.name.as_deref().unwrap_or("frame"),
                squared.sqrt().to_string(),
                "Length is zero",
            ));
        }
        Ok(squared.sqrt())
    }
}

/// A planar element bounded by an ordered list of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    #[serde(default)]
    pub name: Option<String>,
    pub points: Vec<Joint>,
}

/// Source of model records, such as a connection to an analysis program.
pub trait ModelSession {
    fn frames(&self) -> CheckResult<BTreeMap<usize, Frame>>;
    fn joints(&self) -> CheckResult<BTreeMap<usize, Joint>>;
    fn areas(&self) -> CheckResult<BTreeMap<usize, Area>>;
}

fn keyed<T: Clone>(records: &[T]) -> BTreeMap<usize, T> {
    records.iter().cloned().enumerate().collect()
}

/// A model held in memory, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemorySession {
    pub frames: Vec<Frame>,
    pub joints: Vec<Joint>,
    pub areas: Vec<Area>,
}

impl InMemorySession {
    pub fn from_json(json: &str) -> CheckResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a model from a JSON file
    pub fn load(path: &Path) -> CheckResult<Self> {
        let mut file = File::open(path)
            .map_err(|e| CheckError::file_error("open", path.display().to_string(), e.to_string()))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| CheckError::file_error("read", path.display().to_string(), e.to_string()))?;

        Self::from_json(&contents)
    }
}

impl ModelSession for InMemorySession {
    fn frames(&self) -> CheckResult<BTreeMap<usize, Frame>> {
        Ok(keyed(&self.frames))
    }

    fn joints(&self) -> CheckResult<BTreeMap<usize, Joint>> {
        Ok(keyed(&self.joints))
    }

    fn areas(&self) -> CheckResult<BTreeMap<usize, Area>> {
        Ok(keyed(&self.areas))
    }
}

/// All records retrieved from one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub frames: BTreeMap<usize, Frame>,
    pub joints: BTreeMap<usize, Joint>,
    pub areas: BTreeMap<usize, Area>,
}

impl Structure {
    pub fn from_session(session: &impl ModelSession) -> CheckResult<Self> {
        let structure = Structure {
            frames: session.frames()?,
            joints: session.joints()?,
            areas: session.areas()?,
        };
        debug!(
            frames = structure.frames.len(),
            joints = structure.joints.len(),
            areas = structure.areas.len(),
            "retrieved model"
        );
        Ok(structure)
    }

    /// Frame lengths in key order, usable directly as an `Lb` batch.
    ///
    /// Fails on the first zero-length frame.
    pub fn frame_lengths(&self) -> CheckResult<Vec<f64>> {
        self.frames.values().map(Frame::length).collect()
    }

    /// Frames assigned the named section, in key order
    pub fn frames_with_section(&self, section: &str) -> Vec<(usize, &Frame)> {
        self.frames
            .iter()
            .filter(|(_, frame)| frame.section.as_deref() == Some(section))
            .map(|(&key, frame)| (key, frame))
            .collect()
    }
}
