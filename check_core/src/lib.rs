//! # check_core - AISC 360 Steel Member Capacity Checks
//!
//! `check_core` computes code-defined capacities and interaction ratios for
//! batches of steel members. Every check is a pure function over named
//! parameters that are either one value for the whole batch or one value per
//! member, and returns one result per member.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Batch-First**: Scalars broadcast; arrays must agree on length
//! - **JSON-First**: All inputs, outputs and errors implement Serialize/Deserialize
//! - **Fail Whole Batch**: A precondition violated by any member rejects the call
//!
//! ## Quick Start
//!
//! ```rust
//! use check_core::material::SteelMaterial;
//! use check_core::provisions::{compression, interaction};
//! use check_core::provisions::{CompressionInput, InteractionInput};
//!
//! let column = CompressionInput {
//!     area: 10.0.into(),
//!     rx: 4.0.into(),
//!     ry: 2.0.into(),
//!     lb: vec![120.0, 180.0].into(),
//!     material: SteelMaterial::default(),
//! };
//! let phi_pn = compression::calculate(&column).unwrap();
//!
//! let check = InteractionInput::new(vec![-120.0, -120.0], phi_pn, 50.0, 200.0, 0.0, 80.0);
//! let dcr = interaction::calculate(&check).unwrap();
//! assert!(dcr[1] > dcr[0]);
//! ```
//!
//! ## Modules
//!
//! - [`provisions`] - The capacity checks (B1, E3, F2, F6, F8, F9, H1)
//! - [`batch`] - Broadcastable parameters and batch length resolution
//! - [`section`] - Section families and property bundles
//! - [`material`] - Steel material properties
//! - [`settings`] - Design method and default material
//! - [`model`] - Structural model records and the model-session trait
//! - [`errors`] - Structured error types

pub mod batch;
pub mod errors;
pub mod material;
pub mod model;
pub mod provisions;
pub mod section;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use batch::Broadcast;
pub use errors::{CheckError, CheckResult};
pub use material::SteelMaterial;
pub use model::{ModelSession, Structure};
pub use provisions::{Assessed, Compactness, Confidence};
pub use section::{PropertyBundle, SectionKind};
pub use settings::{CheckSettings, DesignMethod};
