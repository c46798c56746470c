//! Procedural decoration: site selection, template stamping, and the
//! per-feature placement drivers.
//!
//! Placement failure is an expected, frequent outcome and is always a
//! `false` return. Drivers never leave the grid half-written under
//! [`StampPolicy::AllOrNothing`], the default policy of the standard
//! catalog.
#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod decorate;
pub mod dripleaf;
pub mod scatter;
pub mod stamp;
pub mod toadstool;
pub mod tree;

pub use catalog::{FeatureCatalog, FeatureConfig};
pub use config::{DripleafConfig, ToadstoolConfig, TreeConfig};
pub use decorate::{DecorationStats, decorate};
pub use scatter::Scatter;
pub use stamp::{StampPolicy, Template, has_clearance, stamp, write_if};
