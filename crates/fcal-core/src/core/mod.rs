//! # Core Module
//!
//! Stateless building blocks for detector geometry construction: the volume
//! tree and its node types, material and sensitive-detector registries, unit
//! constants, the typed detector-description schema, and channel-map I/O.
//!
//! ## Architecture
//!
//! - **Geometry Model** ([`models`]) - Volume tree, solids, placements,
//!   materials, and sensitive-detector registration
//! - **Detector Description** ([`description`]) - Typed TOML configuration
//!   schema consumed by the construction workflows
//! - **Units** ([`units`]) - Length unit constants for position tables
//! - **I/O** ([`io`]) - Readout channel-map extraction and CSV export
//! - **Utilities** ([`utils`]) - Rigid-transform helpers

pub mod description;
pub mod io;
pub mod models;
pub mod units;
pub mod utils;
