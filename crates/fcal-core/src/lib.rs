//! # fcalgeo Core Library
//!
//! A parametric geometry builder for segmented forward hadronic calorimeters:
//! it constructs a nested hierarchy of solid volumes (absorber plates,
//! scintillator tiles, structural casing) from a compact set of numeric
//! parameters, then places instances of that hierarchy into a world volume
//! according to per-module position tables, attaching a stable hierarchical
//! identifier to every sensitive element.
//!
//! ## Architectural Philosophy
//!
//! The library is built as a strict three-layer architecture to keep the
//! construction engine testable in isolation from any rendering or
//! simulation backend.
//!
//! - **[`core`]: The Foundation.** The volume-tree data model (`VolumeTree`,
//!   `VolumeNode`, `Placement`), material and sensitive-detector registries,
//!   unit constants, the typed detector description schema, and readout
//!   channel-map export.
//!
//! - **[`engine`]: The Construction Logic.** Plate and tower builders, the
//!   longitudinal module assembler, slice-stack expansion, position-table
//!   validation, and instance placement with the shared module counter.
//!
//! - **[`workflows`]: The Public API.** One driver per detector variant
//!   (longitudinally stacked `LFHCAL`, transverse-grid `GFHCAL`) turning a
//!   `DetectorDescription` into a fully placed, identifier-tagged
//!   [`workflows::BuiltDetector`].

pub mod core;
pub mod engine;
pub mod workflows;
