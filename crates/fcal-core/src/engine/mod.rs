//! # Engine Module
//!
//! Stateful construction logic: the builders that turn a typed detector
//! description into a populated volume tree.
//!
//! ## Architecture
//!
//! - **Slices** ([`slices`]) - Layer expansion into a flat longitudinal
//!   slice sequence
//! - **Positions** ([`positions`]) - Module position table collection and
//!   validation
//! - **Plates** ([`plates`]) - Parameterized absorber and filler plates
//!   with notch cut-outs
//! - **Towers** ([`towers`]) - Scintillator plates segmented into readout
//!   towers
//! - **Assembler** ([`assembler`]) - Full module assembly, slice stacking,
//!   and casing
//! - **Placement** ([`placement`]) - Module placement driver with the shared
//!   module counter
//! - **Progress** ([`progress`]) - Construction progress reporting
//! - **Error** ([`error`]) - Construction error types

pub mod assembler;
pub mod error;
pub mod module;
pub mod placement;
pub mod plates;
pub mod positions;
pub mod progress;
pub mod slices;
pub mod towers;
