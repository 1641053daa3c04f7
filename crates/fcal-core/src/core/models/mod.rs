//! # Geometry Model
//!
//! The in-memory representation of a constructed detector: an arena-backed
//! volume tree in which every node is a named solid with an optional
//! material, presentation attributes, and an optional sensitive-detector
//! type, and every placement is a rigid transform plus a list of integer
//! identifier fields.
//!
//! Ownership is strictly hierarchical: a volume may be placed repeatedly
//! under a single parent but never shared between two parents, and all
//! volumes and placements are owned by the [`tree::VolumeTree`] arena.

pub mod ids;
pub mod material;
pub mod sensitive;
pub mod solid;
pub mod tree;
pub mod volume;
