//! # Workflows Module
//!
//! The public construction API: one entry point per detector variant,
//! dispatched from a loaded description.

pub mod gfhcal;
pub mod lfhcal;

use crate::core::description::{DetectorDescription, DetectorVariant};
use crate::core::models::ids::VolumeId;
use crate::core::models::material::{Material, MaterialRegistry};
use crate::core::models::sensitive::SensitiveDetector;
use crate::core::models::tree::VolumeTree;
use crate::engine::error::BuildError;
use crate::engine::progress::ProgressReporter;

/// The result of a construction run: the populated volume tree plus the
/// handles a caller needs to inspect or export it.
#[derive(Debug)]
pub struct BuiltDetector {
    pub tree: VolumeTree,
    /// Root of the tree; the envelope is its only child.
    pub world: VolumeId,
    /// The detector envelope assembly holding all modules.
    pub envelope: VolumeId,
    pub name: String,
    pub id: i32,
    pub modules_placed: usize,
    pub sensitive: SensitiveDetector,
}

/// Builds the detector a description selects.
///
/// # Errors
///
/// Returns [`BuildError`] when the description references unknown
/// materials, contains malformed position values, or omits a section the
/// selected variant requires. A position-table length mismatch is not
/// fatal; the affected module type is skipped.
pub fn run(
    description: &DetectorDescription,
    reporter: &ProgressReporter,
) -> Result<BuiltDetector, BuildError> {
    match description.detector.variant {
        DetectorVariant::Lfhcal => lfhcal::build(description, reporter),
        DetectorVariant::Gfhcal => gfhcal::build(description, reporter),
    }
}

/// Registers the description's extra materials on top of the built-in
/// density table.
pub(crate) fn material_registry(description: &DetectorDescription) -> MaterialRegistry {
    let mut registry = MaterialRegistry::with_defaults();
    for entry in &description.materials {
        registry.register(Material::new(&entry.name, entry.density));
    }
    registry
}
