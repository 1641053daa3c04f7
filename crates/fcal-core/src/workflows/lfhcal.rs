//! Plate-stack variant: modules built as a longitudinal stack of absorber,
//! filler, and scintillator plates inside a steel casing.

use crate::core::description::{DetectorDescription, ModuleDimensions, PositionEntry};
use crate::core::models::material::MaterialRegistry;
use crate::core::models::sensitive::SensitiveDetector;
use crate::core::models::tree::VolumeTree;
use crate::core::units::MM;
use crate::core::utils::geometry::translation;
use crate::engine::assembler::{CASING_MATERIAL, build_module};
use crate::engine::error::BuildError;
use crate::engine::module::{ModuleKind, ModuleParams};
use crate::engine::placement::{ModuleCounter, place_modules};
use crate::engine::positions::{PositionList, collect_position_table};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::slices::{SliceDescriptor, SliceRole, expand_layers, stack_span};
use crate::engine::towers::SEPARATOR_MATERIAL;
use crate::workflows::{BuiltDetector, material_registry};
use tracing::{error, info, warn};

fn check_materials(
    registry: &MaterialRegistry,
    slices: &[SliceDescriptor],
) -> Result<(), BuildError> {
    for slice in slices {
        registry.get(&slice.material)?;
    }
    registry.get(CASING_MATERIAL)?;
    registry.get(SEPARATOR_MATERIAL)?;
    Ok(())
}

/// Resolves one module type: its dimension record joined with its position
/// table. `None` when the description omits the type entirely or when the
/// position table is inconsistent (logged and skipped, not fatal).
fn prepare_module_type(
    kind: ModuleKind,
    dims: Option<&ModuleDimensions>,
    positions: &[PositionEntry],
    length: f64,
    label: &'static str,
) -> Result<Option<(ModuleParams, PositionList)>, BuildError> {
    if positions.is_empty() {
        return Ok(None);
    }
    let dims = dims.ok_or(BuildError::MissingSection(match kind {
        ModuleKind::EightTower => "eight_tower_module",
        ModuleKind::FourTower => "four_tower_module",
    }))?;
    let list = match collect_position_table(positions)?.validate(label) {
        Ok(list) => list,
        Err(e) => {
            error!(error = %e, "Skipping module type with inconsistent position table");
            return Ok(None);
        }
    };
    Ok(Some((
        ModuleParams::from_dimensions(kind, dims, length),
        list,
    )))
}

/// Builds the plate-stack detector.
pub fn build(
    description: &DetectorDescription,
    reporter: &ProgressReporter,
) -> Result<BuiltDetector, BuildError> {
    let det = &description.detector;
    let length = det.dimensions.z;
    let registry = material_registry(description);

    reporter.phase("expanding layer stack");
    let slices = expand_layers(&description.layers)?;
    check_materials(&registry, &slices)?;
    info!(
        slices = slices.len(),
        sensitive = slices.iter().filter(|s| s.role == SliceRole::Sensitive).count(),
        "Expanded layer stack"
    );
    let span = stack_span(&slices);
    reporter.finish_phase();

    let eight = prepare_module_type(
        ModuleKind::EightTower,
        description.eight_tower_module.as_ref(),
        &description.eight_tower_positions,
        length,
        "eight-tower",
    )?;
    let four = prepare_module_type(
        ModuleKind::FourTower,
        description.four_tower_module.as_ref(),
        &description.four_tower_positions,
        length,
        "four-tower",
    )?;

    let mut tree = VolumeTree::new();
    let world = tree.add_assembly("world");
    let envelope = tree.add_assembly(&det.name);
    let mut sens = SensitiveDetector::new();
    let mut counter = ModuleCounter::new();

    let total = eight.as_ref().map_or(0, |(_, l)| l.len())
        + four.as_ref().map_or(0, |(_, l)| l.len());
    reporter.phase("placing modules");
    reporter.report(Progress::ModulesStart { total });

    let gx = det.position.x;
    let gy = det.position.y;
    let gz = det.position.z;
    let mut placed = 0;
    for (params, list) in [eight, four].into_iter().flatten() {
        let name = det.name.clone();
        let label = params.kind.label();
        if span > params.interior_length() {
            warn!(
                kind = label,
                span,
                usable = params.interior_length(),
                "Slice stack overflows the span between front and back walls"
            );
        }
        let half_w = 0.5 * params.width;
        let half_h = 0.5 * params.height;
        placed += place_modules(
            &mut tree,
            envelope,
            label,
            &list,
            &mut counter,
            reporter,
            false,
            |tree, id| build_module(tree, &format!("{name}_{label}_{id}"), id, &params, &slices, &mut sens),
            |x, y, z| {
                translation(
                    gx - x * MM - half_w,
                    gy - y * MM - half_h,
                    gz + z * MM + length / 2.0,
                )
            },
        );
    }
    reporter.finish_phase();

    let pv = tree.place(world, envelope, translation(0.0, 0.0, 0.0));
    tree.add_phys_vol_id(pv, "system", det.id);
    info!(modules = placed, sensitive = sens.registered(), "Built detector");

    Ok(BuiltDetector {
        tree,
        world,
        envelope,
        name: det.name.clone(),
        id: det.id,
        modules_placed: placed,
        sensitive: sens,
    })
}
