//! Grid variant: modules filled with transverse absorber/readout columns,
//! each column holding a grid of scintillator cells.

use crate::core::description::{DetectorDescription, PositionEntry};
use crate::core::models::ids::VolumeId;
use crate::core::models::material::MaterialRegistry;
use crate::core::models::sensitive::SensitiveDetector;
use crate::core::models::solid::{Box3, Solid};
use crate::core::models::tree::VolumeTree;
use crate::core::models::volume::PresentationTags;
use crate::core::units::{CM, MM};
use crate::core::utils::geometry::translation;
use crate::engine::error::BuildError;
use crate::engine::module::ModuleKind;
use crate::engine::placement::{ModuleCounter, place_modules};
use crate::engine::positions::{PositionList, collect_position_table};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::workflows::{BuiltDetector, material_registry};
use tracing::{error, info};

const WALL_MATERIAL: &str = "Steel235";
const ABSORBER_FRONT_MATERIAL: &str = "Tungsten";
const CELL_MATERIAL: &str = "Polystyrene";
const WRAP_MATERIAL: &str = "Tyvek";
const PCB_MATERIAL: &str = "Fr4";

/// Fixed internal dimensions of one grid module, in cm.
///
/// Unlike the plate variant these are construction constants of the
/// detector design, not description inputs; only the module positions and
/// the overall length come from the description.
#[derive(Debug, Clone, Copy)]
pub struct GridModuleSpec {
    pub width: f64,
    pub height: f64,
    pub sidewall: f64,
    pub absorber: f64,
    pub pcb: f64,
    pub miniframe: f64,
    pub tyvek: f64,
    /// Scintillator cell thickness along x, without wrapping.
    pub cell_width: f64,
    /// Full transverse cell pitch along y and z, wrapping included.
    pub cell_pitch: f64,
    pub steel_length: f64,
    pub tungsten_length: f64,
    /// Pack the leftover interior width with an extra absorber column.
    pub fill_remainder: bool,
}

impl GridModuleSpec {
    pub fn for_kind(kind: ModuleKind) -> Self {
        match kind {
            ModuleKind::EightTower => Self {
                width: 20.0 * CM,
                height: 10.0 * CM,
                sidewall: 2.0 * MM,
                absorber: 14.0 * MM,
                pcb: 1.0 * MM,
                miniframe: 1.0 * MM,
                tyvek: 0.34 * MM,
                cell_width: 4.0 * MM,
                cell_pitch: 5.0 * CM,
                steel_length: 120.0 * CM,
                tungsten_length: 10.0 * CM,
                fill_remainder: false,
            },
            ModuleKind::FourTower => Self {
                width: 10.0 * CM,
                fill_remainder: true,
                ..Self::for_kind(ModuleKind::EightTower)
            },
        }
    }

    pub fn interior_width(&self) -> f64 {
        self.width - 2.0 * self.sidewall
    }

    /// Wrapped cell thickness along x.
    pub fn cell_width_tot(&self) -> f64 {
        self.cell_width + 2.0 * self.tyvek
    }

    /// Thickness of one repeating column: absorber, miniframe, pcb, wrapped
    /// cell stack, miniframe.
    pub fn minibox_thickness(&self) -> f64 {
        self.absorber + self.pcb + self.cell_width_tot() + 2.0 * self.miniframe
    }

    /// Number of repeating columns that fit the interior width.
    pub fn columns(&self) -> usize {
        (self.interior_width() / self.minibox_thickness()) as usize
    }

    /// Cells along z for a module of the given total length; the tungsten
    /// front section carries no cells.
    pub fn cells_z(&self, length: f64) -> usize {
        ((length - self.tungsten_length) / self.cell_pitch) as usize
    }
}

/// Builds one grid module: an air box with steel side walls, one
/// absorber/readout column per repeating slot, and a shared scintillator
/// cell volume placed on the full x-y-z grid.
pub fn build_grid_module(
    tree: &mut VolumeTree,
    base_name: &str,
    module_id: i32,
    kind: ModuleKind,
    length: f64,
    vis: &PresentationTags,
    sens: &mut SensitiveDetector,
) -> VolumeId {
    let spec = GridModuleSpec::for_kind(kind);
    let inner_length = length - spec.tungsten_length;

    let module = tree.add_volume(
        base_name,
        Solid::Box(Box3::new(spec.width / 2.0, spec.height / 2.0, length / 2.0)),
        "Air",
    );
    tree.set_attributes(module, vis);

    let wall = tree.add_volume(
        &format!("{base_name}_FeWall"),
        Solid::Box(Box3::new(spec.sidewall / 2.0, spec.height / 2.0, length / 2.0)),
        WALL_MATERIAL,
    );
    tree.set_attributes(wall, vis);
    for sign in [-1.0, 1.0] {
        tree.place(
            module,
            wall,
            translation(sign * (spec.width - spec.sidewall) / 2.0, 0.0, 0.0),
        );
    }

    // shared column volumes, one definition placed per slot
    let steel = tree.add_volume(
        &format!("{base_name}_FeAbsorber"),
        Solid::Box(Box3::new(
            spec.absorber / 2.0,
            spec.height / 2.0,
            spec.steel_length / 2.0,
        )),
        WALL_MATERIAL,
    );
    let tungsten = tree.add_volume(
        &format!("{base_name}_WAbsorber"),
        Solid::Box(Box3::new(
            spec.absorber / 2.0,
            spec.height / 2.0,
            spec.tungsten_length / 2.0,
        )),
        ABSORBER_FRONT_MATERIAL,
    );
    let miniframe = tree.add_volume(
        &format!("{base_name}_MiniFrame"),
        Solid::Box(Box3::new(spec.miniframe / 2.0, spec.height / 2.0, length / 2.0)),
        WALL_MATERIAL,
    );
    let pcb = tree.add_volume(
        &format!("{base_name}_PCB"),
        Solid::Box(Box3::new(spec.pcb / 2.0, spec.height / 2.0, length / 2.0)),
        PCB_MATERIAL,
    );
    let tyvek = tree.add_volume(
        &format!("{base_name}_Tyvek"),
        Solid::Box(Box3::new(spec.tyvek / 2.0, spec.height / 2.0, inner_length / 2.0)),
        WRAP_MATERIAL,
    );
    let cell = tree.add_volume(
        &format!("{base_name}_Scintillator"),
        Solid::Box(Box3::new(
            spec.cell_width / 2.0,
            (spec.cell_pitch - 2.0 * spec.tyvek) / 2.0,
            (spec.cell_pitch - 2.0 * spec.tyvek) / 2.0,
        )),
        CELL_MATERIAL,
    );
    for vol in [steel, tungsten, miniframe, pcb, tyvek, cell] {
        tree.set_attributes(vol, vis);
    }
    sens.set_type("calorimeter");
    tree.set_sensitive(cell, sens);

    let minibox = spec.minibox_thickness();
    let columns = spec.columns();
    let rows = 2;
    let cells_z = spec.cells_z(length);
    let x0 = -spec.width / 2.0 + spec.sidewall;
    let z_front = -length / 2.0 + spec.tungsten_length / 2.0;

    if spec.fill_remainder {
        let remainder = spec.interior_width() - columns as f64 * minibox;
        let add_steel = tree.add_volume(
            &format!("{base_name}_FeAbsorberAdd"),
            Solid::Box(Box3::new(
                remainder / 2.0,
                spec.height / 2.0,
                spec.steel_length / 2.0,
            )),
            WALL_MATERIAL,
        );
        let add_tungsten = tree.add_volume(
            &format!("{base_name}_WAbsorberAdd"),
            Solid::Box(Box3::new(
                remainder / 2.0,
                spec.height / 2.0,
                spec.tungsten_length / 2.0,
            )),
            ABSORBER_FRONT_MATERIAL,
        );
        tree.set_attributes(add_steel, vis);
        tree.set_attributes(add_tungsten, vis);
        let x_add = spec.width / 2.0 - spec.sidewall - remainder / 2.0;
        tree.place(module, add_steel, translation(x_add, 0.0, 0.0));
        tree.place(module, add_tungsten, translation(x_add, 0.0, z_front));
    }

    for ix in 0..columns {
        let slot = x0 + ix as f64 * minibox;
        tree.place(module, steel, translation(slot + spec.absorber / 2.0, 0.0, 0.0));
        tree.place(
            module,
            tungsten,
            translation(slot + spec.absorber / 2.0, 0.0, z_front),
        );
        tree.place(
            module,
            pcb,
            translation(
                slot + spec.absorber + spec.miniframe + spec.pcb / 2.0,
                0.0,
                0.0,
            ),
        );
        tree.place(
            module,
            miniframe,
            translation(slot + spec.absorber + spec.miniframe / 2.0, 0.0, 0.0),
        );
        tree.place(
            module,
            miniframe,
            translation(slot + minibox - spec.miniframe / 2.0, 0.0, 0.0),
        );
        let z_wrap = -spec.tungsten_length / 2.0;
        tree.place(
            module,
            tyvek,
            translation(
                slot + spec.absorber + spec.miniframe + spec.pcb + spec.tyvek / 2.0,
                0.0,
                z_wrap,
            ),
        );
        tree.place(
            module,
            tyvek,
            translation(
                slot + minibox - spec.miniframe - spec.tyvek / 2.0,
                0.0,
                z_wrap,
            ),
        );

        let cell_x =
            slot + spec.absorber + spec.miniframe + spec.pcb + spec.cell_width_tot() / 2.0;
        for iy in 0..rows {
            for iz in 0..cells_z {
                let pv = tree.place(
                    module,
                    cell,
                    translation(
                        cell_x,
                        -spec.height / 2.0 + spec.cell_pitch / 2.0 + iy as f64 * spec.cell_pitch,
                        -length / 2.0 + spec.cell_pitch / 2.0 + iz as f64 * spec.cell_pitch,
                    ),
                );
                tree.add_phys_vol_id(pv, "module", module_id);
                tree.add_phys_vol_id(pv, "layerx", ix as i32);
                tree.add_phys_vol_id(pv, "layery", iy as i32);
                tree.add_phys_vol_id(pv, "layerz", iz as i32);
            }
        }
    }
    module
}

fn check_materials(registry: &MaterialRegistry) -> Result<(), BuildError> {
    for name in [
        "Air",
        WALL_MATERIAL,
        ABSORBER_FRONT_MATERIAL,
        CELL_MATERIAL,
        WRAP_MATERIAL,
        PCB_MATERIAL,
    ] {
        registry.get(name)?;
    }
    Ok(())
}

fn position_list(
    entries: &[PositionEntry],
    label: &'static str,
) -> Result<Option<PositionList>, BuildError> {
    if entries.is_empty() {
        return Ok(None);
    }
    match collect_position_table(entries)?.validate(label) {
        Ok(list) => Ok(Some(list)),
        Err(e) => {
            error!(error = %e, "Skipping module type with inconsistent position table");
            Ok(None)
        }
    }
}

/// Builds the grid detector.
pub fn build(
    description: &DetectorDescription,
    reporter: &ProgressReporter,
) -> Result<BuiltDetector, BuildError> {
    let det = &description.detector;
    let length = det.dimensions.z;
    let registry = material_registry(description);
    check_materials(&registry)?;

    let eight = position_list(&description.eight_tower_positions, "eight-tower")?;
    let four = position_list(&description.four_tower_positions, "four-tower")?;

    let mut tree = VolumeTree::new();
    let world = tree.add_assembly("world");
    let envelope = tree.add_assembly(&det.name);
    let mut sens = SensitiveDetector::new();
    let mut counter = ModuleCounter::new();
    let vis = description
        .eight_tower_module
        .as_ref()
        .map(|d| PresentationTags::new(&d.vis, &d.region, &d.limits))
        .unwrap_or_default();

    let total =
        eight.as_ref().map_or(0, PositionList::len) + four.as_ref().map_or(0, PositionList::len);
    reporter.phase("placing modules");
    reporter.report(Progress::ModulesStart { total });

    let gx = det.position.x;
    let gy = det.position.y;
    let gz = det.position.z;
    let mut placed = 0;
    for (kind, list) in [(ModuleKind::EightTower, eight), (ModuleKind::FourTower, four)] {
        let Some(list) = list else { continue };
        let name = det.name.clone();
        let label = kind.label();
        let half_w = 0.5 * GridModuleSpec::for_kind(kind).width;
        let vis = vis.clone();
        placed += place_modules(
            &mut tree,
            envelope,
            label,
            &list,
            &mut counter,
            reporter,
            true,
            |tree, id| {
                build_grid_module(
                    tree,
                    &format!("{name}_{label}_mod_{id}"),
                    id,
                    kind,
                    length,
                    &vis,
                    &mut sens,
                )
            },
            |x, y, z| {
                translation(gx - x * CM - half_w, gy - y * CM, gz + z * CM + length / 2.0)
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
