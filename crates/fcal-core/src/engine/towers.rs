use crate::core::models::ids::VolumeId;
use crate::core::models::sensitive::SensitiveDetector;
use crate::core::models::solid::{Box3, Solid};
use crate::core::models::tree::VolumeTree;
use crate::core::models::volume::PresentationTags;
use crate::core::utils::geometry::{transform, translation};
use crate::engine::module::ModuleParams;
use std::f64::consts::PI;

/// Material of the reflective separator sheets between towers.
pub const SEPARATOR_MATERIAL: &str = "Ti02Epoxy";

/// Visualization attribute of the separator sheets.
const SEPARATOR_VIS: &str = "LayerSeparatorVis";

/// Readout tower geometry shared by all towers of one scintillator plate.
#[derive(Debug, Clone, Copy)]
pub struct TowerLayout {
    pub tower_width: f64,
    pub tower_height: f64,
    pub columns: usize,
    pub separator: f64,
}

impl TowerLayout {
    /// Splits the module interior into the tower grid: `columns` towers per
    /// row separated by `separator`-wide sheets, two rows separated by one
    /// sheet, with the notch bands excluded from the tower height.
    pub fn for_module(params: &ModuleParams) -> Self {
        let columns = params.kind.tower_columns();
        let separator = params.separator_depth;
        let tower_width =
            (params.interior_width() - (columns as f64 - 1.0) * separator) / columns as f64;
        let tower_height =
            (params.interior_height() - separator - 2.0 * params.notch_depth) / 2.0;
        Self {
            tower_width,
            tower_height,
            columns,
            separator,
        }
    }

    /// Local transform of tower `index`, row-major from the top-right.
    ///
    /// Columns count from positive x downwards; the top row sits at
    /// positive y. Odd-column towers are rotated half a turn about y and
    /// bottom-row towers half a turn about x, so every tower's notch tile
    /// faces its module edge.
    pub fn tower_transform(&self, index: usize) -> nalgebra::Isometry3<f64> {
        let col = index % self.columns;
        let row = index / self.columns;
        let pitch = self.tower_width + self.separator;
        let x = ((self.columns as f64 - 1.0) / 2.0 - col as f64) * pitch;
        let y_mag = 0.5 * self.tower_height + 0.5 * self.separator;
        let y = if row == 0 { y_mag } else { -y_mag };
        let rot_y = if col % 2 == 0 { PI } else { 0.0 };
        let rot_x = if row == 0 { 0.0 } else { PI };
        transform((0.0, rot_y, rot_x), (x, y, 0.0))
    }
}

/// Builds one readout tower: the main scintillator tile plus the small
/// notch tile that reaches into the plate's notch band. Both read out.
pub fn build_tower(
    tree: &mut VolumeTree,
    name: &str,
    layout: &TowerLayout,
    params: &ModuleParams,
    thickness: f64,
    material: &str,
    tags: &PresentationTags,
    sens: &mut SensitiveDetector,
) -> VolumeId {
    let tower = tree.add_assembly(name);

    let main = tree.add_volume(
        &format!("{name}_main"),
        Solid::Box(Box3::new(
            layout.tower_width / 2.0,
            layout.tower_height / 2.0,
            thickness / 2.0,
        )),
        material,
    );
    sens.set_type("calorimeter");
    tree.set_sensitive(main, sens);
    tree.set_attributes(main, tags);
    let pv = tree.place(tower, main, translation(0.0, 0.0, 0.0));
    tree.add_phys_vol_id(pv, "part", 0);

    let notch = tree.add_volume(
        &format!("{name}_notch"),
        Solid::Box(Box3::new(
            params.notch_width_scin / 4.0,
            params.notch_depth / 2.0,
            thickness / 2.0,
        )),
        material,
    );
    tree.set_sensitive(notch, sens);
    tree.set_attributes(notch, tags);
    let pv = tree.place(
        tower,
        notch,
        translation(
            layout.tower_width / 2.0 - params.notch_width_scin / 4.0,
            layout.tower_height / 2.0 + 0.5 * params.notch_depth,
            0.0,
        ),
    );
    tree.add_phys_vol_id(pv, "part", 1);

    tower
}

fn place_separators(
    tree: &mut VolumeTree,
    plate: VolumeId,
    name: &str,
    layout: &TowerLayout,
    params: &ModuleParams,
    thickness: f64,
    tags: &PresentationTags,
) {
    let vis = PresentationTags {
        vis: SEPARATOR_VIS.to_string(),
        ..tags.clone()
    };

    // horizontal sheet between the two rows
    let horizontal = tree.add_volume(
        &format!("{name}_sep_h"),
        Solid::Box(Box3::new(
            params.interior_width() / 2.0,
            layout.separator / 2.0,
            thickness / 2.0,
        )),
        SEPARATOR_MATERIAL,
    );
    tree.set_attributes(horizontal, &vis);
    tree.place(plate, horizontal, translation(0.0, 0.0, 0.0));

    // vertical sheets between columns; the sheets between tower pairs run
    // the full tower height plus the notch band, the center sheet of the
    // eight-tower plate stops at the tower edge
    let long = Box3::new(
        layout.separator / 2.0,
        (layout.tower_height + params.notch_depth) / 2.0,
        thickness / 2.0,
    );
    let short = Box3::new(layout.separator / 2.0, layout.tower_height / 2.0, thickness / 2.0);
    let y_long = 0.5 * (layout.tower_height + layout.separator + params.notch_depth);
    let y_short = 0.5 * (layout.tower_height + layout.separator);

    let mut sheets: Vec<(Box3, f64, f64)> = Vec::new();
    if layout.columns == 4 {
        let x = layout.tower_width + layout.separator;
        sheets.push((long, x, y_long));
        sheets.push((short, 0.0, y_short));
        sheets.push((long, -x, y_long));
    } else {
        sheets.push((long, 0.0, y_long));
    }

    for (i, &(solid, x, y)) in sheets.iter().enumerate() {
        for (half, sign) in [("t", 1.0), ("b", -1.0)] {
            let vol = tree.add_volume(
                &format!("{name}_sep_{half}{i}"),
                Solid::Box(solid),
                SEPARATOR_MATERIAL,
            );
            tree.set_attributes(vol, &vis);
            tree.place(plate, vol, translation(x, sign * y, 0.0));
        }
    }
}

/// Builds one scintillator plate: the tower grid with its separator sheets,
/// with module/tower/layer identifier fields on every tower placement.
pub fn build_scintillator_plate(
    tree: &mut VolumeTree,
    name: &str,
    module_id: i32,
    layer_id: i32,
    params: &ModuleParams,
    thickness: f64,
    material: &str,
    tags: &PresentationTags,
    sens: &mut SensitiveDetector,
) -> VolumeId {
    let plate = tree.add_assembly(name);
    let layout = TowerLayout::for_module(params);

    place_separators(tree, plate, name, &layout, params, thickness, tags);

    for i in 0..params.kind.tower_count() {
        let tower = build_tower(
            tree,
            &format!("{name}_tower_{i}"),
            &layout,
            params,
            thickness,
            material,
            tags,
            sens,
        );
        let pv = tree.place(plate, tower, layout.tower_transform(i));
        tree.add_phys_vol_id(pv, "module", module_id);
        tree.add_phys_vol_id(pv, "tower", i as i32);
        tree.add_phys_vol_id(pv, "layer", layer_id);
    }
    plate
}
