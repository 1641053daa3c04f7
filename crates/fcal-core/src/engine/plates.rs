use crate::core::models::ids::VolumeId;
use crate::core::models::solid::{Box3, Solid};
use crate::core::models::tree::VolumeTree;
use crate::core::models::volume::PresentationTags;
use crate::core::utils::geometry::translation;
use crate::engine::module::{ModuleKind, ModuleParams};

/// One notch column: the x position of a tab pair and the tab width.
///
/// Every plate carries a top and a bottom row of interlocking tabs along
/// its notch columns; the rows are mirrored in y, so a column fully
/// describes both tabs.
#[derive(Debug, Clone, Copy)]
struct NotchColumn {
    x: f64,
    width: f64,
}

fn absorber_columns(p: &ModuleParams) -> Vec<NotchColumn> {
    let edge = p.width / 2.0 - p.width_side_wall - 0.5 * p.notch_width_abs_c;
    let quarter = p.interior_width() / 4.0;
    match p.kind {
        ModuleKind::EightTower => vec![
            NotchColumn { x: edge, width: p.notch_width_abs_c },
            NotchColumn { x: quarter, width: p.notch_width_abs_a },
            NotchColumn { x: 0.0, width: p.notch_width_abs_b },
            NotchColumn { x: -quarter, width: p.notch_width_abs_a },
            NotchColumn { x: -edge, width: p.notch_width_abs_c },
        ],
        ModuleKind::FourTower => vec![
            NotchColumn { x: edge, width: p.notch_width_abs_c },
            NotchColumn { x: 0.0, width: p.notch_width_abs_a },
            NotchColumn { x: -edge, width: p.notch_width_abs_c },
        ],
    }
}

fn filler_columns(p: &ModuleParams) -> Vec<NotchColumn> {
    let quarter = p.interior_width() / 4.0;
    match p.kind {
        ModuleKind::EightTower => vec![
            NotchColumn { x: quarter, width: p.notch_width_scin },
            NotchColumn { x: -quarter, width: p.notch_width_scin },
        ],
        ModuleKind::FourTower => vec![NotchColumn { x: 0.0, width: p.notch_width_scin }],
    }
}

/// Builds a plate assembly: the main plate spanning the module interior
/// minus the two notch bands, plus a tab in each notch column at the top
/// and bottom edges. Everything shares the slice material.
fn build_plate(
    tree: &mut VolumeTree,
    name: &str,
    params: &ModuleParams,
    thickness: f64,
    material: &str,
    tags: &PresentationTags,
    columns: &[NotchColumn],
) -> VolumeId {
    let plate = tree.add_assembly(name);
    let depth = params.notch_depth;

    let main = tree.add_volume(
        &format!("{name}_main"),
        Solid::Box(Box3::new(
            params.interior_width() / 2.0,
            (params.interior_height() - 2.0 * depth) / 2.0,
            thickness / 2.0,
        )),
        material,
    );
    tree.set_attributes(main, tags);
    tree.place(plate, main, translation(0.0, 0.0, 0.0));

    let top_y = params.height / 2.0 - params.width_top_wall - 0.5 * depth;
    let bottom_y = -params.interior_height() / 2.0 + 0.5 * depth;
    for (i, col) in columns.iter().enumerate() {
        let tab = Box3::new(col.width / 2.0, depth / 2.0, thickness / 2.0);
        let top = tree.add_volume(&format!("{name}_notch_t{i}"), Solid::Box(tab), material);
        tree.set_attributes(top, tags);
        tree.place(plate, top, translation(col.x, top_y, 0.0));

        let bottom = tree.add_volume(&format!("{name}_notch_b{i}"), Solid::Box(tab), material);
        tree.set_attributes(bottom, tags);
        tree.place(plate, bottom, translation(col.x, bottom_y, 0.0));
    }
    plate
}

/// Builds one absorber plate assembly for a slice of the given thickness.
pub fn build_absorber_plate(
    tree: &mut VolumeTree,
    name: &str,
    params: &ModuleParams,
    thickness: f64,
    material: &str,
    tags: &PresentationTags,
) -> VolumeId {
    let columns = absorber_columns(params);
    build_plate(tree, name, params, thickness, material, tags, &columns)
}

/// Builds one filler plate assembly (tyvek or air gap) for a slice.
pub fn build_filler_plate(
    tree: &mut VolumeTree,
    name: &str,
    params: &ModuleParams,
    thickness: f64,
    material: &str,
    tags: &PresentationTags,
) -> VolumeId {
    let columns = filler_columns(params);
    build_plate(tree, name, params, thickness, material, tags, &columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::description::ModuleDimensions;

    fn eight_params() -> ModuleParams {
        let dims = ModuleDimensions {
            width: 10.0,
            height: 20.0,
            width_side_wall: 0.04,
            width_top_wall: 0.04,
            thickness_front_wall: 0.1,
            thickness_back_wall: 0.5,
            width_back_inner: 9.0,
            height_back_inner: 19.0,
            notch_width_abs_a: 1.0,
            notch_width_abs_b: 1.2,
            notch_width_abs_c: 0.8,
            notch_width_scin: 1.0,
            notch_depth: 0.2,
            separator_depth: 0.02,
            vis: String::new(),
            region: String::new(),
            limits: String::new(),
        };
        ModuleParams::from_dimensions(ModuleKind::EightTower, &dims, 140.0)
    }

    fn four_params() -> ModuleParams {
        let mut p = eight_params();
        p.kind = ModuleKind::FourTower;
        p.width = 5.0;
        p
    }

    #[test]
    fn eight_tower_absorber_has_five_notch_columns() {
        let params = eight_params();
        let mut tree = VolumeTree::new();
        let plate = build_absorber_plate(
            &mut tree,
            "abs",
            &params,
            1.6,
            "Steel235",
            &PresentationTags::default(),
        );
        // main plate plus a top and a bottom tab per column
        assert_eq!(tree.volume(plate).unwrap().children.len(), 1 + 2 * 5);
    }

    #[test]
    fn four_tower_plates_reduce_the_column_tables() {
        let params = four_params();
        let mut tree = VolumeTree::new();
        let abs = build_absorber_plate(
            &mut tree,
            "abs",
            &params,
            1.6,
            "Steel235",
            &PresentationTags::default(),
        );
        let fill = build_filler_plate(
            &mut tree,
            "fill",
            &params,
            0.03,
            "Tyvek",
            &PresentationTags::default(),
        );
        assert_eq!(tree.volume(abs).unwrap().children.len(), 1 + 2 * 3);
        assert_eq!(tree.volume(fill).unwrap().children.len(), 1 + 2 * 1);
    }

    #[test]
    fn main_plate_leaves_room_for_the_notch_bands() {
        let params = eight_params();
        let mut tree = VolumeTree::new();
        let plate = build_absorber_plate(
            &mut tree,
            "abs",
            &params,
            1.6,
            "Steel235",
            &PresentationTags::default(),
        );
        let first = tree.volume(plate).unwrap().children[0];
        let main_id = tree.placement(first).unwrap().volume;
        let main = tree.volume(main_id).unwrap();
        match &main.solid {
            Solid::Box(b) => {
                assert!((b.half_x - (10.0 - 2.0 * 0.04) / 2.0).abs() < 1e-12);
                assert!((b.half_y - (20.0 - 2.0 * 0.04 - 2.0 * 0.2) / 2.0).abs() < 1e-12);
                assert!((b.half_z - 0.8).abs() < 1e-12);
            }
            other => panic!("unexpected solid: {other:?}"),
        }
    }

    #[test]
    fn notch_tabs_sit_in_the_top_and_bottom_bands() {
        let params = eight_params();
        let mut tree = VolumeTree::new();
        let plate = build_filler_plate(
            &mut tree,
            "fill",
            &params,
            0.03,
            "Tyvek",
            &PresentationTags::default(),
        );
        let children = &tree.volume(plate).unwrap().children;
        let top = tree.placement(children[1]).unwrap();
        let bottom = tree.placement(children[2]).unwrap();
        let ty = top.transform.translation.vector.y;
        let by = bottom.transform.translation.vector.y;
        assert!((ty - (20.0 / 2.0 - 0.04 - 0.1)).abs() < 1e-12);
        assert!((by - (-(20.0 - 2.0 * 0.04) / 2.0 + 0.1)).abs() < 1e-12);
    }
}
