use crate::core::models::ids::VolumeId;
use crate::core::models::sensitive::SensitiveDetector;
use crate::core::models::solid::{Box3, Solid};
use crate::core::models::tree::VolumeTree;
use crate::core::models::volume::PresentationTags;
use crate::core::utils::geometry::translation;
use crate::engine::module::ModuleParams;
use crate::engine::plates::{build_absorber_plate, build_filler_plate};
use crate::engine::slices::{SliceDescriptor, SliceRole};
use crate::engine::towers::build_scintillator_plate;
use tracing::debug;

/// Material of the steel casing plates around each module.
pub const CASING_MATERIAL: &str = "Steel235";

fn place_casing(
    tree: &mut VolumeTree,
    module: VolumeId,
    base_name: &str,
    p: &ModuleParams,
    tags: &PresentationTags,
) {
    let length = p.length;
    let inner_len = (length - p.thickness_front_wall - p.thickness_back_wall) / 2.0;
    let z_mid = (p.thickness_front_wall - p.thickness_back_wall) / 2.0;

    let front = tree.add_volume(
        &format!("{base_name}_FrontPlate"),
        Solid::Box(Box3::new(
            p.width / 2.0,
            p.height / 2.0,
            p.thickness_front_wall / 2.0,
        )),
        CASING_MATERIAL,
    );
    tree.set_attributes(front, tags);
    tree.place(
        module,
        front,
        translation(0.0, 0.0, -(length - p.thickness_front_wall) / 2.0),
    );

    // back plate with the cable cut-out
    let back = tree.add_volume(
        &format!("{base_name}_BackPlate"),
        Solid::Subtraction {
            base: Box3::new(p.width / 2.0, p.height / 2.0, p.thickness_back_wall / 2.0),
            cut: Box3::new(
                p.width_back_inner / 2.0,
                p.height_back_inner / 2.0,
                p.thickness_back_wall / 2.0,
            ),
        },
        CASING_MATERIAL,
    );
    tree.set_attributes(back, tags);
    tree.place(
        module,
        back,
        translation(0.0, 0.0, (length - p.thickness_back_wall) / 2.0),
    );

    let side = Box3::new(p.width_side_wall / 2.0, p.height / 2.0, inner_len);
    for (suffix, sign) in [("Left", -1.0), ("Right", 1.0)] {
        let plate = tree.add_volume(
            &format!("{base_name}_{suffix}SidePlate"),
            Solid::Box(side),
            CASING_MATERIAL,
        );
        tree.set_attributes(plate, tags);
        tree.place(
            module,
            plate,
            translation(sign * (p.width - p.width_side_wall) / 2.0, 0.0, z_mid),
        );
    }

    let lid = Box3::new(p.interior_width() / 2.0, p.width_top_wall / 2.0, inner_len);
    for (suffix, sign) in [("Top", 1.0), ("Bottom", -1.0)] {
        let plate = tree.add_volume(
            &format!("{base_name}_{suffix}Plate"),
            Solid::Box(lid),
            CASING_MATERIAL,
        );
        tree.set_attributes(plate, tags);
        tree.place(
            module,
            plate,
            translation(0.0, sign * (p.height - p.width_top_wall) / 2.0, z_mid),
        );
    }
}

/// Assembles one module: the longitudinal slice stack inside the steel
/// casing.
///
/// Slices stack front to back starting behind the front plate; each slice
/// advances the cursor by its offset plus half its thickness and is
/// centered on the advanced cursor. The readout layer
/// counter increments once per distinct layer of the expanded stack, so
/// all slices of one sampling layer share a `layer` identifier.
pub fn build_module(
    tree: &mut VolumeTree,
    base_name: &str,
    module_id: i32,
    params: &ModuleParams,
    slices: &[SliceDescriptor],
    sens: &mut SensitiveDetector,
) -> VolumeId {
    let module = tree.add_assembly(base_name);
    tree.set_attributes(module, &PresentationTags::vis_only(&params.tags.vis));

    let mut layer_num = 0;
    let mut last_layer = None;
    let mut slice_z = -params.length / 2.0 + params.thickness_front_wall;

    for slice in slices {
        slice_z += slice.offset + slice.thickness / 2.0;
        if last_layer != Some(slice.layer_id) {
            layer_num += 1;
            last_layer = Some(slice.layer_id);
        }

        let slice_name = format!(
            "{base_name}_layer_{}_slice_{}",
            slice.layer_id, slice.slice_id
        );
        let plate = match slice.role {
            SliceRole::Absorber => build_absorber_plate(
                tree,
                &format!("{slice_name}_abs"),
                params,
                slice.thickness,
                &slice.material,
                &slice.tags,
            ),
            SliceRole::Filler => build_filler_plate(
                tree,
                &format!("{slice_name}_fill"),
                params,
                slice.thickness,
                &slice.material,
                &slice.tags,
            ),
            SliceRole::Sensitive => build_scintillator_plate(
                tree,
                &format!("{slice_name}_scint"),
                module_id,
                layer_num,
                params,
                slice.thickness,
                &slice.material,
                &slice.tags,
                sens,
            ),
        };
        tree.place(module, plate, translation(0.0, 0.0, slice_z));
    }
    debug!(
        module = base_name,
        layers = layer_num,
        "Assembled module slice stack"
    );

    place_casing(tree, module, base_name, params, &params.tags);
    module
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::description::ModuleDimensions;
    use crate::engine::module::ModuleKind;
    use crate::engine::slices::SliceRole;

    fn params() -> ModuleParams {
        let dims = ModuleDimensions {
            width: 20.0,
            height: 10.0,
            width_side_wall: 0.04,
            width_top_wall: 0.04,
            thickness_front_wall: 0.1,
            thickness_back_wall: 0.5,
            width_back_inner: 18.0,
            height_back_inner: 9.0,
            notch_width_abs_a: 1.0,
            notch_width_abs_b: 1.2,
            notch_width_abs_c: 0.8,
            notch_width_scin: 1.0,
            notch_depth: 0.2,
            separator_depth: 0.02,
            vis: "ModuleVis".to_string(),
            region: "ModuleRegion".to_string(),
            limits: "ModuleLimits".to_string(),
        };
        ModuleParams::from_dimensions(ModuleKind::EightTower, &dims, 140.0)
    }

    fn slice(role: SliceRole, thickness: f64, offset: f64, layer_id: i32, slice_id: i32) -> SliceDescriptor {
        SliceDescriptor {
            role,
            thickness,
            offset,
            material: match role {
                SliceRole::Absorber => "Steel235".to_string(),
                SliceRole::Filler => "Tyvek".to_string(),
                SliceRole::Sensitive => "Polystyrene".to_string(),
            },
            tags: PresentationTags::default(),
            slice_id,
            layer_id,
        }
    }

    fn stack() -> Vec<SliceDescriptor> {
        vec![
            slice(SliceRole::Absorber, 1.6, 0.0, 1, 1),
            slice(SliceRole::Sensitive, 0.4, 0.03, 1, 2),
            slice(SliceRole::Absorber, 1.6, 0.0, 2, 1),
            slice(SliceRole::Sensitive, 0.4, 0.03, 2, 2),
        ]
    }

    #[test]
    fn slices_advance_the_cursor_from_behind_the_front_plate() {
        let p = params();
        let mut tree = VolumeTree::new();
        let mut sens = SensitiveDetector::default();
        let module = build_module(&mut tree, "8M_0", 0, &p, &stack(), &mut sens);

        let children = &tree.volume(module).unwrap().children;
        // 4 slice plates + 6 casing plates
        assert_eq!(children.len(), 10);

        let z = |i: usize| {
            tree.placement(children[i]).unwrap().transform.translation.vector.z
        };
        let start = -140.0 / 2.0 + 0.1;
        assert!((z(0) - (start + 0.8)).abs() < 1e-12);
        assert!((z(1) - (start + 0.8 + 0.03 + 0.2)).abs() < 1e-12);
        assert!((z(2) - (start + 0.8 + 0.03 + 0.2 + 0.8)).abs() < 1e-12);
        assert!((z(3) - (start + 0.8 + 0.03 + 0.2 + 0.8 + 0.03 + 0.2)).abs() < 1e-12);
    }

    #[test]
    fn slice_centers_stay_inside_the_casing() {
        let p = params();
        let mut tree = VolumeTree::new();
        let mut sens = SensitiveDetector::default();
        let module = build_module(&mut tree, "8M_0", 0, &p, &stack(), &mut sens);

        let interior_front = -p.length / 2.0 + p.thickness_front_wall;
        let interior_back = p.length / 2.0 - p.thickness_back_wall;
        for (i, &pv) in tree.volume(module).unwrap().children[..4].iter().enumerate() {
            let z = tree.placement(pv).unwrap().transform.translation.vector.z;
            assert!(z > interior_front && z < interior_back, "slice {i} at z {z}");
        }
    }

    #[test]
    fn layer_counter_increments_per_layer_not_per_slice() {
        let p = params();
        let mut tree = VolumeTree::new();
        let mut sens = SensitiveDetector::default();
        let module = build_module(&mut tree, "8M_5", 5, &p, &stack(), &mut sens);

        let mut layer_ids = Vec::new();
        tree.visit(module, &mut |entry| {
            if entry.volume.is_sensitive() && entry.volume.name.ends_with("_main") {
                if let Some(id) = entry.ids.iter().find(|i| i.field == "layer") {
                    layer_ids.push(id.value);
                }
            }
        });
        // 8 towers per scintillator plate, one plate per layer
        assert_eq!(layer_ids.len(), 16);
        assert!(layer_ids[..8].iter().all(|&l| l == 1));
        assert!(layer_ids[8..].iter().all(|&l| l == 2));
    }

    #[test]
    fn module_assembly_carries_only_the_vis_attribute() {
        let p = params();
        let mut tree = VolumeTree::new();
        let mut sens = SensitiveDetector::default();
        let module = build_module(&mut tree, "8M_0", 0, &p, &stack(), &mut sens);

        let tags = &tree.volume(module).unwrap().tags;
        assert_eq!(tags.vis, "ModuleVis");
        assert!(tags.region.is_empty());
        assert!(tags.limits.is_empty());

        let front_pv = tree.volume(module).unwrap().children[4];
        let front = tree.placement(front_pv).unwrap().volume;
        assert_eq!(tree.volume(front).unwrap().tags, p.tags);
    }

    #[test]
    fn casing_has_six_plates_with_a_back_cutout() {
        let p = params();
        let mut tree = VolumeTree::new();
        let mut sens = SensitiveDetector::default();
        let module = build_module(&mut tree, "8M_0", 0, &p, &stack(), &mut sens);

        let children = &tree.volume(module).unwrap().children;
        let casing: Vec<_> = children[4..].iter().collect();
        assert_eq!(casing.len(), 6);

        let back_pv = tree.placement(*casing[1]).unwrap();
        let back = tree.volume(back_pv.volume).unwrap();
        assert!(back.name.ends_with("_BackPlate"));
        assert!(matches!(back.solid, Solid::Subtraction { .. }));
        assert_eq!(back.material.as_deref(), Some(CASING_MATERIAL));
        let z = back_pv.transform.translation.vector.z;
        assert!((z - (140.0 - 0.5) / 2.0).abs() < 1e-12);
    }
}
