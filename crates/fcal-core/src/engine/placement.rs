use crate::core::models::ids::VolumeId;
use crate::core::models::tree::VolumeTree;
use crate::engine::positions::PositionList;
use crate::engine::progress::{Progress, ProgressReporter};
use nalgebra::Isometry3;
use tracing::info;

/// The running module number, shared across both module types of one
/// detector so every module instance gets a unique identifier.
#[derive(Debug, Default)]
pub struct ModuleCounter(i32);

impl ModuleCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> i32 {
        let id = self.0;
        self.0 += 1;
        id
    }

    pub fn assigned(&self) -> usize {
        self.0 as usize
    }
}

/// Builds and places one module instance per position-table entry.
///
/// `build` constructs a fresh module for the drawn module number;
/// `to_world` maps a raw position triple to the module's world transform
/// (the two variants convert units and apply center offsets differently).
/// When `tag_module` is set the module placement itself carries the module
/// number, in addition to any identifier fields inside the module.
pub fn place_modules<B, T>(
    tree: &mut VolumeTree,
    parent: VolumeId,
    label: &str,
    positions: &PositionList,
    counter: &mut ModuleCounter,
    reporter: &ProgressReporter,
    tag_module: bool,
    mut build: B,
    to_world: T,
) -> usize
where
    B: FnMut(&mut VolumeTree, i32) -> VolumeId,
    T: Fn(f64, f64, f64) -> Isometry3<f64>,
{
    info!(kind = label, count = positions.len(), "Placing modules");
    for (x, y, z) in positions.iter() {
        let module_id = counter.next();
        let module = build(tree, module_id);
        let pv = tree.place(parent, module, to_world(x, y, z));
        if tag_module {
            tree.add_phys_vol_id(pv, "module", module_id);
        }
        reporter.report(Progress::ModulePlaced);
    }
    positions.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::description::PositionEntry;
    use crate::core::units::MM;
    use crate::core::utils::geometry::translation;
    use crate::engine::positions::collect_position_table;

    fn positions(xs: &str, ys: &str, zs: &str) -> PositionList {
        let entries = vec![
            PositionEntry {
                name: "xpos".into(),
                values: xs.into(),
            },
            PositionEntry {
                name: "ypos".into(),
                values: ys.into(),
            },
            PositionEntry {
                name: "zpos".into(),
                values: zs.into(),
            },
        ];
        collect_position_table(&entries).unwrap().validate("test").unwrap()
    }

    #[test]
    fn counter_stays_shared_across_module_types() {
        let mut tree = VolumeTree::new();
        let parent = tree.add_assembly("envelope");
        let mut counter = ModuleCounter::new();
        let reporter = ProgressReporter::default();
        let mut seen = Vec::new();

        let wide = positions("1.0 2.0", "0.0 0.0", "0.0 0.0");
        place_modules(
            &mut tree,
            parent,
            "eight-tower",
            &wide,
            &mut counter,
            &reporter,
            false,
            |tree, id| {
                seen.push(id);
                tree.add_assembly(&format!("8M_{id}"))
            },
            |x, y, z| translation(x * MM, y * MM, z * MM),
        );
        let narrow = positions("3.0", "0.0", "0.0");
        place_modules(
            &mut tree,
            parent,
            "four-tower",
            &narrow,
            &mut counter,
            &reporter,
            false,
            |tree, id| {
                seen.push(id);
                tree.add_assembly(&format!("4M_{id}"))
            },
            |x, y, z| translation(x * MM, y * MM, z * MM),
        );

        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(counter.assigned(), 3);
        assert_eq!(tree.volume(parent).unwrap().children.len(), 3);
    }

    #[test]
    fn module_tagging_is_optional() {
        let mut tree = VolumeTree::new();
        let parent = tree.add_assembly("envelope");
        let mut counter = ModuleCounter::new();
        let reporter = ProgressReporter::default();

        let list = positions("5.0", "0.0", "0.0");
        place_modules(
            &mut tree,
            parent,
            "eight-tower",
            &list,
            &mut counter,
            &reporter,
            true,
            |tree, id| tree.add_assembly(&format!("8M_{id}")),
            |x, y, z| translation(x, y, z),
        );
        let pv = tree.volume(parent).unwrap().children[0];
        assert_eq!(tree.placement(pv).unwrap().id("module"), Some(0));
    }
}
