use crate::core::models::ids::VolumeId;
use crate::core::models::tree::VolumeTree;
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

/// One sensitive readout element, flattened to its identifier fields and
/// its position in the frame of the walk root.
///
/// Identifier fields not present on an element's placement path are left
/// empty in the output. The plate variant fills `layer`/`tower`/`part`,
/// the grid variant fills `layerx`/`layery`/`layerz`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelRecord {
    pub volume: String,
    pub system: Option<i32>,
    pub module: Option<i32>,
    pub layer: Option<i32>,
    pub tower: Option<i32>,
    pub part: Option<i32>,
    pub layerx: Option<i32>,
    pub layery: Option<i32>,
    pub layerz: Option<i32>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Error)]
pub enum ChannelMapError {
    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),
}

fn id_of(ids: &[crate::core::models::volume::PhysVolId], field: &str) -> Option<i32> {
    ids.iter().rev().find(|i| i.field == field).map(|i| i.value)
}

/// Collects every sensitive element below `root` into a flat channel list,
/// ordered by the depth-first placement walk.
pub fn collect_channels(tree: &VolumeTree, root: VolumeId) -> Vec<ChannelRecord> {
    let mut records = Vec::new();
    tree.visit(root, &mut |entry| {
        if !entry.volume.is_sensitive() {
            return;
        }
        let pos = entry.world.translation.vector;
        records.push(ChannelRecord {
            volume: entry.volume.name.clone(),
            system: id_of(entry.ids, "system"),
            module: id_of(entry.ids, "module"),
            layer: id_of(entry.ids, "layer"),
            tower: id_of(entry.ids, "tower"),
            part: id_of(entry.ids, "part"),
            layerx: id_of(entry.ids, "layerx"),
            layery: id_of(entry.ids, "layery"),
            layerz: id_of(entry.ids, "layerz"),
            x: pos.x,
            y: pos.y,
            z: pos.z,
        });
    });
    records
}

/// Serializes channel records as CSV with a header row.
pub fn write_channel_map<W: Write>(
    writer: W,
    records: &[ChannelRecord],
) -> Result<(), ChannelMapError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::sensitive::SensitiveDetector;
    use crate::core::models::solid::{Box3, Solid};
    use crate::core::utils::geometry::translation;

    fn sample_tree() -> (VolumeTree, VolumeId) {
        let mut tree = VolumeTree::new();
        let mut sens = SensitiveDetector::default();
        let root = tree.add_assembly("envelope");
        let module = tree.add_assembly("module");
        let tile = tree.add_volume("tile", Solid::Box(Box3::new(2.0, 2.0, 0.2)), "Polystyrene");
        tree.set_sensitive(tile, &mut sens);

        let p_mod = tree.place(root, module, translation(10.0, 0.0, 0.0));
        tree.add_phys_vol_id(p_mod, "module", 3);
        let p_tile = tree.place(module, tile, translation(0.0, 5.0, 1.0));
        tree.add_phys_vol_id(p_tile, "tower", 1);
        tree.add_phys_vol_id(p_tile, "part", 0);
        (tree, root)
    }

    #[test]
    fn only_sensitive_volumes_are_collected() {
        let (tree, root) = sample_tree();
        let channels = collect_channels(&tree, root);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].volume, "tile");
    }

    #[test]
    fn records_carry_path_ids_and_world_position() {
        let (tree, root) = sample_tree();
        let rec = &collect_channels(&tree, root)[0];
        assert_eq!(rec.module, Some(3));
        assert_eq!(rec.tower, Some(1));
        assert_eq!(rec.part, Some(0));
        assert_eq!(rec.layerx, None);
        assert_eq!((rec.x, rec.y, rec.z), (10.0, 5.0, 1.0));
    }

    #[test]
    fn csv_output_has_a_header_and_one_row_per_channel() {
        let (tree, root) = sample_tree();
        let channels = collect_channels(&tree, root);
        let mut buf = Vec::new();
        write_channel_map(&mut buf, &channels).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("volume,system,module"));
        assert!(lines[1].starts_with("tile,,3"));
    }
}
