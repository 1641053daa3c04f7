use super::ids::{PlacementId, VolumeId};
use super::sensitive::SensitiveDetector;
use super::solid::Solid;
use super::volume::{PhysVolId, Placement, PresentationTags, VolumeNode};
use nalgebra::Isometry3;
use slotmap::SlotMap;

/// The arena owning every volume and placement of a constructed detector.
///
/// The tree is the in-crate stand-in for the host detector-description
/// framework: volumes are created once, embedded in a parent with
/// [`VolumeTree::place`], and the returned [`PlacementId`] is the handle on
/// which hierarchical identifier fields are attached. Ownership is strictly
/// hierarchical: a volume may be placed repeatedly under one parent (the
/// grid variant reuses its scintillator cell volume this way) but never
/// under two different parents, because each subtree carries its own
/// identifier fields.
#[derive(Debug, Clone, Default)]
pub struct VolumeTree {
    volumes: SlotMap<VolumeId, VolumeNode>,
    placements: SlotMap<PlacementId, Placement>,
}

/// Borrowed view of one node during a [`VolumeTree::visit`] walk.
pub struct VisitEntry<'a> {
    pub volume: &'a VolumeNode,
    /// Transform from this node's frame to the root frame of the walk.
    pub world: Isometry3<f64>,
    /// Identifier fields accumulated along the placement path from the root.
    pub ids: &'a [PhysVolId],
}

impl VolumeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a shapeless assembly volume.
    pub fn add_assembly(&mut self, name: &str) -> VolumeId {
        self.volumes
            .insert(VolumeNode::new(name.to_string(), Solid::Assembly, None))
    }

    /// Creates a solid volume with the given shape and material name.
    pub fn add_volume(&mut self, name: &str, solid: Solid, material: &str) -> VolumeId {
        self.volumes.insert(VolumeNode::new(
            name.to_string(),
            solid,
            Some(material.to_string()),
        ))
    }

    pub fn volume(&self, id: VolumeId) -> Option<&VolumeNode> {
        self.volumes.get(id)
    }

    pub fn volume_mut(&mut self, id: VolumeId) -> Option<&mut VolumeNode> {
        self.volumes.get_mut(id)
    }

    pub fn placement(&self, id: PlacementId) -> Option<&Placement> {
        self.placements.get(id)
    }

    pub fn volume_count(&self) -> usize {
        self.volumes.len()
    }

    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Attaches the presentation attribute triple to a volume.
    pub fn set_attributes(&mut self, id: VolumeId, tags: &PresentationTags) {
        if let Some(node) = self.volumes.get_mut(id) {
            node.tags = tags.clone();
        }
    }

    /// Marks a volume as a sensitive readout element of the detector
    /// handle's type.
    pub fn set_sensitive(&mut self, id: VolumeId, sens: &mut SensitiveDetector) {
        if let Some(node) = self.volumes.get_mut(id) {
            node.sensitive = Some(sens.detector_type().to_string());
            sens.count_registration();
        }
    }

    /// Embeds `child` in `parent` at `transform` and returns the placement
    /// handle on which identifier fields can be attached.
    ///
    /// # Panics
    ///
    /// Panics if `child` has already been placed under a different parent;
    /// sharing a node between two parents would make its identifier fields
    /// ambiguous.
    pub fn place(
        &mut self,
        parent: VolumeId,
        child: VolumeId,
        transform: Isometry3<f64>,
    ) -> PlacementId {
        let node = &mut self.volumes[child];
        assert!(
            node.parent.is_none() || node.parent == Some(parent),
            "volume '{}' is already placed under a different parent",
            node.name
        );
        node.parent = Some(parent);

        let placement = self.placements.insert(Placement {
            volume: child,
            transform,
            ids: Vec::new(),
        });
        self.volumes[parent].children.push(placement);
        placement
    }

    /// Attaches a named integer identifier field to a placement.
    pub fn add_phys_vol_id(&mut self, placement: PlacementId, field: &'static str, value: i32) {
        if let Some(p) = self.placements.get_mut(placement) {
            p.ids.push(PhysVolId { field, value });
        }
    }

    /// Walks the subtree rooted at `root` depth-first in placement order,
    /// invoking `f` for every node with its root-frame transform and the
    /// identifier fields accumulated along the path.
    pub fn visit<F: FnMut(&VisitEntry)>(&self, root: VolumeId, f: &mut F) {
        let mut ids = Vec::new();
        self.visit_inner(root, Isometry3::identity(), &mut ids, f);
    }

    fn visit_inner<F: FnMut(&VisitEntry)>(
        &self,
        id: VolumeId,
        world: Isometry3<f64>,
        ids: &mut Vec<PhysVolId>,
        f: &mut F,
    ) {
        let node = &self.volumes[id];
        f(&VisitEntry {
            volume: node,
            world,
            ids: ids.as_slice(),
        });
        for &pid in &node.children {
            let placement = &self.placements[pid];
            let depth = ids.len();
            ids.extend_from_slice(&placement.ids);
            self.visit_inner(placement.volume, world * placement.transform, ids, f);
            ids.truncate(depth);
        }
    }
}
