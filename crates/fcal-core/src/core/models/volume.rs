use super::ids::{PlacementId, VolumeId};
use super::solid::Solid;
use nalgebra::Isometry3;

/// The visualization / region / limits attribute triple attached to a
/// volume for downstream rendering and physics-cut configuration.
///
/// The strings are opaque to the construction engine; empty strings mean
/// "no attribute".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentationTags {
    pub vis: String,
    pub region: String,
    pub limits: String,
}

impl PresentationTags {
    pub fn new(vis: &str, region: &str, limits: &str) -> Self {
        Self {
            vis: vis.to_string(),
            region: region.to_string(),
            limits: limits.to_string(),
        }
    }

    /// Tags carrying only a visualization attribute.
    pub fn vis_only(vis: &str) -> Self {
        Self::new(vis, "", "")
    }
}

/// One named integer identifier field on a placement (e.g. `("tower", 3)`).
///
/// The accumulated field list along a placement path forms the hierarchical
/// identifier of a sensitive element, consumed downstream for readout
/// channel mapping. Assigned once at construction time, immutable after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysVolId {
    pub field: &'static str,
    pub value: i32,
}

/// A node of the volume tree: a named solid with an optional material,
/// presentation attributes, an optional sensitive-detector type, and the
/// placements of its children.
#[derive(Debug, Clone)]
pub struct VolumeNode {
    pub name: String,
    pub solid: Solid,
    /// Material name; `None` for assemblies, which have no body of their own.
    pub material: Option<String>,
    pub tags: PresentationTags,
    /// Sensitive-detector type, if this volume is a readout element.
    pub sensitive: Option<String>,
    /// Placements of child volumes, in insertion order.
    pub children: Vec<PlacementId>,
    /// The single parent this volume has been placed under, if any.
    pub(crate) parent: Option<VolumeId>,
}

impl VolumeNode {
    pub(crate) fn new(name: String, solid: Solid, material: Option<String>) -> Self {
        Self {
            name,
            solid,
            material,
            tags: PresentationTags::default(),
            sensitive: None,
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn is_sensitive(&self) -> bool {
        self.sensitive.is_some()
    }
}

/// An embedding of a child volume in its parent at a rigid transform,
/// together with the identifier fields attached to this instance.
#[derive(Debug, Clone)]
pub struct Placement {
    /// The placed child volume.
    pub volume: VolumeId,
    /// Transform from the child frame to the parent frame.
    pub transform: Isometry3<f64>,
    /// Identifier fields attached to this placement.
    pub ids: Vec<PhysVolId>,
}

impl Placement {
    /// Looks up an identifier field by name.
    pub fn id(&self, field: &str) -> Option<i32> {
        self.ids.iter().find(|i| i.field == field).map(|i| i.value)
    }
}
