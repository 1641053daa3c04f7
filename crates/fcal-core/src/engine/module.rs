use crate::core::description::ModuleDimensions;
use crate::core::models::volume::PresentationTags;

/// The two module types of the segmented calorimeter.
///
/// Eight-tower modules tile the bulk of the face; four-tower (half-width)
/// modules fill the column nearest the beam pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    EightTower,
    FourTower,
}

impl ModuleKind {
    /// Towers per module, arranged as two rows of [`Self::tower_columns`].
    pub fn tower_count(self) -> usize {
        match self {
            Self::EightTower => 8,
            Self::FourTower => 4,
        }
    }

    pub fn tower_columns(self) -> usize {
        self.tower_count() / 2
    }

    /// Short tag used in volume names, matching the module naming scheme.
    pub fn label(self) -> &'static str {
        match self {
            Self::EightTower => "8M",
            Self::FourTower => "4M",
        }
    }
}

/// Resolved dimensions of one module type, in cm.
///
/// This is the description's [`ModuleDimensions`] record joined with the
/// detector-wide module length, which the description keeps in one place
/// because both module types share it.
#[derive(Debug, Clone)]
pub struct ModuleParams {
    pub kind: ModuleKind,
    pub width: f64,
    pub height: f64,
    pub length: f64,
    pub width_side_wall: f64,
    pub width_top_wall: f64,
    pub thickness_front_wall: f64,
    pub thickness_back_wall: f64,
    pub width_back_inner: f64,
    pub height_back_inner: f64,
    pub notch_width_abs_a: f64,
    pub notch_width_abs_b: f64,
    pub notch_width_abs_c: f64,
    pub notch_width_scin: f64,
    pub notch_depth: f64,
    pub separator_depth: f64,
    pub tags: PresentationTags,
}

impl ModuleParams {
    pub fn from_dimensions(kind: ModuleKind, dims: &ModuleDimensions, length: f64) -> Self {
        Self {
            kind,
            width: dims.width,
            height: dims.height,
            length,
            width_side_wall: dims.width_side_wall,
            width_top_wall: dims.width_top_wall,
            thickness_front_wall: dims.thickness_front_wall,
            thickness_back_wall: dims.thickness_back_wall,
            width_back_inner: dims.width_back_inner,
            height_back_inner: dims.height_back_inner,
            notch_width_abs_a: dims.notch_width_abs_a,
            notch_width_abs_b: dims.notch_width_abs_b,
            notch_width_abs_c: dims.notch_width_abs_c,
            notch_width_scin: dims.notch_width_scin,
            notch_depth: dims.notch_depth,
            separator_depth: dims.separator_depth,
            tags: PresentationTags::new(&dims.vis, &dims.region, &dims.limits),
        }
    }

    /// Plate width inside the side walls.
    pub fn interior_width(&self) -> f64 {
        self.width - 2.0 * self.width_side_wall
    }

    /// Plate height inside the top and bottom walls.
    pub fn interior_height(&self) -> f64 {
        self.height - 2.0 * self.width_top_wall
    }

    /// Longitudinal span available to the slice stack, between the front
    /// and back walls.
    pub fn interior_length(&self) -> f64 {
        self.length - self.thickness_front_wall - self.thickness_back_wall
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tower_layout_per_kind() {
        assert_eq!(ModuleKind::EightTower.tower_count(), 8);
        assert_eq!(ModuleKind::EightTower.tower_columns(), 4);
        assert_eq!(ModuleKind::FourTower.tower_count(), 4);
        assert_eq!(ModuleKind::FourTower.tower_columns(), 2);
        assert_eq!(ModuleKind::FourTower.label(), "4M");
    }
}
