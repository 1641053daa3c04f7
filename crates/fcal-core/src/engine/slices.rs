use crate::core::description::LayerEntry;
use crate::core::models::volume::PresentationTags;
use crate::engine::error::BuildError;

/// What a longitudinal slice contributes to the sampling structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceRole {
    Absorber,
    Filler,
    Sensitive,
}

impl SliceRole {
    /// Maps a description role tag to a role. Tags other than 1 and 2 fall
    /// through to `Sensitive`, so untagged slices read out.
    pub fn from_tag(tag: i32) -> Self {
        match tag {
            1 => Self::Absorber,
            2 => Self::Filler,
            _ => Self::Sensitive,
        }
    }
}

/// One fully resolved slice of the longitudinal stack.
#[derive(Debug, Clone)]
pub struct SliceDescriptor {
    pub role: SliceRole,
    pub thickness: f64,
    /// Gap inserted before this slice along the stacking axis.
    pub offset: f64,
    pub material: String,
    pub tags: PresentationTags,
    /// 1-based index within the owning layer, restarting each repetition.
    pub slice_id: i32,
    /// 1-based layer identifier; all repetitions of one layer entry share
    /// the entry's id.
    pub layer_id: i32,
}

/// Expands the description's layer entries into a flat slice sequence.
///
/// A layer entry with `repeat = n` contributes `n` consecutive copies of
/// its slice templates. All repetitions of one entry share the entry's
/// `layer_id`; `slice_id` restarts at 1 for every repetition pass. The
/// per-layer readout counter downstream keys on `layer_id` transitions, so
/// this numbering must hold exactly.
pub fn expand_layers(layers: &[LayerEntry]) -> Result<Vec<SliceDescriptor>, BuildError> {
    let mut expanded = Vec::new();
    let mut layer_id = 0;
    for entry in layers {
        layer_id += 1;
        for _ in 0..entry.repeat {
            for (i, slice) in entry.slices.iter().enumerate() {
                expanded.push(SliceDescriptor {
                    role: SliceRole::from_tag(slice.role),
                    thickness: slice.thickness,
                    offset: slice.offset,
                    material: slice.material.clone(),
                    tags: PresentationTags::new(&slice.vis, &slice.region, &slice.limits),
                    slice_id: i as i32 + 1,
                    layer_id,
                });
            }
        }
    }
    if expanded.is_empty() {
        return Err(BuildError::EmptyLayerStack);
    }
    Ok(expanded)
}

/// Total longitudinal extent of a slice sequence, offsets included.
pub fn stack_span(slices: &[SliceDescriptor]) -> f64 {
    slices.iter().map(|s| s.offset + s.thickness).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::description::SliceEntry;

    fn slice(role: i32, thickness: f64, offset: f64) -> SliceEntry {
        SliceEntry {
            role,
            thickness,
            offset,
            material: "Steel235".to_string(),
            vis: String::new(),
            region: String::new(),
            limits: String::new(),
        }
    }

    #[test]
    fn repetitions_share_a_layer_id_and_restart_slice_ids() {
        let layers = vec![LayerEntry {
            repeat: 3,
            slices: vec![slice(1, 1.6, 0.0), slice(0, 0.4, 0.03)],
        }];
        let expanded = expand_layers(&layers).unwrap();

        assert_eq!(expanded.len(), 6);
        let layer_ids: Vec<i32> = expanded.iter().map(|s| s.layer_id).collect();
        assert_eq!(layer_ids, vec![1, 1, 1, 1, 1, 1]);
        let slice_ids: Vec<i32> = expanded.iter().map(|s| s.slice_id).collect();
        assert_eq!(slice_ids, vec![1, 2, 1, 2, 1, 2]);
    }

    #[test]
    fn layer_ids_advance_per_entry() {
        let layers = vec![
            LayerEntry {
                repeat: 2,
                slices: vec![slice(1, 1.6, 0.0)],
            },
            LayerEntry {
                repeat: 1,
                slices: vec![slice(2, 0.8, 0.0)],
            },
        ];
        let expanded = expand_layers(&layers).unwrap();
        let layer_ids: Vec<i32> = expanded.iter().map(|s| s.layer_id).collect();
        assert_eq!(layer_ids, vec![1, 1, 2]);
        assert_eq!(expanded[2].role, SliceRole::Filler);
    }

    #[test]
    fn role_tags_fall_through_to_sensitive() {
        assert_eq!(SliceRole::from_tag(1), SliceRole::Absorber);
        assert_eq!(SliceRole::from_tag(2), SliceRole::Filler);
        assert_eq!(SliceRole::from_tag(0), SliceRole::Sensitive);
        assert_eq!(SliceRole::from_tag(7), SliceRole::Sensitive);
    }

    #[test]
    fn stack_span_includes_offsets() {
        let layers = vec![LayerEntry {
            repeat: 2,
            slices: vec![slice(1, 1.6, 0.0), slice(0, 0.4, 0.03)],
        }];
        let expanded = expand_layers(&layers).unwrap();
        let span = stack_span(&expanded);
        assert!((span - 2.0 * (1.6 + 0.03 + 0.4)).abs() < 1e-12);
    }

    #[test]
    fn empty_description_is_rejected() {
        assert!(matches!(
            expand_layers(&[]),
            Err(BuildError::EmptyLayerStack)
        ));
    }
}
