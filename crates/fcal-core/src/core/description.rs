use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Which construction strategy a description selects.
///
/// Both variants share the same module-type split (eight-tower and
/// four-tower) and position-table format but stack their internals
/// differently: `LFHCAL` stacks parameterized plates longitudinally,
/// `GFHCAL` fills each module with transverse absorber/readout columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DetectorVariant {
    Lfhcal,
    Gfhcal,
}

/// Top-level detector identity and envelope dimensions.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectorInfo {
    pub name: String,
    pub id: i32,
    pub variant: DetectorVariant,
    pub dimensions: Dimensions,
    pub position: WorldPosition,
}

/// Envelope dimensions; `z` is the total module length along the beam axis.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Dimensions {
    pub z: f64,
}

/// Global placement offset of the detector in the world frame, in cm.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WorldPosition {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

/// Per-module-type dimension record. All lengths in cm.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleDimensions {
    pub width: f64,
    pub height: f64,
    pub width_side_wall: f64,
    pub width_top_wall: f64,
    pub thickness_front_wall: f64,
    pub thickness_back_wall: f64,
    /// Width of the rectangular cut-out in the back plate.
    pub width_back_inner: f64,
    /// Height of the rectangular cut-out in the back plate.
    pub height_back_inner: f64,
    pub notch_width_abs_a: f64,
    pub notch_width_abs_b: f64,
    pub notch_width_abs_c: f64,
    pub notch_width_scin: f64,
    pub notch_depth: f64,
    pub separator_depth: f64,
    #[serde(default)]
    pub vis: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub limits: String,
}

/// One layer specification entry: `repeat` copies of the slice template
/// list, stacked in order.
#[derive(Debug, Clone, Deserialize)]
pub struct LayerEntry {
    pub repeat: u32,
    #[serde(rename = "slice", default)]
    pub slices: Vec<SliceEntry>,
}

/// One slice template within a layer.
#[derive(Debug, Clone, Deserialize)]
pub struct SliceEntry {
    /// Role tag: 1 = absorber, 2 = filler, anything else = sensitive.
    #[serde(rename = "type", default)]
    pub role: i32,
    pub thickness: f64,
    /// Gap before this slice along the stacking axis.
    #[serde(default)]
    pub offset: f64,
    pub material: String,
    #[serde(default)]
    pub vis: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub limits: String,
}

/// One named entry of a position table. `values` is a whitespace-delimited
/// list of numbers; recognized names are `xpos`, `ypos` and `zpos`, and
/// unrecognized names are skipped with a warning rather than rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionEntry {
    pub name: String,
    pub values: String,
}

/// An additional material made available to the builders.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialEntry {
    pub name: String,
    #[serde(default)]
    pub density: f64,
}

/// The complete typed detector description, normally loaded from a TOML
/// file. This replaces ad-hoc XML attribute lookup with a schema that is
/// validated once at load time.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectorDescription {
    pub detector: DetectorInfo,
    #[serde(default)]
    pub materials: Vec<MaterialEntry>,
    pub eight_tower_module: Option<ModuleDimensions>,
    pub four_tower_module: Option<ModuleDimensions>,
    #[serde(rename = "layer", default)]
    pub layers: Vec<LayerEntry>,
    #[serde(default)]
    pub eight_tower_positions: Vec<PositionEntry>,
    #[serde(default)]
    pub four_tower_positions: Vec<PositionEntry>,
}

#[derive(Debug, Error)]
pub enum DescriptionError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

impl DetectorDescription {
    /// Loads a description from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError`] if the file cannot be read or does not
    /// match the schema.
    pub fn load(path: &Path) -> Result<Self, DescriptionError> {
        let content = std::fs::read_to_string(path).map_err(|e| DescriptionError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            DescriptionError::Toml { source, .. } => DescriptionError::Toml {
                path: path.to_string_lossy().to_string(),
                source,
            },
            other => other,
        })
    }

    /// Parses a description from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, DescriptionError> {
        toml::from_str(content).map_err(|e| DescriptionError::Toml {
            path: "<inline>".to_string(),
            source: e,
        })
    }
}
