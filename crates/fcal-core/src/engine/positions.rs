use crate::core::description::PositionEntry;
use crate::engine::error::BuildError;
use tracing::warn;

/// Validated module position table: one `(x, y, z)` triple per module, in
/// the unit of the description (converted by the workflow that consumes it).
#[derive(Debug, Clone, Default)]
pub struct PositionList {
    xs: Vec<f64>,
    ys: Vec<f64>,
    zs: Vec<f64>,
}

impl PositionList {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.xs
            .iter()
            .zip(&self.ys)
            .zip(&self.zs)
            .map(|((&x, &y), &z)| (x, y, z))
    }
}

/// Raw per-axis buffers collected from the description's position entries,
/// before the equal-length check.
#[derive(Debug, Clone, Default)]
pub struct PositionBuffers {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub zs: Vec<f64>,
}

impl PositionBuffers {
    /// Checks the three axes for equal length and produces the validated
    /// list. The mismatch error is recoverable: the caller skips the
    /// affected module type and continues with the other.
    pub fn validate(self, module: &'static str) -> Result<PositionList, BuildError> {
        if self.xs.len() != self.ys.len() || self.xs.len() != self.zs.len() {
            return Err(BuildError::PositionCountMismatch {
                module,
                x: self.xs.len(),
                y: self.ys.len(),
                z: self.zs.len(),
            });
        }
        Ok(PositionList {
            xs: self.xs,
            ys: self.ys,
            zs: self.zs,
        })
    }
}

fn parse_values(entry: &PositionEntry) -> Result<Vec<f64>, BuildError> {
    entry
        .values
        .split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| BuildError::InvalidPositionValue {
                    name: entry.name.clone(),
                    token: token.to_string(),
                })
        })
        .collect()
}

/// Collects the named axis entries of a position table into per-axis
/// buffers. Repeated entries for one axis append to it; entries with an
/// unrecognized name are skipped with a warning.
pub fn collect_position_table(entries: &[PositionEntry]) -> Result<PositionBuffers, BuildError> {
    let mut buffers = PositionBuffers::default();
    for entry in entries {
        let target = match entry.name.as_str() {
            "xpos" => &mut buffers.xs,
            "ypos" => &mut buffers.ys,
            "zpos" => &mut buffers.zs,
            other => {
                warn!(name = other, "Skipping unknown position table entry");
                continue;
            }
        };
        target.extend(parse_values(entry)?);
    }
    Ok(buffers)
}
