use crate::core::models::material::MaterialError;
use thiserror::Error;

/// Errors raised while building a detector from its description.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Material(#[from] MaterialError),

    #[error(
        "Position table for {module} modules has mismatched lengths: \
         {x} x, {y} y, {z} z values"
    )]
    PositionCountMismatch {
        module: &'static str,
        x: usize,
        y: usize,
        z: usize,
    },

    #[error("Position table entry '{name}' contains a non-numeric value '{token}'")]
    InvalidPositionValue { name: String, token: String },

    #[error("Description is missing the '{0}' section required by this variant")]
    MissingSection(&'static str),

    #[error("Description defines no layers; a module needs at least one slice")]
    EmptyLayerStack,
}
