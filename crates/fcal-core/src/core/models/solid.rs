/// An axis-aligned box stored as half-extents along x, y, and z.
///
/// Half-extent storage mirrors the convention of detector-description
/// frameworks: callers construct plates as `Box3::new(w / 2.0, h / 2.0,
/// t / 2.0)` so the dimension arithmetic in the builders reads the same way
/// as the engineering drawings it encodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Box3 {
    pub half_x: f64,
    pub half_y: f64,
    pub half_z: f64,
}

impl Box3 {
    pub fn new(half_x: f64, half_y: f64, half_z: f64) -> Self {
        Self {
            half_x,
            half_y,
            half_z,
        }
    }

    /// Full extents `(width, height, depth)`.
    pub fn full_extents(&self) -> (f64, f64, f64) {
        (2.0 * self.half_x, 2.0 * self.half_y, 2.0 * self.half_z)
    }
}

/// The shape carried by a volume node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solid {
    /// A shapeless container; its children define its extent.
    Assembly,
    /// A solid axis-aligned box.
    Box(Box3),
    /// `base` with `cut` removed, both centered on the volume origin.
    ///
    /// This is the shape of the module back plate: a full plate with a
    /// rectangular through-cut for cabling and light guides.
    Subtraction { base: Box3, cut: Box3 },
}

impl Solid {
    pub fn is_assembly(&self) -> bool {
        matches!(self, Solid::Assembly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box3_reports_full_extents() {
        let b = Box3::new(1.0, 2.5, 0.5);
        assert_eq!(b.full_extents(), (2.0, 5.0, 1.0));
    }

    #[test]
    fn assembly_is_recognized() {
        assert!(Solid::Assembly.is_assembly());
        assert!(!Solid::Box(Box3::new(1.0, 1.0, 1.0)).is_assembly());
    }
}
