use phf::{Map, phf_map};
use std::collections::HashMap;
use thiserror::Error;

/// Nominal densities in g/cm³ for the materials every calorimeter
/// description relies on. Descriptions may register further materials or
/// override these entries.
static DEFAULT_DENSITIES: Map<&'static str, f64> = phf_map! {
    "Air" => 0.0012,
    "Steel235" => 7.85,
    "Tungsten" => 19.3,
    "Polystyrene" => 1.06,
    "PlasticScint" => 1.03,
    "Tyvek" => 0.38,
    "Fr4" => 1.86,
    "Ti02Epoxy" => 2.23,
};

/// A named construction material.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    /// Density in g/cm³. Carried for bookkeeping; the construction engine
    /// only dispatches on the material name.
    pub density: f64,
}

impl Material {
    pub fn new(name: &str, density: f64) -> Self {
        Self {
            name: name.to_string(),
            density,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaterialError {
    #[error("unknown material '{0}'")]
    Unknown(String),
}

/// Material lookup by name.
///
/// A failed lookup is a fatal configuration error for the caller: the
/// construction engine propagates it instead of substituting a default,
/// because a module built with the wrong material is silently wrong in
/// every downstream simulation.
#[derive(Debug, Clone, Default)]
pub struct MaterialRegistry {
    materials: HashMap<String, Material>,
}

impl MaterialRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-populated with the default material table.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (name, density) in DEFAULT_DENSITIES.entries() {
            registry.register(Material::new(name, *density));
        }
        registry
    }

    /// Registers a material, replacing any existing entry of the same name.
    pub fn register(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    /// Looks up a material by name.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::Unknown`] if no material of that name has
    /// been registered.
    pub fn get(&self, name: &str) -> Result<&Material, MaterialError> {
        self.materials
            .get(name)
            .ok_or_else(|| MaterialError::Unknown(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Iterates over all registered materials in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_structural_and_active_materials() {
        let registry = MaterialRegistry::with_defaults();
        for name in ["Steel235", "Tungsten", "Polystyrene", "Tyvek", "Air"] {
            assert!(registry.get(name).is_ok(), "missing default '{}'", name);
        }
    }

    #[test]
    fn unknown_material_is_an_error_with_the_offending_name() {
        let registry = MaterialRegistry::with_defaults();
        let err = registry.get("Unobtainium").unwrap_err();
        assert_eq!(err, MaterialError::Unknown("Unobtainium".to_string()));
    }

    #[test]
    fn registering_overrides_an_existing_entry() {
        let mut registry = MaterialRegistry::with_defaults();
        registry.register(Material::new("Air", 0.0));
        assert_eq!(registry.get("Air").unwrap().density, 0.0);
    }

    #[test]
    fn empty_registry_knows_nothing() {
        let registry = MaterialRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("Air").is_err());
    }
}
