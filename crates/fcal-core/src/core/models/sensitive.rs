/// Registration handle for sensitive (readout) volumes.
///
/// Mirrors the sensitive-detector object of detector-description
/// frameworks: the caller sets the detector type once (the builders set it
/// to `"calorimeter"` before every registration, which is idempotent) and
/// the handle keeps a running count of registered volumes for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct SensitiveDetector {
    detector_type: Option<String>,
    registered: usize,
}

impl SensitiveDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_type(&mut self, detector_type: &str) {
        self.detector_type = Some(detector_type.to_string());
    }

    /// The configured detector type, or `"calorimeter"` if none was set.
    pub fn detector_type(&self) -> &str {
        self.detector_type.as_deref().unwrap_or("calorimeter")
    }

    /// Number of volumes marked sensitive through this handle.
    pub fn registered(&self) -> usize {
        self.registered
    }

    pub(crate) fn count_registration(&mut self) {
        self.registered += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_calorimeter_type() {
        let sens = SensitiveDetector::new();
        assert_eq!(sens.detector_type(), "calorimeter");
        assert_eq!(sens.registered(), 0);
    }

    #[test]
    fn set_type_overrides_the_default() {
        let mut sens = SensitiveDetector::new();
        sens.set_type("tracker");
        assert_eq!(sens.detector_type(), "tracker");
    }
}
