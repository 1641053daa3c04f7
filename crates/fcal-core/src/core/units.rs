//! Length unit constants.
//!
//! All geometry in this crate is expressed in a centimeter-based system.
//! Position tables in detector descriptions may be authored in other units;
//! the workflow drivers scale them with these constants (the longitudinally
//! stacked variant uses millimeter tables, the grid variant centimeter
//! tables).

/// One centimeter, the base length unit.
pub const CM: f64 = 1.0;

/// One millimeter.
pub const MM: f64 = 0.1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_millimeters_make_one_centimeter() {
        assert_eq!(10.0 * MM, CM);
    }
}
