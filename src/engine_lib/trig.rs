// src/engine_lib/trig.rs

/// Cosine/sine lookup per integer degree. The global rotation angle grows
/// without bound across frames, so lookups reduce modulo 360 and accept
/// negative angles; values are precomputed once to keep transcendental calls
/// out of the per-tooth stroke loop.
pub struct AngleTable {
    cos: [f64; 360],
    sin: [f64; 360],
}

impl AngleTable {
    pub fn new() -> Self {
        let mut cos = [0.0; 360];
        let mut sin = [0.0; 360];
        for degree in 0..360 {
            let radians = (degree as f64).to_radians();
            cos[degree] = radians.cos();
            sin[degree] = radians.sin();
        }
        Self { cos, sin }
    }

    pub fn cos_deg(&self, angle: f64) -> f64 {
        self.cos[Self::index(angle)]
    }

    pub fn sin_deg(&self, angle: f64) -> f64 {
        self.sin[Self::index(angle)]
    }

    // Truncate toward zero, then shift negatives into [0, 360).
    fn index(angle: f64) -> usize {
        let reduced = (angle as i64) % 360;
        if reduced < 0 {
            (reduced + 360) as usize
        } else {
            reduced as usize
        }
    }
}

impl Default for AngleTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_direct_trig_on_integer_degrees() {
        let table = AngleTable::new();
        for degree in 0..360 {
            let radians = (degree as f64).to_radians();
            assert!((table.cos_deg(degree as f64) - radians.cos()).abs() < 1e-12);
            assert!((table.sin_deg(degree as f64) - radians.sin()).abs() < 1e-12);
        }
    }

    #[test]
    fn negative_angles_wrap_up() {
        let table = AngleTable::new();
        assert_eq!(table.cos_deg(-30.0), table.cos_deg(330.0));
        assert_eq!(table.sin_deg(-90.0), table.sin_deg(270.0));
        assert_eq!(table.cos_deg(-360.0), table.cos_deg(0.0));
    }

    #[test]
    fn large_angles_reduce_modulo_360() {
        let table = AngleTable::new();
        assert_eq!(table.cos_deg(725.0), table.cos_deg(5.0));
        assert_eq!(table.sin_deg(1080.0), table.sin_deg(0.0));
        assert_eq!(table.cos_deg(-725.0), table.cos_deg(355.0));
    }

    #[test]
    fn fractional_angles_truncate() {
        let table = AngleTable::new();
        assert_eq!(table.cos_deg(5.9), table.cos_deg(5.0));
        assert_eq!(table.sin_deg(-0.5), table.sin_deg(0.0));
    }
}
