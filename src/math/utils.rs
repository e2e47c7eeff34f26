// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const EPSILON: f32 = 1e-6;
    pub const EPSILON_SQUARED: f32 = EPSILON * EPSILON; // Für Vergleiche mit Längen
}

/// Zufallshilfen für Testszenen und Demo-Befüllung
pub mod random {
    use bevy::math::Vec2;
    use rand::Rng;

    /// Zufälliger Punkt im Rechteck [min, max)
    pub fn random_point_in_rect(min: Vec2, max: Vec2, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            rng.random_range(min.x..max.x),
            rng.random_range(min.y..max.y),
        )
    }

    /// Zufälliger Wert im halboffenen Intervall, toleriert leere Intervalle
    pub fn random_in_range(min: f32, max: f32, rng: &mut impl Rng) -> f32 {
        if max <= min {
            min
        } else {
            rng.random_range(min..max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec2;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_random_point_stays_in_rect() {
        let mut rng = StdRng::seed_from_u64(42);
        let min = Vec2::new(-10.0, 5.0);
        let max = Vec2::new(10.0, 6.0);
        for _ in 0..100 {
            let p = random::random_point_in_rect(min, max, &mut rng);
            assert!(p.x >= min.x && p.x < max.x);
            assert!(p.y >= min.y && p.y < max.y);
        }
    }

    #[test]
    fn test_random_in_empty_range() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random::random_in_range(3.0, 3.0, &mut rng), 3.0);
    }
}
