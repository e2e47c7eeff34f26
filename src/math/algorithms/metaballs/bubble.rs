// src/math/algorithms/metaballs/bubble.rs

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stabile Identität einer Blase. Wird beim Anlegen vergeben, steigt monoton
/// und wird innerhalb einer Sitzung nie wiederverwendet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BubbleId(pub u32);

impl fmt::Display for BubbleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ein Kreis im Feldraum, auswertbar als vorzeichenbehaftete Distanzfunktion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub id: BubbleId,
    pub origin: Vec2,
    pub radius: f32,
}

impl Bubble {
    pub fn new(id: BubbleId, origin: Vec2, radius: f32) -> Self {
        Self { id, origin, radius }
    }

    /// `|p - origin| - radius`; `<= 0` heißt innen oder auf dem Rand.
    #[inline]
    pub fn distance(&self, point: Vec2) -> f32 {
        self.origin.distance(point) - self.radius
    }

    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        self.distance(point) <= 0.0
    }

    /// Berührungsprädikat der Gruppierung: Mittelpunktsabstand <= Radiensumme.
    /// Liefert den Mittelpunktsabstand, falls sich die Kreise berühren.
    #[inline]
    pub fn touching_distance(&self, other: &Bubble) -> Option<f32> {
        let d = self.origin.distance(other.origin);
        (d <= self.radius + other.radius).then_some(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bubble(x: f32, y: f32, r: f32) -> Bubble {
        Bubble::new(BubbleId(0), Vec2::new(x, y), r)
    }

    #[test]
    fn test_distance_inside_on_outside() {
        let b = bubble(10.0, -5.0, 4.0);
        assert_relative_eq!(b.distance(Vec2::new(10.0, -5.0)), -4.0);
        assert_relative_eq!(b.distance(Vec2::new(14.0, -5.0)), 0.0);
        assert_relative_eq!(b.distance(Vec2::new(10.0, 1.0)), 2.0);
        assert!(b.contains(Vec2::new(14.0, -5.0)));
        assert!(!b.contains(Vec2::new(14.1, -5.0)));
    }

    #[test]
    fn test_touching_includes_tangent_case() {
        let a = bubble(0.0, 0.0, 50.0);
        let b = bubble(100.0, 0.0, 50.0);
        let c = bubble(100.5, 0.0, 50.0);
        assert_eq!(a.touching_distance(&b), Some(100.0));
        assert_eq!(a.touching_distance(&c), None);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(BubbleId(7).to_string(), "#7");
    }
}
