use crate::math::algorithms::metaballs::{Bubble, BubbleId};
use bevy::math::Vec2;

/// Aktive Auswahl einer Blase zwischen Gestenbeginn und -ende.
///
/// Die Blase wird nur über ihre stabile Id referenziert und bei jeder Verwendung
/// neu aufgelöst. Alle Änderungen werden relativ zum Zustand bei Auswahlbeginn
/// berechnet, nicht kumulativ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub target: BubbleId,
    pub initial_origin: Vec2,
    pub initial_radius: f32,
    /// Trefferpunkt im Feldraum bei Auswahlbeginn.
    pub initial_hit: Vec2,
}

impl Selection {
    pub fn begin(bubble: &Bubble, hit: Vec2) -> Self {
        Self {
            target: bubble.id,
            initial_origin: bubble.origin,
            initial_radius: bubble.radius,
            initial_hit: hit,
        }
    }

    /// `initial_origin + (point - initial_hit)`
    pub fn origin_for(&self, point: Vec2) -> Vec2 {
        self.initial_origin + (point - self.initial_hit)
    }

    /// `initial_radius * factor`
    pub fn radius_for(&self, factor: f32) -> f32 {
        self.initial_radius * factor
    }
}
