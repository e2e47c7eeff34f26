// src/math/algorithms/metaballs/blend.rs

//! Verknüpfungsoperatoren für Distanzwerte.

use super::bubble::Bubble;
use bevy::math::Vec2;

/// Harte Vereinigung zweier Distanzfelder.
#[inline]
pub fn hard_union(d1: f32, d2: f32) -> f32 {
    d1.min(d2)
}

/// Polynomielles Smooth-Minimum.
///
/// `k` wird vor der Verwendung mit 4 skaliert; die visuelle Abstimmung der
/// Glättungsfaktoren hängt an genau dieser Skalierung. Für `4k <= |d1 - d2|`
/// fällt das Ergebnis auf `min(d1, d2)` zurück. `k` muss positiv sein.
#[inline]
pub fn smooth_union(d1: f32, d2: f32, k: f32) -> f32 {
    debug_assert!(k > 0.0, "smooth_union requires k > 0, got {k}");
    let k = k * 4.0;
    let h = (k - (d1 - d2).abs()).max(0.0);
    d1.min(d2) - h * h * 0.25 / k
}

/// Distanz einer Gruppe am Punkt `point`.
///
/// Einzelne Blasen liefern ihre eigene Distanz, genau zwei Mitglieder werden weich
/// verschmolzen, ab drei Mitgliedern wird nur mit `hard_union` gefaltet.
pub fn fold_group_distance(members: &[Bubble], smooth_factor: f32, point: Vec2) -> f32 {
    match members {
        [] => f32::INFINITY,
        [only] => only.distance(point),
        [first, second] => smooth_union(first.distance(point), second.distance(point), smooth_factor),
        [first, rest @ ..] => rest
            .iter()
            .fold(first.distance(point), |d, bubble| {
                hard_union(d, bubble.distance(point))
            }),
    }
}
