// src/math/algorithms/refraction.rs

//! Eingaben für das Brechungs-Shading über dem Hintergrundbild.
//!
//! Lichtrichtung und Gradientenskala sind expliziter Zustand, der pro Tick an das
//! Shading übergeben wird. Sensorwerte kommen als `MotionSample` über einen Kanal
//! (siehe `session::sensor`) und werden mit `ShadingParams::apply_motion` eingefaltet.

use super::metaballs::GradientSample;
use crate::math::utils::constants::EPSILON_SQUARED;
use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadingParams {
    /// Normierte Lichtrichtung im Feldraum.
    pub light_direction: Vec2,
    /// Verschiebung (Feldraum) der Hintergrundabtastung am Blasenrand.
    pub gradient_scale: f32,
    /// Tiefe, ab der die Brechung im Inneren abgeklungen ist.
    pub refraction_depth: f32,
    pub shininess: f32,
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self {
            light_direction: Vec2::new(-0.6, -0.8),
            gradient_scale: 12.0,
            refraction_depth: 24.0,
            shininess: 16.0,
        }
    }
}

/// Neigungswert eines Bewegungssensors, je Achse etwa in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionSample {
    pub tilt: Vec2,
}

impl ShadingParams {
    /// Übernimmt einen Sensorwert: die Neigung gibt die Lichtrichtung vor,
    /// ihr Betrag verstärkt die Gradientenskala (höchstens Faktor 2).
    pub fn apply_motion(&mut self, sample: MotionSample, base_gradient_scale: f32) {
        if sample.tilt.length_squared() > EPSILON_SQUARED {
            self.light_direction = sample.tilt.normalize();
        }
        self.gradient_scale = base_gradient_scale * (1.0 + sample.tilt.length().min(1.0));
    }
}

/// Shading-Ergebnis einer Zelle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RefractionSample {
    /// Verschiebung der Hintergrundabtastung im Feldraum.
    pub offset: Vec2,
    /// Glanzlicht in [0, 1].
    pub highlight: f32,
    pub inside: bool,
}

pub fn shade_sample(sample: &GradientSample, params: &ShadingParams) -> RefractionSample {
    if !sample.is_inside() {
        return RefractionSample::default();
    }

    // 1 direkt am Rand, 0 ab `refraction_depth` im Inneren
    let rim = if params.refraction_depth > 0.0 {
        (1.0 + sample.distance / params.refraction_depth).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let offset = -sample.gradient * params.gradient_scale * rim;
    let highlight = sample
        .gradient
        .dot(params.light_direction)
        .max(0.0)
        .powf(params.shininess)
        * rim;

    RefractionSample {
        offset,
        highlight,
        inside: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample(gradient: Vec2, distance: f32) -> GradientSample {
        GradientSample { gradient, distance }
    }

    #[test]
    fn test_outside_is_untouched() {
        let shaded = shade_sample(&sample(Vec2::X, 0.5), &ShadingParams::default());
        assert_eq!(shaded, RefractionSample::default());
    }

    #[test]
    fn test_refraction_fades_towards_center() {
        let params = ShadingParams::default();
        let rim = shade_sample(&sample(Vec2::X, 0.0), &params);
        assert!(rim.inside);
        assert_relative_eq!(rim.offset.x, -params.gradient_scale);

        let half = shade_sample(&sample(Vec2::X, -params.refraction_depth * 0.5), &params);
        assert_relative_eq!(half.offset.x, -params.gradient_scale * 0.5);

        let deep = shade_sample(&sample(Vec2::X, -params.refraction_depth * 2.0), &params);
        assert_eq!(deep.offset, Vec2::ZERO);
        assert!(deep.inside);
    }

    #[test]
    fn test_highlight_follows_light_direction() {
        let params = ShadingParams {
            light_direction: Vec2::Y,
            ..Default::default()
        };
        let lit = shade_sample(&sample(Vec2::Y, 0.0), &params);
        let dark = shade_sample(&sample(-Vec2::Y, 0.0), &params);
        assert_relative_eq!(lit.highlight, 1.0);
        assert_eq!(dark.highlight, 0.0);
    }

    #[test]
    fn test_apply_motion() {
        let mut params = ShadingParams::default();
        params.apply_motion(
            MotionSample {
                tilt: Vec2::new(0.0, 0.5),
            },
            10.0,
        );
        assert_eq!(params.light_direction, Vec2::Y);
        assert_relative_eq!(params.gradient_scale, 15.0);

        // Ruhelage behält die Lichtrichtung
        params.apply_motion(MotionSample::default(), 10.0);
        assert_eq!(params.light_direction, Vec2::Y);
        assert_relative_eq!(params.gradient_scale, 10.0);
    }
}
