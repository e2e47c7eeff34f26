use crate::math::algorithms::ShadingParams;
use crate::math::algorithms::metaballs::{
    ClusterConfig, ClusterLayout, CompositedFields, EdgePolicy, FieldCompositor,
    FieldCompositorBuilder,
};
use crate::math::error::{MathError, MathResult};
use crate::math::types::GridExtent;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Einstellungen der Blasen-Sitzung. Serialisierbar, damit der Host sie aus
/// seinem eigenen Format laden kann.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubbleSettings {
    // --- Gitter ---
    pub grid_width: usize,
    pub grid_height: usize,
    pub cell_size: f32,
    pub edge_policy: EdgePolicy,
    pub rows_per_band: usize,

    // --- Gruppierung ---
    pub cluster: ClusterConfig,

    // --- Bearbeitung ---
    /// Radius neuer Blasen (Tippen auf freie Fläche).
    pub default_radius: f32,

    // --- Shading ---
    pub gradient_scale: f32,
    pub light_direction: Vec2,

    /// Optionaler Seed für die Zufallsbefüllung der Demo-Szene.
    pub seed: Option<u64>,
}

impl Default for BubbleSettings {
    fn default() -> Self {
        Self {
            grid_width: 320,
            grid_height: 240,
            cell_size: 2.5,
            edge_policy: EdgePolicy::Clamp,
            rows_per_band: 16,

            cluster: ClusterConfig::default(),

            default_radius: 60.0,

            gradient_scale: ShadingParams::default().gradient_scale,
            light_direction: ShadingParams::default().light_direction,

            seed: None,
        }
    }
}

impl BubbleSettings {
    pub fn extent(&self) -> GridExtent {
        GridExtent {
            width: self.grid_width,
            height: self.grid_height,
            cell_size: self.cell_size,
        }
    }

    pub fn compositor(&self) -> MathResult<FieldCompositor> {
        FieldCompositorBuilder::new()
            .extent(self.extent())
            .edge_policy(self.edge_policy)
            .rows_per_band(self.rows_per_band)
            .build()
    }

    pub fn shading(&self) -> ShadingParams {
        ShadingParams {
            light_direction: self.light_direction.normalize_or_zero(),
            gradient_scale: self.gradient_scale,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> MathResult<()> {
        self.extent().validate()?;
        self.cluster.validate()?;
        if !(self.default_radius.is_finite() && self.default_radius > 0.0) {
            return Err(MathError::InvalidConfiguration {
                message: format!("Default radius must be positive, got {}", self.default_radius),
            });
        }
        Ok(())
    }
}

/// Gruppierung des aktuellen Ticks. Hält Kopien der Blasen, damit die
/// Feldauswertung nie Blasen liest, die gerade bearbeitet werden.
#[derive(Resource, Debug, Clone, Default)]
pub struct ClusterSnapshot {
    pub layout: ClusterLayout,
    pub tick: u64,
}

/// Skalar- und Gradientenfeld des letzten erfolgreichen Ticks.
#[derive(Resource, Debug, Clone, Default)]
pub struct BubbleFields {
    pub fields: Option<CompositedFields>,
    pub tick: u64,
}

/// Expliziter Shading-Zustand, pro Tick an die Feld-/Shading-Berechnung übergeben.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ShadingState(pub ShadingParams);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = BubbleSettings::default();
        assert!(settings.validate().is_ok());
        let compositor = settings.compositor().unwrap();
        assert_eq!(compositor.extent, settings.extent());
        assert_eq!(compositor.edge_policy, EdgePolicy::Clamp);
    }

    #[test]
    fn test_invalid_settings_are_reported() {
        let settings = BubbleSettings {
            grid_width: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = BubbleSettings {
            default_radius: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_invalid_extent_has_no_compositor() {
        let settings = BubbleSettings {
            grid_width: 0,
            cell_size: f32::NAN,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
        assert!(matches!(
            settings.compositor(),
            Err(MathError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_shading_from_settings_normalizes_light() {
        let settings = BubbleSettings {
            light_direction: Vec2::new(0.0, 3.0),
            gradient_scale: 7.0,
            ..Default::default()
        };
        let shading = settings.shading();
        assert_eq!(shading.light_direction, Vec2::Y);
        assert_eq!(shading.gradient_scale, 7.0);
    }
}
