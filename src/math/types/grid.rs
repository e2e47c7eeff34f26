// src/math/types/grid.rs

use crate::math::error::{MathError, MathResult};
use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

/// Ausdehnung des Auswertungsgitters im Feldraum.
///
/// Zelle `(x, y)` wird in ihrem Mittelpunkt `((x + 0.5) * cell_size, (y + 0.5) * cell_size)`
/// ausgewertet. Eingaben (Gesten, Punktabfragen) werden bereits im Feldraum erwartet;
/// die Umrechnung aus Pixelkoordinaten ist Aufgabe des Hosts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridExtent {
    pub width: usize,
    pub height: usize,
    pub cell_size: f32,
}

impl GridExtent {
    pub fn new(width: usize, height: usize, cell_size: f32) -> MathResult<Self> {
        let extent = Self {
            width,
            height,
            cell_size,
        };
        extent.validate()?;
        Ok(extent)
    }

    pub fn validate(&self) -> MathResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MathError::InvalidConfiguration {
                message: format!(
                    "Grid extent must not be empty, got {}x{}",
                    self.width, self.height
                ),
            });
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(MathError::InvalidConfiguration {
                message: format!("Cell size must be positive, got {}", self.cell_size),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Zeilenweiser (row-major) Index, `None` außerhalb des Gitters.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn checked_index(&self, x: i64, y: i64) -> MathResult<usize> {
        if self.contains(x, y) {
            Ok(y as usize * self.width + x as usize)
        } else {
            Err(MathError::OutOfGrid {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Mittelpunkt der Zelle im Feldraum.
    pub fn cell_center(&self, x: usize, y: usize) -> Vec2 {
        Vec2::new(
            (x as f32 + 0.5) * self.cell_size,
            (y as f32 + 0.5) * self.cell_size,
        )
    }

    /// Zelle, in die ein Feldraum-Punkt fällt (kann außerhalb liegen).
    pub fn cell_of(&self, point: Vec2) -> (i64, i64) {
        (
            (point.x / self.cell_size).floor() as i64,
            (point.y / self.cell_size).floor() as i64,
        )
    }

    /// Größe des Gitters im Feldraum.
    pub fn size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.cell_size,
            self.height as f32 * self.cell_size,
        )
    }
}
