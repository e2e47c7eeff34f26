// src/math/algorithms/metaballs/field.rs
use crate::math::error::MathResult;
use crate::math::scalar_field::ScalarField2D;
use crate::math::types::GridExtent;
use bevy::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Vorzeichenbehaftete Distanzwerte pro Gitterzelle plus Belegungsmaske.
/// Die Daten werden zeilenweise (row-major) gespeichert.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarGrid {
    extent: GridExtent,
    data: Vec<f32>,
    inside: Vec<bool>,
}

impl ScalarGrid {
    /// Neues Gitter, alle Zellen "außerhalb" mit Distanz `+inf`.
    pub fn new(extent: GridExtent) -> Self {
        Self {
            extent,
            data: vec![f32::INFINITY; extent.cell_count()],
            inside: vec![false; extent.cell_count()],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        self.extent.index(x, y).map(|i| self.data[i])
    }

    /// Wie `get`, aber Abfragen außerhalb des Gitters werden als Fehler abgelehnt.
    pub fn value_at(&self, x: i64, y: i64) -> MathResult<f32> {
        let index = self.extent.checked_index(x, y)?;
        Ok(self.data[index])
    }

    pub fn is_inside(&self, x: usize, y: usize) -> Option<bool> {
        self.extent.index(x, y).map(|i| self.inside[i])
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn occupied_cells(&self) -> usize {
        self.inside.iter().filter(|&&inside| inside).count()
    }

    /// Zerlegt das Gitter in Bänder aus `rows_per_band` Zeilen für die parallele Auswertung.
    /// Liefert die erste Zeile des Bandes und die beiden zugehörigen Datenstreifen.
    pub(crate) fn bands_mut(
        &mut self,
        rows_per_band: usize,
    ) -> impl Iterator<Item = (usize, &mut [f32], &mut [bool])> {
        let rows_per_band = rows_per_band.max(1);
        let band_len = rows_per_band * self.extent.width;
        self.data
            .chunks_mut(band_len)
            .zip(self.inside.chunks_mut(band_len))
            .enumerate()
            .map(move |(band, (values, inside))| (band * rows_per_band, values, inside))
    }
}

impl ScalarField2D for ScalarGrid {
    fn extent(&self) -> GridExtent {
        self.extent
    }

    fn get_value(&self, x_idx: usize, y_idx: usize) -> Option<f32> {
        self.get(x_idx, y_idx)
    }
}

/// Randbehandlung des Differenzen-Stencils im Gradienten-Pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EdgePolicy {
    /// Nachbarindex wird auf das Gitter geklemmt (Randzelle liest sich selbst).
    #[default]
    Clamp,
    /// Nachbarindex wird am Rand gespiegelt (-1 => 1, len => len - 2).
    Mirror,
}

impl EdgePolicy {
    /// Bildet einen möglicherweise außerhalb liegenden Index auf `0..len` ab.
    pub fn resolve(self, index: i64, len: usize) -> usize {
        let last = len.saturating_sub(1) as i64;
        let resolved = match self {
            EdgePolicy::Clamp => index.clamp(0, last),
            EdgePolicy::Mirror => {
                if index < 0 {
                    (-index).min(last)
                } else if index > last {
                    (2 * last - index).max(0)
                } else {
                    index
                }
            }
        };
        resolved as usize
    }
}

/// Gradient und Distanz einer Zelle, gepackt für das nachgelagerte Shading.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GradientSample {
    /// Normierter Gradient, `(0, 0)` bei degeneriertem Feld.
    pub gradient: Vec2,
    pub distance: f32,
}

impl GradientSample {
    /// `(gx, gy, distance)`
    pub fn packed(&self) -> Vec3 {
        self.gradient.extend(self.distance)
    }

    pub fn is_inside(&self) -> bool {
        self.distance <= 0.0
    }
}

/// Gradientenfeld, abgeleitet ausschließlich aus einem fertigen `ScalarGrid`.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientField {
    extent: GridExtent,
    data: Vec<GradientSample>,
}

impl GradientField {
    pub(crate) fn from_samples(extent: GridExtent, data: Vec<GradientSample>) -> Self {
        debug_assert_eq!(data.len(), extent.cell_count());
        Self { extent, data }
    }

    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&GradientSample> {
        self.extent.index(x, y).map(|i| &self.data[i])
    }

    pub fn sample_at(&self, x: i64, y: i64) -> MathResult<GradientSample> {
        let index = self.extent.checked_index(x, y)?;
        Ok(self.data[index])
    }

    pub fn samples(&self) -> &[GradientSample] {
        &self.data
    }
}

/// Zentraldifferenz an Zelle `(x, y)`, normiert.
///
/// `dX = (s(x+1, y) - s(x-1, y)) / 2`, `dY = (s(x, y+1) - s(x, y-1)) / 2`.
/// Nachbarn außerhalb des Gitters werden über `edge` aufgelöst.
pub fn central_gradient<F: ScalarField2D>(field: &F, x: usize, y: usize, edge: EdgePolicy) -> Vec2 {
    let (width, height) = (field.width(), field.height());
    let (xi, yi) = (x as i64, y as i64);
    let sample = |sx: i64, sy: i64| {
        field
            .get_value(edge.resolve(sx, width), edge.resolve(sy, height))
            .unwrap_or(0.0)
    };

    let dx = (sample(xi + 1, yi) - sample(xi - 1, yi)) / 2.0;
    let dy = (sample(xi, yi + 1) - sample(xi, yi - 1)) / 2.0;
    Vec2::new(dx, dy).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::error::MathError;

    fn extent(w: usize, h: usize) -> GridExtent {
        GridExtent::new(w, h, 1.0).unwrap()
    }

    #[test]
    fn test_new_grid_is_empty_outside() {
        let grid = ScalarGrid::new(extent(3, 2));
        assert_eq!(grid.data().len(), 6);
        assert_eq!(grid.get(2, 1), Some(f32::INFINITY));
        assert_eq!(grid.get(3, 1), None);
        assert_eq!(grid.occupied_cells(), 0);
    }

    #[test]
    fn test_out_of_grid_value_is_rejected() {
        let grid = ScalarGrid::new(extent(3, 2));
        assert!(grid.value_at(0, 0).is_ok());
        assert_eq!(
            grid.value_at(3, 0),
            Err(MathError::OutOfGrid {
                x: 3,
                y: 0,
                width: 3,
                height: 2
            })
        );
    }

    #[test]
    fn test_bands_cover_grid() {
        let mut grid = ScalarGrid::new(extent(4, 5));
        let bands: Vec<(usize, usize)> = grid
            .bands_mut(2)
            .map(|(row, values, _)| (row, values.len()))
            .collect();
        assert_eq!(bands, vec![(0, 8), (2, 8), (4, 4)]);
    }

    #[test]
    fn test_edge_policy_resolve() {
        assert_eq!(EdgePolicy::Clamp.resolve(-1, 5), 0);
        assert_eq!(EdgePolicy::Clamp.resolve(5, 5), 4);
        assert_eq!(EdgePolicy::Clamp.resolve(2, 5), 2);
        assert_eq!(EdgePolicy::Mirror.resolve(-1, 5), 1);
        assert_eq!(EdgePolicy::Mirror.resolve(5, 5), 3);
        assert_eq!(EdgePolicy::Mirror.resolve(-1, 1), 0);
        assert_eq!(EdgePolicy::Mirror.resolve(1, 1), 0);
    }

    #[test]
    fn test_gradient_of_linear_ramp() {
        // s(x, y) = x  => Gradient (1, 0)
        let mut grid = ScalarGrid::new(extent(5, 3));
        for (_, values, _) in grid.bands_mut(1) {
            for (x, v) in values.iter_mut().enumerate() {
                *v = x as f32;
            }
        }
        assert_eq!(central_gradient(&grid, 2, 1, EdgePolicy::Clamp), Vec2::X);
        // Am Rand mit Clamp weiterhin (1, 0)
        assert_eq!(central_gradient(&grid, 0, 0, EdgePolicy::Clamp), Vec2::X);
        // Mirror am Rand: (s(1) - s(1)) / 2 = 0 => degeneriert
        assert_eq!(central_gradient(&grid, 0, 0, EdgePolicy::Mirror), Vec2::ZERO);
    }

    #[test]
    fn test_gradient_sample_packing() {
        let sample = GradientSample {
            gradient: Vec2::new(0.6, -0.8),
            distance: -2.0,
        };
        assert_eq!(sample.packed(), Vec3::new(0.6, -0.8, -2.0));
        assert!(sample.is_inside());
    }
}
