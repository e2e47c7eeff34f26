// src/math/algorithms/metaballs/compositor.rs

use super::accessor::{FieldAccessor, FieldHit, GridCellAccessor};
use super::clustering::ClusterLayout;
use super::evaluator::evaluate_with;
use super::field::{EdgePolicy, GradientField, GradientSample, ScalarGrid, central_gradient};
use crate::math::error::{MathError, MathResult};
use crate::math::types::GridExtent;
use bevy::log::debug;
use bevy::tasks::{ComputeTaskPool, TaskPool};

/// Skalar- und Gradientenfeld eines Ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositedFields {
    pub scalar: ScalarGrid,
    pub gradient: GradientField,
}

/// Treibt den Feld-Evaluator über das ganze Gitter und leitet daraus das Gradientenfeld ab.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCompositor {
    pub extent: GridExtent,
    pub edge_policy: EdgePolicy,
    /// Zeilen pro paralleler Aufgabe.
    pub rows_per_band: usize,
}

impl FieldCompositor {
    pub fn new(extent: GridExtent) -> Self {
        Self {
            extent,
            edge_policy: EdgePolicy::default(),
            rows_per_band: 16,
        }
    }

    /// Baut beide Felder aus einem (unveränderlichen) Gruppierungs-Snapshot.
    ///
    /// Zwei Pässe auf dem `ComputeTaskPool`: erst das Skalarfeld, dann der Gradient.
    /// Der Gradienten-Pass startet erst, wenn jede Zelle des Skalarfelds final ist.
    pub fn build_fields(&self, layout: &ClusterLayout) -> MathResult<CompositedFields> {
        self.extent.validate()?;
        let pool = ComputeTaskPool::get_or_init(TaskPool::default);

        let scalar = self.scalar_pass(pool, layout)?;
        // Barriere: scope() kehrt erst zurück, wenn alle Bänder fertig sind.
        let gradient = self.gradient_pass(pool, &scalar);

        Ok(CompositedFields { scalar, gradient })
    }

    /// Wertet eine einzelne Gitterzelle aus. Zellen außerhalb werden abgelehnt.
    pub fn evaluate_cell(&self, layout: &ClusterLayout, x: i64, y: i64) -> MathResult<FieldHit> {
        let mut value = f32::INFINITY;
        let mut inside = false;
        let mut accessor = GridCellAccessor::new(self.extent, x, y, &mut value, &mut inside);
        evaluate_with(layout, &mut accessor)?;
        Ok(accessor.read())
    }

    fn scalar_pass(&self, pool: &TaskPool, layout: &ClusterLayout) -> MathResult<ScalarGrid> {
        let extent = self.extent;
        let mut grid = ScalarGrid::new(extent);

        let band_results: Vec<MathResult<usize>> = pool.scope(|scope| {
            for (first_row, values, inside) in grid.bands_mut(self.rows_per_band) {
                scope.spawn(async move {
                    let mut occupied = 0;
                    for (offset, (value, inside)) in values.iter_mut().zip(inside.iter_mut()).enumerate() {
                        let x = (offset % extent.width) as i64;
                        let y = (first_row + offset / extent.width) as i64;
                        let mut accessor = GridCellAccessor::new(extent, x, y, value, inside);
                        if evaluate_with(layout, &mut accessor)?.inside {
                            occupied += 1;
                        }
                    }
                    Ok::<usize, MathError>(occupied)
                });
            }
        });

        let mut occupied = 0;
        for result in band_results {
            occupied += result?;
        }
        debug!(
            "Scalar pass: {} of {} cell(s) inside, {} group(s)",
            occupied,
            extent.cell_count(),
            layout.group_count()
        );

        Ok(grid)
    }

    fn gradient_pass(&self, pool: &TaskPool, scalar: &ScalarGrid) -> GradientField {
        let extent = self.extent;
        let edge = self.edge_policy;
        let rows_per_band = self.rows_per_band.max(1);
        let mut samples = vec![GradientSample::default(); extent.cell_count()];

        pool.scope(|scope| {
            for (band, chunk) in samples.chunks_mut(rows_per_band * extent.width).enumerate() {
                scope.spawn(async move {
                    let band_start = band * rows_per_band * extent.width;
                    for (offset, sample) in chunk.iter_mut().enumerate() {
                        let index = band_start + offset;
                        let (x, y) = (index % extent.width, index / extent.width);
                        *sample = GradientSample {
                            gradient: central_gradient(scalar, x, y, edge),
                            distance: scalar.data()[index],
                        };
                    }
                });
            }
        });

        GradientField::from_samples(extent, samples)
    }
}
