// src/math/algorithms/metaballs/builder.rs

use super::compositor::FieldCompositor;
use super::field::EdgePolicy;
use crate::math::error::MathResult;
use crate::math::types::GridExtent;

/// Builder zum komfortablen Erstellen und Konfigurieren von `FieldCompositor`-Instanzen.
#[derive(Debug, Clone)]
pub struct FieldCompositorBuilder {
    width: usize,
    height: usize,
    cell_size: f32,
    edge_policy: EdgePolicy,
    rows_per_band: usize,
}

impl Default for FieldCompositorBuilder {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            cell_size: 1.0,
            edge_policy: EdgePolicy::Clamp,
            rows_per_band: 16,
        }
    }
}

impl FieldCompositorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid_dimensions(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn cell_size(mut self, size: f32) -> Self {
        self.cell_size = size;
        self
    }

    pub fn extent(self, extent: GridExtent) -> Self {
        self.grid_dimensions(extent.width, extent.height)
            .cell_size(extent.cell_size)
    }

    pub fn edge_policy(mut self, policy: EdgePolicy) -> Self {
        self.edge_policy = policy;
        self
    }

    pub fn rows_per_band(mut self, rows: usize) -> Self {
        self.rows_per_band = rows.max(1);
        self
    }

    /// Leere Gitter und nicht-positive Zellgrößen werden abgelehnt, nicht korrigiert.
    pub fn build(self) -> MathResult<FieldCompositor> {
        let extent = GridExtent::new(self.width, self.height, self.cell_size)?;
        Ok(FieldCompositor {
            extent,
            edge_policy: self.edge_policy,
            rows_per_band: self.rows_per_band,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::error::MathError;

    #[test]
    fn test_builder_rejects_degenerate_extent() {
        for builder in [
            FieldCompositorBuilder::new().grid_dimensions(0, 16),
            FieldCompositorBuilder::new().grid_dimensions(16, 0),
            FieldCompositorBuilder::new().cell_size(-3.0),
            FieldCompositorBuilder::new().cell_size(f32::NAN),
            FieldCompositorBuilder::new().extent(GridExtent {
                width: 0,
                height: 240,
                cell_size: f32::NAN,
            }),
        ] {
            assert!(matches!(
                builder.build(),
                Err(MathError::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn test_rows_per_band_is_at_least_one() {
        let compositor = FieldCompositorBuilder::new().rows_per_band(0).build().unwrap();
        assert_eq!(compositor.rows_per_band, 1);
    }

    #[test]
    fn test_builder_from_extent() {
        let compositor = FieldCompositorBuilder::new()
            .extent(GridExtent::new(32, 16, 2.0).unwrap())
            .edge_policy(EdgePolicy::Mirror)
            .build()
            .unwrap();
        assert_eq!(compositor.extent, GridExtent::new(32, 16, 2.0).unwrap());
        assert_eq!(compositor.edge_policy, EdgePolicy::Mirror);
    }
}
