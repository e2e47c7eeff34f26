// src/math/scalar_field.rs

use crate::math::types::GridExtent;

/// Trait für ein zweidimensionales Skalarfeld.
/// Der Gradienten-Pass und die Shading-Seite arbeiten über diesen Trait auf dem Feld.
pub trait ScalarField2D {
    fn extent(&self) -> GridExtent;

    /// Gibt die Breite des Feldes in Zellen zurück.
    fn width(&self) -> usize {
        self.extent().width
    }

    /// Gibt die Höhe des Feldes in Zellen zurück.
    fn height(&self) -> usize {
        self.extent().height
    }

    /// Gibt die Größe einer einzelnen Zelle im Feldraum zurück.
    fn cell_size(&self) -> f32 {
        self.extent().cell_size
    }

    /// Skalarwert an der Zelle (x_idx, y_idx), `None` außerhalb der Grenzen.
    fn get_value(&self, x_idx: usize, y_idx: usize) -> Option<f32>;
}
