// src/math/algorithms/metaballs/accessor.rs

use crate::math::types::GridExtent;
use bevy::math::Vec2;

/// Ergebnis der Feldauswertung an einem Punkt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldHit {
    /// Vorzeichenbehaftete Distanz (ggf. weich verschmolzen).
    pub distance: f32,
    /// `true`, sobald eine Gruppe den Punkt enthält (`distance <= 0`).
    pub inside: bool,
    /// Index der ersten Gruppe, die den Punkt enthält.
    pub group: Option<usize>,
}

impl FieldHit {
    pub const EMPTY: Self = Self {
        distance: f32::INFINITY,
        inside: false,
        group: None,
    };
}

/// Wo ein Auswertungsergebnis gelesen und geschrieben wird.
///
/// Zwei Implementierungen: eine Gitterzelle des parallelen Sweeps und eine einzelne
/// Punktabfrage. Beide erfüllen denselben Vertrag: ist der Accessor nicht gültig,
/// wird die Abfrage abgelehnt statt beantwortet.
pub trait FieldAccessor {
    fn is_valid(&self) -> bool;

    /// Abfragepunkt im Feldraum.
    fn position(&self) -> Vec2;

    fn read(&self) -> FieldHit;

    fn write(&mut self, hit: FieldHit);
}

/// Accessor für eine Zelle des Skalargitters.
#[derive(Debug)]
pub struct GridCellAccessor<'a> {
    extent: GridExtent,
    x: i64,
    y: i64,
    value: &'a mut f32,
    inside: &'a mut bool,
}

impl<'a> GridCellAccessor<'a> {
    pub fn new(extent: GridExtent, x: i64, y: i64, value: &'a mut f32, inside: &'a mut bool) -> Self {
        Self {
            extent,
            x,
            y,
            value,
            inside,
        }
    }
}

impl FieldAccessor for GridCellAccessor<'_> {
    fn is_valid(&self) -> bool {
        self.extent.contains(self.x, self.y)
    }

    fn position(&self) -> Vec2 {
        Vec2::new(
            (self.x as f32 + 0.5) * self.extent.cell_size,
            (self.y as f32 + 0.5) * self.extent.cell_size,
        )
    }

    fn read(&self) -> FieldHit {
        FieldHit {
            distance: *self.value,
            inside: *self.inside,
            group: None,
        }
    }

    fn write(&mut self, hit: FieldHit) {
        *self.value = hit.distance;
        // Belegt markieren
        *self.inside = hit.inside;
    }
}

/// Accessor für eine einzelne CPU-seitige Punktabfrage (Hit-Test).
#[derive(Debug, Clone, Copy)]
pub struct PointAccessor {
    point: Vec2,
    hit: FieldHit,
}

impl PointAccessor {
    pub fn new(point: Vec2) -> Self {
        Self {
            point,
            hit: FieldHit::EMPTY,
        }
    }
}

impl FieldAccessor for PointAccessor {
    fn is_valid(&self) -> bool {
        self.point.is_finite()
    }

    fn position(&self) -> Vec2 {
        self.point
    }

    fn read(&self) -> FieldHit {
        self.hit
    }

    fn write(&mut self, hit: FieldHit) {
        self.hit = hit;
    }
}
