use super::selection::Selection;
use super::state::SelectionState;
use crate::math::algorithms::metaballs::{
    Bubble, BubbleId, ClusterConfig, ClusterLayout, MAX_BUBBLES, cluster_bubbles,
};
use crate::math::error::{MathError, MathResult};
use bevy::prelude::*;

/// Veränderlicher Sitzungszustand: die lebenden Blasen und höchstens eine Auswahl.
///
/// Einzige Stelle, an der Blasen verändert werden. Positionen werden im Feldraum
/// erwartet; die Umrechnung aus Pixelkoordinaten übernimmt der Host.
#[derive(Resource, Debug, Clone)]
pub struct BubbleSet {
    bubbles: Vec<Bubble>,
    next_id: u32,
    selection: Option<Selection>,
    capacity: usize,
}

impl Default for BubbleSet {
    fn default() -> Self {
        Self::with_capacity(MAX_BUBBLES)
    }
}

impl BubbleSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bubbles: Vec::new(),
            next_id: 0,
            selection: None,
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bubble> {
        self.bubbles.iter()
    }

    pub fn get(&self, id: BubbleId) -> Option<&Bubble> {
        self.bubbles.iter().find(|b| b.id == id)
    }

    fn get_mut(&mut self, id: BubbleId) -> Option<&mut Bubble> {
        self.bubbles.iter_mut().find(|b| b.id == id)
    }

    /// Kopie der aktuellen Blasen, z.B. für eine Auswertung, die parallel zu
    /// weiteren Änderungen läuft.
    pub fn snapshot(&self) -> Vec<Bubble> {
        self.bubbles.clone()
    }

    /// Legt eine Blase an und vergibt die nächste fortlaufende Id.
    /// Bei voller Kapazität wird abgelehnt statt abgeschnitten.
    pub fn add(&mut self, origin: Vec2, radius: f32) -> MathResult<BubbleId> {
        if self.bubbles.len() >= self.capacity {
            return Err(MathError::CapacityExceeded {
                resource: "bubbles",
                limit: self.capacity,
                actual: self.bubbles.len() + 1,
            });
        }
        if !origin.is_finite() || !radius.is_finite() || radius < 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: format!("Invalid bubble: origin {:?}, radius {}", origin, radius),
            });
        }

        let id = BubbleId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(MathError::IdSpaceExhausted)?;
        self.bubbles.push(Bubble::new(id, origin, radius));
        info!("Bubble {} added at {:?} with radius {:.1}", id, origin, radius);
        Ok(id)
    }

    /// Entfernt eine Blase per linearer Suche. Ist sie das Auswahlziel,
    /// wird die Auswahl mit entfernt.
    pub fn remove(&mut self, id: BubbleId) -> Option<Bubble> {
        let index = self.bubbles.iter().position(|b| b.id == id)?;
        let removed = self.bubbles.remove(index);
        if self.selection.is_some_and(|s| s.target == id) {
            self.selection = None;
        }
        info!("Bubble {} removed", id);
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.bubbles.clear();
        self.selection = None;
    }

    /// Erste Blase (in Iterationsreihenfolge), die den Punkt enthält.
    pub fn pick(&self, point: Vec2) -> Option<BubbleId> {
        self.bubbles
            .iter()
            .find(|b| b.contains(point))
            .map(|b| b.id)
    }

    /// Startet eine Auswahl auf der Blase unter `point`.
    /// Ohne Treffer bleibt bzw. wird die Sitzung auswahlfrei.
    pub fn begin_selection(&mut self, point: Vec2) -> Option<BubbleId> {
        let Some(bubble) = self.pick(point).and_then(|id| self.get(id)) else {
            self.selection = None;
            return None;
        };
        let selection = Selection::begin(bubble, point);
        info!("Selection begins on bubble {}", selection.target);
        self.selection = Some(selection);
        Some(selection.target)
    }

    /// Verschiebt die ausgewählte Blase um `point - initial_hit`.
    pub fn move_selection(&mut self, point: Vec2) -> bool {
        let Some(selection) = self.selection else {
            return false;
        };
        if !point.is_finite() {
            return false;
        }
        match self.get_mut(selection.target) {
            Some(bubble) => {
                bubble.origin = selection.origin_for(point);
                true
            }
            None => false,
        }
    }

    /// Setzt den Radius auf `initial_radius * factor`, unabhängig von früheren Aufrufen.
    pub fn rescale_selection(&mut self, factor: f32) -> bool {
        let Some(selection) = self.selection else {
            return false;
        };
        if !(factor.is_finite() && factor > 0.0) {
            return false;
        }
        match self.get_mut(selection.target) {
            Some(bubble) => {
                bubble.radius = selection.radius_for(factor);
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        if let Some(selection) = self.selection.take() {
            info!("Selection on bubble {} cleared", selection.target);
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn state(&self) -> SelectionState {
        if self.selection.is_some() {
            SelectionState::Selected
        } else {
            SelectionState::Idle
        }
    }

    /// Volle Neugruppierung der lebenden Blasen (ohne Dirty-Tracking).
    pub fn recluster(&self, config: &ClusterConfig) -> MathResult<ClusterLayout> {
        cluster_bubbles(&self.bubbles, config)
    }
}
