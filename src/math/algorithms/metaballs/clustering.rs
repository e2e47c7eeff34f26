// src/math/algorithms/metaballs/clustering.rs

use super::bubble::{Bubble, BubbleId};
use crate::math::error::{MathError, MathResult};
use bevy::log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Obergrenze für Blasen und Gruppen pro Auswertung (feste Ausgabepuffer).
pub const MAX_BUBBLES: usize = 1024;
pub const MAX_GROUPS: usize = 1024;

/// Konfiguration der Gruppierung.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Glättungsfaktor für Gruppen mit genau einem Mitglied.
    pub default_smooth_factor: f32,
    /// Zähler der Formel `smooth_numerator / (1 + min_distance)` für Mehrfachgruppen.
    pub smooth_numerator: f32,
    pub max_bubbles: usize,
    pub max_groups: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            default_smooth_factor: 50.0,
            smooth_numerator: 3000.0,
            max_bubbles: MAX_BUBBLES,
            max_groups: MAX_GROUPS,
        }
    }
}

impl ClusterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_smooth_factor(mut self, factor: f32) -> Self {
        self.default_smooth_factor = factor;
        self
    }

    pub fn with_smooth_numerator(mut self, numerator: f32) -> Self {
        self.smooth_numerator = numerator;
        self
    }

    pub fn with_capacity(mut self, max_bubbles: usize, max_groups: usize) -> Self {
        self.max_bubbles = max_bubbles;
        self.max_groups = max_groups;
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        if !(self.default_smooth_factor.is_finite() && self.default_smooth_factor > 0.0) {
            return Err(MathError::InvalidConfiguration {
                message: format!(
                    "Default smooth factor must be positive, got {}",
                    self.default_smooth_factor
                ),
            });
        }
        if !(self.smooth_numerator.is_finite() && self.smooth_numerator > 0.0) {
            return Err(MathError::InvalidConfiguration {
                message: format!(
                    "Smooth numerator must be positive, got {}",
                    self.smooth_numerator
                ),
            });
        }
        if self.max_bubbles == 0 || self.max_groups == 0 {
            return Err(MathError::InvalidConfiguration {
                message: "Bubble and group capacity must be greater than 0.".to_string(),
            });
        }
        Ok(())
    }

    /// Glättungsfaktor einer Gruppe mit mehr als einem Mitglied.
    /// Größerer Abstand => schwächere Glättung.
    pub fn smooth_factor_for(&self, min_distance: f32) -> f32 {
        self.smooth_numerator / (1.0 + min_distance)
    }
}

/// Eine Gruppe sich (transitiv) berührender Blasen.
///
/// `members` ist der Bereich der Gruppe in `ClusterLayout::bubbles`.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleGroup {
    pub members: Range<usize>,
    pub smooth_factor: f32,
}

impl BubbleGroup {
    #[inline]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// Ergebnis einer Gruppierung: Gruppen plus die gruppenweise sortierte Blasenliste.
///
/// Invariante: die Bereiche der Gruppen schließen lückenlos aneinander an und
/// überdecken `bubbles` vollständig, jede Blase liegt in genau einer Gruppe.
/// Die Blasen sind Kopien; spätere Änderungen an der Sitzung berühren das Layout nicht.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterLayout {
    groups: Vec<BubbleGroup>,
    bubbles: Vec<Bubble>,
}

impl ClusterLayout {
    pub fn groups(&self) -> &[BubbleGroup] {
        &self.groups
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn members(&self, group: &BubbleGroup) -> &[Bubble] {
        &self.bubbles[group.members.clone()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BubbleGroup, &[Bubble])> {
        self.groups.iter().map(|group| (group, self.members(group)))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn bubble_count(&self) -> usize {
        self.bubbles.len()
    }

    /// Index der Gruppe, die die Blase `id` enthält.
    pub fn group_of(&self, id: BubbleId) -> Option<usize> {
        let position = self.bubbles.iter().position(|b| b.id == id)?;
        self.groups
            .iter()
            .position(|group| group.members.contains(&position))
    }
}

/// Zerlegt eine ungeordnete Blasenmenge in Gruppen sich berührender Blasen.
///
/// Gierige Zusammenhangskomponenten: ein beliebiger Startpunkt, dann wird der Rest
/// wiederholt gegen *alle* bisherigen Mitglieder geprüft; der erste passende Partner
/// (in Einfügereihenfolge) nimmt den Kandidaten auf und der Scan beginnt neu.
/// Die Reihenfolge der Gruppen ist nicht stabil. Worst case O(n³).
pub fn cluster_bubbles(bubbles: &[Bubble], config: &ClusterConfig) -> MathResult<ClusterLayout> {
    // Glättungsfaktoren müssen positiv sein, sonst ist `smooth_union` undefiniert
    config.validate()?;
    if bubbles.len() > config.max_bubbles {
        return Err(MathError::CapacityExceeded {
            resource: "bubbles",
            limit: config.max_bubbles,
            actual: bubbles.len(),
        });
    }

    let mut unassigned: Vec<Bubble> = bubbles.to_vec();
    let mut flattened: Vec<Bubble> = Vec::with_capacity(bubbles.len());
    let mut groups: Vec<BubbleGroup> = Vec::new();

    while let Some(seed) = unassigned.pop() {
        let start = flattened.len();
        flattened.push(seed);
        let mut min_distance = f32::INFINITY;

        'scan: loop {
            for candidate_idx in 0..unassigned.len() {
                let candidate = &unassigned[candidate_idx];
                let joined = flattened[start..]
                    .iter()
                    .find_map(|member| member.touching_distance(candidate));

                if let Some(distance) = joined {
                    min_distance = min_distance.min(distance);
                    flattened.push(unassigned.swap_remove(candidate_idx));
                    continue 'scan;
                }
            }
            break;
        }

        let members = start..flattened.len();
        let smooth_factor = if members.len() > 1 {
            config.smooth_factor_for(min_distance)
        } else {
            config.default_smooth_factor
        };
        trace!(
            "Group {}: {} member(s), smooth factor {:.3}",
            groups.len(),
            members.len(),
            smooth_factor
        );
        groups.push(BubbleGroup {
            members,
            smooth_factor,
        });

        if groups.len() > config.max_groups {
            return Err(MathError::CapacityExceeded {
                resource: "groups",
                limit: config.max_groups,
                actual: groups.len(),
            });
        }
    }

    debug!(
        "Clustered {} bubble(s) into {} group(s)",
        flattened.len(),
        groups.len()
    );

    Ok(ClusterLayout {
        groups,
        bubbles: flattened,
    })
}
