// src/math/algorithms/metaballs/evaluator.rs

use super::accessor::{FieldAccessor, FieldHit, PointAccessor};
use super::blend::fold_group_distance;
use super::clustering::{BubbleGroup, ClusterLayout};
use crate::math::error::{MathError, MathResult};
use bevy::math::Vec2;

/// Distanz einer einzelnen Gruppe (Verknüpfungsregel abhängig von der Mitgliederzahl).
#[inline]
pub fn evaluate_group(layout: &ClusterLayout, group: &BubbleGroup, point: Vec2) -> f32 {
    fold_group_distance(layout.members(group), group.smooth_factor, point)
}

/// Wertet das Feld für den Punkt des Accessors aus und schreibt das Ergebnis zurück.
///
/// Die Gruppen werden der Reihe nach geprüft; die erste Gruppe, die den Punkt enthält,
/// liefert den Wert und beendet die Suche. Spätere, überlappende Gruppen werden für
/// diesen Punkt nicht mehr ausgewertet. Enthält keine Gruppe den Punkt, gilt der Wert
/// der zuletzt ausgewerteten Gruppe (`+inf` ohne Gruppen).
pub fn evaluate_with<A: FieldAccessor>(layout: &ClusterLayout, accessor: &mut A) -> MathResult<FieldHit> {
    if !accessor.is_valid() {
        return Err(MathError::QueryRejected {
            position: accessor.position(),
        });
    }

    let point = accessor.position();
    let mut hit = FieldHit::EMPTY;

    for (index, group) in layout.groups().iter().enumerate() {
        let distance = evaluate_group(layout, group, point);
        if distance <= 0.0 {
            hit = FieldHit {
                distance,
                inside: true,
                group: Some(index),
            };
            break;
        }
        hit.distance = distance;
    }

    accessor.write(hit);
    Ok(hit)
}

/// Einzelpunktabfrage, z.B. für Hit-Tests.
pub fn evaluate(layout: &ClusterLayout, point: Vec2) -> MathResult<FieldHit> {
    let mut accessor = PointAccessor::new(point);
    evaluate_with(layout, &mut accessor)?;
    Ok(accessor.read())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::algorithms::metaballs::blend::{hard_union, smooth_union};
    use crate::math::algorithms::metaballs::bubble::{Bubble, BubbleId};
    use crate::math::algorithms::metaballs::clustering::{ClusterConfig, cluster_bubbles};
    use approx::assert_relative_eq;

    fn layout_of(entries: &[(f32, f32, f32)]) -> ClusterLayout {
        let bubbles: Vec<Bubble> = entries
            .iter()
            .enumerate()
            .map(|(i, &(x, y, r))| Bubble::new(BubbleId(i as u32), Vec2::new(x, y), r))
            .collect();
        cluster_bubbles(&bubbles, &ClusterConfig::default()).unwrap()
    }

    #[test]
    fn test_single_bubble_containment() {
        let layout = layout_of(&[(10.0, 10.0, 5.0)]);

        let center = evaluate(&layout, Vec2::new(10.0, 10.0)).unwrap();
        assert_relative_eq!(center.distance, -5.0);
        assert!(center.inside);
        assert_eq!(center.group, Some(0));

        let edge = evaluate(&layout, Vec2::new(15.0, 10.0)).unwrap();
        assert_relative_eq!(edge.distance, 0.0);
        assert!(edge.inside);

        let outside = evaluate(&layout, Vec2::new(20.0, 10.0)).unwrap();
        assert!(outside.distance > 0.0);
        assert!(!outside.inside);
        assert_eq!(outside.group, None);
    }

    #[test]
    fn test_touching_pair_blends_inside() {
        let layout = layout_of(&[(0.0, 0.0, 50.0), (60.0, 0.0, 50.0)]);
        assert_eq!(layout.group_count(), 1);
        assert_eq!(layout.groups()[0].member_count(), 2);

        let hit = evaluate(&layout, Vec2::new(30.0, 0.0)).unwrap();
        assert!(hit.inside);
        assert!(hit.distance <= 0.0);
    }

    #[test]
    fn test_smooth_blend_not_farther_than_hard_union() {
        let layout = layout_of(&[(0.0, 0.0, 50.0), (60.0, 0.0, 50.0)]);
        let group = &layout.groups()[0];
        for point in [
            Vec2::new(30.0, 40.0),
            Vec2::new(30.0, 0.0),
            Vec2::new(-55.0, 0.0),
            Vec2::new(30.0, -90.0),
        ] {
            let members = layout.members(group);
            let hard = hard_union(members[0].distance(point), members[1].distance(point));
            let blended = evaluate_group(&layout, group, point);
            assert!(blended <= hard + 1e-4, "{blended} > {hard} at {point:?}");
            assert_relative_eq!(
                blended,
                smooth_union(members[0].distance(point), members[1].distance(point), group.smooth_factor)
            );
        }
    }

    #[test]
    fn test_first_containing_group_wins() {
        // Zwei getrennte Gruppen, Punkt liegt in keiner => letzter ausgewerteter Wert
        let layout = layout_of(&[(0.0, 0.0, 5.0), (100.0, 0.0, 5.0)]);
        let point = Vec2::new(50.0, 0.0);
        let hit = evaluate(&layout, point).unwrap();
        let last = layout.groups().last().unwrap();
        assert!(!hit.inside);
        assert_relative_eq!(hit.distance, evaluate_group(&layout, last, point));

        let inside = evaluate(&layout, Vec2::new(100.0, 1.0)).unwrap();
        assert!(inside.inside);
        let owner = inside.group.unwrap();
        assert_eq!(layout.members(&layout.groups()[owner])[0].origin, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_empty_layout_reports_nothing_inside() {
        let hit = evaluate(&ClusterLayout::default(), Vec2::ZERO).unwrap();
        assert_eq!(hit, FieldHit::EMPTY);
    }

    #[test]
    fn test_invalid_query_is_rejected() {
        let layout = layout_of(&[(0.0, 0.0, 5.0)]);
        assert!(matches!(
            evaluate(&layout, Vec2::new(f32::INFINITY, 0.0)),
            Err(MathError::QueryRejected { .. })
        ));
    }

    #[test]
    fn test_large_group_uses_hard_union() {
        let layout = layout_of(&[(0.0, 0.0, 10.0), (15.0, 0.0, 10.0), (30.0, 0.0, 10.0)]);
        assert_eq!(layout.groups()[0].member_count(), 3);
        // Mitte zwischen zwei Mitgliedern: harte Vereinigung => -2.5
        let hit = evaluate(&layout, Vec2::new(7.5, 0.0)).unwrap();
        assert_relative_eq!(hit.distance, -2.5);
        assert!(hit.inside);

        // Positive Distanz zählt auch bei großen Gruppen nicht als "innen"
        let outside = evaluate(&layout, Vec2::new(200.0, 0.0)).unwrap();
        assert_relative_eq!(outside.distance, 160.0);
        assert!(!outside.inside);
        assert_eq!(outside.group, None);
    }
}
