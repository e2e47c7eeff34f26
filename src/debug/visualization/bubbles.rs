use crate::setup::FieldView;
use bevy::prelude::*;
use bubble_field::session::{BubbleSet, ClusterSnapshot};

/// Farbe einer Gruppe, über den Goldenen Winkel im Farbkreis verteilt.
pub fn group_color(group: usize) -> Color {
    let hue = (group as f32 * 137.508) % 360.0;
    Color::hsl(hue, 0.7, 0.55)
}

/// Zeichnet die Umrisse aller Blasen, eingefärbt nach Gruppe des aktuellen Ticks.
/// Die ausgewählte Blase bekommt einen zusätzlichen weißen Ring.
pub fn draw_bubble_outlines_system(
    snapshot: Res<ClusterSnapshot>,
    bubbles: Res<BubbleSet>,
    view: Option<Res<FieldView>>,
    mut gizmos: Gizmos,
) {
    let Some(view) = view else {
        return;
    };

    for (index, (_, members)) in snapshot.layout.iter().enumerate() {
        let color = group_color(index);
        for bubble in members {
            gizmos.circle_2d(view.field_to_world(bubble.origin), bubble.radius, color);
        }
    }

    // Aktuelle Position, nicht die des Snapshots
    if let Some(bubble) = bubbles
        .selection()
        .and_then(|selection| bubbles.get(selection.target))
    {
        gizmos.circle_2d(
            view.field_to_world(bubble.origin),
            bubble.radius + 2.0,
            Color::WHITE,
        );
    }
}
