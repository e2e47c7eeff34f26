use super::events::{GestureEvent, GesturePhase};
use super::manager::BubbleSet;
use super::resources::{BubbleFields, BubbleSettings, ClusterSnapshot, ShadingState};
use super::sensor::SensorFeed;
use super::state::SelectionState;
use bevy::prelude::*;

/// Wendet eine einzelne Geste auf die Sitzung an.
///
/// Tippen auf freie Fläche legt eine Blase an, Doppeltippen entfernt die getroffene
/// Blase. Drag verschiebt, Pinch skaliert die Auswahl. `Ended` und `Cancelled`
/// räumen die Auswahl identisch auf.
pub fn apply_gesture(bubbles: &mut BubbleSet, settings: &BubbleSettings, event: &GestureEvent) {
    match *event {
        GestureEvent::Tap { position } => {
            if bubbles.pick(position).is_none() {
                if let Err(err) = bubbles.add(position, settings.default_radius) {
                    warn!("Tap at {:?} rejected: {}", position, err);
                }
            }
        }
        GestureEvent::DoubleTap { position } => {
            if let Some(id) = bubbles.pick(position) {
                bubbles.remove(id);
            }
        }
        GestureEvent::Drag { phase, position } => match phase {
            GesturePhase::Began => {
                bubbles.begin_selection(position);
            }
            GesturePhase::Changed => {
                bubbles.move_selection(position);
            }
            GesturePhase::Ended | GesturePhase::Cancelled => bubbles.clear_selection(),
        },
        GestureEvent::Pinch {
            phase,
            position,
            scale,
        } => match phase {
            GesturePhase::Began => {
                bubbles.begin_selection(position);
            }
            GesturePhase::Changed => {
                bubbles.rescale_selection(scale);
            }
            GesturePhase::Ended | GesturePhase::Cancelled => bubbles.clear_selection(),
        },
    }
}

pub fn apply_gesture_events_system(
    mut events: EventReader<GestureEvent>,
    mut bubbles: ResMut<BubbleSet>,
    settings: Res<BubbleSettings>,
    current_state: Res<State<SelectionState>>,
    mut next_state: ResMut<NextState<SelectionState>>,
) {
    for event in events.read() {
        apply_gesture(&mut bubbles, &settings, event);
    }

    let state = bubbles.state();
    if *current_state.get() != state {
        next_state.set(state);
    }
}

/// Übernimmt alle Sensorwerte dieses Ticks in den Shading-Zustand.
pub fn sensor_feed_system(
    feed: Res<SensorFeed>,
    settings: Res<BubbleSettings>,
    mut shading: ResMut<ShadingState>,
) {
    for sample in feed.drain() {
        shading.0.apply_motion(sample, settings.gradient_scale);
    }
}

/// Gruppiert jeden Tick neu, unabhängig davon, ob sich etwas geändert hat.
pub fn recluster_system(
    bubbles: Res<BubbleSet>,
    settings: Res<BubbleSettings>,
    mut snapshot: ResMut<ClusterSnapshot>,
) {
    match bubbles.recluster(&settings.cluster) {
        Ok(layout) => {
            snapshot.layout = layout;
            snapshot.tick += 1;
        }
        Err(err) => {
            warn!("Clustering failed in tick {}: {}", snapshot.tick + 1, err);
        }
    }
}

/// Baut Skalar- und Gradientenfeld aus dem Snapshot dieses Ticks.
pub fn build_fields_system(
    snapshot: Res<ClusterSnapshot>,
    settings: Res<BubbleSettings>,
    mut fields: ResMut<BubbleFields>,
) {
    let result = settings
        .compositor()
        .and_then(|compositor| compositor.build_fields(&snapshot.layout));

    match result {
        Ok(composited) => {
            fields.fields = Some(composited);
            fields.tick = snapshot.tick;
        }
        Err(err) => {
            warn!("Field build failed in tick {}: {}", snapshot.tick, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> BubbleSettings {
        BubbleSettings {
            default_radius: 10.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_tap_adds_only_on_free_space() {
        let mut set = BubbleSet::default();
        let settings = settings();
        apply_gesture(&mut set, &settings, &GestureEvent::Tap { position: Vec2::ZERO });
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next().unwrap().radius, 10.0);

        apply_gesture(&mut set, &settings, &GestureEvent::Tap { position: Vec2::ONE });
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_tap_over_capacity_is_ignored() {
        let mut set = BubbleSet::with_capacity(0);
        apply_gesture(&mut set, &settings(), &GestureEvent::Tap { position: Vec2::ZERO });
        assert!(set.is_empty());
    }

    #[test]
    fn test_double_tap_removes() {
        let mut set = BubbleSet::default();
        set.add(Vec2::ZERO, 5.0).unwrap();
        apply_gesture(&mut set, &settings(), &GestureEvent::DoubleTap {
            position: Vec2::new(50.0, 0.0),
        });
        assert_eq!(set.len(), 1);
        apply_gesture(&mut set, &settings(), &GestureEvent::DoubleTap {
            position: Vec2::new(1.0, 0.0),
        });
        assert!(set.is_empty());
    }

    #[test]
    fn test_drag_and_cancel() {
        let mut set = BubbleSet::default();
        let id = set.add(Vec2::new(20.0, 20.0), 5.0).unwrap();
        let settings = settings();

        for event in [
            GestureEvent::Drag {
                phase: GesturePhase::Began,
                position: Vec2::new(21.0, 20.0),
            },
            GestureEvent::Drag {
                phase: GesturePhase::Changed,
                position: Vec2::new(31.0, 25.0),
            },
            GestureEvent::Drag {
                phase: GesturePhase::Cancelled,
                position: Vec2::new(31.0, 25.0),
            },
        ] {
            apply_gesture(&mut set, &settings, &event);
        }

        assert_eq!(set.get(id).unwrap().origin, Vec2::new(30.0, 25.0));
        assert!(set.selection().is_none());

        // Nach dem Abbruch wirkt eine weitere Bewegung nicht mehr
        apply_gesture(&mut set, &settings, &GestureEvent::Drag {
            phase: GesturePhase::Changed,
            position: Vec2::new(90.0, 90.0),
        });
        assert_eq!(set.get(id).unwrap().origin, Vec2::new(30.0, 25.0));
    }

    #[test]
    fn test_pinch_scales_from_initial_radius() {
        let mut set = BubbleSet::default();
        let id = set.add(Vec2::ZERO, 8.0).unwrap();
        let settings = settings();
        let pinch = |phase, scale| GestureEvent::Pinch {
            phase,
            position: Vec2::ZERO,
            scale,
        };

        apply_gesture(&mut set, &settings, &pinch(GesturePhase::Began, 1.0));
        apply_gesture(&mut set, &settings, &pinch(GesturePhase::Changed, 1.5));
        apply_gesture(&mut set, &settings, &pinch(GesturePhase::Changed, 0.5));
        apply_gesture(&mut set, &settings, &pinch(GesturePhase::Ended, 0.5));

        assert_eq!(set.get(id).unwrap().radius, 4.0);
        assert!(set.selection().is_none());
    }
}
