//! Bevy-`Plugin`, das die Blasen-Sitzung in eine `App` einhängt.
//!
//! Pro Tick laufen nacheinander: Sensorwerte übernehmen, Gesten anwenden,
//! neu gruppieren, Felder bauen.

use super::events::GestureEvent;
use super::manager::BubbleSet;
use super::resources::{BubbleFields, BubbleSettings, ClusterSnapshot, ShadingState};
use super::sensor::SensorFeed;
use super::state::SelectionState;
use super::systems::{
    apply_gesture_events_system, build_fields_system, recluster_system, sensor_feed_system,
};
use bevy::prelude::*;

/// Set der Sitzungssysteme, damit der Host eigene Systeme danach einordnen kann.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct BubbleSystems;

/// Vom Host vorab eingefügte `BubbleSettings` werden übernommen, sonst gelten
/// die Standardwerte.
pub struct BubblePlugin;

impl Plugin for BubblePlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world
            .get_resource::<BubbleSettings>()
            .cloned()
            .unwrap_or_default();
        if let Err(err) = settings.validate() {
            warn!("Bubble settings are invalid, clustering and field builds will fail: {}", err);
        }

        if !app.world.contains_resource::<BubbleSet>() {
            app.insert_resource(BubbleSet::with_capacity(settings.cluster.max_bubbles));
        }

        app.insert_resource(ShadingState(settings.shading()))
            .insert_resource(settings)
            .init_resource::<ClusterSnapshot>()
            .init_resource::<BubbleFields>()
            .init_resource::<SensorFeed>()
            .add_event::<GestureEvent>()
            .init_state::<SelectionState>()
            .add_systems(
                Update,
                (
                    sensor_feed_system,
                    apply_gesture_events_system,
                    recluster_system,
                    build_fields_system,
                )
                    .chain()
                    .in_set(BubbleSystems),
            );
    }
}
