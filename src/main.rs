// ./src/main.rs
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bubble_field::session::{BubblePlugin, BubbleSettings, BubbleSystems};

// Module des Demo-Hosts
mod debug;
mod input;
mod setup;

use debug::{ui::bubble_control_ui_system, visualization::bubbles::draw_bubble_outlines_system};
use input::{GestureTracker, gesture_input_system, keyboard_tilt_system};
use setup::{render_field_image_system, setup_scene, spawn_initial_bubbles};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Bubble Field".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        // Settings vor dem Plugin einfügen, damit es sie übernimmt
        .insert_resource(BubbleSettings {
            seed: Some(7),
            ..default()
        })
        .add_plugins(BubblePlugin)
        .init_resource::<GestureTracker>()
        .add_systems(Startup, (setup_scene, spawn_initial_bubbles).chain())
        .add_systems(
            Update,
            (
                // Eingaben vor der Sitzung, damit Gesten noch im selben Tick wirken
                (bubble_control_ui_system, gesture_input_system, keyboard_tilt_system)
                    .chain()
                    .before(BubbleSystems),
                (render_field_image_system, draw_bubble_outlines_system).after(BubbleSystems),
            ),
        )
        .run();
}
