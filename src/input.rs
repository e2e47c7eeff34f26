// ./src/input.rs
//! Übersetzt Maus und Tastatur in Gesten bzw. Sensorwerte.
//!
//! Linksklick: Tippen bzw. Drag auf einer Blase, Doppelklick entfernt.
//! Mausrad über einer Blase: Pinch. Rechtsklick bricht laufende Gesten ab.
//! Pfeiltasten simulieren die Neigung des Geräts.

use crate::setup::FieldView;
use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;
use bubble_field::math::algorithms::MotionSample;
use bubble_field::session::{BubbleSet, GestureEvent, GesturePhase, SensorFeed};
use std::sync::mpsc::Sender;

const DOUBLE_TAP_SECONDS: f32 = 0.3;
const DOUBLE_TAP_DISTANCE: f32 = 8.0;
/// Ohne weitere Mausrad-Ereignisse gilt ein Pinch danach als beendet.
const PINCH_IDLE_SECONDS: f32 = 0.4;
const PINCH_STEP: f32 = 1.1;

#[derive(Resource, Debug, Default)]
pub struct GestureTracker {
    dragging: bool,
    last_press: Option<LastPress>,
    pinch: Option<PinchTracker>,
}

#[derive(Debug, Clone, Copy)]
struct LastPress {
    time: f32,
    position: Vec2,
    /// Der Klick lag auf freier Fläche und hat eine Blase angelegt.
    added: bool,
}

/// Geste, die ein Linksklick auslöst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressAction {
    Tap,
    DragBegin,
    DoubleTap,
    /// Zweiter Klick eines Doppelklicks auf freier Fläche: die frisch angelegte
    /// Blase bleibt stehen.
    Ignore,
}

#[derive(Debug, Clone, Copy)]
struct PinchTracker {
    position: Vec2,
    scale: f32,
    last_event: f32,
}

impl GestureTracker {
    fn press(&mut self, now: f32, position: Vec2, over_bubble: bool) -> PressAction {
        let repeated = self.last_press.filter(|last| {
            now - last.time <= DOUBLE_TAP_SECONDS
                && last.position.distance(position) <= DOUBLE_TAP_DISTANCE
        });
        if let Some(last) = repeated {
            self.last_press = None;
            return if last.added {
                PressAction::Ignore
            } else {
                PressAction::DoubleTap
            };
        }

        self.last_press = Some(LastPress {
            time: now,
            position,
            added: !over_bubble,
        });
        if over_bubble {
            self.dragging = true;
            PressAction::DragBegin
        } else {
            PressAction::Tap
        }
    }
}

fn cursor_in_field(
    window: &Window,
    camera: &Camera,
    camera_transform: &GlobalTransform,
    view: &FieldView,
) -> Option<Vec2> {
    let cursor = window.cursor_position()?;
    let world = camera.viewport_to_world_2d(camera_transform, cursor)?;
    Some(view.world_to_field(world))
}

#[allow(clippy::too_many_arguments)]
pub fn gesture_input_system(
    mut contexts: EguiContexts,
    mut tracker: ResMut<GestureTracker>,
    mut gestures: EventWriter<GestureEvent>,
    mut wheel: EventReader<MouseWheel>,
    buttons: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    bubbles: Res<BubbleSet>,
    view: Option<Res<FieldView>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
) {
    let now = time.elapsed_seconds();
    let wheel_steps: f32 = wheel.read().map(|event| event.y.signum()).sum();

    if contexts.ctx_mut().wants_pointer_input() {
        return;
    }
    let (Some(view), Ok(window), Ok((camera, camera_transform))) =
        (view, windows.get_single(), cameras.get_single())
    else {
        return;
    };
    let Some(position) = cursor_in_field(window, camera, camera_transform, &view) else {
        return;
    };

    // --- Abbruch ---
    if buttons.just_pressed(MouseButton::Right) {
        if tracker.dragging {
            tracker.dragging = false;
            gestures.send(GestureEvent::Drag {
                phase: GesturePhase::Cancelled,
                position,
            });
        }
        if let Some(pinch) = tracker.pinch.take() {
            gestures.send(GestureEvent::Pinch {
                phase: GesturePhase::Cancelled,
                position: pinch.position,
                scale: pinch.scale,
            });
        }
        return;
    }

    // --- Tippen / Drag ---
    if buttons.just_pressed(MouseButton::Left) {
        let over_bubble = bubbles.pick(position).is_some();
        match tracker.press(now, position, over_bubble) {
            PressAction::Tap => {
                gestures.send(GestureEvent::Tap { position });
            }
            PressAction::DragBegin => {
                gestures.send(GestureEvent::Drag {
                    phase: GesturePhase::Began,
                    position,
                });
            }
            PressAction::DoubleTap => {
                gestures.send(GestureEvent::DoubleTap { position });
            }
            PressAction::Ignore => {}
        }
    } else if tracker.dragging && buttons.pressed(MouseButton::Left) {
        gestures.send(GestureEvent::Drag {
            phase: GesturePhase::Changed,
            position,
        });
    } else if tracker.dragging && buttons.just_released(MouseButton::Left) {
        tracker.dragging = false;
        gestures.send(GestureEvent::Drag {
            phase: GesturePhase::Ended,
            position,
        });
    }

    // --- Pinch per Mausrad ---
    if wheel_steps != 0.0 {
        let pinch = match tracker.pinch {
            Some(pinch) => pinch,
            None if bubbles.pick(position).is_some() => {
                gestures.send(GestureEvent::Pinch {
                    phase: GesturePhase::Began,
                    position,
                    scale: 1.0,
                });
                PinchTracker {
                    position,
                    scale: 1.0,
                    last_event: now,
                }
            }
            None => return,
        };
        let scale = pinch.scale * PINCH_STEP.powf(wheel_steps);
        gestures.send(GestureEvent::Pinch {
            phase: GesturePhase::Changed,
            position: pinch.position,
            scale,
        });
        tracker.pinch = Some(PinchTracker {
            scale,
            last_event: now,
            ..pinch
        });
    } else if let Some(pinch) = tracker.pinch {
        if now - pinch.last_event > PINCH_IDLE_SECONDS {
            tracker.pinch = None;
            gestures.send(GestureEvent::Pinch {
                phase: GesturePhase::Ended,
                position: pinch.position,
                scale: pinch.scale,
            });
        }
    }
}

/// Pfeiltasten als Ersatz für einen Neigungssensor. Sendet nur bei Änderung.
pub fn keyboard_tilt_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut feed: ResMut<SensorFeed>,
    mut sender: Local<Option<Sender<MotionSample>>>,
    mut last_tilt: Local<Vec2>,
) {
    if sender.is_none() {
        *sender = feed.take_sender();
    }
    let Some(tx) = sender.as_ref() else {
        return;
    };

    let mut tilt = Vec2::ZERO;
    if keys.pressed(KeyCode::ArrowLeft) {
        tilt.x -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        tilt.x += 1.0;
    }
    if keys.pressed(KeyCode::ArrowUp) {
        tilt.y -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        tilt.y += 1.0;
    }
    let tilt = tilt.clamp_length_max(1.0);

    if tilt != *last_tilt {
        *last_tilt = tilt;
        if tx.send(MotionSample { tilt }).is_err() {
            warn!("Sensor feed closed, tilt input disabled");
            *sender = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_click_on_bubble_removes() {
        let mut tracker = GestureTracker::default();
        let p = Vec2::new(10.0, 10.0);
        assert_eq!(tracker.press(1.0, p, true), PressAction::DragBegin);
        assert_eq!(tracker.press(1.2, p + Vec2::X * 2.0, true), PressAction::DoubleTap);
        // Dritter Klick beginnt von vorn
        assert_eq!(tracker.press(1.3, p, true), PressAction::DragBegin);
    }

    #[test]
    fn test_double_click_on_empty_space_keeps_new_bubble() {
        let mut tracker = GestureTracker::default();
        let p = Vec2::new(50.0, 50.0);
        assert_eq!(tracker.press(1.0, p, false), PressAction::Tap);
        // Die neue Blase liegt jetzt unter dem Cursor
        assert_eq!(tracker.press(1.1, p, true), PressAction::Ignore);
    }

    #[test]
    fn test_slow_or_distant_clicks_are_separate() {
        let mut tracker = GestureTracker::default();
        let p = Vec2::new(10.0, 10.0);
        assert_eq!(tracker.press(1.0, p, false), PressAction::Tap);
        assert_eq!(tracker.press(1.5, p, true), PressAction::DragBegin);
        assert_eq!(tracker.press(1.6, p + Vec2::X * 30.0, false), PressAction::Tap);
    }
}
