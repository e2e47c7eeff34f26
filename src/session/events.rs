use bevy::prelude::*;

/// Phase einer kontinuierlichen Geste.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// Gesteneingabe des Hosts, Positionen bereits im Feldraum.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Tippen auf freie Fläche legt eine Blase an.
    Tap { position: Vec2 },
    /// Doppeltippen auf eine Blase entfernt sie.
    DoubleTap { position: Vec2 },
    Drag { phase: GesturePhase, position: Vec2 },
    /// `scale` ist der Gesamtfaktor seit Gestenbeginn.
    Pinch {
        phase: GesturePhase,
        position: Vec2,
        scale: f32,
    },
}
