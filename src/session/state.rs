use bevy::prelude::*;

/// Zustand der Bearbeitungssitzung: ohne oder mit aktiver Auswahl (Drag/Pinch-Ziel).
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum SelectionState {
    #[default] // Startzustand
    Idle,
    Selected,
}
