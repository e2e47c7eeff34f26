// src/session/mod.rs

pub mod events;
pub mod manager;
pub mod plugin;
pub mod resources;
pub mod selection;
pub mod sensor;
pub mod state;
pub mod systems;

pub use events::{GestureEvent, GesturePhase};
pub use manager::BubbleSet;
pub use plugin::{BubblePlugin, BubbleSystems};
pub use resources::{BubbleFields, BubbleSettings, ClusterSnapshot, ShadingState};
pub use selection::Selection;
pub use sensor::SensorFeed;
pub use state::SelectionState;
