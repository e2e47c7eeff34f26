// src/math/types/mod.rs
pub mod grid;

pub use grid::*;

// Re-export häufig verwendete externe Typen
pub use bevy::math::Vec2;
