// ./src/debug/visualization/mod.rs
pub mod bubbles;
pub mod svg;
