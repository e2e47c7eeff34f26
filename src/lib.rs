// src/lib.rs

pub mod math;
pub mod session;

pub use session::BubblePlugin;
