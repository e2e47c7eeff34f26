// src/math/error.rs
use bevy::math::Vec2;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Capacity exceeded for {resource}: limit is {limit}, got {actual}")]
    CapacityExceeded {
        resource: &'static str,
        limit: usize,
        actual: usize,
    },

    #[error("Field query rejected at {position:?}: accessor is not valid")]
    QueryRejected { position: Vec2 },

    #[error("Cell ({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfGrid {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Bubble id space exhausted")]
    IdSpaceExhausted,
}

pub type MathResult<T> = Result<T, MathError>;
