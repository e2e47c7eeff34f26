// src/math/algorithms/mod.rs

pub mod metaballs;
pub mod refraction;

pub use self::refraction::{MotionSample, RefractionSample, ShadingParams, shade_sample};
