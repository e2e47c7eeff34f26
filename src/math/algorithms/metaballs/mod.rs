// src/math/algorithms/metaballs/mod.rs

pub mod accessor;
pub mod blend;
pub mod bubble;
pub mod builder;
pub mod clustering;
pub mod compositor;
pub mod evaluator;
pub mod field;

pub use self::accessor::{FieldAccessor, FieldHit, GridCellAccessor, PointAccessor};
pub use self::blend::{fold_group_distance, hard_union, smooth_union};
pub use self::bubble::{Bubble, BubbleId};
pub use self::builder::FieldCompositorBuilder;
pub use self::clustering::{
    BubbleGroup, ClusterConfig, ClusterLayout, MAX_BUBBLES, MAX_GROUPS, cluster_bubbles,
};
pub use self::compositor::{CompositedFields, FieldCompositor};
pub use self::evaluator::{evaluate, evaluate_group, evaluate_with};
pub use self::field::{EdgePolicy, GradientField, GradientSample, ScalarGrid, central_gradient};
