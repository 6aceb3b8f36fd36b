pub mod config;
pub mod error;
pub mod geometry;
pub mod layers;
pub mod math;
pub mod operations;
pub mod report;

pub use error::{CutplanError, Result};
pub use geometry::{Path, Polygon, Rect, Segment};
pub use layers::Layers;
pub use math::Point2;
pub use operations::{
    collate, estimated_engrave_time, estimated_time, ideal_travel_distance, insert_tabs,
    optimise, unify,
};
