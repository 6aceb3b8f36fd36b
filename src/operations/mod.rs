pub mod collate;
pub mod engrave;
pub mod optimise;
pub mod tabs;
pub mod travel;
pub mod unify;

pub use collate::{collate, CollatePaths};
pub use engrave::{
    estimated_engrave_time, estimated_engrave_time_from, EngraveTime, EstimateEngraving,
};
pub use optimise::{optimise, OptimiseOrder};
pub use tabs::{insert_tabs, insert_tabs_along, InsertTabs, InsertTabsAlong};
pub use travel::{
    cut_length, estimated_time, estimated_time_from, ideal_travel_distance,
    ideal_travel_distance_from, travel_length, HOME,
};
pub use unify::{unify, UnifyVertices};
