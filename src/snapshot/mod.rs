pub mod bounds;
pub mod loader;
pub mod normalize;
pub mod snapshot_model;
