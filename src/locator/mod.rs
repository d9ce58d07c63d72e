pub mod blocklist;
pub mod builder;
pub mod locator_model;
pub mod path;
pub mod resolve;
