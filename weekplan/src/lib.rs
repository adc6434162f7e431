pub mod adapters;
pub mod domain;

pub use adapters::outbound::*;
pub use domain::*;
