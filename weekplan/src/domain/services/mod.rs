mod planner;

pub use planner::*;
