mod activity;
mod anchor;
mod goal;
mod ids;
mod week;

pub use activity::*;
pub use anchor::*;
pub use goal::*;
pub use ids::*;
pub use week::*;
