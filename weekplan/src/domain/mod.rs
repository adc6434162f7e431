mod error;
mod links;
pub mod models;
pub mod ports;
mod search;
mod selection;
pub mod services;
mod week_view;

pub use error::*;
pub use links::*;
pub use search::*;
pub use selection::*;
pub use week_view::*;
