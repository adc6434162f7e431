mod activity_store;
mod goals;
mod key_value;

pub use activity_store::*;
pub use goals::*;
pub use key_value::*;
