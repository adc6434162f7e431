mod file;
mod key_value;
mod memory;

pub use file::*;
pub use key_value::*;
pub use memory::*;
