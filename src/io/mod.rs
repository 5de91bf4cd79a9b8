pub mod config_io;
pub mod input;

pub use config_io::*;
pub use input::*;
