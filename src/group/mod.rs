pub mod by_date;
pub mod by_type;
pub mod resolver;
pub mod time_of_day;

pub use by_date::*;
pub use by_type::*;
pub use resolver::*;
pub use time_of_day::*;
