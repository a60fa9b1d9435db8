pub mod colors;
pub mod date;
pub mod formatting;
pub mod path;
pub mod table;
pub mod time;

pub use time::{hms_to_seconds, seconds_to_hms};
