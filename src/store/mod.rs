pub mod daily;
pub mod log;

pub use daily::{DailyStats, commit_session};
