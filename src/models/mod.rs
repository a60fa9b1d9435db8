pub mod daily_record;
pub mod phase;
pub mod session;
