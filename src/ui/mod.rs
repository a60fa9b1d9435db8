pub mod charts;
pub mod dashboard;
pub mod messages;
pub mod report;
