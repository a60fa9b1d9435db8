pub mod alert;
pub mod log;
pub mod poller;
pub mod synth;
pub mod timer;
