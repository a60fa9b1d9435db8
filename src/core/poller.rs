use crate::core::alert::{AlertSink, dispatch};
use crate::core::timer::FocusTimer;
use chrono::Local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error};

pub const POLL_INTERVAL_MS: u64 = 100;

pub type SharedTimer = Arc<Mutex<FocusTimer>>;

/// Background worker ticking the shared timer at a fixed cadence.
pub struct Poller {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn spawn(timer: SharedTimer, sink: Arc<dyn AlertSink>) -> std::io::Result<Self> {
        Self::spawn_with_interval(timer, sink, Duration::from_millis(POLL_INTERVAL_MS))
    }

    pub fn spawn_with_interval(
        timer: SharedTimer,
        sink: Arc<dyn AlertSink>,
        interval: Duration,
    ) -> std::io::Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("rfocus-poller".into())
            .spawn(move || {
                debug!("poller started");
                let mut rng = rand::thread_rng();
                while flag.load(Ordering::SeqCst) {
                    // The lock is released before any side effect runs.
                    let events = match timer.lock() {
                        Ok(mut t) => t.tick(Local::now(), &mut rng),
                        Err(_) => {
                            error!("timer state poisoned, stopping poller");
                            break;
                        }
                    };
                    dispatch(sink.as_ref(), &events);
                    thread::sleep(interval);
                }
                debug!("poller stopped");
            })?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Clear the flag and wait for the worker to exit.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            error!("poller thread panicked");
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}
