//! Cooperative cancellation/status flags polled by the solver.
//!
//! The solver never installs OS signal handlers itself; it only reads these two
//! atomics once per outer-loop iteration. Wiring real SIGINT/SIGUSR1 delivery into
//! them is the CLI binary's job.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared, clonable handle to the solver's cooperative control flags.
#[derive(Clone, Default)]
pub struct SearchFlags {
    keep_running: Arc<AtomicBool>,
    print_status: Arc<AtomicBool>,
}

impl SearchFlags {
    pub fn new() -> Self {
        SearchFlags {
            keep_running: Arc::new(AtomicBool::new(true)),
            print_status: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn should_keep_running(&self) -> bool {
        self.keep_running.load(Ordering::Relaxed)
    }

    pub fn request_stop(&self) {
        self.keep_running.store(false, Ordering::Relaxed);
    }

    /// Consumes a pending status request, if any: returns `true` at most once per
    /// request, clearing the flag so the caller only reports once.
    pub fn take_status_request(&self) -> bool {
        self.print_status.swap(false, Ordering::Relaxed)
    }

    pub fn request_status(&self) {
        self.print_status.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running_with_no_pending_status() {
        let flags = SearchFlags::new();
        assert!(flags.should_keep_running());
        assert!(!flags.take_status_request());
    }

    #[test]
    fn request_stop_is_observed() {
        let flags = SearchFlags::new();
        flags.request_stop();
        assert!(!flags.should_keep_running());
    }

    #[test]
    fn status_request_fires_exactly_once() {
        let flags = SearchFlags::new();
        flags.request_status();
        assert!(flags.take_status_request());
        assert!(!flags.take_status_request());
    }

    #[test]
    fn clone_shares_the_same_flags() {
        let flags = SearchFlags::new();
        let handle = flags.clone();
        handle.request_stop();
        assert!(!flags.should_keep_running());
    }
}
