//! Ctrl+C handling and interruptible sleeps

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Longest uninterrupted sleep slice
const SLEEP_TICK: Duration = Duration::from_secs(1);

/// Set up a Ctrl+C interrupt handler for graceful shutdown.
///
/// Returns an `Arc<AtomicBool>` that flips to `true` when the user
/// presses Ctrl+C. If a handler is already registered the new one is
/// silently ignored, but the returned flag still works for callers that
/// set it themselves.
pub fn setup_interrupt_handler() -> Arc<AtomicBool> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = Arc::clone(&interrupted);

    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::SeqCst);
    })
    .ok(); // Ignore error if handler already set

    interrupted
}

/// Check if the interrupt flag has been set.
#[inline]
pub fn is_interrupted(interrupted: &AtomicBool) -> bool {
    interrupted.load(Ordering::SeqCst)
}

/// Sleep for `total`, waking at least once per second to check the flag.
///
/// Returns `false` if the sleep was cut short by an interrupt. A `total`
/// too large to represent as a deadline sleeps until interrupted.
pub fn sleep_interruptible(total: Duration, interrupted: &AtomicBool) -> bool {
    let deadline = Instant::now().checked_add(total);

    loop {
        if is_interrupted(interrupted) {
            return false;
        }

        let remaining = match deadline {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
            None => SLEEP_TICK,
        };
        if remaining.is_zero() {
            return true;
        }

        thread::sleep(remaining.min(SLEEP_TICK));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_interrupt_handler_returns_false_initially() {
        let interrupted = setup_interrupt_handler();
        assert!(!is_interrupted(&interrupted));
    }

    #[test]
    fn test_is_interrupted_helper() {
        let interrupted = Arc::new(AtomicBool::new(false));
        assert!(!is_interrupted(&interrupted));

        interrupted.store(true, Ordering::SeqCst);
        assert!(is_interrupted(&interrupted));
    }

    #[test]
    fn test_sleep_completes_when_not_interrupted() {
        let interrupted = AtomicBool::new(false);
        let start = Instant::now();

        assert!(sleep_interruptible(Duration::from_millis(20), &interrupted));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_sleep_returns_immediately_when_interrupted() {
        let interrupted = AtomicBool::new(true);
        let start = Instant::now();

        assert!(!sleep_interruptible(Duration::from_secs(60), &interrupted));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_sleep_notices_interrupt_from_other_thread() {
        let interrupted = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&interrupted);

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            flag.store(true, Ordering::SeqCst);
        });

        assert!(!sleep_interruptible(Duration::from_secs(30), &interrupted));
        handle.join().unwrap();
    }

    #[test]
    fn test_sleep_with_unrepresentable_duration_waits_for_interrupt() {
        let interrupted = AtomicBool::new(true);
        assert!(!sleep_interruptible(Duration::from_secs(u64::MAX), &interrupted));

        let interrupted = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&interrupted);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            flag.store(true, Ordering::SeqCst);
        });

        assert!(!sleep_interruptible(Duration::MAX, &interrupted));
        handle.join().unwrap();
    }
}
