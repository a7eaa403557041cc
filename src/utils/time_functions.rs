use std::time::{Duration, Instant};
use tracing::info;

/// Runs `f`, logs how long it took and returns its result together with the elapsed wall-clock time.
pub fn timed<R>(label: &str, f: impl FnOnce() -> R) -> (R, Duration) {
    let start = Instant::now();
    let res = f();
    let elapsed = start.elapsed();
    info!("[Execution time] {label}: {}s", elapsed.as_secs_f64());

    (res, elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_returns_result() {
        let (res, elapsed) = timed("sleep", || {
            std::thread::sleep(Duration::from_millis(2));
            42
        });
        assert_eq!(res, 42);
        assert!(elapsed >= Duration::from_millis(2));
    }
}
