use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleStatus {
    Active,
    /// Inside the warning window; whole seconds left, rounded up.
    Warning { remaining_secs: u64 },
    Expired,
}

/// Inactivity timer on the monotonic clock, reset on every keystroke.
#[derive(Debug, Clone)]
pub struct IdleTimer {
    timeout: Duration,
    warning: Duration,
    last_input: Instant,
}

impl IdleTimer {
    pub fn new(timeout: Duration, warning: Duration) -> Self {
        Self::starting_at(timeout, warning, Instant::now())
    }

    pub fn starting_at(timeout: Duration, warning: Duration, now: Instant) -> Self {
        Self {
            timeout,
            warning,
            last_input: now,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    pub fn reset_at(&mut self, now: Instant) {
        self.last_input = now;
    }

    pub fn status(&self) -> IdleStatus {
        self.status_at(Instant::now())
    }

    pub fn status_at(&self, now: Instant) -> IdleStatus {
        let elapsed = now.saturating_duration_since(self.last_input);
        if elapsed >= self.timeout {
            return IdleStatus::Expired;
        }

        // A warning window as long as the timeout itself is disabled.
        if self.warning < self.timeout && elapsed >= self.timeout - self.warning {
            let remaining = self.timeout - elapsed;
            let remaining_secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
            return IdleStatus::Warning { remaining_secs };
        }

        IdleStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_status_progression() {
        let start = Instant::now();
        let timer = IdleTimer::starting_at(secs(15), secs(5), start);

        assert_eq!(timer.status_at(start), IdleStatus::Active);
        assert_eq!(timer.status_at(start + secs(9)), IdleStatus::Active);
        assert_eq!(
            timer.status_at(start + secs(10)),
            IdleStatus::Warning { remaining_secs: 5 }
        );
        assert_eq!(
            timer.status_at(start + Duration::from_millis(12_500)),
            IdleStatus::Warning { remaining_secs: 3 }
        );
        assert_eq!(timer.status_at(start + secs(15)), IdleStatus::Expired);
    }

    #[test]
    fn test_reset_restarts_the_clock() {
        let start = Instant::now();
        let mut timer = IdleTimer::starting_at(secs(15), secs(5), start);
        timer.reset_at(start + secs(12));
        assert_eq!(timer.status_at(start + secs(20)), IdleStatus::Active);
        assert_eq!(timer.status_at(start + secs(27)), IdleStatus::Expired);
    }

    #[test]
    fn test_warning_disabled_when_not_shorter_than_timeout() {
        let start = Instant::now();
        let timer = IdleTimer::starting_at(secs(5), secs(5), start);
        assert_eq!(timer.status_at(start + secs(4)), IdleStatus::Active);
        assert_eq!(timer.status_at(start + secs(5)), IdleStatus::Expired);
    }
}
