use std::time::{Duration, Instant};

pub const DEFAULT_RENDER_DEBOUNCE: Duration = Duration::from_millis(40);

/// Trailing-edge debounce for render requests.
///
/// Holds at most one deadline. Parameters are never captured here; whoever
/// observes `poll` returning true snapshots the current view at that moment.
#[derive(Debug)]
pub struct RenderScheduler {
    debounce: Duration,
    deadline: Option<Instant>,
}

impl RenderScheduler {
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            deadline: None,
        }
    }

    /// Pushes the pending render out to `now + debounce`, replacing any
    /// earlier deadline.
    pub fn request_render(&mut self, now: Instant) {
        self.deadline = Some(now + self.debounce);
    }

    /// Makes a render due right away. Used for animation frames.
    pub fn request_frame(&mut self, now: Instant) {
        self.deadline = Some(now);
    }

    /// True once the deadline has passed. Clears the deadline when it fires.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[must_use]
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_RENDER_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::{RenderScheduler, DEFAULT_RENDER_DEBOUNCE};
    use std::time::{Duration, Instant};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn first_request_arms_deadline_after_debounce() {
        let mut scheduler = RenderScheduler::default();
        let now = Instant::now();

        scheduler.request_render(now);

        assert_eq!(scheduler.pending_deadline(), Some(now + DEFAULT_RENDER_DEBOUNCE));
        assert!(!scheduler.poll(now));
        assert!(!scheduler.poll(now + ms(39)));
        assert!(scheduler.poll(now + ms(40)));
        assert_eq!(scheduler.pending_deadline(), None);
    }

    #[test]
    fn burst_of_requests_coalesces_into_one_render() {
        let mut scheduler = RenderScheduler::default();
        let start = Instant::now();
        let mut fired = 0;

        for step in 0..10 {
            let now = start + ms(step * 10);
            scheduler.request_render(now);

            if scheduler.poll(now) {
                fired += 1;
            }
        }

        assert_eq!(fired, 0);
        assert_eq!(scheduler.pending_deadline(), Some(start + ms(90) + DEFAULT_RENDER_DEBOUNCE));
        assert!(scheduler.poll(start + ms(130)));
        assert!(!scheduler.poll(start + ms(200)));
    }

    #[test]
    fn request_frame_is_due_immediately() {
        let mut scheduler = RenderScheduler::default();
        let now = Instant::now();
        scheduler.request_render(now);

        scheduler.request_frame(now);

        assert_eq!(scheduler.pending_deadline(), Some(now));
        assert!(scheduler.poll(now));
    }

    #[test]
    fn poll_without_request_does_nothing() {
        let mut scheduler = RenderScheduler::new(ms(5));

        assert!(!scheduler.poll(Instant::now() + ms(100)));
    }

    #[test]
    fn cancel_drops_pending_deadline() {
        let mut scheduler = RenderScheduler::new(ms(5));
        let now = Instant::now();
        scheduler.request_render(now);

        scheduler.cancel();

        assert!(!scheduler.poll(now + ms(10)));
        assert_eq!(scheduler.debounce(), ms(5));
    }
}
