//! Bookkeeping winit leaves to the application: synthesising double clicks
//! and keeping the set of touches currently on the surface.

use std::time::{Duration, Instant};

use crate::core::data::pixel_point::CssPoint;

pub const DOUBLE_CLICK_DISTANCE: f64 = 4.0;

/// Pairs consecutive presses into double clicks.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    window: Duration,
    distance: f64,
    last: Option<(Instant, CssPoint)>,
}

impl ClickTracker {
    #[must_use]
    pub fn new(window: Duration, distance: f64) -> Self {
        Self {
            window,
            distance,
            last: None,
        }
    }

    /// Records a press. Returns true when it completes a double click, in
    /// which case the pair is consumed and the next press starts afresh.
    pub fn register(&mut self, now: Instant, position: CssPoint) -> bool {
        let is_double = self.last.is_some_and(|(time, last)| {
            now.saturating_duration_since(time) <= self.window
                && (position.x - last.x).hypot(position.y - last.y) <= self.distance
        });

        self.last = if is_double { None } else { Some((now, position)) };

        is_double
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Touches on the surface, in the order they went down.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    active: Vec<(u64, CssPoint)>,
}

impl TouchTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A repeated start for a known id just moves it.
    pub fn start(&mut self, id: u64, position: CssPoint) {
        match self.active.iter_mut().find(|(known, _)| *known == id) {
            Some(entry) => entry.1 = position,
            None => self.active.push((id, position)),
        }
    }

    /// Returns false for ids that never started.
    pub fn moved(&mut self, id: u64, position: CssPoint) -> bool {
        match self.active.iter_mut().find(|(known, _)| *known == id) {
            Some(entry) => {
                entry.1 = position;
                true
            }
            None => false,
        }
    }

    pub fn end(&mut self, id: u64) -> bool {
        let before = self.active.len();
        self.active.retain(|(known, _)| *known != id);
        self.active.len() != before
    }

    #[must_use]
    pub fn points(&self) -> Vec<CssPoint> {
        self.active.iter().map(|(_, position)| *position).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn tracker() -> ClickTracker {
        ClickTracker::new(ms(300), DOUBLE_CLICK_DISTANCE)
    }

    #[test]
    fn two_quick_presses_in_place_make_a_double_click() {
        let mut clicks = tracker();
        let now = Instant::now();

        assert!(!clicks.register(now, CssPoint::new(10.0, 10.0)));
        assert!(clicks.register(now + ms(200), CssPoint::new(12.0, 11.0)));
    }

    #[test]
    fn third_press_starts_a_new_pair() {
        let mut clicks = tracker();
        let now = Instant::now();
        let at = CssPoint::new(10.0, 10.0);

        clicks.register(now, at);
        clicks.register(now + ms(100), at);

        assert!(!clicks.register(now + ms(200), at));
    }

    #[test]
    fn slow_or_distant_presses_stay_single() {
        let mut clicks = tracker();
        let now = Instant::now();

        clicks.register(now, CssPoint::new(10.0, 10.0));
        assert!(!clicks.register(now + ms(301), CssPoint::new(10.0, 10.0)));
        assert!(!clicks.register(now + ms(400), CssPoint::new(30.0, 10.0)));
    }

    #[test]
    fn reset_forgets_the_previous_press() {
        let mut clicks = tracker();
        let now = Instant::now();
        let at = CssPoint::new(5.0, 5.0);

        clicks.register(now, at);
        clicks.reset();

        assert!(!clicks.register(now + ms(50), at));
    }

    #[test]
    fn touches_keep_start_order_and_follow_moves() {
        let mut touches = TouchTracker::new();

        touches.start(7, CssPoint::new(1.0, 1.0));
        touches.start(3, CssPoint::new(2.0, 2.0));
        assert!(touches.moved(7, CssPoint::new(5.0, 5.0)));

        assert_eq!(
            touches.points(),
            vec![CssPoint::new(5.0, 5.0), CssPoint::new(2.0, 2.0)]
        );
    }

    #[test]
    fn unknown_touch_ids_are_ignored() {
        let mut touches = TouchTracker::new();
        touches.start(1, CssPoint::new(1.0, 1.0));

        assert!(!touches.moved(9, CssPoint::new(4.0, 4.0)));
        assert!(!touches.end(9));
        assert_eq!(touches.len(), 1);
    }

    #[test]
    fn ending_a_touch_leaves_the_rest() {
        let mut touches = TouchTracker::new();
        touches.start(1, CssPoint::new(1.0, 1.0));
        touches.start(2, CssPoint::new(2.0, 2.0));

        assert!(touches.end(1));
        assert_eq!(touches.points(), vec![CssPoint::new(2.0, 2.0)]);

        touches.clear();
        assert!(touches.is_empty());
    }
}
