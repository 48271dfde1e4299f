use std::time::{Duration, Instant};

/// One-shot deferred work, drained by the frame loop.
///
/// Tasks belong to the current run: [`Timeline::cancel_all`] is called on
/// every start so nothing from a finished run fires into the next one.
#[derive(Clone, Debug)]
pub struct Timeline<T> {
    pending: Vec<(Instant, T)>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Timeline {
            pending: Vec::new(),
        }
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, task: T) {
        self.pending.push((now + delay, task));
    }

    /// Removes and returns every task due at `now`, earliest first. Tasks
    /// with the same deadline keep their scheduling order.
    pub fn due(&mut self, now: Instant) -> Vec<T> {
        let (mut ready, later): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(at, _)| *at <= now);
        self.pending = later;
        ready.sort_by_key(|(at, _)| *at);
        ready.into_iter().map(|(_, task)| task).collect()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn cancel_where(&mut self, mut pred: impl FnMut(&T) -> bool) {
        self.pending.retain(|(_, task)| !pred(task));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_once_in_deadline_order() {
        let t0 = Instant::now();
        let mut tl = Timeline::new();
        tl.schedule(t0, ms(300), "b");
        tl.schedule(t0, ms(100), "a");
        tl.schedule(t0, ms(900), "c");

        assert!(tl.due(t0 + ms(50)).is_empty());
        assert_eq!(tl.due(t0 + ms(300)), vec!["a", "b"]);
        assert!(tl.due(t0 + ms(300)).is_empty());
        assert_eq!(tl.len(), 1);
        assert_eq!(tl.due(t0 + ms(1000)), vec!["c"]);
        assert!(tl.is_empty());
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let t0 = Instant::now();
        let mut tl = Timeline::new();
        tl.schedule(t0, ms(10), 1);
        tl.schedule(t0, ms(10), 2);
        tl.cancel_where(|n| *n == 1);
        assert_eq!(tl.due(t0 + ms(20)), vec![2]);

        tl.schedule(t0, ms(10), 3);
        tl.cancel_all();
        assert!(tl.due(t0 + ms(20)).is_empty());
    }
}
