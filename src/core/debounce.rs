use std::time::{Duration, Instant};

/// Trailing-edge debounce over a single value.
///
/// Each [`push`](Debouncer::push) supersedes whatever was pending and
/// restarts the delay. The settled value only ever moves to the newest
/// pushed value, and only after `delay` passes with no further push.
/// A zero delay settles synchronously inside `push`.
///
/// The debouncer never spawns a timer: hosts read [`deadline`](Debouncer::deadline)
/// to size their wait and call [`poll`](Debouncer::poll) once it is due.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    settled: T,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    /// `None` when the delay runs past what `Instant` can represent.
    due_at: Option<Instant>,
    value: T,
}

impl<T: Clone> Debouncer<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            settled: initial,
            pending: None,
        }
    }

    pub fn settled(&self) -> &T {
        &self.settled
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().and_then(|pending| pending.due_at)
    }

    /// Schedules `value`. Returns the newly settled value when the delay is zero.
    pub fn push(&mut self, value: T, now: Instant) -> Option<T> {
        if self.delay.is_zero() {
            self.pending = None;
            self.settled = value.clone();
            return Some(value);
        }

        self.pending = Some(Pending {
            due_at: now.checked_add(self.delay),
            value,
        });
        None
    }

    /// Settles the pending value if its deadline has passed.
    ///
    /// Yields each settled value exactly once.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .and_then(|pending| pending.due_at)
            .is_some_and(|due_at| due_at <= now);
        if !due {
            return None;
        }

        let pending = self.pending.take()?;
        self.settled = pending.value.clone();
        Some(pending.value)
    }

    /// Drops the pending value. Returns whether anything was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Cancels anything pending and settles `value` immediately.
    pub fn settle_now(&mut self, value: T) {
        self.cancel();
        self.settled = value;
    }
}

#[cfg(test)]
mod tests {
    use super::Debouncer;
    use proptest::prelude::*;
    use std::time::{Duration, Instant};

    const DELAY: Duration = Duration::from_millis(300);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn settles_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), DELAY);

        assert_eq!(debouncer.push("c".to_string(), start), None);
        assert_eq!(debouncer.poll(start + ms(299)), None);
        assert_eq!(debouncer.poll(start + ms(300)), Some("c".to_string()));
        assert_eq!(debouncer.settled(), "c");
        assert_eq!(debouncer.poll(start + ms(900)), None);
    }

    #[test]
    fn each_push_restarts_the_timer() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), DELAY);

        debouncer.push("c".to_string(), start);
        debouncer.push("ch".to_string(), start + ms(200));
        assert_eq!(debouncer.poll(start + ms(350)), None);
        assert_eq!(debouncer.deadline(), Some(start + ms(500)));
        assert_eq!(debouncer.poll(start + ms(500)), Some("ch".to_string()));
    }

    #[test]
    fn zero_delay_settles_synchronously() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), Duration::ZERO);

        assert_eq!(debouncer.push("b".to_string(), start), Some("b".to_string()));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.settled(), "b");
        assert_eq!(debouncer.poll(start), None);
    }

    #[test]
    fn cancel_prevents_stale_settle() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new("old".to_string(), DELAY);

        debouncer.push("new".to_string(), start);
        assert!(debouncer.cancel());
        assert_eq!(debouncer.poll(start + ms(1_000)), None);
        assert_eq!(debouncer.settled(), "old");
        assert!(!debouncer.cancel());
    }

    #[test]
    fn settle_now_overrides_pending_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), DELAY);

        debouncer.push("pika".to_string(), start);
        debouncer.settle_now(String::new());
        assert_eq!(debouncer.settled(), "");
        assert_eq!(debouncer.poll(start + ms(1_000)), None);
    }

    #[test]
    fn unrepresentable_deadline_stays_pending() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), Duration::MAX);

        assert_eq!(debouncer.push("mew".to_string(), start), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.poll(start + ms(1_000)), None);
        assert!(debouncer.cancel());
    }

    proptest! {
        #[test]
        fn converges_to_last_value_once(
            values in prop::collection::vec("[a-z]{0,4}", 1..12),
            gaps in prop::collection::vec(0u64..299, 12),
        ) {
            let start = Instant::now();
            let mut debouncer = Debouncer::new(String::new(), DELAY);
            let mut now = start;
            let mut emitted = Vec::new();

            for (value, gap) in values.iter().zip(gaps.iter()) {
                debouncer.push(value.clone(), now);
                now += ms(*gap);
                if let Some(settled) = debouncer.poll(now) {
                    emitted.push(settled);
                }
            }
            prop_assert!(emitted.is_empty());

            now += DELAY;
            if let Some(settled) = debouncer.poll(now) {
                emitted.push(settled);
            }
            prop_assert_eq!(debouncer.poll(now + DELAY), None);
            prop_assert_eq!(emitted, vec![values.last().cloned().unwrap_or_default()]);
        }
    }
}
