//! Deferred and periodic callbacks on the session clock
//!
//! Every scheduled callback hands back a [`TimerToken`]. Holders keep the
//! token and cancel it when the callback is superseded or the scene is torn
//! down, so a callback armed for one turn or session can never fire into the
//! next. Cancelling a token that already fired is a harmless no-op.

use std::time::Duration;

/// Smallest allowed repeat period
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Handle for cancelling a scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Once,
    Every(Duration),
}

#[derive(Debug, Clone)]
struct Entry<A> {
    token: TimerToken,
    due: Duration,
    repeat: Repeat,
    action: A,
}

/// Pending callbacks, fired in due order (ties in scheduling order)
#[derive(Debug, Clone)]
pub struct Scheduler<A> {
    next_token: u64,
    entries: Vec<Entry<A>>,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self {
            next_token: 1,
            entries: Vec::new(),
        }
    }
}

impl<A: Clone> Scheduler<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `action` once, `delay` after `now`
    pub fn schedule_once(&mut self, now: Duration, delay: Duration, action: A) -> TimerToken {
        self.push(now + delay, Repeat::Once, action)
    }

    /// Fire `action` every `period`, first at `now + period`
    pub fn schedule_every(&mut self, now: Duration, period: Duration, action: A) -> TimerToken {
        let period = period.max(MIN_PERIOD);
        self.push(now + period, Repeat::Every(period), action)
    }

    fn push(&mut self, due: Duration, repeat: Repeat, action: A) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.entries.push(Entry {
            token,
            due,
            repeat,
            action,
        });
        token
    }

    /// Cancel a pending callback. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.token != token);
        self.entries.len() != before
    }

    /// Take the earliest callback due at or before `now`.
    ///
    /// One-shots are removed; repeating callbacks are re-armed one period later,
    /// so a long gap between calls yields every missed repetition in turn.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerToken, A)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.token))
            .map(|(i, _)| i)?;

        let entry = &self.entries[idx];
        let fired = (entry.token, entry.action.clone());
        let repeat = entry.repeat;
        match repeat {
            Repeat::Once => {
                self.entries.remove(idx);
            }
            Repeat::Every(period) => self.entries[idx].due += period,
        }
        Some(fired)
    }

    /// Cancel everything. Returns how many callbacks were pending.
    pub fn clear(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn drain(s: &mut Scheduler<&'static str>, now: Duration) -> Vec<&'static str> {
        std::iter::from_fn(|| s.pop_due(now).map(|(_, a)| a)).collect()
    }

    #[test]
    fn test_once_fires_a_single_time() {
        let mut s = Scheduler::new();
        s.schedule_once(ms(0), ms(2000), "reset");
        assert!(drain(&mut s, ms(1999)).is_empty());
        assert_eq!(drain(&mut s, ms(2000)), vec!["reset"]);
        assert!(drain(&mut s, ms(5000)).is_empty());
        assert!(s.is_empty());
    }

    #[test]
    fn test_every_catches_up_missed_periods() {
        let mut s = Scheduler::new();
        s.schedule_every(ms(0), ms(100), "tick");
        assert_eq!(drain(&mut s, ms(350)).len(), 3);
        assert_eq!(drain(&mut s, ms(400)).len(), 1);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_due_order_then_schedule_order() {
        let mut s = Scheduler::new();
        s.schedule_once(ms(0), ms(300), "late");
        s.schedule_once(ms(0), ms(100), "first");
        s.schedule_once(ms(0), ms(100), "second");
        assert_eq!(drain(&mut s, ms(1000)), vec!["first", "second", "late"]);
    }

    #[test]
    fn test_cancel_is_best_effort() {
        let mut s = Scheduler::new();
        let token = s.schedule_once(ms(0), ms(100), "reset");
        assert_eq!(s.len(), 1);
        assert!(s.cancel(token));
        assert!(!s.cancel(token));
        assert!(drain(&mut s, ms(200)).is_empty());

        let fired = s.schedule_once(ms(0), ms(10), "fired");
        assert_eq!(drain(&mut s, ms(10)), vec!["fired"]);
        assert!(!s.cancel(fired));
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut s = Scheduler::new();
        s.schedule_every(ms(0), ms(100), "tick");
        s.schedule_once(ms(0), ms(2000), "reset");
        assert_eq!(s.clear(), 2);
        assert!(drain(&mut s, ms(10_000)).is_empty());
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let mut s = Scheduler::new();
        s.schedule_every(ms(0), Duration::ZERO, "tick");
        assert_eq!(drain(&mut s, ms(5)).len(), 5);
    }
}
