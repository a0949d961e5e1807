// core/scheduler.rs
//
// Ordered step sequences on a shared clock.
// A page hands the scheduler a list of `{delay, action}` steps instead of
// nesting timer callbacks; dropping the page's pending work is one `cancel_all`.
//
// Usage:
//   let mut timers = Scheduler::new();
//   let id = timers.schedule([Step::after_ms(150, Fade), Step::after_ms(250, Mount)]);
//   for action in timers.tick(dt) { /* apply */ }
//   timers.cancel(id);

use std::collections::{BTreeMap, VecDeque};

/// Slack for float accumulation: 36 steps of 1/60 s must count as 600 ms.
const TIME_EPSILON: f32 = 1e-4;

/// Handle to a scheduled sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceId(pub u32);

/// One step: wait `delay` seconds after the previous step, then fire `action`.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<A> {
    pub delay: f32,
    pub action: A,
}

impl<A> Step<A> {
    pub fn after(delay: f32, action: A) -> Self {
        Self {
            delay: delay.max(0.0),
            action,
        }
    }

    pub fn after_ms(ms: u32, action: A) -> Self {
        Self::after(ms as f32 / 1000.0, action)
    }
}

#[derive(Debug)]
struct Sequence<A> {
    steps: VecDeque<Step<A>>,
    /// Time since the previous step fired.
    elapsed: f32,
}

/// Owns every pending sequence of a page.
#[derive(Debug)]
pub struct Scheduler<A> {
    sequences: BTreeMap<SequenceId, Sequence<A>>,
    next_id: u32,
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            sequences: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Schedule an ordered list of steps. Empty lists are still given an id
    /// but never fire.
    pub fn schedule(&mut self, steps: impl IntoIterator<Item = Step<A>>) -> SequenceId {
        let id = SequenceId(self.next_id);
        self.next_id += 1;
        let steps: VecDeque<Step<A>> = steps.into_iter().collect();
        if !steps.is_empty() {
            self.sequences.insert(id, Sequence { steps, elapsed: 0.0 });
        }
        id
    }

    /// Schedule a single action after `ms` milliseconds.
    pub fn after_ms(&mut self, ms: u32, action: A) -> SequenceId {
        self.schedule([Step::after_ms(ms, action)])
    }

    /// Drop a sequence and all of its remaining steps.
    pub fn cancel(&mut self, id: SequenceId) -> bool {
        self.sequences.remove(&id).is_some()
    }

    /// Drop every pending sequence.
    pub fn cancel_all(&mut self) {
        self.sequences.clear();
    }

    /// Number of sequences with steps left.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Advance the clock. Returns every action whose delay elapsed, ordered by
    /// sequence id and then by position in the sequence.
    pub fn tick(&mut self, dt: f32) -> Vec<A> {
        let mut fired = Vec::new();

        for sequence in self.sequences.values_mut() {
            sequence.elapsed += dt;
            while let Some(step) = sequence.steps.front() {
                if sequence.elapsed + TIME_EPSILON < step.delay {
                    break;
                }
                sequence.elapsed = (sequence.elapsed - step.delay).max(0.0);
                if let Some(step) = sequence.steps.pop_front() {
                    fired.push(step.action);
                }
            }
        }

        self.sequences.retain(|_, s| !s.steps.is_empty());
        fired
    }
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn run(scheduler: &mut Scheduler<&'static str>, seconds: f32) -> Vec<&'static str> {
        let mut fired = Vec::new();
        let steps = (seconds / DT).round() as u32;
        for _ in 0..steps {
            fired.extend(scheduler.tick(DT));
        }
        fired
    }

    #[test]
    fn single_step_fires_after_delay() {
        let mut s = Scheduler::new();
        s.after_ms(600, "reset");
        assert!(run(&mut s, 0.5).is_empty());
        assert_eq!(run(&mut s, 0.1), vec!["reset"]);
        assert!(s.is_empty());
    }

    #[test]
    fn steps_are_relative_to_previous_step() {
        let mut s = Scheduler::new();
        s.schedule([
            Step::after_ms(150, "fade"),
            Step::after_ms(250, "mount"),
            Step::after_ms(20, "show"),
        ]);
        assert_eq!(run(&mut s, 0.15), vec!["fade"]);
        assert!(run(&mut s, 0.2).is_empty());
        assert_eq!(run(&mut s, 0.05), vec!["mount"]);
        assert_eq!(run(&mut s, 0.05), vec!["show"]);
    }

    #[test]
    fn large_tick_fires_several_steps_in_order() {
        let mut s = Scheduler::new();
        s.schedule([Step::after_ms(10, "a"), Step::after_ms(10, "b")]);
        s.after_ms(5, "c");
        assert_eq!(s.tick(1.0), vec!["a", "b", "c"]);
    }

    #[test]
    fn cancel_drops_remaining_steps() {
        let mut s = Scheduler::new();
        let id = s.schedule([Step::after_ms(100, "a"), Step::after_ms(100, "b")]);
        assert_eq!(s.tick(0.1), vec!["a"]);
        assert!(s.cancel(id));
        assert!(s.is_empty());
        assert!(s.tick(1.0).is_empty());
        assert!(!s.cancel(id));
    }

    #[test]
    fn cancel_all_clears_everything() {
        let mut s = Scheduler::new();
        s.after_ms(100, "a");
        s.after_ms(200, "b");
        assert_eq!(s.len(), 2);
        s.cancel_all();
        assert!(s.tick(1.0).is_empty());
    }

    #[test]
    fn zero_delay_fires_on_next_tick() {
        let mut s = Scheduler::new();
        s.after_ms(0, "now");
        assert_eq!(s.tick(0.0), vec!["now"]);
    }

    #[test]
    fn empty_schedule_is_never_pending() {
        let mut s: Scheduler<&str> = Scheduler::new();
        let id = s.schedule(Vec::new());
        assert!(s.is_empty());
        assert!(!s.cancel(id));
    }
}
