//! Cooperative event loop.
//!
//! Single-threaded and non-preemptive: `loop_once` runs every due callback
//! to completion, one at a time. Three kinds of events exist:
//!
//! - *delayed*: fires once after an interval, then is removed. A callback
//!   may re-arm itself, which is how the connection-wait animation keeps
//!   itself alive.
//! - *repeated*: fires every fixed interval until removed.
//! - *poll*: fires on every `loop_once` iteration.
//!
//! Storage is a fixed array of slots; no allocation. Time is passed in by
//! the caller as a millisecond tick count, so the loop itself is free of
//! any clock dependency and runs unchanged under test.
//!
//! Callbacks are plain function pointers over a caller-owned context
//! rather than closures over globals; the context is handed to every
//! callback together with the loop so it can schedule follow-up events.

/// Number of event slots.
pub const CAPACITY: usize = 16;

/// An event callback: receives the context and the loop itself.
pub type EventFn<C> = fn(&mut C, &mut EventLoop<C>);

#[derive(Clone, Copy)]
enum Schedule {
    /// Fire once at the given tick, then remove.
    Once { at: u64 },
    /// Fire every `interval` ticks.
    Every { interval: u64, next: u64 },
    /// Fire on every loop iteration.
    Poll,
}

struct Event<C> {
    callback: EventFn<C>,
    schedule: Schedule,
}

/// Fixed-capacity cooperative event loop.
pub struct EventLoop<C> {
    slots: [Option<Event<C>>; CAPACITY],
    now: u64,
}

impl<C> EventLoop<C> {
    const EMPTY_SLOT: Option<Event<C>> = None;

    /// Create an empty loop.
    pub const fn new() -> Self {
        Self {
            slots: [Self::EMPTY_SLOT; CAPACITY],
            now: 0,
        }
    }

    /// Set the current tick without running anything.
    ///
    /// Intervals are measured from the loop's own clock; when the caller
    /// drives `loop_once` with an absolute time source, seed it here
    /// before the first event is scheduled or the first delay collapses.
    pub fn set_time(&mut self, now_ms: u64) {
        self.now = now_ms;
    }

    /// Schedule a one-shot event `delay_ms` from the current tick.
    ///
    /// Returns `false` if all slots are taken.
    pub fn add_delayed_event(&mut self, callback: EventFn<C>, delay_ms: u64) -> bool {
        let at = self.now.saturating_add(delay_ms);
        self.insert(Event {
            callback,
            schedule: Schedule::Once { at },
        })
    }

    /// Schedule an event firing every `interval_ms`.
    pub fn add_repeated_event(&mut self, callback: EventFn<C>, interval_ms: u64) -> bool {
        let next = self.now.saturating_add(interval_ms);
        self.insert(Event {
            callback,
            schedule: Schedule::Every {
                interval: interval_ms,
                next,
            },
        })
    }

    /// Schedule an event firing on every loop iteration.
    pub fn add_poll_event(&mut self, callback: EventFn<C>) -> bool {
        self.insert(Event {
            callback,
            schedule: Schedule::Poll,
        })
    }

    /// Number of currently scheduled events.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True if nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run one loop iteration at tick `now_ms`.
    ///
    /// Every due event is taken out of its slot, run to completion, and
    /// (for repeated and poll events) put back afterwards; a callback is
    /// therefore free to schedule new events, including re-arming itself.
    pub fn loop_once(&mut self, ctx: &mut C, now_ms: u64) {
        self.now = now_ms;

        for i in 0..CAPACITY {
            let due = match &self.slots[i] {
                Some(event) => match event.schedule {
                    Schedule::Once { at } => now_ms >= at,
                    Schedule::Every { next, .. } => now_ms >= next,
                    Schedule::Poll => true,
                },
                None => false,
            };
            if !due {
                continue;
            }

            // Taking the event out of its slot lets the callback borrow
            // the loop mutably without aliasing its own storage.
            let mut event = match self.slots[i].take() {
                Some(event) => event,
                None => continue,
            };

            (event.callback)(ctx, self);

            match &mut event.schedule {
                Schedule::Once { .. } => {} // One-shot: gone.
                Schedule::Every { interval, next } => {
                    *next = next.saturating_add(*interval);
                    if *next <= now_ms {
                        // Fell behind; skip the missed beats.
                        *next = now_ms.saturating_add(*interval);
                    }
                    self.insert(event);
                }
                Schedule::Poll => {
                    self.insert(event);
                }
            }
        }
    }

    fn insert(&mut self, event: Event<C>) -> bool {
        for slot in self.slots.iter_mut() {
            if slot.is_none() {
                *slot = Some(event);
                return true;
            }
        }
        false
    }
}

impl<C> Default for EventLoop<C> {
    fn default() -> Self {
        Self::new()
    }
}
