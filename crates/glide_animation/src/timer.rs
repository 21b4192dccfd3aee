//! Progress timers
//!
//! A progress timer turns a duration, start delay and easing curve into a
//! sequence of `0.0..=1.0` fractions, plus start/cancel/repeat/end lifecycle
//! events. Animators only depend on the [`TimerEngine`] trait; [`Timers`] is
//! a deterministic single-threaded engine driven by explicit [`Timers::tick`]
//! calls from the host's frame loop.
//!
//! # Re-entrancy
//!
//! Listener callbacks run with no engine state borrowed, so a listener may
//! create, start or cancel timers (including the one reporting) from inside
//! a callback.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};
use smallvec::{smallvec, SmallVec};

use crate::easing::Easing;

/// Duration used by timers that were never given one
pub const DEFAULT_DURATION_MS: u64 = 300;

new_key_type! {
    /// Handle to a timer created by a [`TimerEngine`]
    pub struct TimerId;
}

/// Lifecycle notifications emitted by a timer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerEvent {
    /// The timer began producing progress (after any start delay)
    Start,
    /// The timer was canceled; always followed by `End`
    Cancel,
    /// A new cycle began on a repeating timer
    Repeat,
    /// The timer finished, naturally or by cancellation
    End,
}

/// Receiver for a timer's progress and lifecycle callbacks
pub trait TimerListener {
    /// Called once per tick with the eased progress fraction
    fn on_update(&self, timer: TimerId, fraction: f32);

    /// Called for every lifecycle transition
    fn on_lifecycle(&self, timer: TimerId, event: TimerEvent);
}

/// The progress timer capability animators are built on
pub trait TimerEngine {
    /// Create an idle timer reporting to `listener`
    fn create(&self, listener: Weak<dyn TimerListener>) -> TimerId;

    /// Duration given to timers that are never configured
    fn default_duration_ms(&self) -> u64;

    fn set_duration(&self, timer: TimerId, duration_ms: u64);

    fn set_start_delay(&self, timer: TimerId, delay_ms: u64);

    fn set_interpolator(&self, timer: TimerId, easing: Easing);

    /// Begin running; emits `Start` immediately when there is no delay
    fn start(&self, timer: TimerId);

    /// Stop a started timer, emitting `Cancel` then `End`
    ///
    /// A never-started timer is discarded without events. Unknown and
    /// finished timers are ignored.
    fn cancel(&self, timer: TimerId);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Created,
    Delayed,
    Running,
    /// Reached the end this tick; its final events are being delivered
    Finishing,
}

struct TimerState {
    duration_ms: u64,
    delay_ms: u64,
    easing: Easing,
    repeat_count: u32,
    iteration: u32,
    phase: Phase,
    /// Time spent in the current phase
    elapsed_ms: f32,
    listener: Weak<dyn TimerListener>,
}

enum Emit {
    Update(f32),
    Lifecycle(TimerEvent),
}

/// Callbacks computed under the engine borrow, delivered after it is released
struct Step {
    listener: Weak<dyn TimerListener>,
    events: SmallVec<[Emit; 4]>,
    /// The timer slot is already gone; deliver every event unconditionally
    detached: bool,
}

struct TimersInner {
    timers: SlotMap<TimerId, TimerState>,
    default_duration_ms: u64,
}

impl TimersInner {
    fn advance(&mut self, id: TimerId, dt_ms: f32) -> Option<Step> {
        let timer = self.timers.get_mut(id)?;
        let mut events: SmallVec<[Emit; 4]> = SmallVec::new();
        let mut dt_ms = dt_ms.max(0.0);

        match timer.phase {
            Phase::Created | Phase::Finishing => return None,
            Phase::Delayed => {
                timer.elapsed_ms += dt_ms;
                let delay = timer.delay_ms as f32;
                if timer.elapsed_ms < delay {
                    return None;
                }
                dt_ms = timer.elapsed_ms - delay;
                timer.phase = Phase::Running;
                timer.elapsed_ms = 0.0;
                events.push(Emit::Lifecycle(TimerEvent::Start));
            }
            Phase::Running => {}
        }

        timer.elapsed_ms += dt_ms;
        let duration = timer.duration_ms as f32;
        let mut finished = false;
        while duration <= 0.0 || timer.elapsed_ms >= duration {
            if timer.iteration < timer.repeat_count {
                timer.iteration += 1;
                timer.elapsed_ms = (timer.elapsed_ms - duration).max(0.0);
                events.push(Emit::Lifecycle(TimerEvent::Repeat));
            } else {
                finished = true;
                break;
            }
        }

        let linear = if finished {
            1.0
        } else {
            timer.elapsed_ms / duration
        };
        events.push(Emit::Update(timer.easing.apply(linear)));

        if finished {
            // Slot is removed by dispatch when End is delivered.
            timer.phase = Phase::Finishing;
            events.push(Emit::Lifecycle(TimerEvent::End));
        }

        Some(Step {
            listener: timer.listener.clone(),
            events,
            detached: false,
        })
    }
}

/// Deterministic progress timer engine
///
/// Cheap to clone; clones share the same timers. Time only advances when
/// [`tick`](Self::tick) is called.
///
/// ```ignore
/// let timers = Timers::new();
/// let id = timers.create(listener);
/// timers.set_duration(id, 200);
/// timers.start(id);
///
/// while timers.tick(16.0) {
///     // render
/// }
/// ```
#[derive(Clone)]
pub struct Timers {
    inner: Rc<RefCell<TimersInner>>,
}

impl Timers {
    pub fn new() -> Self {
        Self::with_default_duration(DEFAULT_DURATION_MS)
    }

    /// Create an engine whose unconfigured timers run for `duration_ms`
    pub fn with_default_duration(duration_ms: u64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(TimersInner {
                timers: SlotMap::with_key(),
                default_duration_ms: duration_ms,
            })),
        }
    }

    /// Advance every started timer by `dt_ms`
    ///
    /// Timers created during this call are not advanced until the next one.
    /// Returns true if any timer is still started (delayed or running).
    pub fn tick(&self, dt_ms: f32) -> bool {
        let ids: Vec<TimerId> = self.inner.borrow().timers.keys().collect();
        for id in ids {
            let step = self.inner.borrow_mut().advance(id, dt_ms);
            if let Some(step) = step {
                self.dispatch(id, step);
            }
        }
        self.has_active_timers()
    }

    /// Number of additional cycles after the first (0 by default)
    pub fn set_repeat_count(&self, timer: TimerId, count: u32) {
        if let Some(state) = self.inner.borrow_mut().timers.get_mut(timer) {
            state.repeat_count = count;
        }
    }

    /// Check whether `timer` exists and has been started
    pub fn is_started(&self, timer: TimerId) -> bool {
        self.inner
            .borrow()
            .timers
            .get(timer)
            .map(|t| t.phase != Phase::Created)
            .unwrap_or(false)
    }

    /// Check whether any timer is delayed or running
    pub fn has_active_timers(&self) -> bool {
        self.inner
            .borrow()
            .timers
            .values()
            .any(|t| t.phase != Phase::Created)
    }

    /// Number of timers that have not finished or been canceled
    pub fn timer_count(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    fn dispatch(&self, id: TimerId, step: Step) {
        let listener = step.listener.upgrade();
        for emit in step.events {
            if !step.detached {
                let mut inner = self.inner.borrow_mut();
                // An earlier callback may have canceled this timer.
                if !inner.timers.contains_key(id) {
                    break;
                }
                if matches!(emit, Emit::Lifecycle(TimerEvent::End)) {
                    inner.timers.remove(id);
                }
            }
            let Some(listener) = listener.as_ref() else {
                continue;
            };
            match emit {
                Emit::Update(fraction) => listener.on_update(id, fraction),
                Emit::Lifecycle(event) => listener.on_lifecycle(id, event),
            }
        }
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine for Timers {
    fn create(&self, listener: Weak<dyn TimerListener>) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let duration_ms = inner.default_duration_ms;
        inner.timers.insert(TimerState {
            duration_ms,
            delay_ms: 0,
            easing: Easing::default(),
            repeat_count: 0,
            iteration: 0,
            phase: Phase::Created,
            elapsed_ms: 0.0,
            listener,
        })
    }

    fn default_duration_ms(&self) -> u64 {
        self.inner.borrow().default_duration_ms
    }

    fn set_duration(&self, timer: TimerId, duration_ms: u64) {
        if let Some(state) = self.inner.borrow_mut().timers.get_mut(timer) {
            state.duration_ms = duration_ms;
        }
    }

    fn set_start_delay(&self, timer: TimerId, delay_ms: u64) {
        if let Some(state) = self.inner.borrow_mut().timers.get_mut(timer) {
            state.delay_ms = delay_ms;
        }
    }

    fn set_interpolator(&self, timer: TimerId, easing: Easing) {
        if let Some(state) = self.inner.borrow_mut().timers.get_mut(timer) {
            state.easing = easing;
        }
    }

    fn start(&self, timer: TimerId) {
        let step = {
            let mut inner = self.inner.borrow_mut();
            let Some(state) = inner.timers.get_mut(timer) else {
                return;
            };
            if state.phase != Phase::Created {
                return;
            }
            state.iteration = 0;
            state.elapsed_ms = 0.0;
            if state.delay_ms == 0 {
                state.phase = Phase::Running;
                Some(Step {
                    listener: state.listener.clone(),
                    events: smallvec![Emit::Lifecycle(TimerEvent::Start)],
                    detached: false,
                })
            } else {
                state.phase = Phase::Delayed;
                None
            }
        };
        if let Some(step) = step {
            self.dispatch(timer, step);
        }
    }

    fn cancel(&self, timer: TimerId) {
        let step = {
            let mut inner = self.inner.borrow_mut();
            match inner.timers.get(timer).map(|t| t.phase) {
                None => None,
                Some(Phase::Created) => {
                    inner.timers.remove(timer);
                    None
                }
                Some(_) => inner.timers.remove(timer).map(|state| Step {
                    listener: state.listener,
                    events: smallvec![
                        Emit::Lifecycle(TimerEvent::Cancel),
                        Emit::Lifecycle(TimerEvent::End)
                    ],
                    detached: true,
                }),
            }
        };
        if let Some(step) = step {
            tracing::trace!("Timers: canceled {:?}", timer);
            self.dispatch(timer, step);
        }
    }
}
