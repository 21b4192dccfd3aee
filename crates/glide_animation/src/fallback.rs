//! Built-in property animator
//!
//! Used when the host has no native batched animator. Property requests are
//! collected until the next UI tick and then started together on one timer:
//!
//! 1. A request first takes its property away from any running bundle,
//!    canceling that bundle's timer if it no longer drives anything.
//! 2. The request joins the pending batch and the single deferred start task
//!    is re-armed (removed and posted again).
//! 3. When the task runs (or [`start`](PropertyAnimator::start) is called),
//!    the batch becomes one [`PropertyBundle`] on a fresh timer.
//! 4. Each progress update applies the bundle to the view; the timer's end
//!    event unregisters it.
//!
//! Everything runs on the UI thread. State lives behind a `RefCell` that is
//! never held across a call into the timer engine, the looper or the
//! lifecycle listener, so all three may call back into the animator.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glide_core::{AnimatedView, Property, PropertySet};

use crate::animator::{LifecycleCallback, PropertyAnimator};
use crate::apply::apply_frame;
use crate::bundle::{ActiveAnimations, PropertyBundle};
use crate::config::AnimatorConfig;
use crate::easing::Easing;
use crate::error::Result;
use crate::looper::{Looper, TaskId};
use crate::pending::{PendingAnimations, PropertyValues};
use crate::timer::{TimerEngine, TimerEvent, TimerId, TimerListener};

struct AnimatorState {
    config: AnimatorConfig,
    listener: Option<LifecycleCallback>,
    pending: PendingAnimations,
    active: ActiveAnimations,
    /// The armed start task, if any. Never more than one.
    starter: Option<TaskId>,
}

struct Shared<V> {
    view: Rc<RefCell<V>>,
    timers: Rc<dyn TimerEngine>,
    looper: Rc<dyn Looper>,
    state: RefCell<AnimatorState>,
}

impl<V: AnimatedView + 'static> Shared<V> {
    fn animate_property(self: &Rc<Self>, property: Property, to: f32) {
        let from = self.view.borrow().property(property);
        self.animate_property_by(property, from, to - from);
    }

    fn animate_property_relative(self: &Rc<Self>, property: Property, by: f32) {
        let from = self.view.borrow().property(property);
        self.animate_property_by(property, from, by);
    }

    fn animate_property_by(self: &Rc<Self>, property: Property, from: f32, by: f32) {
        let emptied = self.state.borrow_mut().active.cancel_property(property);
        if let Some(timer) = emptied {
            tracing::debug!(
                "FallbackAnimator: {:?} no longer drives anything, canceling",
                timer
            );
            self.timers.cancel(timer);
        }

        let previous = {
            let mut state = self.state.borrow_mut();
            state
                .pending
                .enqueue(PropertyValues::new(property, from, by));
            state.starter.take()
        };
        if let Some(task) = previous {
            self.looper.remove(task);
        }

        let weak = Rc::downgrade(self);
        let task = self.looper.post(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.state.borrow_mut().starter = None;
                shared.start_animation();
            }
        }));
        self.state.borrow_mut().starter = Some(task);
    }

    /// Flush the pending batch onto a new timer
    fn start_animation(self: &Rc<Self>) {
        let (values, config) = {
            let mut state = self.state.borrow_mut();
            (state.pending.drain_all(), state.config)
        };
        if values.is_empty() {
            tracing::trace!("FallbackAnimator: nothing pending, no timer started");
            return;
        }

        let bundle = PropertyBundle::new(values);
        let weak: Weak<Self> = Rc::downgrade(self);
        let listener: Weak<dyn TimerListener> = weak;
        let timer = self.timers.create(listener);
        config.apply_to(self.timers.as_ref(), timer);

        tracing::debug!(
            "FallbackAnimator: starting {:?} for {:?} ({} values)",
            timer,
            bundle.mask(),
            bundle.values().len()
        );
        self.state.borrow_mut().active.insert(timer, bundle);
        self.timers.start(timer);
    }

    fn disarm(&self) {
        let starter = self.state.borrow_mut().starter.take();
        if let Some(task) = starter {
            self.looper.remove(task);
        }
    }

    fn cancel(&self) {
        let running = {
            let mut state = self.state.borrow_mut();
            state.pending.clear();
            state.active.timers()
        };
        self.disarm();

        if !running.is_empty() {
            tracing::debug!("FallbackAnimator: canceling {} timers", running.len());
        }
        for timer in running {
            self.timers.cancel(timer);
        }
    }
}

impl<V: AnimatedView + 'static> TimerListener for Shared<V> {
    fn on_update(&self, timer: TimerId, fraction: f32) {
        let bundle = self.state.borrow().active.get(timer).cloned();
        let Some(bundle) = bundle else {
            panic!("progress update for {timer:?}, which has no registered bundle");
        };
        tracing::trace!(
            "FallbackAnimator: frame {:?} at {:.3} for {:?}",
            timer,
            fraction,
            bundle.mask()
        );
        apply_frame(&mut *self.view.borrow_mut(), &bundle, fraction);
    }

    fn on_lifecycle(&self, timer: TimerId, event: TimerEvent) {
        let listener = self.state.borrow().listener.clone();
        if let Some(listener) = listener {
            listener(timer, event);
        }
        if event == TimerEvent::End {
            self.state.borrow_mut().active.remove(timer);
        }
    }
}

/// Batched property animation for one view
///
/// Created once per view and kept for the view's lifetime. Dropping it
/// cancels everything it has pending or running.
///
/// ```ignore
/// let view = Rc::new(RefCell::new(ViewProperties::new()));
/// let mut animator = FallbackAnimator::new(view, timers.clone(), queue.clone());
///
/// animator.animate_to(Property::X, 100.0);
/// animator.animate_to(Property::Alpha, 0.0);
/// queue.run_pending(); // one timer drives both
/// ```
pub struct FallbackAnimator<V: AnimatedView + 'static> {
    shared: Rc<Shared<V>>,
}

impl<V: AnimatedView + 'static> FallbackAnimator<V> {
    pub fn new(
        view: Rc<RefCell<V>>,
        timers: impl TimerEngine + 'static,
        looper: impl Looper + 'static,
    ) -> Self {
        Self::with_config(view, timers, looper, AnimatorConfig::default())
    }

    /// Create an animator seeded with `config`
    pub fn with_config(
        view: Rc<RefCell<V>>,
        timers: impl TimerEngine + 'static,
        looper: impl Looper + 'static,
        config: AnimatorConfig,
    ) -> Self {
        Self {
            shared: Rc::new(Shared {
                view,
                timers: Rc::new(timers),
                looper: Rc::new(looper),
                state: RefCell::new(AnimatorState {
                    config,
                    listener: None,
                    pending: PendingAnimations::new(),
                    active: ActiveAnimations::new(),
                    starter: None,
                }),
            }),
        }
    }

    /// The animated view
    pub fn view(&self) -> &Rc<RefCell<V>> {
        &self.shared.view
    }

    /// Current timing configuration
    pub fn config(&self) -> AnimatorConfig {
        self.shared.state.borrow().config
    }

    /// Number of timers currently driving properties
    pub fn active_animation_count(&self) -> usize {
        self.shared.state.borrow().active.len()
    }

    /// Properties owned by running timers
    pub fn animated_properties(&self) -> PropertySet {
        self.shared.state.borrow().active.animated_properties()
    }

    /// Properties in the batch waiting to start
    pub fn pending_properties(&self) -> PropertySet {
        self.shared.state.borrow().pending.properties()
    }

    /// Entries of the batch waiting to start, in request order
    pub fn pending_values(&self) -> Vec<PropertyValues> {
        self.shared.state.borrow().pending.iter().copied().collect()
    }

    /// The bundle `timer` is driving, if it is registered
    pub fn bundle(&self, timer: TimerId) -> Option<PropertyBundle> {
        self.shared.state.borrow().active.get(timer).cloned()
    }

    /// Check whether a deferred start is scheduled
    pub fn is_start_armed(&self) -> bool {
        self.shared.state.borrow().starter.is_some()
    }
}

impl<V: AnimatedView + 'static> PropertyAnimator for FallbackAnimator<V> {
    fn set_duration(&mut self, duration_ms: i64) -> Result<()> {
        self.shared.state.borrow_mut().config.set_duration(duration_ms)
    }

    fn duration(&self) -> u64 {
        let config = self.config();
        config.duration_or(self.shared.timers.default_duration_ms())
    }

    fn set_start_delay(&mut self, delay_ms: i64) -> Result<()> {
        self.shared.state.borrow_mut().config.set_start_delay(delay_ms)
    }

    fn start_delay(&self) -> u64 {
        self.config().start_delay()
    }

    fn set_interpolator(&mut self, easing: Easing) {
        self.shared.state.borrow_mut().config.set_interpolator(easing);
    }

    fn set_listener(&mut self, listener: Option<LifecycleCallback>) {
        self.shared.state.borrow_mut().listener = listener;
    }

    fn animate_to(&mut self, property: Property, value: f32) {
        self.shared.animate_property(property, value);
    }

    fn animate_by(&mut self, property: Property, by: f32) {
        self.shared.animate_property_relative(property, by);
    }

    fn start(&mut self) {
        self.shared.disarm();
        self.shared.start_animation();
    }

    fn cancel(&mut self) {
        self.shared.cancel();
    }
}

impl<V: AnimatedView + 'static> Drop for FallbackAnimator<V> {
    fn drop(&mut self) {
        self.shared.cancel();
    }
}
