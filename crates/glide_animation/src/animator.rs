//! Fluent view property animator
//!
//! [`ViewPropertyAnimator`] is the API callers use: one chained call per
//! property, in absolute (`x`) and relative (`x_by`) forms. The work is done
//! by a [`PropertyAnimator`] backend chosen once at construction, either the
//! built-in [`FallbackAnimator`] or a host-native implementation.
//!
//! ```ignore
//! animator
//!     .set_duration(250)?
//!     .x(100.0)
//!     .rotation_by(90.0)
//!     .alpha(0.0);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use glide_core::{AnimatedView, Property};

use crate::config::AnimatorConfig;
use crate::easing::Easing;
use crate::error::Result;
use crate::fallback::FallbackAnimator;
use crate::looper::Looper;
use crate::timer::{TimerEngine, TimerEvent, TimerId};

/// Lifecycle listener shared by every timer an animator creates
pub type LifecycleCallback = Rc<dyn Fn(TimerId, TimerEvent)>;

/// The capability a view animator backend provides
pub trait PropertyAnimator {
    /// Set the duration of animations started from now on
    ///
    /// Fails without changing anything if `duration_ms` is negative.
    fn set_duration(&mut self, duration_ms: i64) -> Result<()>;

    /// Configured duration, or the timer default if never set
    fn duration(&self) -> u64;

    /// Fails without changing anything if `delay_ms` is negative.
    fn set_start_delay(&mut self, delay_ms: i64) -> Result<()>;

    /// Configured start delay, or 0 if never set
    fn start_delay(&self) -> u64;

    fn set_interpolator(&mut self, easing: Easing);

    /// Replace the lifecycle listener (`None` removes it)
    fn set_listener(&mut self, listener: Option<LifecycleCallback>);

    /// Animate `property` from its current value to `value`
    fn animate_to(&mut self, property: Property, value: f32);

    /// Animate `property` from its current value by `by`
    fn animate_by(&mut self, property: Property, by: f32);

    /// Start everything requested so far without waiting for the next tick
    fn start(&mut self);

    /// Drop pending requests and cancel every running animation
    fn cancel(&mut self);
}

impl<A: PropertyAnimator + ?Sized> PropertyAnimator for Box<A> {
    fn set_duration(&mut self, duration_ms: i64) -> Result<()> {
        (**self).set_duration(duration_ms)
    }

    fn duration(&self) -> u64 {
        (**self).duration()
    }

    fn set_start_delay(&mut self, delay_ms: i64) -> Result<()> {
        (**self).set_start_delay(delay_ms)
    }

    fn start_delay(&self) -> u64 {
        (**self).start_delay()
    }

    fn set_interpolator(&mut self, easing: Easing) {
        (**self).set_interpolator(easing)
    }

    fn set_listener(&mut self, listener: Option<LifecycleCallback>) {
        (**self).set_listener(listener)
    }

    fn animate_to(&mut self, property: Property, value: f32) {
        (**self).animate_to(property, value)
    }

    fn animate_by(&mut self, property: Property, by: f32) {
        (**self).animate_by(property, by)
    }

    fn start(&mut self) {
        (**self).start()
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }
}

macro_rules! property_methods {
    ($($(#[$doc:meta])* $property:ident => $to:ident, $by:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $to(&mut self, value: f32) -> &mut Self {
                self.backend.animate_to(Property::$property, value);
                self
            }

            $(#[$doc])*
            #[doc = ""]
            #[doc = "Relative form: the target is the current value plus `value`."]
            pub fn $by(&mut self, value: f32) -> &mut Self {
                self.backend.animate_by(Property::$property, value);
                self
            }
        )*
    };
}

/// Chained multi-property animation for a single view
pub struct ViewPropertyAnimator<A: PropertyAnimator = Box<dyn PropertyAnimator>> {
    backend: A,
}

impl<V: AnimatedView + 'static> ViewPropertyAnimator<FallbackAnimator<V>> {
    /// Animate `view` with the built-in backend
    pub fn fallback(
        view: Rc<RefCell<V>>,
        timers: impl TimerEngine + 'static,
        looper: impl Looper + 'static,
    ) -> Self {
        Self::new(FallbackAnimator::new(view, timers, looper))
    }

    /// Animate `view` with the built-in backend seeded from `config`
    pub fn fallback_with_config(
        view: Rc<RefCell<V>>,
        timers: impl TimerEngine + 'static,
        looper: impl Looper + 'static,
        config: AnimatorConfig,
    ) -> Self {
        Self::new(FallbackAnimator::with_config(view, timers, looper, config))
    }
}

impl ViewPropertyAnimator {
    /// Pick the native backend when the host has one, else build the fallback
    ///
    /// The choice is made here, once, and never revisited.
    pub fn select<F>(native: Option<Box<dyn PropertyAnimator>>, fallback: F) -> Self
    where
        F: FnOnce() -> Box<dyn PropertyAnimator>,
    {
        match native {
            Some(backend) => {
                tracing::debug!("ViewPropertyAnimator: using native backend");
                Self::new(backend)
            }
            None => {
                tracing::debug!("ViewPropertyAnimator: using fallback backend");
                Self::new(fallback())
            }
        }
    }
}

impl<A: PropertyAnimator> ViewPropertyAnimator<A> {
    pub fn new(backend: A) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &A {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut A {
        &mut self.backend
    }

    pub fn into_backend(self) -> A {
        self.backend
    }

    /// Set the duration in milliseconds; negative values are rejected
    pub fn set_duration(&mut self, duration_ms: i64) -> Result<&mut Self> {
        self.backend.set_duration(duration_ms)?;
        Ok(self)
    }

    pub fn duration(&self) -> u64 {
        self.backend.duration()
    }

    /// Set the start delay in milliseconds; negative values are rejected
    pub fn set_start_delay(&mut self, delay_ms: i64) -> Result<&mut Self> {
        self.backend.set_start_delay(delay_ms)?;
        Ok(self)
    }

    pub fn start_delay(&self) -> u64 {
        self.backend.start_delay()
    }

    pub fn set_interpolator(&mut self, easing: Easing) -> &mut Self {
        self.backend.set_interpolator(easing);
        self
    }

    pub fn set_listener(&mut self, listener: Option<LifecycleCallback>) -> &mut Self {
        self.backend.set_listener(listener);
        self
    }

    /// Start requested animations immediately instead of on the next tick
    pub fn start(&mut self) {
        self.backend.start();
    }

    pub fn cancel(&mut self) {
        self.backend.cancel();
    }

    property_methods! {
        /// Animate the absolute horizontal position
        X => x, x_by;
        /// Animate the absolute vertical position
        Y => y, y_by;
        /// Animate rotation around the pivot, in degrees
        Rotation => rotation, rotation_by;
        /// Animate rotation around the horizontal axis, in degrees
        RotationX => rotation_x, rotation_x_by;
        /// Animate rotation around the vertical axis, in degrees
        RotationY => rotation_y, rotation_y_by;
        /// Animate the horizontal offset from the layout position
        TranslationX => translation_x, translation_x_by;
        /// Animate the vertical offset from the layout position
        TranslationY => translation_y, translation_y_by;
        /// Animate horizontal scale
        ScaleX => scale_x, scale_x_by;
        /// Animate vertical scale
        ScaleY => scale_y, scale_y_by;
        /// Animate opacity
        Alpha => alpha, alpha_by;
    }
}
