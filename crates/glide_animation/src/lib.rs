//! Glide Animation System
//!
//! Batched animation of several view properties through one fluent call chain.
//!
//! # Features
//!
//! - **Coalescing**: Property requests issued before the next UI tick share one timer
//! - **Supersession**: A new request for a property cancels only that property in flight
//! - **Frame Application**: Interpolated values are written once per tick with minimal invalidation
//! - **Lifecycle Forwarding**: Start, cancel, repeat and end events reach one optional listener
//! - **Backends**: A host-native animator can replace the built-in implementation at construction
//! - **Reference Collaborators**: A deterministic progress timer engine and frame queue
//!
//! # Example
//!
//! ```ignore
//! use glide_animation::{FrameQueue, Timers, ViewPropertyAnimator};
//!
//! let mut animator = ViewPropertyAnimator::fallback(view, timers.clone(), queue.clone());
//! animator.set_duration(250)?.x(100.0).alpha(0.0);
//!
//! queue.run_pending(); // both properties start on one timer
//! timers.tick(16.0);
//! ```

pub mod animator;
pub mod apply;
pub mod bundle;
pub mod config;
pub mod easing;
pub mod error;
pub mod fallback;
pub mod looper;
pub mod pending;
pub mod timer;

pub use animator::{LifecycleCallback, PropertyAnimator, ViewPropertyAnimator};
pub use bundle::{ActiveAnimations, PropertyBundle};
pub use config::AnimatorConfig;
pub use easing::Easing;
pub use error::{AnimatorError, Result};
pub use fallback::FallbackAnimator;
pub use looper::{FrameQueue, Looper, Task, TaskId};
pub use pending::{PendingAnimations, PropertyValues};
pub use timer::{TimerEngine, TimerEvent, TimerId, TimerListener, Timers, DEFAULT_DURATION_MS};

pub use glide_core::{AnimatedView, Property, PropertySet, ViewProperties};
