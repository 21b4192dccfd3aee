//! Glide Core
//!
//! Shared vocabulary for view property animation.
//!
//! # Features
//!
//! - **Property Registry**: The ten animatable view properties and bit-flag sets of them
//! - **Geometry Classification**: Which properties move or reshape the view and which only blend
//! - **View Capability**: The [`AnimatedView`] trait animators read from and write to
//! - **Reference View**: [`ViewProperties`], an in-memory view that stores its transform directly

pub mod property;
pub mod view;

pub use property::{Property, PropertySet};
pub use view::{AnimatedView, ViewProperties};
