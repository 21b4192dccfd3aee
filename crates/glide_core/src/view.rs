//! View capability used by animators
//!
//! Animators never reach into a view's internals. They read and write
//! properties through [`AnimatedView`] and ask the view to invalidate its
//! rendered output after a frame's values change.

use crate::property::Property;

/// A view whose transform and opacity can be animated
pub trait AnimatedView {
    /// Current value of `property`
    fn property(&self, property: Property) -> f32;

    /// Store a new value for `property`
    ///
    /// This must not schedule a redraw by itself; animators call
    /// [`invalidate`](Self::invalidate) once per frame instead.
    fn set_property(&mut self, property: Property, value: f32);

    /// Mark the view's rendered output as stale
    fn invalidate(&mut self);
}

/// An in-memory view that stores its transform directly
///
/// Absolute `X`/`Y` are derived from the layout origin plus translation,
/// the same relationship a layout-driven view has: reading `X` returns
/// `left + translation_x`, writing `X` stores `value - left`.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewProperties {
    left: f32,
    top: f32,
    translation_x: f32,
    translation_y: f32,
    scale_x: f32,
    scale_y: f32,
    rotation: f32,
    rotation_x: f32,
    rotation_y: f32,
    alpha: f32,
    invalidations: u64,
}

impl ViewProperties {
    /// Create a view laid out at the origin with an identity transform
    pub fn new() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            translation_x: 0.0,
            translation_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            rotation_x: 0.0,
            rotation_y: 0.0,
            alpha: 1.0,
            invalidations: 0,
        }
    }

    /// Create a view laid out at `(left, top)`
    pub fn at(left: f32, top: f32) -> Self {
        Self {
            left,
            top,
            ..Self::new()
        }
    }

    /// Builder-style property assignment (does not count as an invalidation)
    pub fn with(mut self, property: Property, value: f32) -> Self {
        self.set_property(property, value);
        self
    }

    /// Layout origin `(left, top)`
    pub fn layout_origin(&self) -> (f32, f32) {
        (self.left, self.top)
    }

    /// Move the layout origin, keeping translation unchanged
    pub fn set_layout_origin(&mut self, left: f32, top: f32) {
        self.left = left;
        self.top = top;
    }

    /// Number of times [`AnimatedView::invalidate`] has been called
    pub fn invalidation_count(&self) -> u64 {
        self.invalidations
    }
}

impl Default for ViewProperties {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimatedView for ViewProperties {
    fn property(&self, property: Property) -> f32 {
        match property {
            Property::TranslationX => self.translation_x,
            Property::TranslationY => self.translation_y,
            Property::ScaleX => self.scale_x,
            Property::ScaleY => self.scale_y,
            Property::Rotation => self.rotation,
            Property::RotationX => self.rotation_x,
            Property::RotationY => self.rotation_y,
            Property::X => self.left + self.translation_x,
            Property::Y => self.top + self.translation_y,
            Property::Alpha => self.alpha,
        }
    }

    fn set_property(&mut self, property: Property, value: f32) {
        match property {
            Property::TranslationX => self.translation_x = value,
            Property::TranslationY => self.translation_y = value,
            Property::ScaleX => self.scale_x = value,
            Property::ScaleY => self.scale_y = value,
            Property::Rotation => self.rotation = value,
            Property::RotationX => self.rotation_x = value,
            Property::RotationY => self.rotation_y = value,
            Property::X => self.translation_x = value - self.left,
            Property::Y => self.translation_y = value - self.top,
            Property::Alpha => self.alpha = value,
        }
    }

    fn invalidate(&mut self) {
        self.invalidations += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_defaults() {
        let view = ViewProperties::new();
        assert_eq!(view.property(Property::ScaleX), 1.0);
        assert_eq!(view.property(Property::ScaleY), 1.0);
        assert_eq!(view.property(Property::Alpha), 1.0);
        assert_eq!(view.property(Property::Rotation), 0.0);
        assert_eq!(view.invalidation_count(), 0);
    }

    #[test]
    fn test_absolute_position_tracks_translation() {
        let mut view = ViewProperties::at(40.0, 10.0);
        assert_eq!(view.property(Property::X), 40.0);

        view.set_property(Property::X, 55.0);
        assert_eq!(view.property(Property::TranslationX), 15.0);
        assert_eq!(view.property(Property::X), 55.0);

        view.set_property(Property::TranslationY, -4.0);
        assert_eq!(view.property(Property::Y), 6.0);
    }

    #[test]
    fn test_layout_move_keeps_translation() {
        let mut view = ViewProperties::at(0.0, 0.0).with(Property::TranslationX, 5.0);
        view.set_layout_origin(100.0, 0.0);
        assert_eq!(view.property(Property::X), 105.0);
        assert_eq!(view.layout_origin(), (100.0, 0.0));
    }

    #[test]
    fn test_invalidate_counts() {
        let mut view = ViewProperties::new();
        view.set_property(Property::Alpha, 0.5);
        assert_eq!(view.invalidation_count(), 0);
        view.invalidate();
        view.invalidate();
        assert_eq!(view.invalidation_count(), 2);
    }
}
