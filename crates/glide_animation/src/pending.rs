//! Pending property requests
//!
//! Requests issued between two flushes accumulate here in call order until
//! the coalescer drains them into a single timer.

use glide_core::{Property, PropertySet};

/// One property's planned change within a batch
///
/// Fixed once created; a later request for the property makes a new record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertyValues {
    property: Property,
    from: f32,
    delta: f32,
}

impl PropertyValues {
    pub fn new(property: Property, from: f32, delta: f32) -> Self {
        Self {
            property,
            from,
            delta,
        }
    }

    pub fn property(&self) -> Property {
        self.property
    }

    /// Value when the request was made
    pub fn from(&self) -> f32 {
        self.from
    }

    /// Total change applied over the animation
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Animated value at progress `fraction`
    #[inline]
    pub fn value_at(&self, fraction: f32) -> f32 {
        self.from + fraction * self.delta
    }
}

/// The batch of requests not yet bound to a timer
#[derive(Debug, Default)]
pub struct PendingAnimations {
    values: Vec<PropertyValues>,
}

impl PendingAnimations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request; duplicates are kept and the last write wins per frame
    pub fn enqueue(&mut self, values: PropertyValues) {
        self.values.push(values);
    }

    /// Take the whole batch, leaving the queue empty
    pub fn drain_all(&mut self) -> Vec<PropertyValues> {
        std::mem::take(&mut self.values)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Union of the properties in the batch
    pub fn properties(&self) -> PropertySet {
        self.values.iter().map(PropertyValues::property).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyValues> {
        self.values.iter()
    }
}
