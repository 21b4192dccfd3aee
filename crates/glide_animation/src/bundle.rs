//! Running animations and the properties they own
//!
//! Each live timer drives one [`PropertyBundle`]. [`ActiveAnimations`] maps
//! timers to bundles and keeps the ownership invariant: at any instant, at
//! most one bundle claims a given property.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use glide_core::{Property, PropertySet};

use crate::pending::PropertyValues;
use crate::timer::TimerId;

/// The properties driven together by one timer
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyBundle {
    mask: PropertySet,
    values: SmallVec<[PropertyValues; 4]>,
}

impl PropertyBundle {
    /// Bundle a drained batch, deriving the mask from its entries
    pub fn new(values: impl IntoIterator<Item = PropertyValues>) -> Self {
        let values: SmallVec<[PropertyValues; 4]> = values.into_iter().collect();
        let mask = values.iter().map(PropertyValues::property).collect();
        Self { mask, values }
    }

    pub fn mask(&self) -> PropertySet {
        self.mask
    }

    pub fn values(&self) -> &[PropertyValues] {
        &self.values
    }

    /// Stop driving `property`
    ///
    /// Returns true if the bundle owned it.
    pub fn cancel(&mut self, property: Property) -> bool {
        if !self.mask.contains_property(property) {
            return false;
        }
        self.values.retain(|v| v.property() != property);
        self.mask.remove(property.flag());
        true
    }

    /// A bundle with no properties must not keep ticking
    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }
}

/// Live timers and the bundles they drive
#[derive(Debug, Default)]
pub struct ActiveAnimations {
    bundles: FxHashMap<TimerId, PropertyBundle>,
}

impl ActiveAnimations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, timer: TimerId, bundle: PropertyBundle) {
        self.bundles.insert(timer, bundle);
    }

    pub fn remove(&mut self, timer: TimerId) -> Option<PropertyBundle> {
        self.bundles.remove(&timer)
    }

    pub fn get(&self, timer: TimerId) -> Option<&PropertyBundle> {
        self.bundles.get(&timer)
    }

    /// Take `property` away from whichever bundle owns it
    ///
    /// Returns the owning timer if that left its bundle empty; the caller
    /// must cancel it. Only one bundle can own a property, so the scan stops
    /// at the first match.
    pub fn cancel_property(&mut self, property: Property) -> Option<TimerId> {
        for (timer, bundle) in self.bundles.iter_mut() {
            if bundle.cancel(property) {
                tracing::debug!("ActiveAnimations: {:?} superseded on {:?}", property, timer);
                return bundle.is_empty().then_some(*timer);
            }
        }
        None
    }

    /// Timers currently registered
    pub fn timers(&self) -> Vec<TimerId> {
        self.bundles.keys().copied().collect()
    }

    /// Union of every live bundle's properties
    pub fn animated_properties(&self) -> PropertySet {
        self.bundles
            .values()
            .fold(PropertySet::empty(), |set, b| set | b.mask())
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}
