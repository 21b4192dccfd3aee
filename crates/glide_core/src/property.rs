//! Animatable view properties
//!
//! Every property an animator can drive is a [`Property`]. Sets of properties
//! are [`PropertySet`] bit flags so that a batch or a running animation can
//! record which properties it owns and test for overlap cheaply.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// A set of animatable properties
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PropertySet: u16 {
        const TRANSLATION_X = 1 << 0;
        const TRANSLATION_Y = 1 << 1;
        const SCALE_X = 1 << 2;
        const SCALE_Y = 1 << 3;
        const ROTATION = 1 << 4;
        const ROTATION_X = 1 << 5;
        const ROTATION_Y = 1 << 6;
        const X = 1 << 7;
        const Y = 1 << 8;
        const ALPHA = 1 << 9;

        /// Properties that change the shape or position of the view
        const GEOMETRY = Self::TRANSLATION_X.bits()
            | Self::TRANSLATION_Y.bits()
            | Self::SCALE_X.bits()
            | Self::SCALE_Y.bits()
            | Self::ROTATION.bits()
            | Self::ROTATION_X.bits()
            | Self::ROTATION_Y.bits()
            | Self::X.bits()
            | Self::Y.bits();
    }
}

impl PropertySet {
    /// Union of two sets
    pub fn combine(self, other: PropertySet) -> PropertySet {
        self | other
    }

    /// Check whether `property` is a member of this set
    pub fn contains_property(self, property: Property) -> bool {
        self.contains(property.flag())
    }

    /// Check whether any member of this set affects geometry
    pub fn affects_geometry(self) -> bool {
        self.intersects(PropertySet::GEOMETRY)
    }

    /// Iterate the members of this set in declaration order
    pub fn properties(self) -> impl Iterator<Item = Property> {
        Property::ALL
            .into_iter()
            .filter(move |p| self.contains(p.flag()))
    }
}

impl From<Property> for PropertySet {
    fn from(property: Property) -> Self {
        property.flag()
    }
}

impl FromIterator<Property> for PropertySet {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        iter.into_iter()
            .fold(PropertySet::empty(), |set, p| set | p.flag())
    }
}

/// A single animatable view property
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// Horizontal offset from the layout position
    TranslationX,
    /// Vertical offset from the layout position
    TranslationY,
    ScaleX,
    ScaleY,
    /// Rotation around the pivot in degrees
    Rotation,
    RotationX,
    RotationY,
    /// Absolute horizontal position (layout left + translation)
    X,
    /// Absolute vertical position (layout top + translation)
    Y,
    /// Opacity in `0.0..=1.0`
    Alpha,
}

impl Property {
    /// All properties in declaration order
    pub const ALL: [Property; 10] = [
        Property::TranslationX,
        Property::TranslationY,
        Property::ScaleX,
        Property::ScaleY,
        Property::Rotation,
        Property::RotationX,
        Property::RotationY,
        Property::X,
        Property::Y,
        Property::Alpha,
    ];

    /// The single-member set for this property
    pub fn flag(self) -> PropertySet {
        match self {
            Property::TranslationX => PropertySet::TRANSLATION_X,
            Property::TranslationY => PropertySet::TRANSLATION_Y,
            Property::ScaleX => PropertySet::SCALE_X,
            Property::ScaleY => PropertySet::SCALE_Y,
            Property::Rotation => PropertySet::ROTATION,
            Property::RotationX => PropertySet::ROTATION_X,
            Property::RotationY => PropertySet::ROTATION_Y,
            Property::X => PropertySet::X,
            Property::Y => PropertySet::Y,
            Property::Alpha => PropertySet::ALPHA,
        }
    }

    /// Whether changing this property moves or reshapes the view
    ///
    /// Everything except alpha does. Geometry changes need an extra
    /// invalidation before new values are written.
    pub fn is_geometry_affecting(self) -> bool {
        PropertySet::GEOMETRY.contains(self.flag())
    }
}
