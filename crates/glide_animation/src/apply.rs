//! Per-frame value application
//!
//! On every progress update the bundle's values are interpolated and written
//! to the view. A bundle that touches geometry invalidates once before the
//! writes; every frame invalidates once after them.

use glide_core::AnimatedView;

use crate::bundle::PropertyBundle;

/// Write `bundle` at progress `fraction` into `view`
pub fn apply_frame<V>(view: &mut V, bundle: &PropertyBundle, fraction: f32)
where
    V: AnimatedView + ?Sized,
{
    if bundle.mask().affects_geometry() {
        view.invalidate();
    }

    for values in bundle.values() {
        view.set_property(values.property(), values.value_at(fraction));
    }

    view.invalidate();
}
