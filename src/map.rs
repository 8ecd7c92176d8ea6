use crate::config::PopupOptions;
use crate::types::GeoPoint;

/// What the tracker needs from a map once it has been created.
///
/// Markers are fire-and-forget: nothing is returned because they are never
/// moved or removed. Click events are wired when the map is constructed, see
/// [`crate::leaflet::LeafletMap::initialize`].
pub trait MapAdapter {
    /// Places a marker and opens its popup right away.
    fn add_marker(&self, at: GeoPoint, popup: &PopupOptions, content: &str);

    /// Animated move of the view to `at`.
    fn pan_to(&self, at: GeoPoint, zoom: u8);
}
