//! Bindings to the subset of Leaflet's global `L` namespace the tracker uses.
//!
//! Leaflet itself is loaded by `index.html`; nothing here works before that
//! script has run.

use serde::Serialize;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::{MapConfig, PopupOptions};
use crate::error::{MaptyError, Result};
use crate::map::MapAdapter;
use crate::types::GeoPoint;

#[wasm_bindgen]
extern "C" {
    type Map;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn create_map(container: &web_sys::HtmlElement) -> std::result::Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &Map, center: &JsValue, zoom: f64) -> Map;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view_with_options(this: &Map, center: &JsValue, zoom: f64, options: &JsValue) -> Map;

    #[wasm_bindgen(method)]
    fn on(this: &Map, event: &str, handler: &js_sys::Function) -> Map;

    type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url_template: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &TileLayer, map: &Map) -> TileLayer;

    type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn marker(at: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Marker, map: &Map) -> Marker;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Marker, popup: &Popup) -> Marker;

    #[wasm_bindgen(method, js_name = setPopupContent)]
    fn set_popup_content(this: &Marker, content: &str) -> Marker;

    #[wasm_bindgen(method, js_name = openPopup)]
    fn open_popup(this: &Marker) -> Marker;

    type Popup;

    #[wasm_bindgen(js_namespace = L, js_name = popup)]
    fn popup(options: &JsValue) -> Popup;

    type LeafletMouseEvent;

    #[wasm_bindgen(method, getter)]
    fn latlng(this: &LeafletMouseEvent) -> LatLng;

    type LatLng;

    #[wasm_bindgen(method, getter)]
    fn lat(this: &LatLng) -> f64;

    #[wasm_bindgen(method, getter)]
    fn lng(this: &LatLng) -> f64;
}

#[derive(Serialize)]
struct TileLayerOptions<'a> {
    attribution: &'a str,
}

#[derive(Serialize)]
struct PanOptions {
    animate: bool,
    pan: PanDuration,
}

#[derive(Serialize)]
struct PanDuration {
    duration: f64,
}

fn lat_lng(at: GeoPoint) -> JsValue {
    js_sys::Array::of2(&JsValue::from_f64(at.lat), &JsValue::from_f64(at.lng)).into()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| MaptyError::Map(e.to_string()))
}

/// A Leaflet map with an OpenStreetMap-style tile layer and a click handler.
pub struct LeafletMap {
    map: Map,
    // Leaflet holds a reference to this; it must live as long as the map.
    _on_click: Closure<dyn FnMut(LeafletMouseEvent)>,
}

impl LeafletMap {
    pub fn initialize(
        container: &web_sys::HtmlElement,
        center: GeoPoint,
        config: &MapConfig,
        mut on_click: impl FnMut(GeoPoint) + 'static,
    ) -> Result<Self> {
        let map = create_map(container).map_err(|e| {
            MaptyError::Map(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
        })?;
        map.set_view(&lat_lng(center), f64::from(config.zoom));

        let options = to_js(&TileLayerOptions {
            attribution: &config.attribution,
        })?;
        tile_layer(&config.tile_url, &options).add_to(&map);

        let handler = Closure::<dyn FnMut(LeafletMouseEvent)>::new(move |event: LeafletMouseEvent| {
            let at = event.latlng();
            on_click(GeoPoint::new(at.lat(), at.lng()));
        });
        map.on("click", handler.as_ref().unchecked_ref());

        debug!(lat = center.lat, lng = center.lng, zoom = config.zoom, "map initialized");
        Ok(Self {
            map,
            _on_click: handler,
        })
    }
}

impl MapAdapter for LeafletMap {
    fn add_marker(&self, at: GeoPoint, popup_options: &PopupOptions, content: &str) {
        let options = match to_js(popup_options) {
            Ok(options) => options,
            Err(e) => {
                warn!(error = %e, "falling back to default popup options");
                JsValue::UNDEFINED
            }
        };

        marker(&lat_lng(at))
            .add_to(&self.map)
            .bind_popup(&popup(&options))
            .set_popup_content(content)
            .open_popup();
    }

    fn pan_to(&self, at: GeoPoint, zoom: u8) {
        let options = PanOptions {
            animate: true,
            pan: PanDuration { duration: 1.0 },
        };
        match to_js(&options) {
            Ok(options) => {
                self.map.set_view_with_options(&lat_lng(at), f64::from(zoom), &options);
            }
            Err(e) => {
                warn!(error = %e, "panning without animation");
                self.map.set_view(&lat_lng(at), f64::from(zoom));
            }
        }
    }
}
