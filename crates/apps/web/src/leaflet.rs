use foundation::LatLon;
use ui::LocationError;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

// Leaflet (global `L`) and geolocation glue. The map instance lives in the
// module scope of this snippet; one map per page.
#[wasm_bindgen(inline_js = "
let map = null;
let parkingLayer = null;
let originLayer = null;
let markerClick = null;

export function parking_map_init(elementId, lat, lon, zoom, onMoveEnd, onZoomEnd, onMarkerClick) {
    map = L.map(elementId).setView([lat, lon], zoom);
    L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
        attribution: '&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors',
        maxZoom: 19,
    }).addTo(map);
    parkingLayer = L.layerGroup().addTo(map);
    originLayer = L.layerGroup().addTo(map);
    markerClick = onMarkerClick;
    map.on('moveend', () => {
        const c = map.getCenter();
        onMoveEnd(c.lat, c.lng);
    });
    map.on('zoomend', () => onZoomEnd(map.getZoom()));
}

export function parking_map_set_view(lat, lon, zoom) {
    if (map) map.setView([lat, lon], zoom);
}

export function parking_map_set_markers(json) {
    if (!map) return;
    const data = JSON.parse(json);
    parkingLayer.clearLayers();
    originLayer.clearLayers();
    for (const m of data.parking) {
        L.marker([m.lat, m.lon])
            .bindTooltip(m.tooltip)
            .on('click', () => markerClick && markerClick(m.id))
            .addTo(parkingLayer);
    }
    if (data.origin) {
        L.circleMarker([data.origin.lat, data.origin.lon], { radius: 10, color: '#d9534f' })
            .bindTooltip(data.origin.label)
            .addTo(originLayer);
    }
}

export function parking_locate() {
    return new Promise((resolve, reject) => {
        if (!navigator.geolocation) {
            reject({ code: 0 });
            return;
        }
        navigator.geolocation.getCurrentPosition(
            (pos) => resolve({ lat: pos.coords.latitude, lon: pos.coords.longitude }),
            (err) => reject({ code: err.code }),
            { enableHighAccuracy: true, timeout: 10000 },
        );
    });
}
")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn parking_map_init(
        element_id: &str,
        lat: f64,
        lon: f64,
        zoom: f64,
        on_move_end: &js_sys::Function,
        on_zoom_end: &js_sys::Function,
        on_marker_click: &js_sys::Function,
    ) -> Result<(), JsValue>;

    fn parking_map_set_view(lat: f64, lon: f64, zoom: f64);

    fn parking_map_set_markers(json: &str);

    fn parking_locate() -> js_sys::Promise;
}

/// Creates the map inside `element_id`. The callbacks live as long as the page.
pub fn init_map(
    element_id: &str,
    center: LatLon,
    zoom: f64,
    on_move_end: impl FnMut(f64, f64) + 'static,
    on_zoom_end: impl FnMut(f64) + 'static,
    on_marker_click: impl FnMut(String) + 'static,
) -> Result<(), JsValue> {
    let move_end = Closure::wrap(Box::new(on_move_end) as Box<dyn FnMut(f64, f64)>);
    let zoom_end = Closure::wrap(Box::new(on_zoom_end) as Box<dyn FnMut(f64)>);
    let marker_click = Closure::wrap(Box::new(on_marker_click) as Box<dyn FnMut(String)>);
    parking_map_init(
        element_id,
        center.lat,
        center.lon,
        zoom,
        move_end.as_ref().unchecked_ref(),
        zoom_end.as_ref().unchecked_ref(),
        marker_click.as_ref().unchecked_ref(),
    )?;
    move_end.forget();
    zoom_end.forget();
    marker_click.forget();
    Ok(())
}

pub fn set_view(center: LatLon, zoom: f64) {
    parking_map_set_view(center.lat, center.lon, zoom);
}

pub fn set_markers(json: &str) {
    parking_map_set_markers(json);
}

fn number_field(value: &JsValue, key: &str) -> Option<f64> {
    js_sys::Reflect::get(value, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
}

/// One-shot browser geolocation lookup.
pub async fn current_position() -> Result<LatLon, LocationError> {
    match JsFuture::from(parking_locate()).await {
        Ok(value) => match (number_field(&value, "lat"), number_field(&value, "lon")) {
            (Some(lat), Some(lon)) => Ok(LatLon::new(lat, lon)),
            _ => Err(LocationError::Unavailable),
        },
        Err(err) => match number_field(&err, "code") {
            Some(code) if code == 0.0 => Err(LocationError::Unsupported),
            Some(code) => Err(LocationError::from_code(code as u16)),
            None => Err(LocationError::Unavailable),
        },
    }
}
