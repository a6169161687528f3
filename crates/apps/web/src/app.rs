use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use client::{ApiClient, GlooTransport};
use foundation::LatLon;
use protocol::ParkingId;
use scene::MapView;
use ui::{
    AppContext, DetailsPanel, DetailsState, SearchHeader, SearchRequest, load_details,
    run_search,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::leaflet;
use crate::render::{details_html, markers_json, modal_html};

struct App {
    ctx: AppContext,
    client: ApiClient<GlooTransport>,
    map: RefCell<MapView>,
    header: RefCell<SearchHeader>,
    details: RefCell<DetailsPanel>,
}

thread_local! {
    static APP: OnceCell<Rc<App>> = const { OnceCell::new() };
}

fn app() -> Option<Rc<App>> {
    APP.with(|cell| cell.get().cloned())
}

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn backend_base_url() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };
    js_sys::Reflect::get(&window, &JsValue::from_str("__parkingApiBase"))
        .ok()
        .and_then(|v| v.as_string())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn element(id: &str) -> Option<web_sys::Element> {
    web_sys::window()?.document()?.get_element_by_id(id)
}

fn set_hidden(id: &str, hidden: bool) {
    if let Some(el) = element(id) {
        let _ = el.class_list().toggle_with_force("d-none", hidden);
    }
}

fn render_header(app: &App) {
    let header = app.header.borrow();
    if let Some(button) = element("search-button") {
        button.set_text_content(Some(header.search_button().label()));
        if header.is_idle() {
            let _ = button.remove_attribute("disabled");
        } else {
            let _ = button.set_attribute("disabled", "");
        }
    }
    if let Some(button) = element("locate-button") {
        button.set_text_content(Some(header.locate_label()));
    }
    set_hidden("search-area-button", !header.shows_search_area());
}

fn render_modal(app: &App) {
    let modal = app.ctx.modal.get();
    if let Some(el) = element("modal") {
        if modal.show {
            el.set_inner_html(&modal_html(&modal));
        }
        let _ = el.class_list().toggle_with_force("show", modal.show);
    }
    set_hidden("modal", !modal.show);
}

fn render_details(app: &App) {
    let panel = app.details.borrow();
    let Some(el) = element("details") else {
        return;
    };
    match panel.state() {
        DetailsState::Shown { details, .. } => {
            el.set_inner_html(&details_html(details, panel.photo_index()));
            set_hidden("details", false);
        }
        DetailsState::Hidden | DetailsState::Loading(_) => {
            el.set_inner_html("");
            set_hidden("details", true);
        }
    }
}

fn render_map(app: &App, data: &protocol::FeatureCollection) {
    let change = app.map.borrow_mut().sync_from(data);
    if let Some(change) = change {
        leaflet::set_view(change.center, change.zoom);
    }
    let map = app.map.borrow();
    leaflet::set_markers(&markers_json(map.parking_markers(), map.origin_marker()));
}

fn spawn_search(app: Rc<App>, request: SearchRequest) {
    spawn_local(async move {
        run_search(&app.header, &app.client, request).await;
        render_header(&app);
    });
}

// Store listeners run while the writer may still hold a borrow, so all of
// their work is deferred.
fn subscribe(app: &Rc<App>) {
    let weak = Rc::downgrade(app);
    app.ctx.map_data.subscribe(move |data| {
        let (weak, data) = (weak.clone(), data.clone());
        spawn_local(async move {
            if let Some(app) = weak.upgrade() {
                render_map(&app, &data);
            }
        });
    });

    let weak = Rc::downgrade(app);
    app.ctx.selection.subscribe(move |selected| {
        let (weak, selected) = (weak.clone(), selected.clone());
        spawn_local(async move {
            let Some(app) = weak.upgrade() else {
                return;
            };
            let ticket = app.details.borrow_mut().on_selection_changed(selected);
            render_details(&app);
            if let Some(ticket) = ticket {
                load_details(&app.details, &app.client, ticket).await;
                render_details(&app);
            }
        });
    });

    app.ctx.loading.subscribe(|loading| {
        let loading = *loading;
        spawn_local(async move {
            set_hidden("loading-overlay", !loading);
        });
    });

    let weak = Rc::downgrade(app);
    app.ctx.modal.subscribe(move |_| {
        let weak = weak.clone();
        spawn_local(async move {
            if let Some(app) = weak.upgrade() {
                render_modal(&app);
            }
        });
    });
}

fn init_map(app: &Rc<App>) -> Result<(), JsValue> {
    let (center, zoom) = {
        let map = app.map.borrow();
        (map.center(), map.zoom())
    };

    let on_move = Rc::downgrade(app);
    let on_zoom = Rc::downgrade(app);
    let on_click = Rc::downgrade(app);
    leaflet::init_map(
        "map",
        center,
        zoom,
        move |lat, lon| {
            let Some(app) = on_move.upgrade() else {
                return;
            };
            let moved = app.map.borrow_mut().on_move_end(LatLon::new(lat, lon));
            if let Some(center) = moved {
                app.header.borrow_mut().on_map_moved(center);
                render_header(&app);
            }
        },
        move |zoom| {
            if let Some(app) = on_zoom.upgrade() {
                app.map.borrow_mut().on_zoom_end(zoom);
            }
        },
        move |id| {
            if let Some(app) = on_click.upgrade() {
                app.map.borrow().select_marker(&ParkingId::new(id));
            }
        },
    )
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if app().is_some() {
        return Ok(());
    }

    let base = backend_base_url();
    log(&format!("parking api base: {:?}", base));

    let ctx = AppContext::new();
    let app = Rc::new(App {
        client: ApiClient::new(&base, GlooTransport),
        map: RefCell::new(MapView::new(ctx.selection.clone())),
        header: RefCell::new(SearchHeader::new(ctx.clone())),
        details: RefCell::new(DetailsPanel::new(ctx.clone())),
        ctx,
    });
    APP.with(|cell| {
        let _ = cell.set(app.clone());
    });

    subscribe(&app);
    init_map(&app)?;
    render_header(&app);
    render_modal(&app);
    render_details(&app);
    Ok(())
}

#[wasm_bindgen]
pub fn submit_search(text: String) {
    let Some(app) = app() else {
        return;
    };
    let request = app.header.borrow_mut().submit_query(&text);
    render_header(&app);
    if let Some(request) = request {
        spawn_search(app, request);
    }
}

#[wasm_bindgen]
pub fn search_this_area() {
    let Some(app) = app() else {
        return;
    };
    let request = app.header.borrow_mut().search_this_area();
    render_header(&app);
    if let Some(request) = request {
        spawn_search(app, request);
    }
}

#[wasm_bindgen]
pub fn locate() {
    let Some(app) = app() else {
        return;
    };
    if !app.header.borrow_mut().begin_locate() {
        return;
    }
    render_header(&app);
    spawn_local(async move {
        let position = leaflet::current_position().await;
        if let Err(err) = &position {
            log(&format!("geolocation error: {err}"));
        }
        let request = app.header.borrow_mut().finish_locate(position);
        render_header(&app);
        if let Some(request) = request {
            spawn_search(app, request);
        }
    });
}

#[wasm_bindgen]
pub fn show_about() {
    if let Some(app) = app() {
        app.header.borrow().show_about();
    }
}

#[wasm_bindgen]
pub fn close_modal() {
    if let Some(app) = app() {
        app.header.borrow().close_modal();
    }
}

#[wasm_bindgen]
pub fn close_details() {
    if let Some(app) = app() {
        app.details.borrow_mut().close();
        render_details(&app);
    }
}

#[wasm_bindgen]
pub fn next_photo() {
    if let Some(app) = app() {
        if app.details.borrow_mut().next_photo() {
            render_details(&app);
        }
    }
}

#[wasm_bindgen]
pub fn previous_photo() {
    if let Some(app) = app() {
        if app.details.borrow_mut().previous_photo() {
            render_details(&app);
        }
    }
}
