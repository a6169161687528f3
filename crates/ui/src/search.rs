use foundation::{LatLon, SEARCH_AREA_THRESHOLD_M, moved_beyond};
use protocol::{ApiError, FeatureCollection};
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::location::LocationError;
use crate::modal::ModalContent;

/// Appended to free-text queries; the dataset only covers London.
pub const QUERY_SUFFIX: &str = ", London, UK";

pub const LOCATE_LABEL: &str = "Use my location";
pub const LOCATE_BUSY_LABEL: &str = "Getting location...";

pub const NO_RESULTS_TITLE: &str = "No bike parks found";
pub const LOCATION_ERROR_TITLE: &str = "Can't get GPS coordinates";
pub const LOCATION_ERROR_BODY: &str =
    "Please allow access to your location, or try typing the address manually";

/// One search, as issued by the header.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchRequest {
    Query(String),
    Coordinates(LatLon),
}

impl SearchRequest {
    /// Human-readable form used in error messages.
    pub fn describe(&self) -> String {
        match self {
            SearchRequest::Query(q) => q.clone(),
            SearchRequest::Coordinates(p) => p.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchButton {
    Ready,
    /// Disabled with a spinner while a search is in flight.
    Searching,
}

impl SearchButton {
    pub fn label(self) -> &'static str {
        match self {
            SearchButton::Ready => "Search",
            SearchButton::Searching => "Searching",
        }
    }
}

/// Search form, geolocation button and "search this area" affordance.
///
/// Owns a single request slot: at most one search is in flight, and a new one
/// can only be issued after [`SearchHeader::complete`] released the slot.
#[derive(Debug)]
pub struct SearchHeader {
    ctx: AppContext,
    request: Option<SearchRequest>,
    pending_center: Option<LatLon>,
    show_search_area: bool,
    locating: bool,
    threshold_m: f64,
}

impl SearchHeader {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            request: None,
            pending_center: None,
            show_search_area: false,
            locating: false,
            threshold_m: SEARCH_AREA_THRESHOLD_M,
        }
    }

    pub fn with_threshold_m(mut self, threshold_m: f64) -> Self {
        self.threshold_m = threshold_m;
        self
    }

    pub fn request(&self) -> Option<&SearchRequest> {
        self.request.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.request.is_none()
    }

    pub fn search_button(&self) -> SearchButton {
        if self.request.is_some() {
            SearchButton::Searching
        } else {
            SearchButton::Ready
        }
    }

    pub fn locate_label(&self) -> &'static str {
        if self.locating {
            LOCATE_BUSY_LABEL
        } else {
            LOCATE_LABEL
        }
    }

    pub fn shows_search_area(&self) -> bool {
        self.show_search_area
    }

    pub fn pending_center(&self) -> Option<LatLon> {
        self.pending_center
    }

    /// Issues a free-text search. Blank input is refused like a required
    /// form field would.
    pub fn submit_query(&mut self, text: &str) -> Option<SearchRequest> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.issue(SearchRequest::Query(format!("{text}{QUERY_SUFFIX}")))
    }

    pub fn submit_coordinates(&mut self, at: LatLon) -> Option<SearchRequest> {
        if !at.is_finite() {
            return None;
        }
        self.issue(SearchRequest::Coordinates(at))
    }

    fn issue(&mut self, request: SearchRequest) -> Option<SearchRequest> {
        if let Some(current) = &self.request {
            warn!(
                in_flight = %current.describe(),
                refused = %request.describe(),
                "search already in flight"
            );
            return None;
        }
        debug!(request = %request.describe(), "search issued");
        self.request = Some(request.clone());
        self.ctx.loading.set(true);
        Some(request)
    }

    /// Applies the outcome of `request` and frees the slot.
    ///
    /// Returns `false` (and changes nothing) when `request` is not the one in
    /// flight.
    pub fn complete(
        &mut self,
        request: &SearchRequest,
        result: Result<FeatureCollection, ApiError>,
    ) -> bool {
        if self.request.as_ref() != Some(request) {
            warn!(request = %request.describe(), "completion for unknown search dropped");
            return false;
        }
        self.request = None;

        match result {
            Ok(data) => {
                debug!(results = data.result_count(), "search succeeded");
                self.show_search_area = false;
                self.pending_center = None;
                self.ctx.map_data.set(data);
                self.ctx.selection.set(None);
            }
            Err(err) => {
                warn!(request = %request.describe(), "search failed: {err}");
                let body = err.server_message().map(str::to_string).unwrap_or_else(|| {
                    format!(
                        "Could not find any bike parks near: {}",
                        request.describe()
                    )
                });
                self.ctx.modal.set(ModalContent::error(NO_RESULTS_TITLE, body));
            }
        }
        self.ctx.loading.set(false);
        true
    }

    /// Records a user pan and decides whether to offer an area search.
    pub fn on_map_moved(&mut self, center: LatLon) {
        self.pending_center = Some(center);
        let current = self.ctx.map_data.with(|d| d.center());
        self.show_search_area = moved_beyond(current, center, self.threshold_m);
    }

    /// Searches around the last panned-to center.
    pub fn search_this_area(&mut self) -> Option<SearchRequest> {
        if !self.show_search_area {
            return None;
        }
        let center = self.pending_center?;
        let request = self.submit_coordinates(center)?;
        self.show_search_area = false;
        Some(request)
    }

    /// Starts a geolocation lookup. Returns `false` if one is already running.
    pub fn begin_locate(&mut self) -> bool {
        if self.locating {
            return false;
        }
        self.locating = true;
        self.ctx.loading.set(true);
        true
    }

    /// Ends a geolocation lookup, issuing a coordinates search on success.
    pub fn finish_locate(
        &mut self,
        result: Result<LatLon, LocationError>,
    ) -> Option<SearchRequest> {
        self.locating = false;
        self.ctx.loading.set(false);
        match result {
            Ok(at) => self.submit_coordinates(at),
            Err(err) => {
                warn!("geolocation failed: {err}");
                self.ctx
                    .modal
                    .set(ModalContent::error(LOCATION_ERROR_TITLE, LOCATION_ERROR_BODY));
                None
            }
        }
    }

    pub fn show_about(&self) {
        self.ctx.modal.set(ModalContent::about());
    }

    pub fn close_modal(&self) {
        let current = self.ctx.modal.get();
        self.ctx.modal.set(current.dismissed());
    }
}
