use std::cell::RefCell;

use client::{ApiClient, Transport};
use foundation::LatLon;
use protocol::ParkingId;
use scene::MapView;
use tracing::{debug, info};
use ui::{
    AppContext, DetailsPanel, DetailsState, ModalContent, NO_RESULTS_TITLE, SearchHeader,
    SearchRequest, load_details, run_search,
};

use crate::output::{details_lines, map_lines};

pub const EMPTY_QUERY_BODY: &str = "Please enter an address to search for";

/// Outcome of one command: lines for stdout, or the dialog the browser would
/// have shown.
pub type Reply = Result<Vec<String>, ModalContent>;

/// The browser app's components, wired the same way but driven in sequence.
pub struct Session<T> {
    ctx: AppContext,
    client: ApiClient<T>,
    map: RefCell<MapView>,
    header: RefCell<SearchHeader>,
    details: RefCell<DetailsPanel>,
}

impl<T: Transport> Session<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        let ctx = AppContext::new();
        ctx.loading.subscribe(|loading| debug!(loading = *loading, "loading changed"));
        Self {
            client,
            map: RefCell::new(MapView::new(ctx.selection.clone())),
            header: RefCell::new(SearchHeader::new(ctx.clone())),
            details: RefCell::new(DetailsPanel::new(ctx.clone())),
            ctx,
        }
    }

    pub async fn search(&self, text: &str) -> Reply {
        let request = self.header.borrow_mut().submit_query(text);
        match request {
            Some(request) => self.run(request).await,
            None => Err(ModalContent::error(NO_RESULTS_TITLE, EMPTY_QUERY_BODY)),
        }
    }

    pub async fn near(&self, at: LatLon) -> Reply {
        let request = self.header.borrow_mut().submit_coordinates(at);
        match request {
            Some(request) => self.run(request).await,
            None => Err(ModalContent::error(
                NO_RESULTS_TITLE,
                format!("Could not find any bike parks near: {at}"),
            )),
        }
    }

    async fn run(&self, request: SearchRequest) -> Reply {
        info!(request = %request.describe(), "searching");
        run_search(&self.header, &self.client, request).await;
        self.take_modal()?;

        self.ctx
            .map_data
            .with(|data| self.map.borrow_mut().sync_from(data));
        Ok(map_lines(&self.map.borrow()))
    }

    /// Selects the `index`-th marker (1-based) of the last search, as a
    /// click would, and loads its details.
    pub async fn pick(&self, index: usize) -> Reply {
        let id = index
            .checked_sub(1)
            .and_then(|i| self.map.borrow().parking_markers().get(i).map(|m| m.id.clone()));
        let Some(id) = id else {
            return Err(ModalContent::error(
                "No such bike park",
                format!("There is no result number {index}"),
            ));
        };
        self.map.borrow().select_marker(&id);
        self.load_selected().await
    }

    /// Loads details for an id that is not necessarily on the map.
    pub async fn details(&self, id: ParkingId) -> Reply {
        self.ctx.selection.set(Some(id));
        self.load_selected().await
    }

    async fn load_selected(&self) -> Reply {
        let selected = self.ctx.selection.get();
        let ticket = self.details.borrow_mut().on_selection_changed(selected);
        if let Some(ticket) = ticket {
            load_details(&self.details, &self.client, ticket).await;
        }
        self.take_modal()?;

        match self.details.borrow().state() {
            DetailsState::Shown { id, details } => {
                let mut lines = vec![format!("Bike parking {id}")];
                lines.extend(details_lines(details));
                Ok(lines)
            }
            DetailsState::Hidden | DetailsState::Loading(_) => Ok(Vec::new()),
        }
    }

    fn take_modal(&self) -> Result<(), ModalContent> {
        let modal = self.ctx.modal.get();
        if modal.show {
            self.ctx.modal.set(modal.clone().dismissed());
            return Err(modal);
        }
        Ok(())
    }
}
