use protocol::{ApiError, FieldValue, Flag, ParkingDetails, ParkingId, percent_encode};
use runtime::{Generation, RequestGeneration};
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::modal::ModalContent;

pub const DETAILS_ERROR_TITLE: &str = "Could not load bike park details";
pub const DETAILS_ERROR_BODY: &str =
    "There was a problem retrieving the details for this bike park. Please try again.";
pub const NO_PHOTOS_TEXT: &str = "No photos available";
pub const UNKNOWN_TEXT: &str = "Unknown";

/// Permission to apply the result of one details fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsTicket {
    pub id: ParkingId,
    generation: Generation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailsState {
    Hidden,
    Loading(ParkingId),
    Shown {
        id: ParkingId,
        details: ParkingDetails,
    },
}

/// What [`DetailsPanel::resolve`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Shown,
    Failed,
    /// The selection moved on; the result was dropped untouched.
    Stale,
}

/// Modal with photos and attributes of the selected parking.
///
/// Every selection change issues a new generation, so a fetch that is still
/// running for an earlier selection can never populate the panel.
#[derive(Debug)]
pub struct DetailsPanel {
    ctx: AppContext,
    state: DetailsState,
    generation: RequestGeneration,
    photo: usize,
}

impl DetailsPanel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            state: DetailsState::Hidden,
            generation: RequestGeneration::new(),
            photo: 0,
        }
    }

    pub fn state(&self) -> &DetailsState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, DetailsState::Shown { .. })
    }

    pub fn details(&self) -> Option<&ParkingDetails> {
        match &self.state {
            DetailsState::Shown { details, .. } => Some(details),
            _ => None,
        }
    }

    /// Carousel position, always within the shown photos (0 when there are
    /// none).
    pub fn photo_index(&self) -> usize {
        self.photo
    }

    /// Advances the carousel, wrapping after the last photo. Returns whether
    /// the shown photo changed.
    pub fn next_photo(&mut self) -> bool {
        self.step_photo(1)
    }

    pub fn previous_photo(&mut self) -> bool {
        self.step_photo(-1)
    }

    fn step_photo(&mut self, delta: isize) -> bool {
        let count = self.details().map_or(0, |d| d.photos().len());
        if count < 2 {
            return false;
        }
        self.photo = (self.photo as isize + delta).rem_euclid(count as isize) as usize;
        true
    }

    /// Reacts to a new selection. Returns a ticket when a fetch must start.
    pub fn on_selection_changed(&mut self, selected: Option<ParkingId>) -> Option<DetailsTicket> {
        let generation = self.generation.advance();
        self.photo = 0;
        match selected {
            None => {
                self.state = DetailsState::Hidden;
                None
            }
            Some(id) => {
                debug!(%id, "details requested");
                self.state = DetailsState::Loading(id.clone());
                self.ctx.loading.set(true);
                Some(DetailsTicket { id, generation })
            }
        }
    }

    /// Applies a fetch result if `ticket` is still current.
    pub fn resolve(
        &mut self,
        ticket: &DetailsTicket,
        result: Result<ParkingDetails, ApiError>,
    ) -> Resolution {
        if !self.generation.is_current(ticket.generation) {
            debug!(id = %ticket.id, "stale details result dropped");
            return Resolution::Stale;
        }

        let resolution = match result {
            Ok(details) => {
                self.state = DetailsState::Shown {
                    id: ticket.id.clone(),
                    details,
                };
                Resolution::Shown
            }
            Err(err) => {
                warn!(id = %ticket.id, "details fetch failed: {err}");
                // Invalidate before clearing the selection so the resulting
                // notification finds nothing left to cancel.
                self.generation.advance();
                self.state = DetailsState::Hidden;
                self.ctx
                    .modal
                    .set(ModalContent::error(DETAILS_ERROR_TITLE, DETAILS_ERROR_BODY));
                self.ctx.selection.set(None);
                Resolution::Failed
            }
        };
        self.ctx.loading.set(false);
        resolution
    }

    /// Closes the panel and drops the selection.
    pub fn close(&mut self) {
        self.generation.advance();
        self.photo = 0;
        self.state = DetailsState::Hidden;
        self.ctx.selection.set(None);
    }
}

/// Directions link for a destination (`"lat,lon"` or an address).
pub fn directions_url(destination: &str) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={}&travelmode=bicycling",
        percent_encode(destination)
    )
}

/// One labelled line of the details list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsRow {
    Text { label: &'static str, value: String },
    Flag { label: &'static str, value: Flag },
}

fn text_row(label: &'static str, value: Option<&FieldValue>) -> DetailsRow {
    DetailsRow::Text {
        label,
        value: value
            .map(FieldValue::to_string)
            .unwrap_or_else(|| UNKNOWN_TEXT.to_string()),
    }
}

/// Rows in display order.
pub fn details_rows(details: &ParkingDetails) -> Vec<DetailsRow> {
    vec![
        text_row("Bike capacity", details.bike_capacity.as_ref()),
        text_row("Number of stands", details.number_of_stands.as_ref()),
        text_row("Stand type", details.stand_type.as_ref()),
        DetailsRow::Flag {
            label: "On carriageway",
            value: details.on_carriageway,
        },
        DetailsRow::Flag {
            label: "Under cover",
            value: details.under_cover,
        },
        DetailsRow::Flag {
            label: "Secure area",
            value: details.secure_area,
        },
    ]
}
