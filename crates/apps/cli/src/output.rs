//! Plain-text rendering of map, details and dialog state.

use protocol::ParkingDetails;
use scene::MapView;
use ui::{DetailsRow, ModalContent, NO_PHOTOS_TEXT, details_rows, directions_url};

pub fn map_lines(map: &MapView) -> Vec<String> {
    let mut lines = Vec::new();
    let center = map.center();
    lines.push(format!("map center {center} zoom {}", map.zoom()));
    if let Some(origin) = map.origin_marker() {
        lines.push(format!("origin {} ({})", origin.position, origin.label));
    }
    if map.parking_markers().is_empty() {
        lines.push("no bike parking in view".to_string());
    }
    for (i, marker) in map.parking_markers().iter().enumerate() {
        lines.push(format!(
            "{:>3}. {}\t{}\t{}",
            i + 1,
            marker.id,
            marker.position,
            marker.distance_label.as_deref().unwrap_or("-")
        ));
    }
    lines
}

pub fn details_lines(details: &ParkingDetails) -> Vec<String> {
    let mut lines: Vec<String> = details_rows(details)
        .into_iter()
        .map(|row| match row {
            DetailsRow::Text { label, value } => format!("{label}: {value}"),
            DetailsRow::Flag { label, value } => format!("{label}: {}", value.label()),
        })
        .collect();

    let photos = details.photos();
    if photos.is_empty() {
        lines.push(NO_PHOTOS_TEXT.to_string());
    }
    lines.extend(photos.iter().map(|p| format!("Photo: {p}")));

    if let Some(dest) = details.destination() {
        lines.push(format!("Directions: {}", directions_url(&dest)));
    }
    lines
}

pub fn modal_text(modal: &ModalContent) -> String {
    format!("{}: {}", modal.title, modal.body_text())
}
