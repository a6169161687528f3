//! HTML fragments for the page. Pure string building so it can be tested
//! without a browser.

use protocol::ParkingDetails;
use scene::{OriginMarker, ParkingMarker};
use serde_json::json;
use ui::{
    ABOUT_AUTHOR, ABOUT_AUTHOR_URL, ABOUT_FOOTER, ABOUT_PARAGRAPHS, DetailsRow, ModalBody,
    ModalContent, NO_PHOTOS_TEXT,
};
use ui::{details_rows, directions_url};

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn about_html() -> String {
    let mut html = String::from("<div class=\"card\"><div class=\"card-body\">");
    let author_link = format!(
        "<a href=\"{ABOUT_AUTHOR_URL}\" target=\"_blank\" rel=\"noopener\">{ABOUT_AUTHOR}</a>"
    );
    for p in ABOUT_PARAGRAPHS {
        let text = escape_html(p).replace(ABOUT_AUTHOR, &author_link);
        html.push_str(&format!("<p>{text}</p>"));
    }
    html.push_str("</div><div class=\"card-footer text-muted small\">");
    for line in ABOUT_FOOTER {
        html.push_str(&format!("<div>{}</div>", escape_html(line)));
    }
    html.push_str("</div></div>");
    html
}

/// Inner markup of the `#modal` dialog.
pub fn modal_html(modal: &ModalContent) -> String {
    let body = match &modal.body {
        ModalBody::Text(text) => format!("<p>{}</p>", escape_html(text)),
        ModalBody::About => about_html(),
    };
    let body_class = if modal.no_padding {
        "modal-body p-0"
    } else {
        "modal-body"
    };
    format!(
        "<div class=\"modal-header {}\">\
         <h5 class=\"modal-title\">{}</h5>\
         <button type=\"button\" class=\"close\" data-action=\"close-modal\" aria-label=\"Close\">&times;</button>\
         </div>\
         <div class=\"{body_class}\">{body}</div>",
        modal.class.css_class(),
        escape_html(&modal.title),
    )
}

fn carousel_html(photos: &[&str], index: usize) -> String {
    if photos.is_empty() {
        return format!("<p class=\"text-muted\">{NO_PHOTOS_TEXT}</p>");
    }
    let index = index % photos.len();
    let controls = if photos.len() > 1 {
        format!(
            "<button type=\"button\" class=\"carousel-control-prev\" data-action=\"photo-prev\" aria-label=\"Previous\">\
             <span class=\"carousel-control-prev-icon\"></span></button>\
             <button type=\"button\" class=\"carousel-control-next\" data-action=\"photo-next\" aria-label=\"Next\">\
             <span class=\"carousel-control-next-icon\"></span></button>\
             <div class=\"carousel-caption\">{} / {}</div>",
            index + 1,
            photos.len()
        )
    } else {
        String::new()
    };
    format!(
        "<div class=\"carousel slide mb-3\"><div class=\"carousel-inner\">\
         <div class=\"carousel-item active\">\
         <img class=\"d-block w-100\" src=\"{}\" alt=\"Bike parking {}\"></div>\
         </div>{controls}</div>",
        escape_html(photos[index]),
        index + 1
    )
}

/// Inner markup of the `#details` dialog, showing photo `photo_index` of
/// the carousel.
pub fn details_html(details: &ParkingDetails, photo_index: usize) -> String {
    let photos_html = carousel_html(&details.photos(), photo_index);

    let directions = match details.destination() {
        Some(dest) => format!(
            "<a class=\"btn btn-success btn-block\" target=\"_blank\" rel=\"noopener\" href=\"{}\">Get directions</a>",
            escape_html(&directions_url(&dest))
        ),
        None => "<button type=\"button\" class=\"btn btn-success btn-block\" disabled>Get directions</button>"
            .to_string(),
    };

    let rows: String = details_rows(details)
        .into_iter()
        .map(|row| {
            let (label, value) = match row {
                DetailsRow::Text { label, value } => (label, value),
                DetailsRow::Flag { label, value } => (label, value.label().to_string()),
            };
            format!(
                "<li class=\"list-group-item\"><strong>{}:</strong> {}</li>",
                escape_html(label),
                escape_html(&value)
            )
        })
        .collect();

    format!(
        "<div class=\"modal-header bg-primary text-white\">\
         <h5 class=\"modal-title\">Bike parking</h5>\
         <button type=\"button\" class=\"close\" data-action=\"close-details\" aria-label=\"Close\">&times;</button>\
         </div>\
         <div class=\"modal-body\">{photos_html}<ul class=\"list-group\">\
         <li class=\"list-group-item\">{directions}</li>{rows}</ul></div>"
    )
}

/// Marker payload handed to the Leaflet glue.
pub fn markers_json(parking: &[ParkingMarker], origin: Option<&OriginMarker>) -> String {
    let parking: Vec<_> = parking
        .iter()
        .map(|m| {
            let tooltip = m
                .tooltip_lines()
                .iter()
                .map(|l| escape_html(l))
                .collect::<Vec<_>>()
                .join("<br>");
            json!({
                "id": m.id.as_str(),
                "lat": m.position.lat,
                "lon": m.position.lon,
                "tooltip": tooltip,
            })
        })
        .collect();
    let origin = origin.map(|o| {
        json!({
            "lat": o.position.lat,
            "lon": o.position.lon,
            "label": escape_html(&o.label),
        })
    });
    json!({ "parking": parking, "origin": origin }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundation::LatLon;
    use pretty_assertions::assert_eq;
    use protocol::{CoordinatesField, FieldValue, Flag, ParkingId};

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<b>\"Tom & Jerry's\"</b>"),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn error_modal_is_escaped_and_red() {
        let html = modal_html(&ModalContent::error("No bike parks found", "near <here>"));
        assert!(html.contains("bg-danger"));
        assert!(html.contains("<p>near &lt;here&gt;</p>"));
        assert!(html.contains("data-action=\"close-modal\""));
    }

    #[test]
    fn about_modal_has_no_padding() {
        let html = modal_html(&ModalContent::about());
        assert!(html.contains("modal-body p-0"));
        assert!(html.contains("Powered by TfL Open Data"));
    }

    #[test]
    fn about_links_the_author() {
        let html = modal_html(&ModalContent::about());
        assert!(html.contains(
            "<p>Designed by <a href=\"https://www.github.com/MrLemur\" target=\"_blank\" rel=\"noopener\">MrLemur</a></p>"
        ));
        assert!(html.contains("TfL cycling parking dataset"));
    }

    fn two_photos() -> ParkingDetails {
        ParkingDetails {
            bike_capacity: Some(FieldValue::Integer(8)),
            secure_area: Flag::No,
            photo_1: Some("https://example.org/a.jpg".into()),
            photo_2: Some("https://example.org/b.jpg".into()),
            coordinates: Some(CoordinatesField::Pair(vec![51.5, -0.1])),
            ..ParkingDetails::default()
        }
    }

    #[test]
    fn details_with_photos_and_directions() {
        let html = details_html(&two_photos(), 0);
        assert!(html.contains("<strong>Bike capacity:</strong> 8"));
        assert!(html.contains("<strong>Stand type:</strong> Unknown"));
        assert!(html.contains("<strong>Secure area:</strong> No"));
        assert!(html.contains("destination=51.5%2C-0.1&amp;travelmode=bicycling\">Get directions</a>"));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn carousel_shows_one_photo_at_a_time() {
        let html = details_html(&two_photos(), 0);
        assert!(html.contains("class=\"carousel slide mb-3\""));
        assert_eq!(html.matches("<img ").count(), 1);
        assert!(html.contains("src=\"https://example.org/a.jpg\" alt=\"Bike parking 1\""));
        assert!(html.contains("data-action=\"photo-prev\""));
        assert!(html.contains("data-action=\"photo-next\""));
        assert!(html.contains("1 / 2"));

        let html = details_html(&two_photos(), 1);
        assert!(html.contains("src=\"https://example.org/b.jpg\" alt=\"Bike parking 2\""));
        assert!(!html.contains("a.jpg"));
        assert!(html.contains("2 / 2"));
    }

    #[test]
    fn single_photo_has_no_controls() {
        let details = ParkingDetails {
            photo_2: Some("https://example.org/b.jpg".into()),
            ..ParkingDetails::default()
        };
        let html = details_html(&details, 5);
        assert!(html.contains("carousel"));
        assert!(html.contains("b.jpg"));
        assert!(!html.contains("photo-next"));
    }

    #[test]
    fn details_without_photos_or_location() {
        let html = details_html(&ParkingDetails::default(), 0);
        assert!(html.contains(NO_PHOTOS_TEXT));
        assert!(!html.contains("carousel"));
        assert!(html.contains(
            "<button type=\"button\" class=\"btn btn-success btn-block\" disabled>Get directions</button>"
        ));
        assert!(!html.contains("href=\"https://www.google.com"));
    }

    #[test]
    fn markers_payload() {
        let parking = vec![ParkingMarker {
            id: ParkingId::new("RWG1"),
            position: LatLon::new(51.5, -0.1),
            distance_label: Some("250 m".into()),
        }];
        let origin = OriginMarker {
            position: LatLon::new(51.49, -0.11),
            label: "Kings Cross & St Pancras".into(),
        };
        let value: serde_json::Value =
            serde_json::from_str(&markers_json(&parking, Some(&origin))).expect("json");
        assert_eq!(value["parking"][0]["id"], "RWG1");
        assert_eq!(
            value["parking"][0]["tooltip"],
            "Bike parking<br>Distance: 250 m<br>Click for details"
        );
        assert_eq!(value["origin"]["label"], "Kings Cross &amp; St Pancras");

        let value: serde_json::Value =
            serde_json::from_str(&markers_json(&[], None)).expect("json");
        assert!(value["origin"].is_null());
    }
}
