/// Formats a distance in meters for marker tooltips.
///
/// At or above one kilometer the label switches to kilometers with a single
/// decimal; below that it is whole meters.
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{} m", meters.round() as i64)
    }
}

/// Same as [`format_distance`] but tolerates a missing or non-finite value.
pub fn format_distance_opt(meters: Option<f64>) -> Option<String> {
    meters.filter(|m| m.is_finite()).map(format_distance)
}
