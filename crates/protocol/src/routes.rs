use crate::features::ParkingId;

pub const SEARCH_PATH: &str = "/api/v1.0/parking/search";
pub const DETAILS_PATH: &str = "/api/v1.0/parking/details";

/// Strips trailing slashes so paths can be appended verbatim.
pub fn normalize_base_url(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

/// Percent-encodes everything except the characters `encodeURIComponent`
/// leaves alone.
pub fn percent_encode(input: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(input.len());
    for b in input.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(b as char),
            _ => {
                out.push('%');
                out.push(HEX[(b >> 4) as usize] as char);
                out.push(HEX[(b & 0x0f) as usize] as char);
            }
        }
    }
    out
}

/// Joins `base + path` and a query string built from the non-empty params.
pub fn build_url(base: &str, path: &str, params: &[(&str, String)]) -> String {
    let query = params
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let base_path = format!("{}{path}", normalize_base_url(base));
    if query.is_empty() {
        base_path
    } else {
        format!("{base_path}?{query}")
    }
}

pub fn search_query_url(base: &str, query: &str) -> String {
    build_url(base, SEARCH_PATH, &[("query", query.to_string())])
}

pub fn search_coordinates_url(base: &str, lat: f64, lon: f64) -> String {
    build_url(
        base,
        SEARCH_PATH,
        &[("lat", lat.to_string()), ("lon", lon.to_string())],
    )
}

pub fn details_url(base: &str, id: &ParkingId) -> String {
    build_url(
        base,
        &format!("{DETAILS_PATH}/{}", percent_encode(id.as_str())),
        &[],
    )
}
