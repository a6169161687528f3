use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Yes/no attribute of a parking location.
///
/// The dataset spells these as `"TRUE"` / `"FALSE"`; plain JSON booleans are
/// accepted too. Anything else is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flag {
    Yes,
    No,
    #[default]
    Unknown,
}

impl Flag {
    pub fn label(self) -> &'static str {
        match self {
            Flag::Yes => "Yes",
            Flag::No => "No",
            Flag::Unknown => "Unknown",
        }
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Bool(true) => Flag::Yes,
            serde_json::Value::Bool(false) => Flag::No,
            serde_json::Value::String(s) if s == "TRUE" => Flag::Yes,
            serde_json::Value::String(s) if s == "FALSE" => Flag::No,
            _ => Flag::Unknown,
        })
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Flag::Yes => serializer.serialize_str("TRUE"),
            Flag::No => serializer.serialize_str("FALSE"),
            Flag::Unknown => serializer.serialize_none(),
        }
    }
}

/// Scalar shown verbatim in the details list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Integer(n) => write!(f, "{n}"),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// Location of the parking as the server reports it: a `"lat,lon"` string or
/// a `[lat, lon]` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordinatesField {
    Text(String),
    Pair(Vec<f64>),
}

impl CoordinatesField {
    /// Destination string suitable for a directions query.
    pub fn to_destination(&self) -> Option<String> {
        match self {
            CoordinatesField::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            CoordinatesField::Pair(v) if v.len() >= 2 => Some(format!("{},{}", v[0], v[1])),
            CoordinatesField::Pair(_) => None,
        }
    }
}

/// Flat details record for one parking location.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParkingDetails {
    #[serde(rename = "Bike capacity", default)]
    pub bike_capacity: Option<FieldValue>,
    #[serde(rename = "Number of stands", default)]
    pub number_of_stands: Option<FieldValue>,
    #[serde(rename = "Stand type", default)]
    pub stand_type: Option<FieldValue>,
    #[serde(rename = "On carriageway", default)]
    pub on_carriageway: Flag,
    #[serde(rename = "Under cover", default)]
    pub under_cover: Flag,
    #[serde(rename = "Secure area", default)]
    pub secure_area: Flag,
    #[serde(rename = "Photo 1", default)]
    pub photo_1: Option<String>,
    #[serde(rename = "Photo 2", default)]
    pub photo_2: Option<String>,
    #[serde(rename = "Coordinates", default)]
    pub coordinates: Option<CoordinatesField>,
}

impl ParkingDetails {
    /// Photo URLs in display order, blanks skipped.
    pub fn photos(&self) -> Vec<&str> {
        [self.photo_1.as_deref(), self.photo_2.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn destination(&self) -> Option<String> {
        self.coordinates
            .as_ref()
            .and_then(CoordinatesField::to_destination)
    }
}
