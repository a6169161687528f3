//! Wire types for the bike parking HTTP API.
//!
//! Three GET endpoints, all JSON:
//! - `/api/v1.0/parking/search?query=<text>` -> [`FeatureCollection`]
//! - `/api/v1.0/parking/search?lat=<num>&lon=<num>` -> [`FeatureCollection`]
//! - `/api/v1.0/parking/details/<id>` -> [`ParkingDetails`]
//!
//! Any of them may instead answer `{"error": "..."}`.

pub mod details;
pub mod error;
pub mod features;
pub mod routes;

pub use details::*;
pub use error::*;
pub use features::*;
pub use routes::*;
