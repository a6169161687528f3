//! Browser frontend: Leaflet map, search header and details dialog.
//!
//! The page (`index.html`) loads Leaflet, then this module. DOM controls call
//! the exported functions; map events come back through callbacks handed to
//! the Leaflet glue in [`leaflet`].

pub mod render;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod leaflet;
