//! Interaction core shared by the browser and command line frontends.
//!
//! - [`AppContext`]: the shared stores, created once at the composition root
//! - [`SearchHeader`]: search form, geolocation and "search this area"
//! - [`DetailsPanel`]: details fetch for the selected parking
//! - [`driver`]: async glue between the state machines and the API client

pub mod context;
pub mod details;
pub mod driver;
pub mod location;
pub mod modal;
pub mod search;

pub use context::*;
pub use details::*;
pub use driver::*;
pub use location::*;
pub use modal::*;
pub use search::*;
