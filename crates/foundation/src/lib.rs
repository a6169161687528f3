pub mod distance;
pub mod geo;

// Foundation crate: small, well-tested geographic primitives only.
pub use distance::*;
pub use geo::*;
