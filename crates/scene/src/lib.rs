pub mod map_view;
pub mod markers;
pub mod suppression;

pub use map_view::*;
pub use markers::*;
pub use suppression::*;
