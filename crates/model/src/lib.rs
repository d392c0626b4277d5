pub mod snapshot;
pub mod weight;

pub use snapshot::*;
pub use weight::*;
