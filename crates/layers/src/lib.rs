pub mod indicator;
pub mod legend;
pub mod overlay;
pub mod threshold;

pub use indicator::*;
pub use legend::*;
pub use overlay::*;
pub use threshold::*;
