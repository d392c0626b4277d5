pub mod masks;
pub mod presets;
pub mod variables;

pub use masks::*;
pub use variables::*;
