pub mod bus;
pub mod debounce;
pub mod event;

pub use bus::*;
pub use debounce::*;
pub use event::*;
