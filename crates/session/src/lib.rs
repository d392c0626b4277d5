pub mod config;
pub mod notice;
pub mod session;

pub use config::*;
pub use notice::*;
pub use session::*;
