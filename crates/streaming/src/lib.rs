pub mod boundary;
pub mod http;
pub mod pipeline;
pub mod protocol;
pub mod request;
pub mod service;

pub use boundary::*;
pub use http::*;
pub use pipeline::*;
pub use protocol::*;
pub use request::*;
pub use service::*;
