pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod runtime;

pub use handlers::*;
pub use middleware::{Cors, Middleware};
pub use runtime::{serve, App};
