//! TernakPro HTTP API Module
//! REST API for livestock recommendations

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use handlers::AppState;
pub use routes::create_router;
pub use types::*;
