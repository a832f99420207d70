pub mod cors;
mod error;
mod handlers;
mod routes;

pub use cors::{
    allowed_headers_on_responses, default as default_cors, edge_function as edge_function_cors,
    permissive as permissive_cors,
};
pub use error::AppError;
pub use routes::{guard_routes, AppState};
