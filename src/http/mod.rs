pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
