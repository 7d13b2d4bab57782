pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use routes::app;
pub use state::AppState;
