pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod hubspot;
pub mod identity;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod stage;
pub mod state;

pub use routes::app;
pub use state::AppState;
