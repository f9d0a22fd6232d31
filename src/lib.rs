pub mod config;
pub mod handlers;
pub mod models;
pub mod presentation;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;
