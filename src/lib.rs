pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod spellcheck;
pub mod state;
pub mod telemetry;

pub use app::app;

#[cfg(test)]
pub mod testing;
