pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod invites;
pub mod mail;
pub mod models;
pub mod security;
pub mod state;

pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;
