// Account Service Library

pub mod config;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod middleware;
pub mod models;
pub mod notify;
pub mod routes;
pub mod security;
pub mod services;
pub mod store;

use std::sync::Arc;

pub use error::{AccountError, Result};
pub use services::AccountService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AccountService>,
}
