pub mod api;
pub mod bootstrap;
pub mod config;
pub mod database;
pub mod domain;
pub mod models;
pub mod services;

pub use api::{ApiError, ApiResult, AppState};
pub use config::*;
pub use database::*;
pub use models::*;
pub use services::*;
