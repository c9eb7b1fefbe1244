pub mod app;
pub mod auth;
pub mod config;
pub mod controllers;
pub mod cors;
pub mod db;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod migrations;
pub mod models;
pub mod response;
pub mod routing;
pub mod testing;

pub use app::App;
pub use config::{Config, ConfigError};
pub use error::AppError;
pub use logging::{init_logging, init_logging_json};
pub use response::ApiResponse;
pub use routing::{RouteGroup, RouteRegistry, RouteRule, Routes};
pub use testing::{TestApp, TestClient, TestResponse};
