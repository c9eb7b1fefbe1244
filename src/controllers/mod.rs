use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::routing::RouteRegistry;

/// Shared application state available in all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub registry: Arc<RouteRegistry>,
}

pub mod api;
pub mod auth;
