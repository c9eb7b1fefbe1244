use std::sync::Arc;

use axum::extract::State;
use axum::handler::HandlerWithoutStateExt;
use axum::http::HeaderName;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use serde::Serialize;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::config::Config;
use crate::controllers::AppState;
use crate::cors;
use crate::error;
use crate::migrations::Migrator;
use crate::routing::{RouteGroup, RouteRegistry, Routes};

/// The assembled application: config, database, and mounted route groups.
pub struct App {
    pub config: Config,
    pub db: DatabaseConnection,
    groups: Vec<(RouteGroup, Router<AppState>)>,
}

impl App {
    /// Create an application from the process environment.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::from_env()?;
        Self::with_config(config).await
    }

    /// Create an application with a given config.
    pub async fn with_config(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let db = crate::db::connect(&config).await?;

        // Run pending migrations automatically on startup
        tracing::info!("Running pending database migrations...");
        Migrator::up(&db, None).await?;
        tracing::info!("Migrations complete.");

        Ok(App {
            config,
            db,
            groups: Vec::new(),
        })
    }

    /// Mount a route group. Discovery listing order follows mount order.
    pub fn mount(mut self, routes: Routes) -> Self {
        self.groups.push(routes.into_parts());
        self
    }

    /// Build the full router: test route, discovery endpoint, mounted
    /// groups, static file fallback, and the middleware chain.
    pub fn router(&self) -> Router {
        let config = Arc::new(self.config.clone());
        let is_dev = self.config.is_dev();

        // Groups sharing a base path merge into one nested router; the
        // registry keeps them separate so listing order is mount order.
        let mut registry = RouteRegistry::default();
        let mut nested: Vec<(String, Router<AppState>)> = Vec::new();
        for (group, router) in &self.groups {
            let base = group.base_path().to_string();
            registry.register(group.clone());
            match nested.iter_mut().find(|(path, _)| *path == base) {
                Some((_, existing)) => *existing = existing.clone().merge(router.clone()),
                None => nested.push((base, router.clone())),
            }
        }

        let state = AppState {
            db: self.db.clone(),
            config: config.clone(),
            registry: Arc::new(registry),
        };

        let mut router = Router::new()
            .route("/test", get(test_route))
            // registered directly, not through a group, so it does not list itself
            .route("/api", get(list_endpoints));

        for (base, sub) in nested {
            if base.is_empty() {
                router = router.merge(sub);
            } else {
                router = router.nest(&base, sub);
            }
        }

        let static_files = ServeDir::new(&self.config.public_dir)
            .not_found_service(error::not_found.into_service());

        let mut router = router
            .with_state(state.clone())
            .fallback_service(static_files)
            .layer(middleware::from_fn_with_state(
                state,
                auth::middleware::load_session,
            ))
            .layer(RequestBodyLimitLayer::new(self.config.max_body_size))
            .layer(middleware::from_fn(cors::cors));

        // Diagnostic middleware only in development mode.
        if is_dev {
            use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse};
            use tower_http::LatencyUnit;

            let x_request_id = HeaderName::from_static("x-request-id");
            router = router
                .layer(middleware::from_fn(error::dev_errors))
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(x_request_id))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                        .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                        .on_response(
                            DefaultOnResponse::new()
                                .level(tracing::Level::INFO)
                                .latency_unit(LatencyUnit::Millis),
                        ),
                );
        }

        router
    }

    /// Run the application server until ctrl-c.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.config.server_addr();
        let router = self.router();

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("portico running on http://{}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
    tracing::info!("Shutting down...");
}

// ═══ Application endpoints ═══

/// `GET /test` — liveness probe.
async fn test_route() -> &'static str {
    "App is running!"
}

#[derive(Serialize)]
struct DiscoveryResponse {
    message: &'static str,
    endpoints: Vec<String>,
}

/// `GET /api` — the discovery endpoint, recomputed from the registry on
/// every request.
async fn list_endpoints(State(state): State<AppState>) -> impl IntoResponse {
    Json(DiscoveryResponse {
        message: "Available API endpoints",
        endpoints: state.registry.aggregate(),
    })
}
