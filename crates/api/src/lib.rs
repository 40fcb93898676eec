//! HTTP API server with observability for the sales service.
//!
//! Provides REST endpoints for creating, listing and updating sales, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, patch};
use domain::{OwnerDirectory, SalesService};
use metrics_exporter_prometheus::PrometheusHandle;
use sale_store::SaleStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::sales::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: SaleStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/ping", get(routes::health::ping))
        .route(
            "/sales",
            get(routes::sales::list::<S>).post(routes::sales::create::<S>),
        )
        .route("/sales/{id}", patch(routes::sales::update::<S>))
        .route("/sales/", patch(routes::sales::update_without_id))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state: a sales service over `store`
/// that checks owners with `owners` and draws initial statuses at random.
pub fn create_default_state<S: SaleStore + 'static>(
    store: S,
    owners: impl OwnerDirectory + 'static,
) -> Arc<AppState<S>> {
    Arc::new(AppState {
        sales: SalesService::new(store, owners),
    })
}
