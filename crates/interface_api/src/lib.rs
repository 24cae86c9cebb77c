//! HTTP Layer
//!
//! This crate serves the member registry over HTTP using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: member pages, JSON listing and health checks
//! - **Views**: server-rendered HTML
//! - **DTOs**: form bodies and the JSON listing shape
//! - **Middleware**: request ids, tracing, audit logging
//! - **Error Handling**: consistent JSON error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(store, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod views;

use std::sync::Arc;

use axum::{
    Router,
    routing::get,
    middleware as axum_middleware,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::DocumentStore;
use domain_person::PersonService;

use crate::config::ApiConfig;
use crate::handlers::{health, home};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub persons: PersonService,
    pub store: Arc<dyn DocumentStore>,
    pub config: ApiConfig,
}

/// Creates the router over a document store
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(store: Arc<dyn DocumentStore>, config: ApiConfig) -> Router {
    let state = AppState {
        persons: PersonService::new(store.clone()),
        store,
        config,
    };
    router(state)
}

/// Creates the router from prepared state
pub fn router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let member_routes = Router::new()
        .route("/", get(home::index))
        .route("/ListRecords", get(home::list_records))
        .route("/Add", get(home::add_form).post(home::add_person))
        .route("/Edit/:id", get(home::edit_form).post(home::edit_person))
        .route("/Delete/:id", get(home::delete_person));

    Router::new()
        .merge(health_routes)
        .merge(member_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
