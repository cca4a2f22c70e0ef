//! HTTP adapters - REST API surface.
//!
//! Thin Axum routers per module. Request DTOs map onto commands, domain
//! errors map onto status codes in `error`. The authenticated
//! `Principal` arrives as a request extension from external middleware.

pub mod attendance;
pub mod error;
pub mod membership;
pub mod payment;

use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use attendance::{attendance_router, AttendanceAppState};
pub use error::{ApiError, ErrorResponse};
pub use membership::{membership_router, MembershipAppState};
pub use payment::{payment_router, PaymentAppState};

/// Assembles the full API under `/api` with tracing, timeout and CORS
/// layers. Authentication middleware wraps this router at the edge.
pub fn api_router(
    membership: MembershipAppState,
    payment: PaymentAppState,
    attendance: AttendanceAppState,
    request_timeout: Duration,
) -> Router {
    let api = membership_router()
        .with_state(membership)
        .merge(payment_router().with_state(payment))
        .merge(attendance_router().with_state(attendance));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
}
