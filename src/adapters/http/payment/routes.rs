//! Axum router for payment endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{payment_summary, record_payment, PaymentAppState};

/// Payment routes, mounted at `/payments`.
///
/// - `POST /` - record a payment against a member (admin)
/// - `GET /summary` - per-method totals over a date range (admin)
pub fn payment_routes() -> Router<PaymentAppState> {
    Router::new()
        .route("/", post(record_payment))
        .route("/summary", get(payment_summary))
}

pub fn payment_router() -> Router<PaymentAppState> {
    Router::new().nest("/payments", payment_routes())
}
