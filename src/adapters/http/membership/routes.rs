//! Axum router for membership endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    approve_payment_request, cancel_membership, create_membership, get_active_membership,
    reject_payment_request, revoke_membership, MembershipAppState,
};

/// Lifecycle routes, mounted at `/memberships`.
///
/// - `POST /` - create a membership (admin)
/// - `GET /active/:user_id` - member's active membership, null if none
/// - `POST /:id/cancel` - cancel (admin)
/// - `POST /revoke/:user_id` - revoke the member's active membership (admin)
pub fn membership_routes() -> Router<MembershipAppState> {
    Router::new()
        .route("/", post(create_membership))
        .route("/active/:user_id", get(get_active_membership))
        .route("/:id/cancel", post(cancel_membership))
        .route("/revoke/:user_id", post(revoke_membership))
}

/// Payment-request approval routes, mounted at `/payment-requests`.
pub fn payment_request_routes() -> Router<MembershipAppState> {
    Router::new()
        .route("/:id/approve", post(approve_payment_request))
        .route("/:id/reject", post(reject_payment_request))
}

/// Complete membership module router.
pub fn membership_router() -> Router<MembershipAppState> {
    Router::new()
        .nest("/memberships", membership_routes())
        .nest("/payment-requests", payment_request_routes())
}
