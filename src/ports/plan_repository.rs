//! Plan repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PlanId};
use crate::domain::plan::Plan;

#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn save(&self, plan: &Plan) -> Result<(), DomainError>;

    /// Update an existing plan (price changes, deactivation).
    async fn update(&self, plan: &Plan) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &PlanId) -> Result<Option<Plan>, DomainError>;

    /// Active plans, for the catalogue listing.
    async fn list_active(&self) -> Result<Vec<Plan>, DomainError>;
}
