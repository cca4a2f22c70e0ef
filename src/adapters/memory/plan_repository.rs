//! In-memory plan repository.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PlanId};
use crate::domain::plan::Plan;
use crate::ports::PlanRepository;

#[derive(Default)]
pub struct InMemoryPlanRepository {
    plans: RwLock<HashMap<PlanId, Plan>>,
}

impl InMemoryPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a plan directly, for tests.
    pub fn seed(&self, plan: Plan) {
        self.plans
            .write()
            .expect("InMemoryPlanRepository lock poisoned")
            .insert(plan.id, plan);
    }
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    async fn save(&self, plan: &Plan) -> Result<(), DomainError> {
        self.plans
            .write()
            .expect("InMemoryPlanRepository lock poisoned")
            .insert(plan.id, plan.clone());
        Ok(())
    }

    async fn update(&self, plan: &Plan) -> Result<(), DomainError> {
        let mut plans = self
            .plans
            .write()
            .expect("InMemoryPlanRepository lock poisoned");
        if !plans.contains_key(&plan.id) {
            return Err(DomainError::new(
                crate::domain::foundation::ErrorCode::PlanNotFound,
                format!("plan not found: {}", plan.id),
            ));
        }
        plans.insert(plan.id, plan.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PlanId) -> Result<Option<Plan>, DomainError> {
        Ok(self
            .plans
            .read()
            .expect("InMemoryPlanRepository lock poisoned")
            .get(id)
            .cloned())
    }

    async fn list_active(&self) -> Result<Vec<Plan>, DomainError> {
        let mut plans: Vec<Plan> = self
            .plans
            .read()
            .expect("InMemoryPlanRepository lock poisoned")
            .values()
            .filter(|p| p.active)
            .cloned()
            .collect();
        plans.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(plans)
    }
}
