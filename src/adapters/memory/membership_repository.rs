//! In-memory membership repository.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, MembershipId, Timestamp, UserId};
use crate::domain::membership::Membership;
use crate::ports::MembershipRepository;

#[derive(Default)]
pub struct InMemoryMembershipRepository {
    memberships: RwLock<HashMap<MembershipId, Membership>>,
}

impl InMemoryMembershipRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, membership: Membership) {
        self.memberships
            .write()
            .expect("InMemoryMembershipRepository lock poisoned")
            .insert(membership.id, membership);
    }

    fn sorted_desc(mut rows: Vec<Membership>) -> Vec<Membership> {
        rows.sort_by(|a, b| b.end_date.cmp(&a.end_date));
        rows
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn save(&self, membership: &Membership) -> Result<(), DomainError> {
        self.memberships
            .write()
            .expect("InMemoryMembershipRepository lock poisoned")
            .insert(membership.id, membership.clone());
        Ok(())
    }

    async fn update(&self, membership: &Membership) -> Result<(), DomainError> {
        let mut rows = self
            .memberships
            .write()
            .expect("InMemoryMembershipRepository lock poisoned");
        if !rows.contains_key(&membership.id) {
            return Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                format!("membership not found: {}", membership.id),
            ));
        }
        rows.insert(membership.id, membership.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
        Ok(self
            .memberships
            .read()
            .expect("InMemoryMembershipRepository lock poisoned")
            .get(id)
            .cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Membership>, DomainError> {
        let rows: Vec<Membership> = self
            .memberships
            .read()
            .expect("InMemoryMembershipRepository lock poisoned")
            .values()
            .filter(|m| &m.user_id == user_id)
            .cloned()
            .collect();
        Ok(Self::sorted_desc(rows))
    }

    async fn find_active_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Membership>, DomainError> {
        let rows: Vec<Membership> = self
            .memberships
            .read()
            .expect("InMemoryMembershipRepository lock poisoned")
            .values()
            .filter(|m| &m.user_id == user_id && m.status.is_active())
            .cloned()
            .collect();
        Ok(Self::sorted_desc(rows))
    }

    async fn find_ending_within(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Membership>, DomainError> {
        let rows: Vec<Membership> = self
            .memberships
            .read()
            .expect("InMemoryMembershipRepository lock poisoned")
            .values()
            .filter(|m| m.status.is_active() && m.end_date >= from && m.end_date < to)
            .cloned()
            .collect();
        Ok(Self::sorted_desc(rows))
    }
}
