//! In-memory member directory.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, Role, UserId};
use crate::domain::member::MemberProfile;
use crate::ports::MemberDirectory;

#[derive(Default)]
pub struct InMemoryMemberDirectory {
    profiles: RwLock<HashMap<UserId, MemberProfile>>,
}

impl InMemoryMemberDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, profile: MemberProfile) {
        self.profiles
            .write()
            .expect("InMemoryMemberDirectory lock poisoned")
            .insert(profile.user_id.clone(), profile);
    }

    fn all(&self) -> Vec<MemberProfile> {
        self.profiles
            .read()
            .expect("InMemoryMemberDirectory lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    fn find_one(
        &self,
        pred: impl Fn(&MemberProfile) -> bool,
    ) -> Result<Option<MemberProfile>, DomainError> {
        Ok(self.all().into_iter().find(|p| pred(p)))
    }
}

#[async_trait]
impl MemberDirectory for InMemoryMemberDirectory {
    async fn save(&self, profile: &MemberProfile) -> Result<(), DomainError> {
        self.profiles
            .write()
            .expect("InMemoryMemberDirectory lock poisoned")
            .insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &MemberProfile) -> Result<(), DomainError> {
        let mut rows = self
            .profiles
            .write()
            .expect("InMemoryMemberDirectory lock poisoned");
        if !rows.contains_key(&profile.user_id) {
            return Err(DomainError::new(
                ErrorCode::MemberNotFound,
                format!("member not found: {}", profile.user_id),
            ));
        }
        rows.insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<MemberProfile>, DomainError> {
        Ok(self
            .profiles
            .read()
            .expect("InMemoryMemberDirectory lock poisoned")
            .get(user_id)
            .cloned())
    }

    async fn find_by_member_code(
        &self,
        code: &str,
    ) -> Result<Option<MemberProfile>, DomainError> {
        self.find_one(|p| p.member_code == code)
    }

    async fn find_by_member_code_ci(
        &self,
        code: &str,
    ) -> Result<Option<MemberProfile>, DomainError> {
        let needle = code.to_lowercase();
        self.find_one(|p| p.member_code.to_lowercase() == needle)
    }

    async fn find_by_email_ci(
        &self,
        email: &str,
    ) -> Result<Option<MemberProfile>, DomainError> {
        let needle = email.to_lowercase();
        self.find_one(|p| p.email.to_lowercase() == needle)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<MemberProfile>, DomainError> {
        self.find_one(|p| p.phone == phone)
    }

    async fn find_by_name_ci(&self, name: &str) -> Result<Option<MemberProfile>, DomainError> {
        let needle = name.trim().to_lowercase();
        let matches: Vec<MemberProfile> = self
            .all()
            .into_iter()
            .filter(|p| p.name.trim().to_lowercase() == needle)
            .collect();
        if matches.len() == 1 {
            Ok(matches.into_iter().next())
        } else {
            Ok(None)
        }
    }

    async fn search_by_name_ci(
        &self,
        needle: &str,
    ) -> Result<Vec<MemberProfile>, DomainError> {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .all()
            .into_iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect())
    }

    async fn list_members(&self) -> Result<Vec<MemberProfile>, DomainError> {
        let mut rows: Vec<MemberProfile> = self
            .all()
            .into_iter()
            .filter(|p| p.role == Role::Member)
            .collect();
        rows.sort_by(|a, b| a.user_id.as_str().cmp(b.user_id.as_str()));
        Ok(rows)
    }
}
