//! Member directory port.
//!
//! Profile persistence plus the identifier lookups the attendance desk
//! needs. Case-insensitive methods compare after lowercasing; phone
//! lookup is exact against the stored string, callers expand variants
//! with [`crate::domain::attendance::phone_variants`].

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::member::MemberProfile;

#[async_trait]
pub trait MemberDirectory: Send + Sync {
    async fn save(&self, profile: &MemberProfile) -> Result<(), DomainError>;

    /// Update an existing profile (PT session grants).
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the row does not exist
    async fn update(&self, profile: &MemberProfile) -> Result<(), DomainError>;

    async fn find_by_user_id(&self, user_id: &UserId)
        -> Result<Option<MemberProfile>, DomainError>;

    /// Exact member-code match, case-sensitive.
    async fn find_by_member_code(&self, code: &str)
        -> Result<Option<MemberProfile>, DomainError>;

    /// Member-code match after lowercasing both sides.
    async fn find_by_member_code_ci(
        &self,
        code: &str,
    ) -> Result<Option<MemberProfile>, DomainError>;

    /// Email match after lowercasing both sides.
    async fn find_by_email_ci(&self, email: &str)
        -> Result<Option<MemberProfile>, DomainError>;

    /// Exact match against the stored phone string.
    async fn find_by_phone(&self, phone: &str) -> Result<Option<MemberProfile>, DomainError>;

    /// Full-name match after lowercasing both sides. `None` when zero or
    /// several members share the name.
    async fn find_by_name_ci(&self, name: &str) -> Result<Option<MemberProfile>, DomainError>;

    /// Profiles whose lowercased name contains the lowercased needle,
    /// unordered; callers sort for determinism.
    async fn search_by_name_ci(&self, needle: &str)
        -> Result<Vec<MemberProfile>, DomainError>;

    /// Every member-role profile, for the absentee report.
    async fn list_members(&self) -> Result<Vec<MemberProfile>, DomainError>;
}
