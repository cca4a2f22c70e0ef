//! Authenticated principal vocabulary.
//!
//! The identity collaborator (external middleware) validates credentials and
//! hands the core an authenticated `Principal`. These are **domain types**
//! with no provider dependencies; the core trusts them for authorization
//! decisions and enforces role/ownership checks at the entry of every
//! mutating operation.

use serde::{Deserialize, Serialize};

use super::{DomainError, ErrorCode, UserId};

/// Role assigned by the identity collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Member,
    Trainer,
    Admin,
}

/// Authenticated caller, injected by external auth middleware.
#[derive(Debug, Clone)]
pub struct Principal {
    /// Stable user id from the identity collaborator.
    pub user_id: UserId,

    /// Role used for authorization decisions.
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Requires the admin role, failing with `Forbidden` otherwise.
    pub fn require_admin(&self) -> Result<(), DomainError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Administrator role required",
            )
            .with_detail("user_id", self.user_id.to_string()))
        }
    }

    /// Requires that the caller is an admin or owns the resource.
    ///
    /// Members may only read their own records; admins may read any.
    pub fn require_self_or_admin(&self, owner: &UserId) -> Result<(), DomainError> {
        if self.is_admin() || &self.user_id == owner {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Access restricted to the record owner",
            )
            .with_detail("user_id", self.user_id.to_string())
            .with_detail("owner_id", owner.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(id: &str, role: Role) -> Principal {
        Principal::new(UserId::new(id).unwrap(), role)
    }

    #[test]
    fn admin_passes_require_admin() {
        assert!(principal("admin-1", Role::Admin).require_admin().is_ok());
    }

    #[test]
    fn member_fails_require_admin() {
        let err = principal("member-1", Role::Member)
            .require_admin()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[test]
    fn member_reads_own_records() {
        let p = principal("member-1", Role::Member);
        let owner = UserId::new("member-1").unwrap();
        assert!(p.require_self_or_admin(&owner).is_ok());
    }

    #[test]
    fn member_cannot_read_other_records() {
        let p = principal("member-1", Role::Member);
        let other = UserId::new("member-2").unwrap();
        assert!(p.require_self_or_admin(&other).is_err());
    }

    #[test]
    fn admin_reads_any_record() {
        let p = principal("admin-1", Role::Admin);
        let other = UserId::new("member-2").unwrap();
        assert!(p.require_self_or_admin(&other).is_ok());
    }
}
