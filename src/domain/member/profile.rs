//! Member profile entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Role, Timestamp, UserId, ValidationError};

/// A gym member as the lifecycle engine sees them.
///
/// Identity (credentials, sessions) lives with the external auth
/// collaborator; this record carries what attendance resolution,
/// notifications and PT entitlement need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    /// Stable id issued by the identity collaborator.
    pub user_id: UserId,

    /// Full display name.
    pub name: String,

    /// Human-readable member code printed on the gym card (e.g. "F3-0004").
    pub member_code: String,

    /// Contact email.
    pub email: String,

    /// Contact phone, digits with optional leading "+" country prefix.
    pub phone: String,

    /// Role at the gym.
    pub role: Role,

    /// Birth date, if collected (drives birthday greetings).
    pub date_of_birth: Option<NaiveDate>,

    /// Personal-training sessions still available to this member.
    pub pt_sessions_remaining: u32,

    /// When the member joined.
    pub joined_at: Timestamp,
}

impl MemberProfile {
    /// Creates a member profile, validating required contact fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        member_code: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        role: Role,
        date_of_birth: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let member_code = member_code.into();
        let email = email.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if member_code.trim().is_empty() {
            return Err(ValidationError::empty_field("member_code"));
        }
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "missing @ symbol"));
        }

        Ok(Self {
            user_id,
            name,
            member_code,
            email,
            phone: phone.into(),
            role,
            date_of_birth,
            pt_sessions_remaining: 0,
            joined_at: Timestamp::now(),
        })
    }

    /// Grants PT sessions additively (plan entitlements stack).
    pub fn grant_pt_sessions(&mut self, sessions: u32) {
        self.pt_sessions_remaining += sessions;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> MemberProfile {
        MemberProfile::new(
            UserId::new("user-1").unwrap(),
            "Asha Rao",
            "F3-0004",
            "asha@example.com",
            "+919812345678",
            Role::Member,
            None,
        )
        .unwrap()
    }

    #[test]
    fn new_member_has_no_pt_sessions() {
        assert_eq!(member().pt_sessions_remaining, 0);
    }

    #[test]
    fn pt_sessions_stack_across_grants() {
        let mut m = member();
        m.grant_pt_sessions(12);
        m.grant_pt_sessions(4);
        assert_eq!(m.pt_sessions_remaining, 16);
    }

    #[test]
    fn rejects_email_without_at() {
        let result = MemberProfile::new(
            UserId::new("user-2").unwrap(),
            "Bad Email",
            "F3-0005",
            "not-an-email",
            "",
            Role::Member,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_blank_member_code() {
        let result = MemberProfile::new(
            UserId::new("user-3").unwrap(),
            "No Code",
            " ",
            "x@example.com",
            "",
            Role::Member,
            None,
        );
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }
}
