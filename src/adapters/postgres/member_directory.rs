//! PostgreSQL implementation of MemberDirectory.
//!
//! Case-insensitive lookups lower both sides in SQL; the stored values
//! keep their original casing for display.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use super::db_error;
use crate::domain::foundation::{DomainError, ErrorCode, Role, Timestamp, UserId};
use crate::domain::member::MemberProfile;
use crate::ports::MemberDirectory;

pub struct PostgresMemberDirectory {
    pool: PgPool,
}

impl PostgresMemberDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_by(
        &self,
        condition: &str,
        value: &str,
    ) -> Result<Option<MemberProfile>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM member_profiles WHERE {}",
            SELECT_COLUMNS, condition
        ))
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find member", e))?;

        row.map(MemberProfile::try_from).transpose()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    user_id: String,
    name: String,
    member_code: String,
    email: String,
    phone: String,
    role: String,
    date_of_birth: Option<NaiveDate>,
    pt_sessions_remaining: i32,
    joined_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for MemberProfile {
    type Error = DomainError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let pt_sessions_remaining = u32::try_from(row.pt_sessions_remaining).map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid pt_sessions_remaining: {}", row.pt_sessions_remaining),
            )
        })?;

        Ok(MemberProfile {
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            name: row.name,
            member_code: row.member_code,
            email: row.email,
            phone: row.phone,
            role: parse_role(&row.role)?,
            date_of_birth: row.date_of_birth,
            pt_sessions_remaining,
            joined_at: Timestamp::from_datetime(row.joined_at),
        })
    }
}

fn parse_role(s: &str) -> Result<Role, DomainError> {
    match s.to_lowercase().as_str() {
        "member" => Ok(Role::Member),
        "trainer" => Ok(Role::Trainer),
        "admin" => Ok(Role::Admin),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid role value: {}", s),
        )),
    }
}

fn role_to_string(role: &Role) -> &'static str {
    match role {
        Role::Member => "member",
        Role::Trainer => "trainer",
        Role::Admin => "admin",
    }
}

const SELECT_COLUMNS: &str = "user_id, name, member_code, email, phone, role, \
     date_of_birth, pt_sessions_remaining, joined_at";

#[async_trait]
impl MemberDirectory for PostgresMemberDirectory {
    async fn save(&self, profile: &MemberProfile) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO member_profiles (
                user_id, name, member_code, email, phone, role,
                date_of_birth, pt_sessions_remaining, joined_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(profile.user_id.as_str())
        .bind(&profile.name)
        .bind(&profile.member_code)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(role_to_string(&profile.role))
        .bind(profile.date_of_birth)
        .bind(profile.pt_sessions_remaining as i32)
        .bind(profile.joined_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("member_profiles_member_code_key") {
                    return DomainError::new(
                        ErrorCode::ValidationFailed,
                        "Member code already in use",
                    );
                }
            }
            db_error("Failed to save member profile", e)
        })?;

        Ok(())
    }

    async fn update(&self, profile: &MemberProfile) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE member_profiles SET
                name = $2,
                member_code = $3,
                email = $4,
                phone = $5,
                role = $6,
                date_of_birth = $7,
                pt_sessions_remaining = $8
            WHERE user_id = $1
            "#,
        )
        .bind(profile.user_id.as_str())
        .bind(&profile.name)
        .bind(&profile.member_code)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(role_to_string(&profile.role))
        .bind(profile.date_of_birth)
        .bind(profile.pt_sessions_remaining as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update member profile", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::MemberNotFound,
                "Member not found",
            ));
        }

        Ok(())
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<MemberProfile>, DomainError> {
        self.fetch_one_by("user_id = $1", user_id.as_str()).await
    }

    async fn find_by_member_code(
        &self,
        code: &str,
    ) -> Result<Option<MemberProfile>, DomainError> {
        self.fetch_one_by("member_code = $1", code).await
    }

    async fn find_by_member_code_ci(
        &self,
        code: &str,
    ) -> Result<Option<MemberProfile>, DomainError> {
        self.fetch_one_by("LOWER(member_code) = LOWER($1)", code)
            .await
    }

    async fn find_by_email_ci(&self, email: &str) -> Result<Option<MemberProfile>, DomainError> {
        self.fetch_one_by("LOWER(email) = LOWER($1)", email).await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<MemberProfile>, DomainError> {
        self.fetch_one_by("phone = $1", phone).await
    }

    async fn find_by_name_ci(&self, name: &str) -> Result<Option<MemberProfile>, DomainError> {
        let rows: Vec<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM member_profiles WHERE LOWER(name) = LOWER($1) LIMIT 2",
            SELECT_COLUMNS
        ))
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find member by name", e))?;

        // Ambiguous names resolve to nothing; the caller falls through to
        // the partial-match search.
        if rows.len() != 1 {
            return Ok(None);
        }
        rows.into_iter()
            .next()
            .map(MemberProfile::try_from)
            .transpose()
    }

    async fn search_by_name_ci(&self, needle: &str) -> Result<Vec<MemberProfile>, DomainError> {
        let pattern = format!("%{}%", needle.to_lowercase());
        let rows: Vec<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM member_profiles WHERE LOWER(name) LIKE $1",
            SELECT_COLUMNS
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to search members", e))?;

        rows.into_iter().map(MemberProfile::try_from).collect()
    }

    async fn list_members(&self) -> Result<Vec<MemberProfile>, DomainError> {
        let rows: Vec<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM member_profiles WHERE role = 'member' ORDER BY joined_at ASC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list members", e))?;

        rows.into_iter().map(MemberProfile::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_strings_roundtrip() {
        for role in [Role::Member, Role::Trainer, Role::Admin] {
            let parsed = parse_role(role_to_string(&role)).unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn parse_role_rejects_invalid_values() {
        assert!(parse_role("owner").is_err());
        assert!(parse_role("").is_err());
    }

    #[test]
    fn negative_pt_sessions_is_rejected() {
        let row = MemberRow {
            user_id: "u-1".to_string(),
            name: "Arun".to_string(),
            member_code: "M001".to_string(),
            email: "arun@example.com".to_string(),
            phone: "+919876543210".to_string(),
            role: "member".to_string(),
            date_of_birth: None,
            pt_sessions_remaining: -1,
            joined_at: Utc::now(),
        };
        assert!(MemberProfile::try_from(row).is_err());
    }
}
