//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::{
    auth_session::AuthSession,
    password_reset::PasswordReset,
    user::{Credentials, NewUser, User},
};
use crate::domain::repository::{
    AccessFilter, AuthSessionRepository, CredentialsRepository, PasswordResetRepository,
    RoleFilter, UserFilter, UserRepository,
};
use crate::domain::value_object::{
    access_state::AccessState, cpf::Cpf, user_password::StoredPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired sessions and reset grants
    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        let sessions = self.cleanup_expired_sessions().await?;
        let resets = self.cleanup_expired_resets().await?;

        tracing::info!(
            sessions_deleted = sessions,
            resets_deleted = resets,
            "Cleaned up expired auth rows"
        );

        Ok(sessions + resets)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let inserted = sqlx::query_as::<_, InsertedRow>(
            r#"
            INSERT INTO users (
                cpf,
                first_name,
                last_name,
                city,
                password_hash,
                salt,
                user_role,
                access_state
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, created_at
            "#,
        )
        .bind(user.cpf.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.city)
        .bind(user.password.hash_bytes())
        .bind(user.password.salt())
        .bind(user.role.id())
        .bind(user.access.id())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::CpfTaken,
            _ => AuthError::Database(e),
        })?;

        Ok(User {
            id: inserted.id,
            cpf: user.cpf.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            city: user.city.clone(),
            role: user.role,
            access: user.access,
            created_at: inserted.created_at,
        })
    }

    async fn find_by_cpf(&self, cpf: &Cpf) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                cpf,
                first_name,
                last_name,
                city,
                user_role,
                access_state,
                created_at
            FROM users
            WHERE cpf = $1
            "#,
        )
        .bind(cpf.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn update_role(&self, cpf: &Cpf, role: UserRole) -> AuthResult<bool> {
        let changed = sqlx::query(
            "UPDATE users SET user_role = $2, updated_at = now() WHERE cpf = $1 AND user_role != $2",
        )
        .bind(cpf.as_str())
        .bind(role.id())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(changed > 0)
    }

    async fn update_access(&self, cpf: &Cpf, access: AccessState) -> AuthResult<bool> {
        let changed = sqlx::query(
            "UPDATE users SET access_state = $2, updated_at = now() WHERE cpf = $1 AND access_state != $2",
        )
        .bind(cpf.as_str())
        .bind(access.id())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(changed > 0)
    }

    async fn list_filtered(&self, filter: &UserFilter) -> AuthResult<Vec<User>> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT
                id,
                cpf,
                first_name,
                last_name,
                city,
                user_role,
                access_state,
                created_at
            FROM users
            WHERE TRUE
            "#,
        );

        if let Some(search) = filter.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                let pattern = format!("%{}%", search);
                query
                    .push(" AND (first_name ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR last_name ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR cpf LIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
        }

        match filter.access {
            AccessFilter::All => {}
            AccessFilter::Granted => {
                query
                    .push(" AND access_state = ")
                    .push_bind(AccessState::Granted.id());
            }
            AccessFilter::Blocked => {
                query
                    .push(" AND access_state = ")
                    .push_bind(AccessState::Blocked.id());
            }
        }

        match filter.role {
            RoleFilter::All => {}
            RoleFilter::Admins => {
                query
                    .push(" AND user_role = ")
                    .push_bind(UserRole::Admin.id());
            }
            RoleFilter::Regular => {
                query
                    .push(" AND user_role = ")
                    .push_bind(UserRole::Regular.id());
            }
        }

        query.push(" ORDER BY created_at DESC");

        let rows = query
            .build_query_as::<UserRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }
}

// ============================================================================
// Credentials Repository Implementation
// ============================================================================

impl CredentialsRepository for PgAuthRepository {
    async fn find_credentials(&self, cpf: &Cpf) -> AuthResult<Option<Credentials>> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r#"
            SELECT
                id,
                cpf,
                password_hash,
                salt
            FROM users
            WHERE cpf = $1
            "#,
        )
        .bind(cpf.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_credentials()).transpose()
    }

    async fn update_credentials(&self, cpf: &Cpf, password: &StoredPassword) -> AuthResult<bool> {
        let changed = sqlx::query(
            "UPDATE users SET password_hash = $2, salt = $3, updated_at = now() WHERE cpf = $1",
        )
        .bind(cpf.as_str())
        .bind(password.hash_bytes())
        .bind(password.salt())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(changed > 0)
    }
}

// ============================================================================
// Auth Session Repository Implementation
// ============================================================================

impl AuthSessionRepository for PgAuthRepository {
    async fn create_session(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                user_id,
                cpf,
                user_role,
                expires_at_ms,
                created_at,
                last_activity_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session.session_id)
        .bind(session.user_id)
        .bind(session.cpf.as_str())
        .bind(session.role.id())
        .bind(session.expires_at_ms)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_session(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id,
                user_id,
                cpf,
                user_role,
                expires_at_ms,
                created_at,
                last_activity_at
            FROM auth_sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_session()).transpose()
    }

    async fn update_session(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE auth_sessions SET
                expires_at_ms = $2,
                last_activity_at = $3
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id)
        .bind(session.expires_at_ms)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired_sessions(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Password Reset Repository Implementation
// ============================================================================

impl PasswordResetRepository for PgAuthRepository {
    async fn create_reset(&self, reset: &PasswordReset) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO password_resets (
                token,
                cpf,
                expires_at_ms,
                used,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(reset.token)
        .bind(reset.cpf.as_str())
        .bind(reset.expires_at_ms)
        .bind(reset.used)
        .bind(reset.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_reset(&self, token: Uuid) -> AuthResult<Option<PasswordReset>> {
        let row = sqlx::query_as::<_, ResetRow>(
            r#"
            SELECT
                token,
                cpf,
                expires_at_ms,
                used,
                created_at
            FROM password_resets
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_reset()).transpose()
    }

    async fn mark_reset_used(&self, token: Uuid) -> AuthResult<bool> {
        // Guard on `used` so two concurrent redeems cannot both win
        let changed =
            sqlx::query("UPDATE password_resets SET used = TRUE WHERE token = $1 AND NOT used")
                .bind(token)
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(changed > 0)
    }

    async fn cleanup_expired_resets(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM password_resets WHERE expires_at_ms < $1 OR used")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct InsertedRow {
    id: i64,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    cpf: String,
    first_name: String,
    last_name: String,
    city: String,
    user_role: i16,
    access_state: i16,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let cpf = Cpf::new(&self.cpf)
            .map_err(|e| AuthError::Internal(format!("Invalid cpf in store: {}", e)))?;

        Ok(User {
            id: self.id,
            cpf,
            first_name: self.first_name,
            last_name: self.last_name,
            city: self.city,
            role: UserRole::from_id(self.user_role)
                .ok_or_else(|| AuthError::Internal(format!("Unknown role id {}", self.user_role)))?,
            access: AccessState::from_id(self.access_state).ok_or_else(|| {
                AuthError::Internal(format!("Unknown access id {}", self.access_state))
            })?,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    id: i64,
    cpf: String,
    password_hash: Vec<u8>,
    salt: Vec<u8>,
}

impl CredentialsRow {
    fn into_credentials(self) -> AuthResult<Credentials> {
        let cpf = Cpf::new(&self.cpf)
            .map_err(|e| AuthError::Internal(format!("Invalid cpf in store: {}", e)))?;

        let password = StoredPassword::from_parts(&self.password_hash, self.salt)
            .ok_or_else(|| AuthError::Internal("Malformed password hash in store".to_string()))?;

        Ok(Credentials {
            user_id: self.id,
            cpf,
            password,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: i64,
    cpf: String,
    user_role: i16,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> AuthResult<AuthSession> {
        let cpf = Cpf::new(&self.cpf)
            .map_err(|e| AuthError::Internal(format!("Invalid cpf in store: {}", e)))?;

        Ok(AuthSession {
            session_id: self.session_id,
            user_id: self.user_id,
            cpf,
            role: UserRole::from_id(self.user_role)
                .ok_or_else(|| AuthError::Internal(format!("Unknown role id {}", self.user_role)))?,
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ResetRow {
    token: Uuid,
    cpf: String,
    expires_at_ms: i64,
    used: bool,
    created_at: DateTime<Utc>,
}

impl ResetRow {
    fn into_reset(self) -> AuthResult<PasswordReset> {
        let cpf = Cpf::new(&self.cpf)
            .map_err(|e| AuthError::Internal(format!("Invalid cpf in store: {}", e)))?;

        Ok(PasswordReset {
            token: self.token,
            cpf,
            expires_at_ms: self.expires_at_ms,
            used: self.used,
            created_at: self.created_at,
        })
    }
}
