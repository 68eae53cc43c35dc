//! Postgres User Store

use crate::domain::entity::user::UserRecord;
use crate::domain::repository::UserStore;
use crate::domain::value_object::email::Email;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{IdentityError, IdentityResult};
use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    password_hash: String,
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
    avatar_ref: Option<String>,
    user_role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_record(self) -> IdentityResult<UserRecord> {
        let role = UserRole::from_code(&self.user_role).ok_or_else(|| {
            IdentityError::Internal(format!("unknown stored role '{}'", self.user_role))
        })?;
        let password_hash = HashedPassword::from_phc_string(self.password_hash)?;

        Ok(UserRecord {
            id: UserId::from(self.user_id),
            email: Email::from_db(self.email),
            password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            avatar_ref: self.avatar_ref,
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> IdentityResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, email, password_hash, first_name, last_name,
                   phone, avatar_ref, user_role, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_record).transpose()
    }

    async fn find_by_id(&self, user_id: &UserId) -> IdentityResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, email, password_hash, first_name, last_name,
                   phone, avatar_ref, user_role, created_at, updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(Uuid::from(*user_id))
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_record).transpose()
    }

    async fn save(&self, record: &UserRecord) -> IdentityResult<UserRecord> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (user_id, email, password_hash, first_name,
                               last_name, phone, avatar_ref, user_role,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (user_id) DO UPDATE SET
                email = EXCLUDED.email,
                password_hash = EXCLUDED.password_hash,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                phone = EXCLUDED.phone,
                avatar_ref = EXCLUDED.avatar_ref,
                user_role = EXCLUDED.user_role,
                updated_at = EXCLUDED.updated_at
            RETURNING user_id, email, password_hash, first_name, last_name,
                      phone, avatar_ref, user_role, created_at, updated_at
            "#,
        )
        .bind(Uuid::from(record.id))
        .bind(record.email.as_str())
        .bind(record.password_hash.as_phc_string())
        .bind(record.first_name.as_deref())
        .bind(record.last_name.as_deref())
        .bind(record.phone.as_deref())
        .bind(record.avatar_ref.as_deref())
        .bind(record.role.code())
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;

        row.into_record()
    }

    async fn delete_by_email(&self, email: &str) -> IdentityResult<()> {
        sqlx::query("DELETE FROM users WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
