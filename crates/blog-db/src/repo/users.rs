use super::prelude::*;

pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &User) -> Result<(), sqlx_core::Error> {
        query!(
            r#"
            INSERT INTO users (
                id,
                username,
                email,
                password_hash,
                full_name,
                birthdate,
                display_name,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
            user.id,
            user.username.as_str(),
            user.email.as_str(),
            user.password_hash.as_deref(),
            user.full_name.as_deref(),
            user.birthdate,
            user.display_name.as_deref(),
            user.created_at,
            user.updated_at
        )
        .execute(self.pool)
        .await
        .map(|_| ())
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, sqlx_core::Error> {
        query_as!(
            User,
            r#"
            SELECT
                id,
                username,
                email,
                password_hash,
                full_name,
                birthdate,
                display_name,
                created_at,
                updated_at
            FROM users
            WHERE username = $1
            "#,
            username
        )
        .fetch_optional(self.pool)
        .await
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool, sqlx_core::Error> {
        query!(
            r#"
            SELECT 1
            FROM users
            WHERE username = $1
            LIMIT 1
            "#,
            username
        )
        .fetch_optional(self.pool)
        .await
        .map(|row| row.is_some())
    }

    pub async fn count(&self) -> Result<i64, sqlx_core::Error> {
        query_scalar!(i64, "SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await
    }

    pub async fn update_password_hash(
        &self,
        user_id: Uuid,
        password_hash: Option<&str>,
    ) -> Result<u64, sqlx_core::Error> {
        query!(
            r#"
            UPDATE users
            SET password_hash = $2,
                updated_at = $3
            WHERE id = $1
            "#,
            user_id,
            password_hash,
            Utc::now()
        )
        .execute(self.pool)
        .await
        .map(|result| result.rows_affected())
    }
}
