use super::prelude::*;

pub struct RoleRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> RoleRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, role: &Role) -> Result<(), sqlx_core::Error> {
        query!(
            r#"
            INSERT INTO roles (id, name, created_at)
            VALUES ($1, $2, $3)
            "#,
            role.id,
            role.name.as_str(),
            role.created_at
        )
        .execute(self.pool)
        .await
        .map(|_| ())
    }

    /// True when the roles table holds at least one row of any name.
    pub async fn any_exists(&self) -> Result<bool, sqlx_core::Error> {
        query!("SELECT 1 FROM roles LIMIT 1")
            .fetch_optional(self.pool)
            .await
            .map(|row| row.is_some())
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Role>, sqlx_core::Error> {
        query_as!(
            Role,
            r#"
            SELECT id, name, created_at
            FROM roles
            WHERE name = $1
            "#,
            name
        )
        .fetch_optional(self.pool)
        .await
    }

    pub async fn count(&self) -> Result<i64, sqlx_core::Error> {
        query_scalar!(i64, "SELECT COUNT(*) FROM roles")
            .fetch_one(self.pool)
            .await
    }
}

pub struct UserRoleRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRoleRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn assign(&self, assignment: &UserRole) -> Result<(), sqlx_core::Error> {
        query!(
            r#"
            INSERT INTO user_roles (user_id, role_id, created_at)
            VALUES ($1, $2, $3)
            "#,
            assignment.user_id,
            assignment.role_id,
            assignment.created_at
        )
        .execute(self.pool)
        .await
        .map(|_| ())
    }

    pub async fn role_names_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<String>, sqlx_core::Error> {
        query_scalar!(
            String,
            r#"
            SELECT r.name
            FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.name
            "#,
            user_id
        )
        .fetch_all(self.pool)
        .await
    }
}
