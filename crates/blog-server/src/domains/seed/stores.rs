use async_trait::async_trait;
use chrono::Utc;

use blog_core::{Role, User, UserRole};
use blog_db::repo::{RoleRepo, UserRepo, UserRoleRepo};
use blog_db::PgPool;

use super::{RoleStore, SchemaManager, SeedError, UserStore};
use crate::domains::auth::passwords;

pub struct PgSchemaManager {
    pool: PgPool,
}

impl PgSchemaManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaManager for PgSchemaManager {
    async fn ensure_created(&self) -> Result<(), SeedError> {
        blog_db::migrate(&self.pool).await?;
        Ok(())
    }
}

pub struct PgRoleStore {
    pool: PgPool,
}

impl PgRoleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for PgRoleStore {
    async fn any_exists(&self) -> Result<bool, SeedError> {
        Ok(RoleRepo::new(&self.pool).any_exists().await?)
    }

    async fn create(&self, role: &Role) -> Result<(), SeedError> {
        Ok(RoleRepo::new(&self.pool).create(role).await?)
    }
}

pub struct PgUserStore {
    pool: PgPool,
    password_pepper: String,
}

impl PgUserStore {
    pub fn new(pool: PgPool, password_pepper: String) -> Self {
        Self {
            pool,
            password_pepper,
        }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn exists_by_username(&self, username: &str) -> Result<bool, SeedError> {
        Ok(UserRepo::new(&self.pool).username_exists(username).await?)
    }

    async fn create(&self, user: &User, password: &str) -> Result<(), SeedError> {
        let password_hash = passwords::hash_password(password, &self.password_pepper)
            .map_err(|err| SeedError::PasswordHash(err.to_string()))?;
        let mut record = user.clone();
        record.password_hash = Some(password_hash);
        Ok(UserRepo::new(&self.pool).create(&record).await?)
    }

    async fn assign_role(&self, user: &User, role_name: &str) -> Result<(), SeedError> {
        let Some(role) = RoleRepo::new(&self.pool).get_by_name(role_name).await? else {
            return Err(SeedError::Store("role_not_found"));
        };
        let assignment = UserRole {
            user_id: user.id,
            role_id: role.id,
            created_at: Utc::now(),
        };
        Ok(UserRoleRepo::new(&self.pool).assign(&assignment).await?)
    }
}
