use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use blog_core::seed_defaults;
use blog_core::{Role, User};

pub mod stores;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("db_error: {0}")]
    Db(#[from] sqlx_core::Error),
    #[error("migrate_error: {0}")]
    Migrate(#[from] sqlx_core::migrate::MigrateError),
    #[error("password_hash_error: {0}")]
    PasswordHash(String),
    #[error("store_error: {0}")]
    Store(&'static str),
}

/// Schema lifecycle of the backing database.
#[async_trait]
pub trait SchemaManager: Send + Sync {
    /// Create-if-absent schema initialization.
    async fn ensure_created(&self) -> Result<(), SeedError>;
}

#[async_trait]
pub trait RoleStore: Send + Sync {
    /// True when at least one role of any name exists.
    async fn any_exists(&self) -> Result<bool, SeedError>;
    async fn create(&self, role: &Role) -> Result<(), SeedError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn exists_by_username(&self, username: &str) -> Result<bool, SeedError>;
    /// Persists `user` with `password` as its hashed credential.
    async fn create(&self, user: &User, password: &str) -> Result<(), SeedError>;
    async fn assign_role(&self, user: &User, role_name: &str) -> Result<(), SeedError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub role_created: bool,
    pub user_created: bool,
}

/// What a single seed invocation did. Failures are absorbed here instead of
/// propagating; the hosting process keeps serving either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    Completed(SeedReport),
    Failed(String),
}

/// Idempotently guarantees that the default admin role and account exist and
/// are linked. Runs once per process, at startup.
pub struct DatabaseSeeder<S, R, U> {
    schema: S,
    roles: R,
    users: U,
}

impl<S, R, U> DatabaseSeeder<S, R, U>
where
    S: SchemaManager,
    R: RoleStore,
    U: UserStore,
{
    pub fn new(schema: S, roles: R, users: U) -> Self {
        Self {
            schema,
            roles,
            users,
        }
    }

    pub async fn run(&self) -> SeedOutcome {
        match self.run_inner().await {
            Ok(report) => {
                tracing::info!(
                    event = "seed_finished",
                    role_created = report.role_created,
                    user_created = report.user_created,
                    "Seed task finished"
                );
                SeedOutcome::Completed(report)
            }
            Err(err) => {
                tracing::error!(event = "seed_failed", error = %err, "Error while seeding users and roles");
                SeedOutcome::Failed(err.to_string())
            }
        }
    }

    async fn run_inner(&self) -> Result<SeedReport, SeedError> {
        let mut report = SeedReport::default();

        self.schema.ensure_created().await?;

        let now = Utc::now();
        let admin_role = Role {
            id: Uuid::now_v7(),
            name: seed_defaults::ADMIN_ROLE.to_string(),
            created_at: now,
        };

        // First-boot check only: any existing role, not necessarily the admin
        // one, skips creation.
        if !self.roles.any_exists().await? {
            self.roles.create(&admin_role).await?;
            report.role_created = true;
            tracing::info!(event = "role_created", role = %admin_role.name, "Role created");
        }
        // Emitted on every run, including the one that just created the role.
        tracing::info!(
            event = "role_present",
            role = %admin_role.name,
            "No need to create role; role already exists"
        );

        if self
            .users
            .exists_by_username(seed_defaults::ADMIN_USERNAME)
            .await?
        {
            tracing::info!(
                event = "seed_skipped",
                username = seed_defaults::ADMIN_USERNAME,
                "Admin user already exists; nothing to seed"
            );
        } else {
            let now = Utc::now();
            let admin_user = User {
                id: Uuid::now_v7(),
                username: seed_defaults::ADMIN_USERNAME.to_string(),
                email: seed_defaults::ADMIN_EMAIL.to_string(),
                password_hash: None,
                full_name: None,
                birthdate: None,
                display_name: None,
                created_at: now,
                updated_at: now,
            };
            self.users
                .create(&admin_user, seed_defaults::ADMIN_PASSWORD)
                .await?;
            report.user_created = true;
            tracing::info!(event = "user_created", username = %admin_user.username, "User created");

            self.users
                .assign_role(&admin_user, &admin_role.name)
                .await?;
            tracing::info!(
                event = "role_assigned",
                username = %admin_user.username,
                role = %admin_role.name,
                "User added to role"
            );
        }

        Ok(report)
    }
}
