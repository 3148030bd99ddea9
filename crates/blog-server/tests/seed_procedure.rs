use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use blog_core::{seed_defaults, Role, User};
use blog_server::seed::{
    DatabaseSeeder, RoleStore, SchemaManager, SeedError, SeedOutcome, SeedReport, UserStore,
};

#[derive(Default)]
struct FakeDbInner {
    schema_created: bool,
    roles: Vec<Role>,
    users: Vec<User>,
    passwords: Vec<(String, String)>,
    assignments: Vec<(String, String)>,
}

#[derive(Default)]
struct FakeDb {
    inner: Mutex<FakeDbInner>,
    fail_schema: bool,
    fail_user_create: bool,
}

impl FakeDb {
    fn lock(&self) -> MutexGuard<'_, FakeDbInner> {
        self.inner.lock().expect("fake db lock")
    }
}

#[derive(Clone)]
struct FakeStore(Arc<FakeDb>);

#[async_trait]
impl SchemaManager for FakeStore {
    async fn ensure_created(&self) -> Result<(), SeedError> {
        if self.0.fail_schema {
            return Err(SeedError::Store("schema_unavailable"));
        }
        self.0.lock().schema_created = true;
        Ok(())
    }
}

#[async_trait]
impl RoleStore for FakeStore {
    async fn any_exists(&self) -> Result<bool, SeedError> {
        Ok(!self.0.lock().roles.is_empty())
    }

    async fn create(&self, role: &Role) -> Result<(), SeedError> {
        self.0.lock().roles.push(role.clone());
        Ok(())
    }
}

#[async_trait]
impl UserStore for FakeStore {
    async fn exists_by_username(&self, username: &str) -> Result<bool, SeedError> {
        Ok(self
            .0
            .lock()
            .users
            .iter()
            .any(|user| user.username == username))
    }

    async fn create(&self, user: &User, password: &str) -> Result<(), SeedError> {
        if self.0.fail_user_create {
            return Err(SeedError::Store("user_store_down"));
        }
        let mut inner = self.0.lock();
        inner.users.push(user.clone());
        inner
            .passwords
            .push((user.username.clone(), password.to_string()));
        Ok(())
    }

    async fn assign_role(&self, user: &User, role_name: &str) -> Result<(), SeedError> {
        let mut inner = self.0.lock();
        if !inner.roles.iter().any(|role| role.name == role_name) {
            return Err(SeedError::Store("role_not_found"));
        }
        inner
            .assignments
            .push((user.username.clone(), role_name.to_string()));
        Ok(())
    }
}

fn seeder(db: &Arc<FakeDb>) -> DatabaseSeeder<FakeStore, FakeStore, FakeStore> {
    DatabaseSeeder::new(
        FakeStore(db.clone()),
        FakeStore(db.clone()),
        FakeStore(db.clone()),
    )
}

fn existing_role(name: &str) -> Role {
    Role {
        id: Uuid::now_v7(),
        name: name.to_string(),
        created_at: Utc::now(),
    }
}

fn existing_user(username: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        username: username.to_string(),
        email: format!("{username}@blog.com"),
        password_hash: Some("$argon2id$stub".to_string()),
        full_name: None,
        birthdate: None,
        display_name: None,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn fresh_store_gets_admin_role_user_and_link() {
    let db = Arc::new(FakeDb::default());

    let outcome = seeder(&db).run().await;

    assert_eq!(
        outcome,
        SeedOutcome::Completed(SeedReport {
            role_created: true,
            user_created: true,
        })
    );
    let inner = db.lock();
    assert!(inner.schema_created);
    assert_eq!(inner.roles.len(), 1);
    assert_eq!(inner.roles[0].name, seed_defaults::ADMIN_ROLE);
    assert_eq!(inner.users.len(), 1);
    assert_eq!(inner.users[0].username, seed_defaults::ADMIN_USERNAME);
    assert_eq!(inner.users[0].email, seed_defaults::ADMIN_EMAIL);
    assert_eq!(
        inner.passwords,
        vec![(
            seed_defaults::ADMIN_USERNAME.to_string(),
            seed_defaults::ADMIN_PASSWORD.to_string()
        )]
    );
    assert_eq!(
        inner.assignments,
        vec![(
            seed_defaults::ADMIN_USERNAME.to_string(),
            seed_defaults::ADMIN_ROLE.to_string()
        )]
    );
}

#[tokio::test]
async fn second_run_creates_nothing() {
    let db = Arc::new(FakeDb::default());
    let seeder = seeder(&db);

    let first = seeder.run().await;
    let second = seeder.run().await;

    assert!(matches!(first, SeedOutcome::Completed(_)));
    assert_eq!(
        second,
        SeedOutcome::Completed(SeedReport {
            role_created: false,
            user_created: false,
        })
    );
    let inner = db.lock();
    assert_eq!(inner.roles.len(), 1);
    assert_eq!(inner.users.len(), 1);
    assert_eq!(inner.assignments.len(), 1);
}

// The role branch tests "any role exists", not "the admin role exists". A
// store holding only an unrelated role therefore never gets the admin role,
// and the later assignment fails against the missing role.
#[tokio::test]
async fn unrelated_existing_role_blocks_admin_role_creation() {
    let db = Arc::new(FakeDb::default());
    db.lock().roles.push(existing_role("Editor"));

    let outcome = seeder(&db).run().await;

    let inner = db.lock();
    assert!(!inner
        .roles
        .iter()
        .any(|role| role.name == seed_defaults::ADMIN_ROLE));
    // The user branch still ran; its partial work stays.
    assert_eq!(inner.users.len(), 1);
    assert!(inner.assignments.is_empty());
    assert!(matches!(outcome, SeedOutcome::Failed(_)));
}

#[tokio::test]
async fn user_create_failure_is_absorbed_and_role_persists() {
    let db = Arc::new(FakeDb {
        fail_user_create: true,
        ..FakeDb::default()
    });

    let outcome = seeder(&db).run().await;

    assert!(matches!(outcome, SeedOutcome::Failed(_)));
    let inner = db.lock();
    // No rollback across steps: the role created in the same run stays.
    assert_eq!(inner.roles.len(), 1);
    assert_eq!(inner.roles[0].name, seed_defaults::ADMIN_ROLE);
    assert!(inner.users.is_empty());
    assert!(inner.assignments.is_empty());
}

#[tokio::test]
async fn existing_admin_user_is_left_untouched() {
    let db = Arc::new(FakeDb::default());
    {
        let mut inner = db.lock();
        inner.roles.push(existing_role(seed_defaults::ADMIN_ROLE));
        inner.users.push(existing_user(seed_defaults::ADMIN_USERNAME));
    }

    let outcome = seeder(&db).run().await;

    assert_eq!(
        outcome,
        SeedOutcome::Completed(SeedReport {
            role_created: false,
            user_created: false,
        })
    );
    let inner = db.lock();
    assert_eq!(inner.users.len(), 1);
    assert!(inner.passwords.is_empty());
    // No assignment is made for a pre-existing user.
    assert!(inner.assignments.is_empty());
}

#[tokio::test]
async fn schema_failure_stops_the_run() {
    let db = Arc::new(FakeDb {
        fail_schema: true,
        ..FakeDb::default()
    });

    let outcome = seeder(&db).run().await;

    assert!(matches!(outcome, SeedOutcome::Failed(_)));
    let inner = db.lock();
    assert!(!inner.schema_created);
    assert!(inner.roles.is_empty());
    assert!(inner.users.is_empty());
}
