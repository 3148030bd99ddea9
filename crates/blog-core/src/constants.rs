pub mod seed_defaults {
    /// Login name of the account created on first boot.
    pub const ADMIN_USERNAME: &str = "admin";

    /// Email attached to the seeded account.
    pub const ADMIN_EMAIL: &str = "admin@blog.com";

    /// Name of the permission group the seeded account is assigned to.
    pub const ADMIN_ROLE: &str = "Admin";

    /// Placeholder credential for the seeded account. Operators are expected
    /// to rotate it immediately after first login.
    pub const ADMIN_PASSWORD: &str = "password";
}
