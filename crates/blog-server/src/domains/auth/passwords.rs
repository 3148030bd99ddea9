use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hashes `password` into a PHC string. The pepper is appended before hashing
/// and must be identical at verification time.
pub fn hash_password(password: &str, pepper: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(peppered(password, pepper).as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

pub fn verify_password(
    stored: &str,
    password: &str,
    pepper: &str,
) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(stored)?;
    Ok(Argon2::default()
        .verify_password(peppered(password, pepper).as_bytes(), &parsed)
        .is_ok())
}

fn peppered(password: &str, pepper: &str) -> String {
    format!("{password}{pepper}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("password", "pepper").expect("hash");
        assert!(verify_password(&hash, "password", "pepper").expect("verify"));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let hash = hash_password("password", "pepper").expect("hash");
        assert!(!verify_password(&hash, "passw0rd", "pepper").expect("verify"));
    }

    #[test]
    fn pepper_mismatch_is_rejected() {
        let hash = hash_password("password", "pepper").expect("hash");
        assert!(!verify_password(&hash, "password", "").expect("verify"));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let first = hash_password("password", "").expect("hash");
        let second = hash_password("password", "").expect("hash");
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(verify_password("not-a-phc-string", "password", "").is_err());
    }
}
