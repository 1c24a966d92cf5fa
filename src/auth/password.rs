use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use regex::Regex;
use tracing::error;

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Password rules: 8 to 30 chars with at least one uppercase letter, one
/// lowercase letter, one digit and one non-alphanumeric character.
pub fn is_valid_password(password: &str) -> bool {
    lazy_static! {
        static ref UPPER_RE: Regex = Regex::new(r"[A-Z]").unwrap();
        static ref LOWER_RE: Regex = Regex::new(r"[a-z]").unwrap();
        static ref DIGIT_RE: Regex = Regex::new(r"[0-9]").unwrap();
        static ref SPECIAL_RE: Regex = Regex::new(r"[^A-Za-z0-9]").unwrap();
    }

    let len = password.chars().count();
    if !(8..=30).contains(&len) {
        return false;
    }

    UPPER_RE.is_match(password)
        && LOWER_RE.is_match(password)
        && DIGIT_RE.is_match(password)
        && SPECIAL_RE.is_match(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "Correct-h0rse-Battery";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn each_hash_gets_its_own_salt() {
        let a = hash_password("Same-Passw0rd!").expect("hash a");
        let b = hash_password("Same-Passw0rd!").expect("hash b");
        assert_ne!(a, b);
    }

    #[test]
    fn policy_rejects_missing_character_classes() {
        // no uppercase, no special char
        assert!(!is_valid_password("abc12345"));
        assert!(!is_valid_password("ABC12345!"));
        assert!(!is_valid_password("Abcdefgh!"));
        assert!(!is_valid_password("Abc12345"));
    }

    #[test]
    fn policy_enforces_length_bounds() {
        assert!(!is_valid_password("Ab1!"));
        let long = format!("Ab1!{}", "x".repeat(27));
        assert_eq!(long.len(), 31);
        assert!(!is_valid_password(&long));
        let max = format!("Ab1!{}", "x".repeat(26));
        assert!(is_valid_password(&max));
    }

    #[test]
    fn policy_accepts_well_formed_passwords() {
        assert!(is_valid_password("Abc123!@"));
        assert!(is_valid_password("Secur3P@ssw0rd"));
    }
}
