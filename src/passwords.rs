use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use thiserror::Error;

pub const DEFAULT_MEM_KIB: u32 = 65536;
pub const DEFAULT_ITERATIONS: u32 = 2;
pub const DEFAULT_LANES: u32 = 1;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Invalid argon2 parameters: {0}")]
    InvalidParams(String),

    #[error("Password must be between {min} and {max} characters")]
    InvalidLength { min: usize, max: usize },

    #[error("Failed to hash password: {0}")]
    HashingFailed(String),

    #[error("Failed to parse password hash: {0}")]
    InvalidHash(String),
}

pub type Result<T> = std::result::Result<T, PasswordError>;

/// Argon2id hashing with bounded password lengths.
#[derive(Clone)]
pub struct Passwords {
    a2: Argon2<'static>,
    min_len: usize,
    max_len: usize,
}

impl Passwords {
    pub fn new(mem_kib: u32, iters: u32, lanes: u32) -> Result<Self> {
        let params = Params::new(mem_kib, iters, lanes, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;
        let a2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        Ok(Self {
            a2,
            min_len: 8,
            max_len: 512,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_MEM_KIB, DEFAULT_ITERATIONS, DEFAULT_LANES)
    }

    pub fn hash(&self, password: &str) -> Result<String> {
        self.guard_length(password)?;
        let salt = SaltString::generate(&mut OsRng);
        let phc = self
            .a2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
        Ok(phc.to_string())
    }

    pub fn verify(&self, password: &str, pw_hash: &str) -> Result<bool> {
        let parsed =
            PasswordHash::new(pw_hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;
        Ok(self
            .a2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    pub fn guard_length(&self, s: &str) -> Result<()> {
        let len = s.chars().count();
        if len < self.min_len || len > self.max_len {
            return Err(PasswordError::InvalidLength {
                min: self.min_len,
                max: self.max_len,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passwords() -> Passwords {
        Passwords::new(1024, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_and_verify_ok() {
        let passwords = passwords();
        let h = passwords.hash("superstrong").unwrap();
        assert!(h.starts_with("$argon2id$"));
        assert!(passwords.verify("superstrong", &h).unwrap());
        assert!(!passwords.verify("superweak!", &h).unwrap());
    }

    #[test]
    fn test_invalid_hash() {
        let result = passwords().verify("superstrong", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::InvalidHash(_))));
    }

    #[test]
    fn test_length_bounds() {
        let passwords = passwords();
        assert!(matches!(
            passwords.hash("short"),
            Err(PasswordError::InvalidLength { min: 8, max: 512 })
        ));
        assert!(passwords.hash(&"x".repeat(513)).is_err());
    }

    #[test]
    fn test_invalid_params() {
        assert!(matches!(
            Passwords::new(1, 0, 0),
            Err(PasswordError::InvalidParams(_))
        ));
    }
}
