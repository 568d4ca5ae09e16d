use crate::error::AppError;

/// Matches the cost the registration flow has always used.
pub const HASH_COST: u32 = 10;

/// One-way salted password hashing. Verification is constant-time inside
/// bcrypt.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: HASH_COST }
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AppError::InternalError(format!("password hashing failed: {}", e)))
    }

    pub fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AppError> {
        bcrypt::verify(password, password_hash)
            .map_err(|e| AppError::InternalError(format!("password verification failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(4);
        let hash = hasher.hash("correct horse").unwrap();

        assert!(hasher.verify("correct horse", &hash).unwrap());
        assert!(!hasher.verify("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        let hasher = PasswordHasher::new(4);
        let result = hasher.verify("anything", "not-a-bcrypt-hash");
        assert!(matches!(result, Err(AppError::InternalError(_))));
    }
}
