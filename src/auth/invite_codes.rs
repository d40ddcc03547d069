use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generates an opaque team invite code. Shown to the captain once at
/// creation; only the hash is persisted.
pub fn generate_invite_code() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn hash_invite_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.trim().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_invite_code_is_deterministic() {
        let code = "test-code";
        let first = hash_invite_code(code);
        let second = hash_invite_code(code);
        assert_eq!(first, second);
    }

    #[test]
    fn hash_invite_code_ignores_surrounding_whitespace() {
        assert_eq!(hash_invite_code(" abc "), hash_invite_code("abc"));
    }

    #[test]
    fn hash_invite_code_has_expected_length() {
        assert_eq!(hash_invite_code("test-code").len(), 64);
    }

    #[test]
    fn hash_invite_code_differs_for_different_codes() {
        assert_ne!(hash_invite_code("code-a"), hash_invite_code("code-b"));
    }

    #[test]
    fn generate_invite_code_returns_non_empty_value() {
        let code = generate_invite_code();
        assert!(!code.trim().is_empty());
    }
}
