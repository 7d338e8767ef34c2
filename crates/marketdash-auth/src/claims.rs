//! JWT claim set carried by access tokens.

use serde::{Deserialize, Serialize};

/// Claims embedded in an access token.
///
/// Everything is kept as plain strings and integers here; turning them into
/// typed values happens in [`crate::identity`], where a malformed claim is an
/// error instead of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    pub role: String,
    /// Issued-at, Unix seconds
    pub iat: i64,
    /// Expiry, Unix seconds
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let claims = Claims {
            sub: "8d3c8a4e-2c57-4e55-8a8a-0a4f3b2a9d11".to_string(),
            email: "test@example.com".to_string(),
            role: "admin".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_086_400,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""role":"admin""#));
        assert!(serialized.contains(r#""exp":1700086400"#));
    }

    #[test]
    fn test_claims_require_all_fields() {
        let json = r#"{"sub":"x","email":"a@b.c","iat":1,"exp":2}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }
}
