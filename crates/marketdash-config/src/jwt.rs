use std::time::Duration;

use crate::error::ConfigError;
use crate::source::{duration_or, required};

/// Shortest HMAC key accepted for HS256.
pub const MIN_SECRET_LEN: usize = 32;

/// Longest token lifetime accepted.
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub token_ttl: Duration,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, token_ttl: Duration) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::invalid(
                "JWT_SECRET",
                "<redacted>",
                format!("must be at least {MIN_SECRET_LEN} bytes"),
            ));
        }
        if token_ttl > MAX_TOKEN_TTL {
            return Err(ConfigError::invalid(
                "TOKEN_DURATION",
                &format!("{}s", token_ttl.as_secs()),
                "must be at most 365d",
            ));
        }
        Ok(Self { secret, token_ttl })
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = required(lookup, "JWT_SECRET")?;
        let token_ttl = duration_or(lookup, "TOKEN_DURATION", Duration::from_secs(24 * 60 * 60))?;
        Self::new(secret, token_ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::parse_duration;
    use crate::source::tests::env_of;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_year_long_ttl_is_accepted() {
        assert!(JwtConfig::new(SECRET, MAX_TOKEN_TTL).is_ok());
    }

    #[test]
    fn test_oversized_ttl_is_rejected() {
        let huge = parse_duration("100000000d").unwrap();
        let err = JwtConfig::new(SECRET, huge).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "TOKEN_DURATION", .. }));

        let env = env_of(&[("JWT_SECRET", SECRET), ("TOKEN_DURATION", "366d")]);
        assert!(JwtConfig::from_lookup(&env).is_err());
    }
}
