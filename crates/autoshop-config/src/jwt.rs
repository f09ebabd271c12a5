use std::env;

const DEV_ACCESS_SECRET: &str = "autoshop-dev-access-secret-change-me";
const DEV_REFRESH_SECRET: &str = "autoshop-dev-refresh-secret-change-me";

/// Access and refresh tokens are signed with different secrets so one can
/// never be presented in place of the other.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub refresh_secret: String,
    /// Seconds.
    pub access_token_expiry: i64,
    /// Seconds.
    pub refresh_token_expiry: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEV_ACCESS_SECRET.to_string(),
            refresh_secret: DEV_REFRESH_SECRET.to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 604_800,
            issuer: "autoshop".to_string(),
        }
    }
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: env::var("JWT_SECRET").unwrap_or(defaults.secret),
            refresh_secret: env::var("JWT_REFRESH_SECRET").unwrap_or(defaults.refresh_secret),
            access_token_expiry: crate::env_or("JWT_ACCESS_EXPIRY", defaults.access_token_expiry),
            refresh_token_expiry: crate::env_or(
                "JWT_REFRESH_EXPIRY",
                defaults.refresh_token_expiry,
            ),
            issuer: env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }

    /// True while either secret is still a built-in development value.
    pub fn uses_dev_secrets(&self) -> bool {
        self.secret == DEV_ACCESS_SECRET || self.refresh_secret == DEV_REFRESH_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604_800);
        assert_ne!(config.secret, config.refresh_secret);
        assert!(config.uses_dev_secrets());
    }

    #[test]
    fn test_custom_secrets_are_not_dev() {
        let config = JwtConfig {
            secret: "a".into(),
            refresh_secret: "b".into(),
            ..JwtConfig::default()
        };
        assert!(!config.uses_dev_secrets());
    }
}
