use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PasteConfig {
    /// Upper bound on `contents`, in bytes.
    pub max_contents_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt: JwtConfig,
    pub paste: PasteConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let database_max_connections = env_parse("DATABASE_MAX_CONNECTIONS").unwrap_or(10);
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "pastebin-api".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "pastebin-api-users".into()),
            ttl_minutes: env_parse("JWT_TTL_MINUTES").unwrap_or(60),
            refresh_ttl_minutes: env_parse("JWT_REFRESH_TTL_MINUTES").unwrap_or(60 * 24 * 14),
        };
        let paste = PasteConfig {
            max_contents_bytes: env_parse("PASTE_MAX_CONTENTS_BYTES").unwrap_or(1024 * 1024),
        };
        Ok(Self {
            database_url,
            database_max_connections,
            jwt,
            paste,
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_parse_ignores_garbage() {
        std::env::set_var("PASTEBIN_TEST_NOT_A_NUMBER", "twelve");
        assert_eq!(env_parse::<u32>("PASTEBIN_TEST_NOT_A_NUMBER"), None);
        std::env::set_var("PASTEBIN_TEST_A_NUMBER", "12");
        assert_eq!(env_parse::<u32>("PASTEBIN_TEST_A_NUMBER"), Some(12));
        assert_eq!(env_parse::<u32>("PASTEBIN_TEST_UNSET_VARIABLE"), None);
    }
}
