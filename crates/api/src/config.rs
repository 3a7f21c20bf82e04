//! Server configuration

/// Runtime configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Postgres connection string
    pub database_url: String,
    /// Payments platform endpoint
    pub payments_api_url: String,
    /// Payments platform API key
    pub payments_api_key: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            database_url: required("DATABASE_URL")?,
            payments_api_url: required("PAYMENTS_API_URL")?,
            payments_api_key: required("PAYMENTS_API_KEY")?,
        })
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    std::env::var(name).map_err(|_| anyhow::anyhow!("{name} must be set"))
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn set_required_vars() {
        std::env::set_var("DATABASE_URL", "postgres://localhost/tipjar");
        std::env::set_var("PAYMENTS_API_URL", "https://payments.example");
        std::env::set_var("PAYMENTS_API_KEY", "key_123");
    }

    #[test]
    #[serial]
    fn loads_with_defaults() {
        set_required_vars();
        std::env::remove_var("BIND_ADDRESS");

        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.payments_api_key, "key_123");
    }

    #[test]
    #[serial]
    fn missing_database_url_fails() {
        set_required_vars();
        std::env::remove_var("DATABASE_URL");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }
}
