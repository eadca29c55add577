use std::env;

use semestra_core::{AppError, AppResult};

/// Connection settings for the storage adapters.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    /// PostgreSQL connection string for the record store.
    pub database_url: String,
    /// Redis connection string for the selection store.
    pub redis_url: String,
    /// Key prefix namespacing persisted term selections.
    pub selection_key_prefix: String,
}

impl StorageSettings {
    /// Loads settings from the environment, reading a `.env` file when present.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: required_env("DATABASE_URL")?,
            redis_url: required_env("REDIS_URL")?,
            selection_key_prefix: env::var("SELECTION_KEY_PREFIX")
                .unwrap_or_else(|_| "semestra:selection".to_owned()),
        })
    }
}

fn required_env(name: &str) -> AppResult<String> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} must be set")))
}

#[cfg(test)]
mod tests {
    use super::required_env;

    #[test]
    fn missing_required_variable_is_a_validation_error() {
        let result = required_env("SEMESTRA_TEST_UNSET_VARIABLE");
        assert!(result.is_err());
    }
}
