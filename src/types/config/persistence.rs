//! Configuration for the persistence layer.

use serde::Deserialize;

/// Configuration for writing decoded records to PostgreSQL.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PersistenceConfig {
    /// PostgreSQL connection string environment variable.
    #[serde(default = "default_database_url_env_var")]
    pub database_url_env_var: String,

    /// Apply pending schema migrations when connecting.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_database_url_env_var() -> String {
    "DATABASE_URL".to_string()
}

fn default_run_migrations() -> bool {
    true
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            database_url_env_var: default_database_url_env_var(),
            run_migrations: default_run_migrations(),
        }
    }
}
