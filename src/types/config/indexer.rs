use std::env;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::types::config::persistence::PersistenceConfig;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct IndexerConfig {
    /// Contract accounts whose receipts are decoded. Empty accepts every receiver.
    #[serde(default)]
    pub contract_account_ids: Vec<String>,
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

impl IndexerConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Whether receipts executed by `receiver_id` should be decoded.
    pub fn accepts_receiver(&self, receiver_id: &str) -> bool {
        self.contract_account_ids.is_empty()
            || self.contract_account_ids.iter().any(|id| id == receiver_id)
    }

    /// Resolve the database URL, loading `.env` if the variable is not set.
    pub fn database_url(&self) -> anyhow::Result<String> {
        let var = &self.persistence.database_url_env_var;
        if let Ok(url) = env::var(var) {
            return Ok(url);
        }

        dotenvy::dotenv()
            .with_context(|| format!("Missing env var {} and failed to load .env file", var))?;

        env::var(var).with_context(|| format!("Env var {} not set after loading .env", var))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_missing() {
        let config = IndexerConfig::from_json("{}").unwrap();
        assert!(config.contract_account_ids.is_empty());
        assert_eq!(config.persistence.database_url_env_var, "DATABASE_URL");
        assert!(config.persistence.run_migrations);
        assert!(config.accepts_receiver("anything.near"));
    }

    #[test]
    fn test_receiver_filter() {
        let config = IndexerConfig::from_json(
            r#"{
                "contract_account_ids": ["x.paras.near"],
                "persistence": {"database_url_env_var": "PARAS_DB", "run_migrations": false}
            }"#,
        )
        .unwrap();

        assert!(config.accepts_receiver("x.paras.near"));
        assert!(!config.accepts_receiver("marketplace.paras.near"));
        assert_eq!(config.persistence.database_url_env_var, "PARAS_DB");
        assert!(!config.persistence.run_migrations);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(IndexerConfig::from_json("{\"contract_account_ids\": 3}").is_err());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = IndexerConfig::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
