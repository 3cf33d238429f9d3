//! # Config Repository
//!
//! Loads and saves [`DashboardConfig`] as `dashboard_config.yaml` at the
//! root of the data directory. A default file is written on first use.

use anyhow::Result;
use log::{debug, info};
use std::fs;

use super::connection::CsvConnection;
use crate::config::DashboardConfig;

#[derive(Debug, Clone)]
pub struct ConfigRepository {
    connection: CsvConnection,
}

impl ConfigRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Load the config, creating a default file if it doesn't exist
    pub fn load_or_create(&self) -> Result<DashboardConfig> {
        let config_path = self.connection.config_file_path();

        if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)?;
            let config: DashboardConfig = serde_yaml::from_str(&yaml_content)?;
            debug!("Loaded dashboard config from {:?}", config_path);
            Ok(config.sanitized())
        } else {
            let config = DashboardConfig::default();
            self.save(&config)?;
            info!("Created default dashboard config at {:?}", config_path);
            Ok(config)
        }
    }

    /// Save the config atomically through a temp file
    pub fn save(&self, config: &DashboardConfig) -> Result<()> {
        let config_path = self.connection.config_file_path();
        let temp_path = config_path.with_extension("tmp");

        fs::write(&temp_path, serde_yaml::to_string(config)?)?;
        fs::rename(&temp_path, &config_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;

    #[test]
    fn test_load_or_create_writes_defaults() -> Result<()> {
        let env = TestEnvironment::new()?;
        let repo = ConfigRepository::new(env.connection.clone());

        let config = repo.load_or_create()?;
        assert_eq!(config, DashboardConfig::default());
        assert!(env.connection.config_file_path().exists());
        Ok(())
    }

    #[test]
    fn test_saved_config_is_reloaded() -> Result<()> {
        let env = TestEnvironment::new()?;
        let repo = ConfigRepository::new(env.connection.clone());

        let config = DashboardConfig {
            tax_rate: 0.05,
            upcoming_events_limit: 10,
            ..DashboardConfig::default()
        };
        repo.save(&config)?;

        assert_eq!(repo.load_or_create()?, config);
        Ok(())
    }

    #[test]
    fn test_invalid_yaml_is_an_error() -> Result<()> {
        let env = TestEnvironment::new()?;
        fs::write(env.connection.config_file_path(), "tax_rate: [not, a, number]\n")?;

        assert!(ConfigRepository::new(env.connection.clone()).load_or_create().is_err());
        Ok(())
    }
}
