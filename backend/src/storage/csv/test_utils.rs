/// Test utilities module for automatic cleanup and consistent test infrastructure
///
/// This module provides RAII-based cleanup that guarantees test data is removed
/// even if tests panic or fail.
use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::connection::CsvConnection;

/// RAII Test Environment that automatically cleans up on drop
pub struct TestEnvironment {
    /// The temporary directory - kept alive to prevent auto-cleanup until drop
    _temp_dir: TempDir,
    /// The CSV connection for the test
    pub connection: CsvConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: PathBuf,
}

impl TestEnvironment {
    /// Create a new test environment with automatic cleanup
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_cleanup() -> Result<()> {
        let base_path;

        {
            let env = TestEnvironment::new()?;
            base_path = env.base_directory().to_path_buf();
            assert!(base_path.exists());

            std::fs::write(base_path.join("events.csv"), "id,title\n")?;
        }

        assert!(!base_path.exists());
        Ok(())
    }
}
