use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    pub target_directory: PathBuf,
    pub output_directory: PathBuf,
    /// Entry names skipped during traversal. The sentinel `.hidden`
    /// additionally excludes every name starting with a dot.
    pub exclude_dirs: Vec<String>,
    pub verbose: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            target_directory: PathBuf::from("."),
            output_directory: PathBuf::from(".analysis"),
            exclude_dirs: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                "vendor".to_string(),
                ".dist".to_string(),
                "build".to_string(),
                "target".to_string(),
                ".venv".to_string(),
                "__pycache__".to_string(),
            ],
            verbose: false,
        }
    }
}

impl ScanConfig {
    /// Get the default config file path (~/.repolens.toml)
    pub fn default_config_path() -> crate::Result<PathBuf> {
        let home_dir = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(PathBuf::from(home_dir).join(".repolens.toml"))
    }

    /// Load config from the default location, falling back to defaults if
    /// no file exists there.
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &PathBuf) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ScanConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &PathBuf) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn save_default(&self) -> crate::Result<()> {
        let config_path = Self::default_config_path()?;
        self.to_file(&config_path)
    }

    /// A config file with every option documented, for `repolens config`.
    pub fn create_documented_config() -> String {
        r#"# Repolens Configuration File
# This file configures how repolens scans a repository

# Target directory to scan (defaults to current directory)
target_directory = "."

# Directory the analysis document is written into
output_directory = ".analysis"

# Entry names to exclude during traversal.
# The special name ".hidden" excludes every entry starting with a dot.
exclude_dirs = [
    ".git",
    "node_modules",
    "vendor",
    ".dist",
    "build",
    "target",
    ".venv",
    "__pycache__"
]

# Log every discovered file while scanning
verbose = false
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repolens.toml");

        let mut config = ScanConfig::default();
        config.exclude_dirs.push(".hidden".to_string());
        config.to_file(&path).unwrap();

        let loaded = ScanConfig::from_file(&path).unwrap();
        assert_eq!(loaded.exclude_dirs, config.exclude_dirs);
        assert_eq!(loaded.output_directory, config.output_directory);
    }

    #[test]
    fn documented_config_parses() {
        let config: ScanConfig = toml::from_str(&ScanConfig::create_documented_config()).unwrap();
        assert!(config.exclude_dirs.contains(&"node_modules".to_string()));
    }
}
