use crate::analyzer::RepoAnalysis;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Reporter;

impl Reporter {
    pub fn new() -> Self {
        Self
    }

    /// Write the analysis document as pretty-printed JSON into the output
    /// directory and return the written path.
    pub fn export(&self, analysis: &RepoAnalysis, output_dir: &Path) -> crate::Result<PathBuf> {
        fs::create_dir_all(output_dir)?;

        let json_path = output_dir.join("analysis.json");
        let content = serde_json::to_string_pretty(analysis)?;
        fs::write(&json_path, content)?;

        Ok(json_path)
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}
