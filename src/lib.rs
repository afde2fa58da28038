pub mod analyzer;
pub mod config;
pub mod imports;
pub mod language;
pub mod manifests;
pub mod reporter;
pub mod stats;
pub mod walker;

pub use analyzer::{Analyzer, RepoAnalysis};
pub use config::ScanConfig;
pub use imports::ImportScanner;
pub use reporter::Reporter;
pub use walker::Walker;

pub type Result<T> = anyhow::Result<T>;
