use crate::{
    config::ScanConfig,
    imports::ImportScanner,
    manifests::{self, PackageManager},
    stats::{self, Statistics, Summary},
    walker::{FileInfo, FileNode, Walker},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// The dependency picture: declared manifests plus harvested imports.
/// Heuristic and best-effort by contract, never validated against a real
/// dependency graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyReport {
    pub package_managers: HashMap<String, PackageManager>,
    pub import_graph: HashMap<String, Vec<String>>,
    pub external_deps: Vec<String>,
}

/// The complete result of one scan. Built once by [`Analyzer::analyze`] and
/// read-only afterwards; nothing here survives across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoAnalysis {
    pub repo_path: PathBuf,
    pub analyzed_at: DateTime<Utc>,
    pub summary: Summary,
    pub file_tree: Option<FileNode>,
    pub files_by_type: HashMap<String, Vec<FileInfo>>,
    pub dependencies: DependencyReport,
    pub statistics: Statistics,
}

pub struct Analyzer {
    config: ScanConfig,
}

impl Analyzer {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline in strict sequence: walk, aggregate, extract
    /// dependencies. Only an unreachable scan root aborts; everything else
    /// degrades to missing data in the document.
    pub fn analyze(&self) -> crate::Result<RepoAnalysis> {
        let walker = Walker::new(self.config.exclude_dirs.clone());
        let outcome = walker.walk(&self.config.target_directory)?;

        if self.config.verbose {
            for record in &outcome.records {
                println!("  {} [{}]", record.path.display(), record.language);
            }
        }

        let (summary, statistics) = stats::summarize(&outcome);

        let manifest_scan = manifests::scan_manifests(&outcome.records)?;
        let import_graph = ImportScanner::new()?.scan(&outcome.files_by_type);

        Ok(RepoAnalysis {
            repo_path: self.config.target_directory.clone(),
            analyzed_at: Utc::now(),
            summary,
            file_tree: outcome.file_tree,
            files_by_type: outcome.files_by_type,
            dependencies: DependencyReport {
                package_managers: manifest_scan.package_managers,
                import_graph,
                external_deps: manifest_scan.external_deps,
            },
            statistics,
        })
    }
}

impl RepoAnalysis {
    pub fn print_summary(&self) {
        println!("📊 Scan Summary");
        println!("===============");
        println!("  Files: {}", self.summary.total_files);
        println!("  Directories: {}", self.summary.total_dirs);
        println!("  Total size: {}", format_bytes(self.summary.total_size));
        println!(
            "  Total lines: {} (avg file size {})",
            self.statistics.total_lines,
            format_bytes(self.statistics.avg_file_size)
        );
        println!("  Max depth: {}", self.summary.max_depth);

        let mut languages: Vec<_> = self.summary.languages.iter().collect();
        languages.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        println!("  Languages:");
        for (language, count) in languages.iter().take(10) {
            println!("    {language}: {count} files");
        }

        if !self.dependencies.package_managers.is_empty() {
            println!("  Package managers:");
            for (name, manager) in &self.dependencies.package_managers {
                println!(
                    "    {}: {} dependencies ({} dev)",
                    name,
                    manager.dependencies.len(),
                    manager.dev_dependencies.len()
                );
            }
        }
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    if bytes < UNIT {
        return format!("{bytes} B");
    }
    let (mut div, mut exp) = (UNIT, 0);
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    let units = ["KB", "MB", "GB", "TB", "PB", "EB"];
    format!("{:.1} {}", bytes as f64 / div as f64, units[exp])
}
