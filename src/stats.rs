use crate::walker::{FileInfo, WalkOutcome};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

const LARGEST_FILES: usize = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_files: usize,
    pub total_dirs: usize,
    pub total_size: u64,
    pub languages: HashMap<String, usize>,
    pub largest_files: Vec<FileInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deepest_path: Option<PathBuf>,
    pub max_depth: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub total_lines: usize,
    pub avg_file_size: u64,
    /// Duplicates `Summary.languages`; kept so the output schema of both
    /// sections stays self-contained.
    pub files_by_language: HashMap<String, usize>,
}

/// Reduce a walk into the summary and statistics sections.
pub fn summarize(outcome: &WalkOutcome) -> (Summary, Statistics) {
    let languages: HashMap<String, usize> = outcome
        .files_by_type
        .iter()
        .map(|(language, files)| (language.clone(), files.len()))
        .collect();

    let total_lines = outcome.records.iter().filter_map(|r| r.lines).sum();
    let avg_file_size = if outcome.total_files > 0 {
        outcome.total_size / outcome.total_files as u64
    } else {
        0
    };

    let summary = Summary {
        total_files: outcome.total_files,
        total_dirs: outcome.total_dirs,
        total_size: outcome.total_size,
        languages: languages.clone(),
        largest_files: largest_files(&outcome.records),
        deepest_path: outcome.deepest_path.clone(),
        max_depth: outcome.max_depth,
    };

    let statistics = Statistics {
        total_lines,
        avg_file_size,
        files_by_language: languages,
    };

    (summary, statistics)
}

/// Partial selection sort: settle only the first ten positions. The strict
/// comparison leaves equal sizes in discovery order.
fn largest_files(records: &[FileInfo]) -> Vec<FileInfo> {
    let mut files = records.to_vec();
    let limit = files.len().min(LARGEST_FILES);

    for i in 0..limit {
        for j in (i + 1)..files.len() {
            if files[j].size > files[i].size {
                files.swap(i, j);
            }
        }
    }

    files.truncate(limit);
    files
}
