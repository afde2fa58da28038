use crate::language;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A node in the file tree. Directories own their children; sibling order
/// is whatever the directory listing produced at scan time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    pub language: String,
    /// Present only for text-classified files whose count succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<usize>,
}

/// Everything one traversal produces: the tree, the flat record stream in
/// discovery order, the same records grouped by language, and the running
/// totals the aggregator reduces.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub file_tree: Option<FileNode>,
    pub records: Vec<FileInfo>,
    pub files_by_type: HashMap<String, Vec<FileInfo>>,
    pub total_files: usize,
    pub total_dirs: usize,
    pub total_size: u64,
    pub max_depth: usize,
    pub deepest_path: Option<PathBuf>,
}

pub struct Walker {
    exclude_names: Vec<String>,
}

impl Walker {
    pub fn new(exclude_names: Vec<String>) -> Self {
        Self { exclude_names }
    }

    /// An entry is excluded when its name matches the configured list
    /// exactly, or when the list carries the `.hidden` sentinel and the
    /// name starts with a dot.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude_names
            .iter()
            .any(|excluded| name == excluded || (excluded == ".hidden" && name.starts_with('.')))
    }

    /// Walk the tree rooted at `root`. The root itself is never excluded.
    /// The only fatal failure is a root that cannot be stat-ed; unreadable
    /// subtrees degrade to childless nodes and unreadable files are
    /// silently skipped.
    pub fn walk(&self, root: &Path) -> crate::Result<WalkOutcome> {
        use anyhow::Context;

        fs::metadata(root)
            .with_context(|| format!("cannot access scan root {}", root.display()))?;

        let mut outcome = WalkOutcome {
            file_tree: self.build_tree(root, true),
            ..WalkOutcome::default()
        };
        self.collect_records(root, &mut outcome);
        Ok(outcome)
    }

    /// Tree pass. An excluded directory stays visible as a childless node
    /// so the tree still shows the pruned subtree exists; an excluded file
    /// is dropped. Entries that cannot be stat-ed are skipped.
    fn build_tree(&self, path: &Path, is_root: bool) -> Option<FileNode> {
        let meta = fs::metadata(path).ok()?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut node = FileNode {
            name,
            path: path.to_path_buf(),
            is_dir: meta.is_dir(),
            size: meta.len(),
            children: Vec::new(),
        };

        if !node.is_dir {
            if !is_root && self.is_excluded(&node.name) {
                return None;
            }
            return Some(node);
        }

        if !is_root && self.is_excluded(&node.name) {
            return Some(node);
        }

        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(_) => return Some(node), // unreadable directory, keep it childless
        };

        for entry in entries.flatten() {
            if let Some(child) = self.build_tree(&entry.path(), false) {
                node.children.push(child);
            }
        }

        Some(node)
    }

    /// Flat-record pass. Excluded entries contribute nothing here; failed
    /// reads are skipped so a broken subtree never aborts its siblings.
    fn collect_records(&self, root: &Path, outcome: &mut WalkOutcome) {
        let walk = WalkDir::new(root).into_iter().filter_entry(|entry| {
            entry.depth() == 0 || !self.is_excluded(&entry.file_name().to_string_lossy())
        });

        for entry in walk {
            let entry = match entry {
                Ok(entry) => entry,
                Err(_) => continue,
            };

            if entry.depth() > outcome.max_depth {
                outcome.max_depth = entry.depth();
                outcome.deepest_path = Some(entry.path().to_path_buf());
            }

            let file_type = entry.file_type();
            if file_type.is_dir() {
                outcome.total_dirs += 1;
                continue;
            }
            if !file_type.is_file() {
                continue;
            }

            let meta = match entry.metadata() {
                Ok(meta) => meta,
                Err(_) => continue,
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            let extension = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_lowercase());
            let language = language::classify(extension.as_deref(), &name);

            let lines = if language::is_text_like(extension.as_deref()) {
                language::count_lines(entry.path()).ok()
            } else {
                None
            };

            outcome.total_files += 1;
            outcome.total_size += meta.len();

            let record = FileInfo {
                path: entry.path().to_path_buf(),
                name,
                size: meta.len(),
                extension,
                language: language.to_string(),
                lines,
            };

            outcome
                .files_by_type
                .entry(record.language.clone())
                .or_default()
                .push(record.clone());
            outcome.records.push(record);
        }
    }
}
