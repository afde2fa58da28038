use crate::walker::FileInfo;
use rayon::prelude::*;
use regex::Regex;
use std::collections::HashMap;
use std::fs;

/// Per-language import extraction. Each pattern is multi-line and may carry
/// several alternative capture groups for the different import syntaxes of
/// one language; every non-empty capture counts.
pub struct ImportScanner {
    patterns: Vec<(&'static str, Regex)>,
}

impl ImportScanner {
    pub fn new() -> crate::Result<Self> {
        // TypeScript shares the JavaScript import syntaxes.
        let javascript =
            Regex::new(r#"(?m)^(?:import.*from\s+['"]([^'"]+)['"]|require\(['"]([^'"]+)['"]\))"#)?;

        let patterns = vec![
            (
                "Python",
                Regex::new(r"(?m)^(?:from\s+([\w.]+)|import\s+([\w.]+))")?,
            ),
            ("JavaScript", javascript.clone()),
            ("TypeScript", javascript),
            (
                "Go",
                Regex::new(r#"(?m)^import\s+(?:[\w]+\s+)?["']([^"']+)["']"#)?,
            ),
            ("Rust", Regex::new(r"(?m)^use\s+([\w:]+)")?),
            ("Java", Regex::new(r"(?m)^import\s+([\w.]+)")?),
            ("C#", Regex::new(r"(?m)^using\s+([\w.]+)")?),
            ("Ruby", Regex::new(r#"(?m)^require\s+['"]([^'"]+)['"]"#)?),
        ];
        Ok(Self { patterns })
    }

    /// Scan every record of every language that has a pattern. Files are
    /// independent, so each language's records fan out across the thread
    /// pool; unreadable files drop out silently, and files with no matches
    /// get no entry at all.
    pub fn scan(
        &self,
        files_by_type: &HashMap<String, Vec<FileInfo>>,
    ) -> HashMap<String, Vec<String>> {
        let mut graph = HashMap::new();

        for (language, pattern) in &self.patterns {
            let files = match files_by_type.get(*language) {
                Some(files) => files,
                None => continue,
            };

            let entries: Vec<(String, Vec<String>)> = files
                .par_iter()
                .filter_map(|file| {
                    let content = fs::read_to_string(&file.path).ok()?;
                    let imports = extract_imports(pattern, &content);
                    if imports.is_empty() {
                        None
                    } else {
                        Some((file.path.display().to_string(), imports))
                    }
                })
                .collect();

            graph.extend(entries);
        }

        graph
    }
}

fn extract_imports(pattern: &Regex, content: &str) -> Vec<String> {
    let mut imports = Vec::new();
    for captures in pattern.captures_iter(content) {
        for group in captures.iter().skip(1).flatten() {
            if !group.as_str().is_empty() {
                imports.push(group.as_str().to_string());
            }
        }
    }
    imports
}
