use crate::walker::FileInfo;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// A detected package manager, merged across every manifest of its kind
/// found in the tree. Later files win on conflicting dependency names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageManager {
    pub name: String,
    pub config_files: Vec<PathBuf>,
    pub dependencies: HashMap<String, String>,
    pub dev_dependencies: HashMap<String, String>,
}

impl PackageManager {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            config_files: Vec::new(),
            dependencies: HashMap::new(),
            dev_dependencies: HashMap::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ManifestScan {
    pub package_managers: HashMap<String, PackageManager>,
    /// Flat accumulation of every accepted dependency name, in manifest
    /// order, duplicates kept.
    pub external_deps: Vec<String>,
}

#[derive(Debug, Default)]
struct ParsedDeps {
    dependencies: Vec<(String, String)>,
    dev_dependencies: Vec<(String, String)>,
}

impl ParsedDeps {
    fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.dev_dependencies.is_empty()
    }
}

fn manifest_kind(file_name: &str) -> Option<&'static str> {
    let kind = match file_name {
        "package.json" => "npm",
        "requirements.txt" => "pip",
        "Pipfile" => "pipenv",
        "poetry.lock" => "poetry",
        "go.mod" => "go modules",
        "Cargo.toml" => "cargo",
        "composer.json" => "composer",
        "Gemfile" => "bundler",
        "pom.xml" => "maven",
        "build.gradle" => "gradle",
        "Package.swift" => "swift pm",
        "pubspec.yaml" => "pub",
        _ => return None,
    };
    Some(kind)
}

/// Manifest pass over the collected records. Unreadable files and parse
/// failures skip the offending manifest; a manifest that yields nothing is
/// discarded rather than recorded empty.
pub fn scan_manifests(records: &[FileInfo]) -> crate::Result<ManifestScan> {
    let requirement = Regex::new(r"^([A-Za-z0-9_-]+)([>=<~!]+.*)?$")?;
    let mut scan = ManifestScan::default();

    for record in records {
        let kind = match manifest_kind(&record.name) {
            Some(kind) => kind,
            None => continue,
        };
        let content = match fs::read_to_string(&record.path) {
            Ok(content) => content,
            Err(_) => continue,
        };

        let parsed = match kind {
            "npm" => parse_json_deps(&content),
            "pip" | "pipenv" => parse_requirements(&content, &requirement),
            "go modules" => parse_go_mod(&content),
            "cargo" => parse_cargo_toml(&content),
            _ => parse_generic(&content),
        };

        if parsed.is_empty() {
            continue;
        }

        for (name, _) in &parsed.dependencies {
            scan.external_deps.push(name.clone());
        }

        let manager = scan
            .package_managers
            .entry(kind.to_string())
            .or_insert_with(|| PackageManager::new(kind));
        manager.config_files.push(record.path.clone());
        manager.dependencies.extend(parsed.dependencies);
        manager.dev_dependencies.extend(parsed.dev_dependencies);
    }

    Ok(scan)
}

/// Generic JSON document: pull string→string pairs out of `dependencies`
/// and `devDependencies` when those keys hold objects; anything else is
/// simply absent.
fn parse_json_deps(content: &str) -> ParsedDeps {
    let mut parsed = ParsedDeps::default();
    let doc: serde_json::Value = match serde_json::from_str(content) {
        Ok(doc) => doc,
        Err(_) => return parsed,
    };

    parsed.dependencies = object_entries(doc.get("dependencies"));
    parsed.dev_dependencies = object_entries(doc.get("devDependencies"));
    parsed
}

fn object_entries(value: Option<&serde_json::Value>) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    if let Some(serde_json::Value::Object(map)) = value {
        for (name, version) in map {
            if let serde_json::Value::String(version) = version {
                entries.push((name.clone(), version.clone()));
            }
        }
    }
    entries
}

/// Line-oriented requirement list: blanks and `#` comments are skipped,
/// a missing version constraint becomes "unspecified".
fn parse_requirements(content: &str, requirement: &Regex) -> ParsedDeps {
    let mut parsed = ParsedDeps::default();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(captures) = requirement.captures(line) {
            let name = captures[1].to_string();
            let version = captures
                .get(2)
                .map(|m| m.as_str().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "unspecified".to_string());
            parsed.dependencies.push((name, version));
        }
    }
    parsed
}

/// go.mod: single-line `require` directives plus `require ( ... )` blocks.
fn parse_go_mod(content: &str) -> ParsedDeps {
    let mut parsed = ParsedDeps::default();
    let mut in_require = false;

    for line in content.lines() {
        let line = line.trim();

        if line.starts_with("require (") {
            in_require = true;
            continue;
        }
        if in_require && line == ")" {
            in_require = false;
            continue;
        }

        if in_require || line.starts_with("require ") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 2 {
                if parts[0] == "require" {
                    if parts.len() >= 3 {
                        parsed
                            .dependencies
                            .push((parts[1].to_string(), parts[2].to_string()));
                    }
                } else {
                    parsed
                        .dependencies
                        .push((parts[0].to_string(), parts[1].to_string()));
                }
            }
        }
    }
    parsed
}

/// Cargo.toml as a generic TOML document: `[dependencies]` and
/// `[dev-dependencies]` tables, where a plain string is the version and an
/// inline table contributes its `version` key when present.
fn parse_cargo_toml(content: &str) -> ParsedDeps {
    let mut parsed = ParsedDeps::default();
    let doc: toml::Value = match content.parse() {
        Ok(doc) => doc,
        Err(_) => return parsed,
    };

    parsed.dependencies = table_entries(doc.get("dependencies"));
    parsed.dev_dependencies = table_entries(doc.get("dev-dependencies"));
    parsed
}

fn table_entries(value: Option<&toml::Value>) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    if let Some(toml::Value::Table(table)) = value {
        for (name, spec) in table {
            let version = match spec {
                toml::Value::String(version) => version.clone(),
                toml::Value::Table(detail) => detail
                    .get("version")
                    .and_then(|v| v.as_str())
                    .unwrap_or("unspecified")
                    .to_string(),
                _ => "unspecified".to_string(),
            };
            entries.push((name.clone(), version));
        }
    }
    entries
}

/// Fallback for recognized manifests without a dedicated parser: every
/// non-blank, non-comment line is a dependency of unknown version.
fn parse_generic(content: &str) -> ParsedDeps {
    let mut parsed = ParsedDeps::default();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }
        parsed
            .dependencies
            .push((line.to_string(), "unknown".to_string()));
    }
    parsed
}
