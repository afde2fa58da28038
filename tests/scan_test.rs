use repolens::{Analyzer, Reporter, ScanConfig};
use std::fs;
use std::path::Path;

fn config_for(root: &Path, excludes: &[&str]) -> ScanConfig {
    ScanConfig {
        target_directory: root.to_path_buf(),
        output_directory: root.join(".analysis"),
        exclude_dirs: excludes.iter().map(|s| s.to_string()).collect(),
        verbose: false,
    }
}

/// A file of `lines` lines, each 20 bytes including the newline.
fn sized_lines(lines: usize) -> String {
    format!("{}\n", "x".repeat(19)).repeat(lines)
}

#[test]
fn scenario_go_and_python_counts() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.go"), sized_lines(5)).unwrap(); // 100 bytes
    fs::write(dir.path().join("b.py"), sized_lines(10)).unwrap(); // 200 bytes

    let analysis = Analyzer::new(config_for(dir.path(), &[])).analyze().unwrap();

    assert_eq!(analysis.summary.total_files, 2);
    assert_eq!(analysis.summary.languages["Go"], 1);
    assert_eq!(analysis.summary.languages["Python"], 1);
    assert_eq!(analysis.statistics.total_lines, 15);
    assert_eq!(analysis.statistics.avg_file_size, 150);
    assert_eq!(analysis.statistics.files_by_language, analysis.summary.languages);
}

#[test]
fn scenario_npm_manifest() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"dependencies":{"left-pad":"1.0.0"}}"#,
    )
    .unwrap();

    let analysis = Analyzer::new(config_for(dir.path(), &[])).analyze().unwrap();

    let npm = &analysis.dependencies.package_managers["npm"];
    assert_eq!(npm.dependencies["left-pad"], "1.0.0");
    assert!(analysis
        .dependencies
        .external_deps
        .contains(&"left-pad".to_string()));
}

#[test]
fn scenario_pip_requirements() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("requirements.txt"),
        "flask==2.0\n# comment\n\n",
    )
    .unwrap();

    let analysis = Analyzer::new(config_for(dir.path(), &[])).analyze().unwrap();

    let pip = &analysis.dependencies.package_managers["pip"];
    assert_eq!(pip.dependencies.len(), 1);
    assert_eq!(pip.dependencies["flask"], "==2.0");
}

#[test]
fn scenario_excluded_git_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
    fs::write(dir.path().join("main.rs"), "fn main() {}\n").unwrap();

    let analysis = Analyzer::new(config_for(dir.path(), &[".git"]))
        .analyze()
        .unwrap();

    assert_eq!(analysis.summary.total_files, 1);
    assert_eq!(analysis.summary.total_dirs, 1); // root only

    let tree = analysis.file_tree.as_ref().unwrap();
    let git = tree.children.iter().find(|c| c.name == ".git").unwrap();
    assert!(git.children.is_empty());
}

#[test]
fn scenario_go_import_harvest() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("main.go");
    fs::write(&file, "package main\n\nimport \"fmt\"\n\nfunc main() {}\n").unwrap();

    let analysis = Analyzer::new(config_for(dir.path(), &[])).analyze().unwrap();

    let imports = &analysis.dependencies.import_graph[&file.display().to_string()];
    assert_eq!(imports, &vec!["fmt".to_string()]);
}

#[test]
fn files_without_imports_get_no_graph_entry() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("plain.rb");
    fs::write(&file, "puts 'hello'\n").unwrap();

    let analysis = Analyzer::new(config_for(dir.path(), &[])).analyze().unwrap();
    assert!(analysis.dependencies.import_graph.is_empty());
}

#[test]
fn vendor_exclusion_property() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("vendor/pkg")).unwrap();
    fs::write(dir.path().join("vendor/pkg/dep.go"), "package pkg\n").unwrap();
    fs::write(dir.path().join("app.go"), "package main\n").unwrap();

    let analysis = Analyzer::new(config_for(dir.path(), &["vendor"]))
        .analyze()
        .unwrap();

    for records in analysis.files_by_type.values() {
        for record in records {
            assert!(!record.path.components().any(|c| c.as_os_str() == "vendor"));
        }
    }
    let tree = analysis.file_tree.as_ref().unwrap();
    let vendor = tree.children.iter().find(|c| c.name == "vendor").unwrap();
    assert!(vendor.is_dir);
    assert!(vendor.children.is_empty());
}

#[test]
fn largest_files_bounded_and_sorted() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..12u64 {
        fs::write(
            dir.path().join(format!("f{i}.txt")),
            "y".repeat((i as usize + 1) * 10),
        )
        .unwrap();
    }

    let analysis = Analyzer::new(config_for(dir.path(), &[])).analyze().unwrap();
    let largest = &analysis.summary.largest_files;

    assert_eq!(largest.len(), 10);
    assert!(largest.windows(2).all(|w| w[0].size >= w[1].size));
    assert_eq!(largest[0].size, 120);
}

#[test]
fn average_size_truncation_identity() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "abc").unwrap();
    fs::write(dir.path().join("b.txt"), "defgh").unwrap();
    fs::write(dir.path().join("c.txt"), "ij").unwrap();

    let analysis = Analyzer::new(config_for(dir.path(), &[])).analyze().unwrap();
    let total = analysis.summary.total_size;
    let files = analysis.summary.total_files as u64;
    let avg = analysis.statistics.avg_file_size;

    assert!(avg * files <= total);
    assert!(total - avg * files < files);
}

#[test]
fn repeated_scans_are_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/lib.rs"), "pub fn f() {}\n").unwrap();
    fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"x\"\n").unwrap();

    let first = Analyzer::new(config_for(dir.path(), &[])).analyze().unwrap();
    let second = Analyzer::new(config_for(dir.path(), &[])).analyze().unwrap();

    assert_eq!(first.summary.total_files, second.summary.total_files);
    assert_eq!(first.summary.total_dirs, second.summary.total_dirs);
    assert_eq!(first.summary.total_size, second.summary.total_size);
    assert_eq!(first.summary.languages, second.summary.languages);
    assert_eq!(first.statistics.total_lines, second.statistics.total_lines);
}

#[test]
fn manifests_of_one_kind_merge() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("pkg")).unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"dependencies":{"left-pad":"1.0.0"}}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("pkg/package.json"),
        r#"{"dependencies":{"lodash":"4.17.21"}}"#,
    )
    .unwrap();

    let analysis = Analyzer::new(config_for(dir.path(), &[])).analyze().unwrap();

    let npm = &analysis.dependencies.package_managers["npm"];
    assert_eq!(npm.config_files.len(), 2);
    assert_eq!(npm.dependencies.len(), 2);
    assert_eq!(analysis.dependencies.external_deps.len(), 2);
}

#[test]
fn empty_manifest_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("package.json"), r#"{"name":"empty"}"#).unwrap();

    let analysis = Analyzer::new(config_for(dir.path(), &[])).analyze().unwrap();
    assert!(analysis.dependencies.package_managers.is_empty());
    assert!(analysis.dependencies.external_deps.is_empty());
}

#[test]
fn exported_document_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("app.py"), "import os\n").unwrap();

    let config = config_for(dir.path(), &[]);
    let output_directory = config.output_directory.clone();
    let analysis = Analyzer::new(config).analyze().unwrap();

    let written = Reporter::new().export(&analysis, &output_directory).unwrap();
    assert!(written.ends_with("analysis.json"));

    let raw = fs::read_to_string(&written).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["summary"]["total_files"], 1);
    assert!(doc["analyzed_at"].is_string());
    assert!(doc["file_tree"]["is_dir"].as_bool().unwrap());
    assert_eq!(doc["statistics"]["files_by_language"]["Python"], 1);
}

#[cfg(unix)]
#[test]
fn unreadable_directory_does_not_abort() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("secret.txt"), "hidden\n").unwrap();
    fs::write(dir.path().join("open.txt"), "visible\n").unwrap();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    let denied = fs::read_dir(&locked).is_err();

    let analysis = Analyzer::new(config_for(dir.path(), &[])).analyze().unwrap();

    // Restore before assertions so the tempdir can clean up either way.
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    if denied {
        assert_eq!(analysis.summary.total_files, 1);
        assert_eq!(analysis.summary.total_dirs, 2); // root + locked, still counted

        let tree = analysis.file_tree.as_ref().unwrap();
        let node = tree.children.iter().find(|c| c.name == "locked").unwrap();
        assert!(node.children.is_empty());
    }
}
