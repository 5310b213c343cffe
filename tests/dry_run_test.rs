use mdlink_fix::{CliConfig, FixEngine, LinkFixPipeline, LocalStorage};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn dry_run_config(root: &Path) -> CliConfig {
    CliConfig {
        root_dir: root.to_str().unwrap().to_string(),
        dry_run: true,
        threads: 2,
        extensions: vec!["md".to_string()],
        exclude_dirs: vec![".git".to_string()],
        backup: false,
        verbose: false,
        monitor: false,
    }
}

#[tokio::test]
async fn test_dry_run_reports_changes_but_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_file(root, "index.md", "[Setup](Setup_Guide.md)\n");
    write_file(root, "sub/page.md", "[Up](../Some_Index.md)\n");

    let config = dry_run_config(root);
    let storage = LocalStorage::new(config.root_dir.clone());
    let pipeline = LinkFixPipeline::new(storage, config);
    let engine = FixEngine::new(pipeline);

    let summary = engine.run().await.unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.files_scanned, 2);
    assert_eq!(summary.files_changed, 2);
    assert_eq!(summary.links_rewritten, 2);

    // 檔案內容完全不變
    assert_eq!(
        fs::read_to_string(root.join("index.md")).unwrap(),
        "[Setup](Setup_Guide.md)\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("sub/page.md")).unwrap(),
        "[Up](../Some_Index.md)\n"
    );
}

#[tokio::test]
async fn test_dry_run_creates_no_new_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_file(root, "doc.md", "[x](My_Page.md)\n");

    let mut config = dry_run_config(root);
    config.backup = true; // 即使開了 backup，dry-run 也不寫任何檔案

    let storage = LocalStorage::new(config.root_dir.clone());
    let pipeline = LinkFixPipeline::new(storage, config);
    let engine = FixEngine::new(pipeline);

    engine.run().await.unwrap();

    let entries: Vec<String> = fs::read_dir(root)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["doc.md".to_string()]);
}

#[tokio::test]
async fn test_dry_run_on_clean_tree_reports_zero_changes() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_file(root, "doc.md", "[ok](already-clean.md)\n");

    let config = dry_run_config(root);
    let storage = LocalStorage::new(config.root_dir.clone());
    let pipeline = LinkFixPipeline::new(storage, config);
    let engine = FixEngine::new(pipeline);

    let summary = engine.run().await.unwrap();

    assert_eq!(summary.files_scanned, 1);
    assert_eq!(summary.files_changed, 0);
    assert_eq!(summary.links_rewritten, 0);
}
