use crate::core::diff;
use crate::core::rewriter::{self, RewriteRules};
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{FileRewrite, MarkdownFile, RewriteBatch, RunSummary};
use crate::utils::error::{FixError, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use walkdir::{DirEntry, WalkDir};

pub struct LinkFixPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> LinkFixPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn wants_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.config
                    .extensions()
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

fn is_excluded_dir(entry: &DirEntry, excludes: &[String]) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| excludes.iter().any(|ex| ex == name))
            .unwrap_or(false)
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for LinkFixPipeline<S, C> {
    async fn scan(&self) -> Result<Vec<MarkdownFile>> {
        let root = Path::new(self.config.root_dir());
        let excludes = self.config.exclude_dirs();

        let mut paths = Vec::new();
        for entry in WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| !is_excluded_dir(e, excludes))
        {
            let entry = entry?;
            if !entry.file_type().is_file() || !self.wants_extension(entry.path()) {
                continue;
            }

            // Storage 以掃描根目錄為基準，存相對路徑
            let rel = entry.path().strip_prefix(root).unwrap_or_else(|_| entry.path());
            paths.push(rel.to_string_lossy().into_owned());
        }

        // 排序讓輸出順序穩定，跟檔案系統走訪順序脫鉤
        paths.sort();
        tracing::debug!("Found {} candidate files under {}", paths.len(), root.display());

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let contents = self.storage.read_file(&path).await?;
            files.push(MarkdownFile { path, contents });
        }

        Ok(files)
    }

    async fn rewrite(&self, files: Vec<MarkdownFile>) -> Result<RewriteBatch> {
        let rules = RewriteRules {
            skip_absolute_urls: self.config.skip_absolute_urls(),
        };

        // 以 semaphore 限制同時處理的檔案數（--threads）
        let semaphore = Arc::new(Semaphore::new(self.config.threads().max(1)));
        let mut tasks = JoinSet::new();

        for file in files {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| FixError::ProcessingError {
                    message: format!("Rewrite scheduler stopped unexpectedly: {}", e),
                })?;
            let rules = rules.clone();

            tasks.spawn(async move {
                let _permit = permit;
                let (rewritten, edits) = rewriter::rewrite_contents(&file.contents, &rules);
                FileRewrite {
                    path: file.path,
                    original: file.contents,
                    rewritten,
                    edits,
                }
            });
        }

        let mut rewrites = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            rewrites.push(joined?);
        }
        rewrites.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(RewriteBatch { files: rewrites })
    }

    async fn apply(&self, batch: RewriteBatch) -> Result<RunSummary> {
        let dry_run = self.config.dry_run();
        let files_scanned = batch.files.len();
        let files_changed = batch.changed_files();
        let links_rewritten = batch.total_edits();

        let mut applied = 0usize;
        for file in batch.files.iter().filter(|f| f.is_changed()) {
            applied += 1;

            if dry_run {
                print!("{}", diff::unified_diff(&file.path, &file.original, &file.rewritten));
                continue;
            }

            if self.config.backup() {
                let backup_path = format!("{}.bak", file.path);
                self.storage.write_file(&backup_path, &file.original).await?;
            }

            self.storage.write_file(&file.path, &file.rewritten).await?;
            tracing::info!(
                "[{}/{}] ✏️ {} ({} links)",
                applied,
                files_changed,
                file.path,
                file.edits.len()
            );
        }

        Ok(RunSummary {
            files_scanned,
            files_changed,
            links_rewritten,
            dry_run,
            elapsed_ms: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, String>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<String> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }

        async fn written_paths(&self) -> Vec<String> {
            let files = self.files.lock().await;
            let mut paths: Vec<String> = files.keys().cloned().collect();
            paths.sort();
            paths
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<String> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                FixError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, contents: &str) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), contents.to_string());
            Ok(())
        }
    }

    struct MockConfig {
        dry_run: bool,
        backup: bool,
        threads: usize,
        extensions: Vec<String>,
        exclude_dirs: Vec<String>,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                dry_run: false,
                backup: false,
                threads: 2,
                extensions: vec!["md".to_string()],
                exclude_dirs: vec![".git".to_string()],
            }
        }

        fn with_dry_run(mut self) -> Self {
            self.dry_run = true;
            self
        }

        fn with_backup(mut self) -> Self {
            self.backup = true;
            self
        }
    }

    impl ConfigProvider for MockConfig {
        fn root_dir(&self) -> &str {
            "."
        }

        fn dry_run(&self) -> bool {
            self.dry_run
        }

        fn threads(&self) -> usize {
            self.threads
        }

        fn extensions(&self) -> &[String] {
            &self.extensions
        }

        fn exclude_dirs(&self) -> &[String] {
            &self.exclude_dirs
        }

        fn backup(&self) -> bool {
            self.backup
        }

        fn skip_absolute_urls(&self) -> bool {
            true
        }
    }

    fn markdown(path: &str, contents: &str) -> MarkdownFile {
        MarkdownFile {
            path: path.to_string(),
            contents: contents.to_string(),
        }
    }

    #[tokio::test]
    async fn test_rewrite_collects_all_files_in_path_order() {
        let pipeline = LinkFixPipeline::new(MockStorage::new(), MockConfig::new());

        let files = vec![
            markdown("z/last.md", "[x](A.md)"),
            markdown("a/first.md", "no links here"),
            markdown("m/mid.md", "[y](My_File.md)"),
        ];

        let batch = pipeline.rewrite(files).await.unwrap();

        let paths: Vec<&str> = batch.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["a/first.md", "m/mid.md", "z/last.md"]);
        assert_eq!(batch.changed_files(), 2);
        assert_eq!(batch.total_edits(), 2);
    }

    #[tokio::test]
    async fn test_rewrite_with_many_files_and_few_threads() {
        let pipeline = LinkFixPipeline::new(MockStorage::new(), MockConfig::new());

        let files: Vec<MarkdownFile> = (0..50)
            .map(|i| markdown(&format!("doc_{:02}.md", i), "[x](Some_File.md)"))
            .collect();

        let batch = pipeline.rewrite(files).await.unwrap();
        assert_eq!(batch.files.len(), 50);
        assert_eq!(batch.changed_files(), 50);
    }

    #[tokio::test]
    async fn test_apply_writes_rewritten_contents() {
        let storage = MockStorage::new();
        let pipeline = LinkFixPipeline::new(storage.clone(), MockConfig::new());

        let batch = pipeline
            .rewrite(vec![markdown("doc.md", "[Foo](docs/MY_Dir/SomeFile.md)")])
            .await
            .unwrap();
        let summary = pipeline.apply(batch).await.unwrap();

        assert_eq!(summary.files_scanned, 1);
        assert_eq!(summary.files_changed, 1);
        assert_eq!(summary.links_rewritten, 1);
        assert!(!summary.dry_run);

        let written = storage.get_file("doc.md").await.unwrap();
        assert_eq!(written, "[Foo](docs/my-dir/somefile.md)");
    }

    #[tokio::test]
    async fn test_apply_dry_run_writes_nothing() {
        let storage = MockStorage::new();
        let pipeline = LinkFixPipeline::new(storage.clone(), MockConfig::new().with_dry_run());

        let batch = pipeline
            .rewrite(vec![markdown("doc.md", "[x](A_File.md)")])
            .await
            .unwrap();
        let summary = pipeline.apply(batch).await.unwrap();

        assert!(summary.dry_run);
        assert_eq!(summary.files_changed, 1);
        assert!(storage.written_paths().await.is_empty());
    }

    #[tokio::test]
    async fn test_apply_skips_unchanged_files() {
        let storage = MockStorage::new();
        let pipeline = LinkFixPipeline::new(storage.clone(), MockConfig::new());

        let batch = pipeline
            .rewrite(vec![markdown("clean.md", "[ok](docs/fine.md)")])
            .await
            .unwrap();
        let summary = pipeline.apply(batch).await.unwrap();

        assert_eq!(summary.files_scanned, 1);
        assert_eq!(summary.files_changed, 0);
        assert!(storage.written_paths().await.is_empty());
    }

    #[tokio::test]
    async fn test_apply_with_backup_keeps_original() {
        let storage = MockStorage::new();
        let pipeline = LinkFixPipeline::new(storage.clone(), MockConfig::new().with_backup());

        let batch = pipeline
            .rewrite(vec![markdown("doc.md", "[x](A_File.md)")])
            .await
            .unwrap();
        pipeline.apply(batch).await.unwrap();

        assert_eq!(
            storage.written_paths().await,
            vec!["doc.md".to_string(), "doc.md.bak".to_string()]
        );
        assert_eq!(storage.get_file("doc.md.bak").await.unwrap(), "[x](A_File.md)");
        assert_eq!(storage.get_file("doc.md").await.unwrap(), "[x](a-file.md)");
    }
}
