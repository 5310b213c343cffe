use crate::domain::model::{MarkdownFile, RewriteBatch, RunSummary};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<String>> + Send;
    fn write_file(
        &self,
        path: &str,
        contents: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn root_dir(&self) -> &str;
    fn dry_run(&self) -> bool;
    fn threads(&self) -> usize;
    fn extensions(&self) -> &[String];
    fn exclude_dirs(&self) -> &[String];
    fn backup(&self) -> bool;
    fn skip_absolute_urls(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn scan(&self) -> Result<Vec<MarkdownFile>>;
    async fn rewrite(&self, files: Vec<MarkdownFile>) -> Result<RewriteBatch>;
    async fn apply(&self, batch: RewriteBatch) -> Result<RunSummary>;
}
