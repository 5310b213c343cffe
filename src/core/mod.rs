pub mod diff;
pub mod engine;
pub mod pipeline;
pub mod rewriter;

pub use crate::domain::model::{FileRewrite, LinkEdit, MarkdownFile, RewriteBatch, RunSummary};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
