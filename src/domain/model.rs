use serde::{Deserialize, Serialize};

/// 掃描到的 Markdown 檔案，path 為相對於掃描根目錄的路徑
#[derive(Debug, Clone)]
pub struct MarkdownFile {
    pub path: String,
    pub contents: String,
}

/// 單一連結目標的改寫紀錄（行號從 1 開始）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEdit {
    pub line: usize,
    pub old_target: String,
    pub new_target: String,
}

/// 一個檔案經過改寫階段後的完整結果
#[derive(Debug, Clone)]
pub struct FileRewrite {
    pub path: String,
    pub original: String,
    pub rewritten: String,
    pub edits: Vec<LinkEdit>,
}

impl FileRewrite {
    pub fn is_changed(&self) -> bool {
        !self.edits.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RewriteBatch {
    pub files: Vec<FileRewrite>,
}

impl RewriteBatch {
    pub fn changed_files(&self) -> usize {
        self.files.iter().filter(|f| f.is_changed()).count()
    }

    pub fn total_edits(&self) -> usize {
        self.files.iter().map(|f| f.edits.len()).sum()
    }
}

/// 執行摘要，最後輸出給使用者
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub files_scanned: usize,
    pub files_changed: usize,
    pub links_rewritten: usize,
    pub dry_run: bool,
    pub elapsed_ms: u64,
}
