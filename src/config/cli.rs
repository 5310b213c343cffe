use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// 以掃描根目錄為基準的本機檔案存取
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<String> {
        let full_path = Path::new(&self.base_path).join(path);
        let contents = fs::read_to_string(full_path)?;
        Ok(contents)
    }

    async fn write_file(&self, path: &str, contents: &str) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, contents)?;
        Ok(())
    }
}
