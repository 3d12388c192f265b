//! 键值存储 - 基础设施层
//!
//! 只暴露 get / set / remove 能力，不认识 Worksheet

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::StorageError;

/// 持久化键值存储
///
/// 职责：
/// - 按 key 读写字符串
/// - 不解析内容
/// - 不处理并发的读改写（由上层串行化）
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// 读取；key 不存在时返回 `None`
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// 删除；key 不存在不算错误
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// 内存存储（测试与临时会话使用）
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

/// 文件存储：每个 key 对应目录下的一个 JSON 文件
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// key 中除字母数字、`-`、`_` 以外的字符替换为 `_`
    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::read_failed(key, e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::write_failed(key, e))?;

        // 先写临时文件再重命名，避免写到一半留下损坏的内容
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)
            .await
            .map_err(|e| StorageError::write_failed(key, e))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| StorageError::write_failed(key, e))?;

        debug!("已写入 {} ({} 字节)", path.display(), value.len());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::remove_failed(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("worksheet-store-{}", crate::models::new_id()))
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        tokio_test::block_on(async {
            assert_eq!(store.get("k").await.unwrap(), None);
            store.set("k", "v").await.unwrap();
            assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
            store.remove("k").await.unwrap();
            assert_eq!(store.get("k").await.unwrap(), None);
        });
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = temp_dir();
        let store = FileStore::new(&dir);

        assert_eq!(store.get("@worksheet_history").await.unwrap(), None);

        store.set("@worksheet_history", "{\"worksheets\":[]}").await.unwrap();
        assert_eq!(
            store.get("@worksheet_history").await.unwrap().as_deref(),
            Some("{\"worksheets\":[]}")
        );
        assert!(dir.join("_worksheet_history.json").exists());

        store.remove("@worksheet_history").await.unwrap();
        assert_eq!(store.get("@worksheet_history").await.unwrap(), None);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_file_store_remove_missing_key_is_ok() {
        let store = FileStore::new(temp_dir());
        assert!(store.remove("nothing-here").await.is_ok());
    }
}
