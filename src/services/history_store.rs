//! 历史记录 - 业务能力层
//!
//! 负责练习单历史的读写：有上限、最新在前、持久化在单个 key 下

use std::sync::Arc;

use serde_json::Value as JsonValue;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{AppResult, HistoryOperation, StorageError, WorksheetError};
use crate::infrastructure::KeyValueStore;
use crate::models::{Worksheet, WorksheetHistory};

/// 历史记录使用的存储 key
pub const HISTORY_STORAGE_KEY: &str = "@worksheet_history";

/// 默认最多保留的练习单数量
pub const MAX_HISTORY_ITEMS: usize = 10;

/// 练习单历史存储
///
/// 职责：
/// - 读：失败时按"没有历史"处理，不向上抛错
/// - 写（add / delete / clear / attach_pdf）：失败时返回 `PersistenceFailed`
/// - 所有写操作通过同一把锁串行化，避免读改写交错导致的数据丢失
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    max_items: usize,
    write_lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_capacity(store, MAX_HISTORY_ITEMS)
    }

    /// 指定保留上限（至少为 1）
    pub fn with_capacity(store: Arc<dyn KeyValueStore>, max_items: usize) -> Self {
        Self {
            store,
            key: HISTORY_STORAGE_KEY.to_string(),
            max_items: max_items.max(1),
            write_lock: Mutex::new(()),
        }
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// 读取全部历史（最新在前）
    ///
    /// 读取失败或内容损坏时返回空历史。
    pub async fn list(&self) -> WorksheetHistory {
        match self.store.get(&self.key).await {
            Ok(raw) => decode_history(raw.as_deref()),
            Err(e) => {
                warn!("⚠️ 读取练习单历史失败，按空历史处理: {}", e);
                WorksheetHistory::default()
            }
        }
    }

    /// 写操作之前的读取
    ///
    /// 与 `list` 不同，读取出错时直接返回错误，不能在空历史上覆盖已有数据。
    /// 内容缺失或损坏仍按空历史处理（下一次写入即修复）。
    async fn load_for_write(&self, operation: HistoryOperation) -> AppResult<WorksheetHistory> {
        let raw = self
            .store
            .get(&self.key)
            .await
            .map_err(|e| WorksheetError::persistence_failed(operation, e))?;
        Ok(decode_history(raw.as_deref()))
    }

    /// 按 id 查找单个练习单
    pub async fn get(&self, id: &str) -> Option<Worksheet> {
        self.list().await.find(id).cloned()
    }

    /// 添加为最新一条，超出上限时丢弃最旧的
    pub async fn add(&self, worksheet: Worksheet) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut history = self.load_for_write(HistoryOperation::Add).await?;
        let id = worksheet.id.clone();
        history.worksheets.insert(0, worksheet);

        if history.worksheets.len() > self.max_items {
            let dropped = history.worksheets.len() - self.max_items;
            history.worksheets.truncate(self.max_items);
            debug!("历史记录超出上限 {}，丢弃最旧的 {} 条", self.max_items, dropped);
        }

        self.persist(&history, HistoryOperation::Add).await?;
        info!("✓ 练习单 {} 已保存到历史记录 (共 {} 条)", id, history.len());
        Ok(())
    }

    /// 删除指定 id；不存在时什么都不做
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut history = self.load_for_write(HistoryOperation::Delete).await?;
        let before = history.len();
        history.worksheets.retain(|w| w.id != id);

        if history.len() == before {
            debug!("历史记录中没有练习单 {}，跳过删除", id);
            return Ok(());
        }

        self.persist(&history, HistoryOperation::Delete).await?;
        info!("✓ 已删除练习单 {}", id);
        Ok(())
    }

    /// 清空全部历史
    pub async fn clear(&self) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        self.store
            .remove(&self.key)
            .await
            .map_err(|e| WorksheetError::persistence_failed(HistoryOperation::Clear, e))?;

        info!("✓ 练习单历史已清空");
        Ok(())
    }

    /// 为已保存的练习单补充 PDF 地址
    ///
    /// 返回是否找到该练习单。
    pub async fn attach_pdf(&self, id: &str, pdf_url: &str) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;

        let mut history = self.load_for_write(HistoryOperation::AttachPdf).await?;
        let Some(worksheet) = history.worksheets.iter_mut().find(|w| w.id == id) else {
            debug!("历史记录中没有练习单 {}，不记录 PDF 地址", id);
            return Ok(false);
        };
        worksheet.pdf_url = Some(pdf_url.to_string());

        self.persist(&history, HistoryOperation::AttachPdf).await?;
        Ok(true)
    }

    async fn persist(&self, history: &WorksheetHistory, operation: HistoryOperation) -> AppResult<()> {
        let json = serde_json::to_string(history)
            .map_err(|e| WorksheetError::persistence_failed(operation, StorageError::from(e)))?;

        self.store
            .set(&self.key, &json)
            .await
            .map_err(|e| WorksheetError::persistence_failed(operation, e))
    }
}

/// 逐条解析历史记录
///
/// 整体无法解析时按空历史处理；单条记录损坏时跳过该条，保留其余记录。
fn decode_history(raw: Option<&str>) -> WorksheetHistory {
    let Some(raw) = raw else {
        return WorksheetHistory::default();
    };

    let entries = match serde_json::from_str::<JsonValue>(raw) {
        Ok(JsonValue::Object(mut root)) => match root.remove("worksheets") {
            Some(JsonValue::Array(entries)) => entries,
            Some(JsonValue::Null) | None => Vec::new(),
            Some(_) => {
                warn!("⚠️ 练习单历史中 worksheets 不是数组，按空历史处理");
                return WorksheetHistory::default();
            }
        },
        Ok(_) => {
            warn!("⚠️ 练习单历史不是对象，按空历史处理");
            return WorksheetHistory::default();
        }
        Err(e) => {
            warn!("⚠️ 练习单历史内容无法解析，按空历史处理: {}", e);
            return WorksheetHistory::default();
        }
    };

    let worksheets = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<Worksheet>(entry) {
            Ok(worksheet) => Some(worksheet),
            Err(e) => {
                warn!("⚠️ 跳过第 {} 条无法解析的练习单记录: {}", index + 1, e);
                None
            }
        })
        .collect();

    WorksheetHistory { worksheets }
}
