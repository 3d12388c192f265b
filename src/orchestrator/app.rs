use std::sync::Arc;

use tracing::info;

use crate::clients::{CompletionProvider, OpenAiProvider};
use crate::config::Config;
use crate::error::{AppResult, WorksheetError};
use crate::infrastructure::{DocumentRenderer, FileStore, HtmlFileRenderer, KeyValueStore};
use crate::models::{Worksheet, WorksheetHistory, WorksheetRequest};
use crate::services::{to_plain_text, ExportService, HistoryStore};
use crate::utils::logging::log_startup;
use crate::workflow::WorksheetGenerator;

/// 应用主结构
///
/// 显式构造并持有所有服务，每个用户操作对应一个方法
pub struct App {
    config: Config,
    history: Arc<HistoryStore>,
    generator: WorksheetGenerator,
    exporter: ExportService,
}

impl App {
    /// 使用默认协作方初始化：文件存储 + OpenAI 兼容接口 + HTML 文件导出
    pub fn initialize(config: Config) -> Self {
        log_startup(&config);

        let provider = Arc::new(OpenAiProvider::new(&config));
        let store = Arc::new(FileStore::new(&config.storage_dir));
        let renderer = Arc::new(HtmlFileRenderer::new(&config.export_dir));

        Self::with_collaborators(config, provider, store, renderer)
    }

    /// 注入自定义协作方（测试或其他运行环境）
    pub fn with_collaborators(
        config: Config,
        provider: Arc<dyn CompletionProvider>,
        store: Arc<dyn KeyValueStore>,
        renderer: Arc<dyn DocumentRenderer>,
    ) -> Self {
        let history = Arc::new(HistoryStore::with_capacity(store, config.history_max_items));
        let generator = WorksheetGenerator::new(provider, history.clone(), &config);
        let exporter = ExportService::new(renderer, history.clone());

        Self {
            config,
            history,
            generator,
            exporter,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 生成练习单
    ///
    /// 先解析原始配置，无法识别的类型在调用 LLM 之前就返回错误
    pub async fn generate(&self, request: WorksheetRequest) -> AppResult<Worksheet> {
        let config = request.into_config()?;
        self.generator.generate(&config).await
    }

    /// 历史记录（最新在前）
    pub async fn history(&self) -> WorksheetHistory {
        self.history.list().await
    }

    pub async fn show(&self, id: &str) -> AppResult<Worksheet> {
        self.history
            .get(id)
            .await
            .ok_or_else(|| WorksheetError::NotFound { id: id.to_string() })
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.history.delete(id).await
    }

    pub async fn clear(&self) -> AppResult<()> {
        self.history.clear().await
    }

    /// 导出历史中的练习单
    ///
    /// `include_answers` 为空时沿用生成时的设置
    pub async fn export(&self, id: &str, include_answers: Option<bool>) -> AppResult<String> {
        let worksheet = self.show(id).await?;
        let include_answers = include_answers.unwrap_or(worksheet.config.include_answers);
        let handle = self.exporter.export(&worksheet, include_answers).await?;
        info!("✓ 导出完成: {}", handle);
        Ok(handle)
    }

    /// 预览文本，是否带答案取决于生成时的配置
    pub fn preview(worksheet: &Worksheet) -> String {
        to_plain_text(worksheet, worksheet.config.include_answers)
    }
}
