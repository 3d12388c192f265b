//! 导出服务 - 业务能力层
//!
//! 负责"练习单 → 文档 → 渲染 → 分享"，并把生成的文件记回历史

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{AppResult, ExportStage, WorksheetError};
use crate::infrastructure::DocumentRenderer;
use crate::models::Worksheet;
use crate::services::formatter::{render_document, DocumentOptions};
use crate::services::HistoryStore;

/// 导出服务
pub struct ExportService {
    renderer: Arc<dyn DocumentRenderer>,
    history: Arc<HistoryStore>,
    options: DocumentOptions,
}

impl ExportService {
    pub fn new(renderer: Arc<dyn DocumentRenderer>, history: Arc<HistoryStore>) -> Self {
        Self {
            renderer,
            history,
            options: DocumentOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DocumentOptions) -> Self {
        self.options = options;
        self
    }

    /// 导出并分享，返回文件句柄
    ///
    /// 渲染或分享失败返回 `ExportFailed`；
    /// 文件句柄写回历史失败只记录日志，不影响导出结果。
    pub async fn export(&self, worksheet: &Worksheet, include_answers: bool) -> AppResult<String> {
        let html = render_document(worksheet, include_answers, &self.options);

        let handle = self
            .renderer
            .render(&html, &worksheet.id)
            .await
            .map_err(|e| WorksheetError::export_failed(ExportStage::Render, e))?;

        self.renderer
            .share(&handle)
            .await
            .map_err(|e| WorksheetError::export_failed(ExportStage::Share, e))?;

        match self.history.attach_pdf(&worksheet.id, &handle).await {
            Ok(true) => info!("✓ 练习单 {} 的导出文件已记录", worksheet.id),
            Ok(false) => {}
            Err(e) => warn!("⚠️ 导出文件未能记录到历史: {}", e),
        }

        Ok(handle)
    }
}
