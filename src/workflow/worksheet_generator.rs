//! 练习单生成流程 - 流程层
//!
//! 核心职责：定义"一张练习单"的完整生成流程
//!
//! 流程顺序：
//! 1. 构建提示词
//! 2. 调用 LLM（带超时，不重试）
//! 3. 校验返回
//! 4. 组装练习单
//! 5. 写入历史（失败不影响返回结果）

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::clients::CompletionProvider;
use crate::config::Config;
use crate::error::{AppResult, GenerationError, WorksheetError};
use crate::models::{Worksheet, WorksheetConfig};
use crate::services::{build_prompt, validate_response, HistoryStore};

/// 练习单生成器
///
/// - 编排 提示词 → LLM → 校验 → 组装 → 历史
/// - 不持有存储资源，只依赖协作方接口
/// - 生成是否成功与历史是否写入相互独立
pub struct WorksheetGenerator {
    provider: Arc<dyn CompletionProvider>,
    history: Arc<HistoryStore>,
    timeout: Duration,
}

impl WorksheetGenerator {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        history: Arc<HistoryStore>,
        config: &Config,
    ) -> Self {
        Self {
            provider,
            history,
            timeout: config.generation_timeout(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn generate(&self, config: &WorksheetConfig) -> AppResult<Worksheet> {
        info!(
            "📝 开始生成练习单: {} | 年级 {} | 难度 {} | {} 题",
            config.kind,
            config.grade,
            config.difficulty,
            config.effective_questions_count()
        );

        let prompt = build_prompt(config);
        debug!("提示词共 {} 条消息", prompt.messages.len());

        let raw = match tokio::time::timeout(self.timeout, self.provider.complete(&prompt)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                warn!("⚠️ LLM 调用失败: {:#}", e);
                return Err(WorksheetError::provider_failed(e));
            }
            Err(_) => {
                warn!("⚠️ LLM 调用超时 ({:?})", self.timeout);
                return Err(WorksheetError::GenerationFailed(GenerationError::Timeout {
                    limit: self.timeout,
                }));
            }
        };

        let response = validate_response(&raw).map_err(|e| {
            warn!("⚠️ {}", e);
            WorksheetError::from(e)
        })?;

        let missing = response.missing_answers();
        if missing > 0 {
            warn!("⚠️ LLM 返回的 {} 道题目缺少答案", missing);
        }

        let concept = Some(response.concept).filter(|c| !c.trim().is_empty());
        let worksheet = Worksheet::assemble(config.clone(), concept, response.questions);

        info!(
            "✓ 练习单生成完成: {} ({} 题)",
            worksheet.title,
            worksheet.questions.len()
        );

        if let Err(e) = self.history.add(worksheet.clone()).await {
            warn!("⚠️ 练习单已生成，但保存历史失败: {}", e);
        }

        Ok(worksheet)
    }
}
