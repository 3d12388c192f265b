//! LLM 客户端 - 生成协作方
//!
//! 只负责"发送消息 + schema，拿回结构化对象"，不校验内容
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 通过 `response_format = json_schema` 要求结构化输出
//! - 兼容 OpenAI API 的服务（自定义 API 端点和模型）

use std::time::Instant;

use anyhow::{Context, Result};
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs, ResponseFormat, ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::config::Config;
use crate::services::prompt_builder::{
    MessageRole, PromptMessage, WorksheetPrompt, RESPONSE_SCHEMA_NAME,
};
use crate::utils::logging::truncate_text;

/// 生成协作方
///
/// 返回的对象"应该"符合 schema，但调用方必须再次校验。
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &WorksheetPrompt) -> Result<JsonValue>;
}

/// OpenAI 兼容的生成客户端
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiProvider {
    /// 创建新的 LLM 客户端
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 把提示词转换为 chat completion 请求
    fn build_request(&self, prompt: &WorksheetPrompt) -> Result<CreateChatCompletionRequest> {
        let messages = prompt
            .messages
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>>>()?;

        let response_format = ResponseFormat::JsonSchema {
            json_schema: ResponseFormatJsonSchema {
                description: Some("Worksheet questions for children K-5".to_string()),
                name: RESPONSE_SCHEMA_NAME.to_string(),
                schema: Some(prompt.schema.clone()),
                strict: Some(true),
            },
        };

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .response_format(response_format)
            .build()?;

        Ok(request)
    }
}

fn to_request_message(message: &PromptMessage) -> Result<ChatCompletionRequestMessage> {
    let message = match message.role {
        MessageRole::System => ChatCompletionRequestMessage::System(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(message.content.as_str())
                .build()?,
        ),
        MessageRole::User => ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessageArgs::default()
                .content(message.content.as_str())
                .build()?,
        ),
    };
    Ok(message)
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, prompt: &WorksheetPrompt) -> Result<JsonValue> {
        debug!(
            "调用 LLM API，模型: {}，消息 {} 条，共 {} 字符",
            self.model_name,
            prompt.messages.len(),
            prompt.total_len()
        );

        let request = self.build_request(prompt)?;
        let started = Instant::now();

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            anyhow::anyhow!("LLM API 调用失败: {}", e)
        })?;

        debug!("LLM API 调用成功，耗时 {:?}", started.elapsed());

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("LLM 返回内容为空 (模型: {})", self.model_name))?;

        serde_json::from_str(content.trim()).with_context(|| {
            format!("LLM 返回的不是合法 JSON: {}", truncate_text(&content, 80))
        })
    }
}
