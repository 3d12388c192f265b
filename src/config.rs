use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// 程序配置
///
/// 加载顺序：默认值 → TOML 文件（可选）→ 环境变量
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    /// 单次生成的超时时间（秒）
    pub generation_timeout_secs: u64,
    // --- 历史记录 ---
    /// 最多保留的练习单数量
    pub history_max_items: usize,
    /// 键值存储目录
    pub storage_dir: PathBuf,
    // --- 导出 ---
    pub export_dir: PathBuf,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            llm_temperature: 0.7,
            llm_max_tokens: 1024,
            generation_timeout_secs: 60,
            history_max_items: 10,
            storage_dir: PathBuf::from(".worksheets"),
            export_dir: PathBuf::from("exports"),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 只从环境变量加载（未设置的字段使用默认值）
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// 从 TOML 文件加载，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("无法解析配置文件: {}", path.display()))
    }

    /// 完整加载流程
    ///
    /// `path` 为空时尝试 `WORKSHEET_CONFIG` 环境变量；两者都没有则跳过文件层。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var("WORKSHEET_CONFIG").ok().map(PathBuf::from);
        let base = match path.map(Path::to_path_buf).or(env_path) {
            Some(p) => Self::from_toml_file(&p)?,
            None => Self::default(),
        };
        Ok(base.with_env())
    }

    /// 用环境变量覆盖当前值，解析失败时保留原值
    pub fn with_env(self) -> Self {
        Self {
            llm_api_key: std::env::var("LLM_API_KEY")
                .or_else(|_| std::env::var("OPENAI_API_KEY"))
                .unwrap_or(self.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            llm_temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(self.llm_temperature),
            llm_max_tokens: std::env::var("LLM_MAX_TOKENS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.llm_max_tokens),
            generation_timeout_secs: std::env::var("GENERATION_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.generation_timeout_secs),
            history_max_items: std::env::var("HISTORY_MAX_ITEMS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.history_max_items),
            storage_dir: std::env::var("STORAGE_DIR").map(PathBuf::from).unwrap_or(self.storage_dir),
            export_dir: std::env::var("EXPORT_DIR").map(PathBuf::from).unwrap_or(self.export_dir),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs.max(1))
    }
}
