use std::fmt;

use thiserror::Error;

/// 练习单系统错误类型
///
/// UI 层只需要区分三类结果：生成失败、历史记录操作失败、没有内容可显示。
/// 协作方（LLM、存储、导出）的错误都在进入编排层之前转换为这里的变体。
#[derive(Debug, Error)]
pub enum WorksheetError {
    /// 练习单类型无法识别（在发起任何网络请求之前失败）
    #[error("Unsupported worksheet type: {kind}")]
    UnsupportedWorksheetType { kind: String },

    /// 配置字段无法解析
    #[error("Invalid value '{value}' for {field}")]
    InvalidConfig { field: &'static str, value: String },

    /// 生成失败，对用户只显示一条统一的提示
    #[error("Failed to generate worksheet. Please try again.")]
    GenerationFailed(#[source] GenerationError),

    /// 历史记录写入失败（生成本身可能已经成功）
    #[error("Failed to {operation}")]
    PersistenceFailed {
        operation: HistoryOperation,
        #[source]
        source: StorageError,
    },

    /// 历史记录中找不到指定练习单
    #[error("Worksheet {id} not found in history")]
    NotFound { id: String },

    /// 导出（渲染或分享）失败
    #[error("Failed to {stage} PDF")]
    ExportFailed {
        stage: ExportStage,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 生成失败的底层原因
#[derive(Debug, Error)]
pub enum GenerationError {
    /// LLM 调用本身失败（网络、服务端、结构化输出）
    #[error("LLM 调用失败: {source}")]
    Provider {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// LLM 调用超时
    #[error("LLM 调用超时 ({limit:?})")]
    Timeout { limit: std::time::Duration },

    /// LLM 返回内容未通过校验
    #[error(transparent)]
    InvalidResponse(#[from] InvalidResponseFormat),
}

/// LLM 返回格式无效
///
/// 只作为 [`GenerationError::InvalidResponse`] 的原因出现，不直接暴露给 UI。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("LLM 返回格式无效: {reason}")]
pub struct InvalidResponseFormat {
    pub reason: String,
}

impl InvalidResponseFormat {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// 键值存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    /// 读取失败
    #[error("读取 {key} 失败: {source}")]
    ReadFailed {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入失败
    #[error("写入 {key} 失败: {source}")]
    WriteFailed {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 删除失败
    #[error("删除 {key} 失败: {source}")]
    RemoveFailed {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 序列化失败
    #[error("历史记录序列化失败: {0}")]
    Encode(#[from] serde_json::Error),
}

/// 历史记录变更操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOperation {
    Add,
    Delete,
    Clear,
    AttachPdf,
}

impl fmt::Display for HistoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryOperation::Add => write!(f, "save worksheet to history"),
            HistoryOperation::Delete => write!(f, "delete worksheet"),
            HistoryOperation::Clear => write!(f, "clear worksheet history"),
            HistoryOperation::AttachPdf => write!(f, "save worksheet PDF"),
        }
    }
}

/// 导出阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Render,
    Share,
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportStage::Render => write!(f, "generate"),
            ExportStage::Share => write!(f, "share"),
        }
    }
}

// ========== 便捷构造函数 ==========

impl WorksheetError {
    /// 创建 LLM 调用失败错误
    pub fn provider_failed(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        WorksheetError::GenerationFailed(GenerationError::Provider {
            source: source.into(),
        })
    }

    /// 创建持久化失败错误
    pub fn persistence_failed(operation: HistoryOperation, source: StorageError) -> Self {
        WorksheetError::PersistenceFailed { operation, source }
    }

    /// 创建导出失败错误
    pub fn export_failed(
        stage: ExportStage,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        WorksheetError::ExportFailed {
            stage,
            source: source.into(),
        }
    }

    /// 是否属于"生成失败"类
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, WorksheetError::GenerationFailed(_))
    }

    /// 是否属于"历史记录操作失败"类
    pub fn is_persistence_failure(&self) -> bool {
        matches!(self, WorksheetError::PersistenceFailed { .. })
    }
}

impl From<InvalidResponseFormat> for WorksheetError {
    fn from(err: InvalidResponseFormat) -> Self {
        WorksheetError::GenerationFailed(GenerationError::InvalidResponse(err))
    }
}

impl StorageError {
    pub fn read_failed(key: impl Into<String>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        StorageError::ReadFailed {
            key: key.into(),
            source: Box::new(source),
        }
    }

    pub fn write_failed(key: impl Into<String>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        StorageError::WriteFailed {
            key: key.into(),
            source: Box::new(source),
        }
    }

    pub fn remove_failed(key: impl Into<String>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        StorageError::RemoveFailed {
            key: key.into(),
            source: Box::new(source),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, WorksheetError>;
