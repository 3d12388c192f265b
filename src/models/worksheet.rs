use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{WorksheetConfig, WorksheetType};

/// 生成唯一标识（UUID v4，32 位十六进制）
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// 练习单中的一道题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetQuestion {
    /// 仅在本练习单内唯一，用作列表 key
    pub id: String,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// 生成好的练习单
///
/// 由生成器在校验通过后一次性创建；之后只有 `pdf_url` 可以被补充。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worksheet {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WorksheetType,
    pub created_at: DateTime<Utc>,
    pub config: WorksheetConfig,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept: Option<String>,
    #[serde(default)]
    pub questions: Vec<WorksheetQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
}

impl Worksheet {
    /// 组装新练习单：分配 id、记录当前时间、推导标题
    pub fn assemble(
        config: WorksheetConfig,
        concept: Option<String>,
        questions: Vec<WorksheetQuestion>,
    ) -> Self {
        Self {
            id: new_id(),
            kind: config.kind,
            created_at: Utc::now(),
            title: Self::derive_title(&config),
            config,
            concept,
            questions,
            pdf_url: None,
        }
    }

    /// `"{类型首字母大写} Worksheet - Grade {年级}"`
    pub fn derive_title(config: &WorksheetConfig) -> String {
        format!(
            "{} Worksheet - Grade {}",
            config.kind.title_name(),
            config.grade.code()
        )
    }
}

/// 练习单历史（最新的在前）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorksheetHistory {
    #[serde(default)]
    pub worksheets: Vec<Worksheet>,
}

impl WorksheetHistory {
    pub fn len(&self) -> usize {
        self.worksheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|w| w.id == id)
    }
}
