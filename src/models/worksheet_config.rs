use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{AppResult, WorksheetError};
use crate::models::{Difficulty, Grade, MathSubject, WorksheetType};

/// 默认题目数量
pub const DEFAULT_QUESTIONS_COUNT: u32 = 10;

/// 推荐的题目数量选项
pub const QUESTIONS_COUNT_OPTIONS: [u32; 3] = [5, 10, 15];

/// 练习单生成配置
///
/// 纯数据，没有行为。`include_answers` 只影响渲染，不影响生成。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetConfig {
    #[serde(rename = "type")]
    pub kind: WorksheetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<MathSubject>,
    pub grade: Grade,
    pub difficulty: Difficulty,
    #[serde(default = "default_questions_count", deserialize_with = "lenient_questions_count")]
    pub questions_count: u32,
    #[serde(default)]
    pub include_answers: bool,
}

fn default_questions_count() -> u32 {
    DEFAULT_QUESTIONS_COUNT
}

/// 旧记录里的题目数量可能是 null、负数、小数或字符串，无法使用时回落到默认值
fn lenient_questions_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    let count = match value {
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(match count {
        Some(n) if n.is_finite() && n >= 1.0 => n.min(u32::MAX as f64) as u32,
        _ => DEFAULT_QUESTIONS_COUNT,
    })
}

impl WorksheetConfig {
    pub fn new(kind: WorksheetType, grade: Grade, difficulty: Difficulty) -> Self {
        Self {
            kind,
            subject: None,
            grade,
            difficulty,
            questions_count: DEFAULT_QUESTIONS_COUNT,
            include_answers: false,
        }
    }

    pub fn with_subject(mut self, subject: MathSubject) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_questions_count(mut self, count: u32) -> Self {
        self.questions_count = count;
        self
    }

    pub fn with_answers(mut self, include_answers: bool) -> Self {
        self.include_answers = include_answers;
        self
    }

    /// 实际请求的题目数量，非正数时回落到默认值
    pub fn effective_questions_count(&self) -> u32 {
        if self.questions_count == 0 {
            DEFAULT_QUESTIONS_COUNT
        } else {
            self.questions_count
        }
    }

    /// 对当前类型有意义的主题
    pub fn effective_subject(&self) -> Option<MathSubject> {
        self.subject.filter(|_| self.kind.accepts_subject())
    }
}

impl Default for WorksheetConfig {
    fn default() -> Self {
        Self::new(WorksheetType::Math, Grade::Kindergarten, Difficulty::Easy)
            .with_subject(MathSubject::Addition)
    }
}

/// 来自 UI 的原始配置（全部为字符串）
///
/// 在发起网络请求之前通过 [`WorksheetRequest::into_config`] 解析，
/// 无法识别的类型直接返回 `UnsupportedWorksheetType`。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub grade: String,
    pub difficulty: String,
    #[serde(default)]
    pub questions_count: Option<u32>,
    #[serde(default)]
    pub include_answers: bool,
}

impl WorksheetRequest {
    pub fn into_config(self) -> AppResult<WorksheetConfig> {
        // 类型最先解析：不支持的类型不应该浪费任何后续工作
        let kind: WorksheetType = self.kind.parse()?;
        let grade: Grade = self.grade.parse()?;
        let difficulty = self.difficulty.parse()?;
        let subject = match self.subject.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(s.parse::<MathSubject>()?),
        };

        Ok(WorksheetConfig {
            kind,
            subject,
            grade,
            difficulty,
            questions_count: self.questions_count.unwrap_or(DEFAULT_QUESTIONS_COUNT),
            include_answers: self.include_answers,
        })
    }
}

impl TryFrom<WorksheetRequest> for WorksheetConfig {
    type Error = WorksheetError;

    fn try_from(request: WorksheetRequest) -> Result<Self, Self::Error> {
        request.into_config()
    }
}
