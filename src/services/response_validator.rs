//! 返回校验 - 业务能力层
//!
//! 只负责"把 LLM 的结构化输出校验并规范化为题目列表"，无副作用

use serde_json::Value as JsonValue;

use crate::error::InvalidResponseFormat;
use crate::models::{new_id, WorksheetQuestion};

/// 校验通过的 LLM 返回
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedResponse {
    pub concept: String,
    /// 顺序与 LLM 返回一致
    pub questions: Vec<WorksheetQuestion>,
}

impl ValidatedResponse {
    /// 缺少答案的题目数量（渲染时可以容忍，但值得提示）
    pub fn missing_answers(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| q.answer.as_deref().map_or(true, |a| a.trim().is_empty()))
            .count()
    }
}

/// 校验并规范化 LLM 返回
///
/// 以下情况视为格式无效：
/// - 顶层不是对象，或缺少字符串类型的 `concept`
/// - `questions` 不是数组
/// - 任一题目缺少非空的 `question`
/// - `answer` / `explanation` 既不是字符串也不是数字
///
/// 每道题分配新的 id；答案与解析原样保留，数字答案转为字符串。
pub fn validate_response(raw: &JsonValue) -> Result<ValidatedResponse, InvalidResponseFormat> {
    let obj = raw
        .as_object()
        .ok_or_else(|| InvalidResponseFormat::new("返回内容不是 JSON 对象"))?;

    let concept = match obj.get("concept") {
        Some(JsonValue::String(s)) => s.clone(),
        Some(_) => return Err(InvalidResponseFormat::new("concept 不是字符串")),
        None => return Err(InvalidResponseFormat::new("缺少 concept")),
    };

    let items = match obj.get("questions") {
        Some(JsonValue::Array(items)) => items,
        Some(_) => return Err(InvalidResponseFormat::new("questions 不是数组")),
        None => return Err(InvalidResponseFormat::new("缺少 questions")),
    };

    let questions = items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_question(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ValidatedResponse { concept, questions })
}

fn parse_question(index: usize, item: &JsonValue) -> Result<WorksheetQuestion, InvalidResponseFormat> {
    let entry = item
        .as_object()
        .ok_or_else(|| InvalidResponseFormat::new(format!("第 {} 题不是对象", index + 1)))?;

    let question = match entry.get("question") {
        Some(JsonValue::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => {
            return Err(InvalidResponseFormat::new(format!(
                "第 {} 题缺少题干",
                index + 1
            )))
        }
    };

    Ok(WorksheetQuestion {
        id: new_id(),
        question,
        answer: optional_text(entry.get("answer"), "answer", index)?,
        explanation: optional_text(entry.get("explanation"), "explanation", index)?,
    })
}

/// 可选文本字段：缺失或 null 为 `None`，数字转成字符串
fn optional_text(
    value: Option<&JsonValue>,
    field: &str,
    index: usize,
) -> Result<Option<String>, InvalidResponseFormat> {
    match value {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(JsonValue::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(InvalidResponseFormat::new(format!(
            "第 {} 题的 {} 类型无效",
            index + 1,
            field
        ))),
    }
}
