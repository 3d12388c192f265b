//! 提示词构建 - 业务能力层
//!
//! 只负责"把配置变成 LLM 指令 + 输出结构"，不发起任何网络请求

use serde_json::{json, Value as JsonValue};

use crate::models::{WorksheetConfig, WorksheetType};

/// 结构化输出的 schema 名称
pub const RESPONSE_SCHEMA_NAME: &str = "worksheet";

/// 消息角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
}

/// 单条指令消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMessage {
    pub role: MessageRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// 发给生成协作方的完整请求：有序消息 + 期望的输出 schema
#[derive(Debug, Clone, PartialEq)]
pub struct WorksheetPrompt {
    pub messages: Vec<PromptMessage>,
    pub schema: JsonValue,
}

impl WorksheetPrompt {
    /// 所有消息的总字符数（仅用于日志）
    pub fn total_len(&self) -> usize {
        self.messages.iter().map(|m| m.content.len()).sum()
    }
}

/// 根据配置构建提示词
///
/// 消息顺序：
/// 1. 角色设定（system）
/// 2. 数量 / 难度 / 类型 / 年级
/// 3. 主题（仅当设置了主题且类型接受主题）
/// 4. 类型专属说明
pub fn build_prompt(config: &WorksheetConfig) -> WorksheetPrompt {
    let mut messages = Vec::with_capacity(4);

    messages.push(PromptMessage::system(
        "You are an expert at generating worksheets for children K-5. \
         Respond only with JSON that matches the provided schema.",
    ));

    messages.push(PromptMessage::user(format!(
        "Generate {} {} level {} questions for grade {}",
        config.effective_questions_count(),
        config.difficulty.code(),
        config.kind.code(),
        config.grade.code()
    )));

    if let Some(subject) = config.effective_subject() {
        messages.push(PromptMessage::user(format!("Focus on subject: {}", subject.name())));
    }

    messages.push(PromptMessage::user(type_elaboration(config.kind)));

    WorksheetPrompt {
        messages,
        schema: response_schema(),
    }
}

/// 类型专属说明
pub fn type_elaboration(kind: WorksheetType) -> &'static str {
    match kind {
        WorksheetType::Math => {
            "Include basic arithmetic operations appropriate for the grade level"
        }
        WorksheetType::Puzzle => {
            "Create engaging mathematical puzzles that involve pattern recognition and problem-solving"
        }
        WorksheetType::WordProblem => "Generate real-world math word problems",
        WorksheetType::Logic => {
            "Create age-appropriate logic puzzles that develop critical thinking"
        }
    }
}

/// 期望的输出结构
///
/// `{ concept: string, questions: [{ question, answer, explanation? }] }`，
/// 严格模式要求所有字段出现在 required 中，因此 explanation 以可空字符串表示。
pub fn response_schema() -> JsonValue {
    json!({
        "type": "object",
        "properties": {
            "concept": {
                "type": "string",
                "description": "Concept for the worksheet"
            },
            "questions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "question": { "type": "string", "description": "Question" },
                        "answer": { "type": "string", "description": "Answer" },
                        "explanation": {
                            "type": ["string", "null"],
                            "description": "Explanation"
                        }
                    },
                    "required": ["question", "answer", "explanation"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["concept", "questions"],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, Grade, MathSubject};

    fn count_containing(prompt: &WorksheetPrompt, needle: &str) -> usize {
        prompt
            .messages
            .iter()
            .filter(|m| m.content.contains(needle))
            .count()
    }

    #[test]
    fn test_math_prompt_with_subject() {
        let config = WorksheetConfig::new(WorksheetType::Math, Grade::First, Difficulty::Easy)
            .with_subject(MathSubject::Addition)
            .with_questions_count(5);

        let prompt = build_prompt(&config);

        assert_eq!(prompt.messages.len(), 4);
        assert_eq!(prompt.messages[0].role, MessageRole::System);
        assert!(prompt.messages[0].content.contains("expert at generating worksheets for children K-5"));
        assert_eq!(
            prompt.messages[1].content,
            "Generate 5 easy level math questions for grade 1"
        );
        assert_eq!(prompt.messages[2].content, "Focus on subject: Addition");
        assert!(prompt.messages[1..].iter().all(|m| m.role == MessageRole::User));
    }

    #[test]
    fn test_exactly_one_quantity_instruction_for_every_type() {
        for kind in WorksheetType::ALL {
            for grade in Grade::ALL {
                for difficulty in Difficulty::ALL {
                    let config = WorksheetConfig::new(kind, grade, difficulty)
                        .with_subject(MathSubject::Random);
                    let prompt = build_prompt(&config);

                    assert_eq!(count_containing(&prompt, "questions for grade"), 1);
                    assert_eq!(
                        count_containing(&prompt, "Focus on subject"),
                        usize::from(kind.accepts_subject())
                    );
                    assert!(prompt.messages.len() == 3 || prompt.messages.len() == 4);
                }
            }
        }
    }

    #[test]
    fn test_no_subject_instruction_without_subject() {
        let config = WorksheetConfig::new(WorksheetType::Puzzle, Grade::Second, Difficulty::Medium);
        let prompt = build_prompt(&config);
        assert_eq!(prompt.messages.len(), 3);
        assert_eq!(count_containing(&prompt, "Focus on subject"), 0);
    }

    #[test]
    fn test_logic_never_gets_subject() {
        let config = WorksheetConfig::new(WorksheetType::Logic, Grade::Fourth, Difficulty::Hard)
            .with_subject(MathSubject::Fractions);
        let prompt = build_prompt(&config);
        assert_eq!(count_containing(&prompt, "Fractions"), 0);
        assert!(prompt.messages.last().unwrap().content.contains("logic puzzles"));
    }

    #[test]
    fn test_zero_count_uses_default() {
        let config = WorksheetConfig::default().with_questions_count(0);
        let prompt = build_prompt(&config);
        assert!(prompt.messages[1].content.starts_with("Generate 10 "));
    }

    #[test]
    fn test_schema_shape() {
        let schema = response_schema();
        assert_eq!(schema["required"], json!(["concept", "questions"]));
        assert_eq!(schema["properties"]["questions"]["type"], "array");
    }
}
