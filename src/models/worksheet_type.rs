use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WorksheetError;

/// 练习单类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorksheetType {
    /// 基础算术
    Math,
    /// 数学谜题
    Puzzle,
    /// 应用题
    WordProblem,
    /// 逻辑题
    Logic,
}

impl WorksheetType {
    pub const ALL: [WorksheetType; 4] = [
        WorksheetType::Math,
        WorksheetType::Puzzle,
        WorksheetType::WordProblem,
        WorksheetType::Logic,
    ];

    /// 获取线上代码（持久化与提示词中使用）
    pub fn code(self) -> &'static str {
        match self {
            WorksheetType::Math => "math",
            WorksheetType::Puzzle => "puzzle",
            WorksheetType::WordProblem => "word-problem",
            WorksheetType::Logic => "logic",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WorksheetType::Math => "Math Worksheets",
            WorksheetType::Puzzle => "Math Puzzles",
            WorksheetType::WordProblem => "Word Problems",
            WorksheetType::Logic => "Logic Puzzles",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WorksheetType::Math => "Basic arithmetic operations and number skills",
            WorksheetType::Puzzle => "Fun mathematical puzzles and brain teasers",
            WorksheetType::WordProblem => "Real-world math application problems",
            WorksheetType::Logic => "Critical thinking and reasoning puzzles",
        }
    }

    /// 该类型是否接受数学主题
    pub fn accepts_subject(self) -> bool {
        !matches!(self, WorksheetType::Logic)
    }

    /// 标题用名称：代码首字母大写，其余保持原样（如 "Word-problem"）
    pub fn title_name(self) -> String {
        let code = self.code();
        let mut chars = code.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl FromStr for WorksheetType {
    type Err = WorksheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "math" => Ok(WorksheetType::Math),
            "puzzle" => Ok(WorksheetType::Puzzle),
            "word-problem" => Ok(WorksheetType::WordProblem),
            "logic" => Ok(WorksheetType::Logic),
            other => Err(WorksheetError::UnsupportedWorksheetType {
                kind: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for WorksheetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_types() {
        for kind in WorksheetType::ALL {
            assert_eq!(kind.code().parse::<WorksheetType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_type_is_unsupported() {
        let err = "poetry".parse::<WorksheetType>().unwrap_err();
        assert!(matches!(
            err,
            WorksheetError::UnsupportedWorksheetType { ref kind } if kind == "poetry"
        ));
    }

    #[test]
    fn test_title_name() {
        assert_eq!(WorksheetType::Math.title_name(), "Math");
        assert_eq!(WorksheetType::WordProblem.title_name(), "Word-problem");
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&WorksheetType::WordProblem).unwrap();
        assert_eq!(json, "\"word-problem\"");
    }
}
