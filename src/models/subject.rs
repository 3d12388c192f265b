use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WorksheetError;

/// 数学主题枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MathSubject {
    /// 加法
    Addition,
    /// 减法
    Subtraction,
    /// 乘法
    Multiplication,
    /// 除法
    Division,
    /// 分数
    Fractions,
    /// 小数
    Decimals,
    /// 几何
    Geometry,
    /// 代数
    Algebra,
    /// 规律
    Patterns,
    /// 测量
    Measurement,
    /// 时间
    Time,
    /// 货币
    Money,
    /// 随机（交给 LLM 决定）
    Random,
}

impl MathSubject {
    pub const ALL: [MathSubject; 13] = [
        MathSubject::Addition,
        MathSubject::Subtraction,
        MathSubject::Multiplication,
        MathSubject::Division,
        MathSubject::Fractions,
        MathSubject::Decimals,
        MathSubject::Geometry,
        MathSubject::Algebra,
        MathSubject::Patterns,
        MathSubject::Measurement,
        MathSubject::Time,
        MathSubject::Money,
        MathSubject::Random,
    ];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            MathSubject::Addition => "Addition",
            MathSubject::Subtraction => "Subtraction",
            MathSubject::Multiplication => "Multiplication",
            MathSubject::Division => "Division",
            MathSubject::Fractions => "Fractions",
            MathSubject::Decimals => "Decimals",
            MathSubject::Geometry => "Geometry",
            MathSubject::Algebra => "Algebra",
            MathSubject::Patterns => "Patterns",
            MathSubject::Measurement => "Measurement",
            MathSubject::Time => "Time",
            MathSubject::Money => "Money",
            MathSubject::Random => "Random",
        }
    }
}

impl FromStr for MathSubject {
    type Err = WorksheetError;

    /// 不区分大小写匹配
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|subject| subject.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| WorksheetError::InvalidConfig {
                field: "subject",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for MathSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
