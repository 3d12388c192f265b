use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WorksheetError;

/// 年级（幼儿园到五年级）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "K")]
    Kindergarten,
    #[serde(rename = "1")]
    First,
    #[serde(rename = "2")]
    Second,
    #[serde(rename = "3")]
    Third,
    #[serde(rename = "4")]
    Fourth,
    #[serde(rename = "5")]
    Fifth,
}

impl Grade {
    pub const ALL: [Grade; 6] = [
        Grade::Kindergarten,
        Grade::First,
        Grade::Second,
        Grade::Third,
        Grade::Fourth,
        Grade::Fifth,
    ];

    /// 获取年级代码
    pub fn code(self) -> &'static str {
        match self {
            Grade::Kindergarten => "K",
            Grade::First => "1",
            Grade::Second => "2",
            Grade::Third => "3",
            Grade::Fourth => "4",
            Grade::Fifth => "5",
        }
    }

    /// 获取显示名称
    pub fn label(self) -> &'static str {
        match self {
            Grade::Kindergarten => "Kindergarten",
            Grade::First => "1st Grade",
            Grade::Second => "2nd Grade",
            Grade::Third => "3rd Grade",
            Grade::Fourth => "4th Grade",
            Grade::Fifth => "5th Grade",
        }
    }
}

impl FromStr for Grade {
    type Err = WorksheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "K" | "k" => Ok(Grade::Kindergarten),
            "1" => Ok(Grade::First),
            "2" => Ok(Grade::Second),
            "3" => Ok(Grade::Third),
            "4" => Ok(Grade::Fourth),
            "5" => Ok(Grade::Fifth),
            other => Err(WorksheetError::InvalidConfig {
                field: "grade",
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
